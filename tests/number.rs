#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        display in number is OK
        "7"
        "2.500000"
        "0.500000"
        "-0"
        "300"
    }
}
