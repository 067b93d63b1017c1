#[macro_use]
mod common;

#[cfg(test)]
mod _if {
    tests! {
        if_else in if is OK
        "then"
        "else"
        "yes"
    }

    tests! {
        truthiness in if is OK
        "not zero"
        "one"
        "empty string"
        "no none"
    }

    tests! {
        dangling_else in if is OK
        "dangling"
    }
}
