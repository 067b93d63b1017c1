#[macro_use]
mod common;

#[cfg(test)]
mod bool {
    tests! {
        equality in bool is OK
        "false"
        "true"
        "false"
        "true"
        "true"
        "true"
        "false"
        "false"
    }
}
