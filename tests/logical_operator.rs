#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        values in logical_operator is OK
        "2"
        "false"
        "none"
        "1"
        "2"
        "fallback"
        "0"
        "1"
    }

    tests! {
        short_circuit in logical_operator is OK
        "false"
        "true"
        "called"
        "true"
    }
}
