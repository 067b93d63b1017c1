#[macro_use]
mod common;

#[cfg(test)]
mod _break {
    tests! {
        inside_while in break is OK
        "0"
        "1"
        "2"
    }

    tests! {
        inside_for in break is OK
        "0"
        "1"
        "2"
    }

    tests! {
        nested in break is OK
        "inside"
        "outside"
    }

    tests! {
        after_inner_loop in break is OK
        "2"
    }

    tests! {
        no_loop in break is ERR
        "[line 2] Error at 'break': break is not allowed here."
    }

    tests! {
        in_while_else in break is ERR
        "[line 1] Error at 'break': break is not allowed here."
    }

    tests! {
        in_function_in_loop in break is ERR
        "[line 3] Error at 'break': break is not allowed here."
    }
}
