#[macro_use]
mod common;

#[cfg(test)]
mod _return {
    tests! {
        fib in return is OK
        "55"
    }

    tests! {
        implicit_none in return is OK
        "none"
        "none"
    }

    tests! {
        unwinds_blocks in return is OK
        "deep"
    }

    tests! {
        in_while in return is OK
        "5"
    }

    tests! {
        top_level in return is ERR
        "[line 1] Error at 'return': Can't return from top level code."
    }
}
