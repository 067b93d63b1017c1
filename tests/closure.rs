#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        counter in closure is OK
        "1"
        "2"
        "3"
    }

    tests! {
        independent in closure is OK
        "1"
        "2"
        "1"
    }

    tests! {
        resolver_isolation in closure is OK
        "outer"
        "outer"
    }

    tests! {
        shared_state in closure is OK
        "2"
    }

    tests! {
        close_over_parameter in closure is OK
        "param"
    }
}
