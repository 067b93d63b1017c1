#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        count in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        no_clauses in for is OK
        "2"
    }

    tests! {
        existing_variable in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        closure_in_body in for is OK
        "2"
    }
}
