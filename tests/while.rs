#[macro_use]
mod common;

#[cfg(test)]
mod _while {
    tests! {
        count in while is OK
        "0"
        "1"
        "2"
    }

    tests! {
        else_taken in while is OK
        "else"
    }

    tests! {
        else_skipped in while is OK
        "0"
        "1"
        "done"
    }

    tests! {
        break_inside in while is OK
        "0"
        "1"
        "2"
        "after"
    }
}
