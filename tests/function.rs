#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        declare_and_call in function is OK
        "3"
        "concat"
    }

    tests! {
        arrow in function is OK
        "42"
        "42"
    }

    tests! {
        display in function is OK
        "<fn f>"
        "<native fn Clock>"
    }

    tests! {
        recursion in function is OK
        "3"
        "2"
        "1"
    }

    tests! {
        parameters_are_local in function is OK
        "local"
        "global"
    }

    tests! {
        arity in function is ERR
        "Expected 2 arguments, but got 1."
        "[line 4]"
    }

    tests! {
        not_callable in function is ERR
        "Can only call functions."
        "[line 1]"
    }
}
