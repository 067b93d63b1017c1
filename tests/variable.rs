#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        declare in variable is OK
        "1"
        "none"
    }

    tests! {
        assign in variable is OK
        "2"
        "3"
    }

    tests! {
        shadow in variable is OK
        "inner"
        "outer"
    }

    tests! {
        undefined in variable is ERR
        "Undefined variable 'a'."
        "[line 1]"
    }

    tests! {
        assign_undefined in variable is ERR
        "Undefined variable 'a'."
        "[line 1]"
    }

    tests! {
        redeclare in variable is ERR
        "[line 3] Error at 'a': Already variable with this name in this scope."
    }

    tests! {
        own_initializer in variable is ERR
        "[line 3] Error at 'a': Can't read local variable in its own initializer."
    }
}
