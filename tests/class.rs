#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        declare in class is OK
        "class <Point>"
        "instance of class <Point>"
    }

    tests! {
        method_table in class is OK
        "hi"
        "bye"
    }

    tests! {
        constructor_arity in class is ERR
        "Expected 0 arguments, but got 1."
        "[line 2]"
    }
}
