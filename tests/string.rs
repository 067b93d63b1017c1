#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        concat in string is OK
        "Hello, World!"
    }

    tests! {
        multiline in string is OK
        "one"
        "two"
        "9"
    }

    tests! {
        lines_after_multiline in string is ERR
        "Undefined variable 't'."
        "[line 3]"
    }

    tests! {
        unterminated in string is ERR
        "[line 1] Error : Unterminated string."
    }
}
