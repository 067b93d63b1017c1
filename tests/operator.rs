#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add in operator is OK
        "579"
        "concat"
    }

    tests! {
        arithmetic in operator is OK
        "2"
        "7"
        "2"
        "2.500000"
    }

    tests! {
        comparison in operator is OK
        "true"
        "true"
        "false"
        "true"
        "true"
        "false"
    }

    tests! {
        unary in operator is OK
        "-3"
        "false"
        "true"
        "true"
        "false"
        "false"
    }

    tests! {
        add_mismatch in operator is ERR
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        subtract_string in operator is ERR
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        negate_string in operator is ERR
        "Operand must be a number."
        "[line 1]"
    }

    tests! {
        compare_mixed in operator is ERR
        "Operands must be numbers."
        "[line 1]"
    }
}
