#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        get_set in field is OK
        "7"
    }

    tests! {
        separate_instances in field is OK
        "1"
        "2"
    }

    tests! {
        shadow_method in field is OK
        "method"
        "field"
    }

    tests! {
        method_is_unbound in field is OK
        "widget"
    }

    tests! {
        undefined_property in field is ERR
        "Undefined property 'x'."
        "[line 3]"
    }

    tests! {
        on_none in field is ERR
        "Only instances have properties."
        "[line 1]"
    }

    tests! {
        set_on_string in field is ERR
        "Only instances have fields."
        "[line 1]"
    }
}
