#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        scope in block is OK
        "2"
        "1"
    }

    tests! {
        nested in block is OK
        "global"
        "outer"
        "inner"
    }
}
