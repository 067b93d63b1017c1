#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    use assert_cmd::Command;

    tests! {
        clock in misc is OK
        "<native fn Clock>"
        "true"
        "true"
    }

    tests! {
        unexpected_character in misc is ERR
        "[line 1] Error : Unexpected character."
    }

    tests! {
        missing_semicolon in misc is ERR
        "[line 1] Error at end: Expect ';' after value."
    }

    tests! {
        invalid_assignment in misc is ERR
        "[line 1] Error at '=': Invalid assignment target."
    }

    tests! {
        multiple_errors in misc is ERR
        "[line 1] Error at '=': Expect variable name."
        "[line 2] Error at end: Expect ';' after value."
    }

    #[test]
    fn usage_exits_with_64() {
        Command::cargo_bin("slang").unwrap()
            .args(["one.slang", "two.slang"])
            .assert()
            .stdout("Usage: slang [script]\n")
            .code(64);
    }

    #[test]
    fn static_error_exits_with_65() {
        Command::cargo_bin("slang").unwrap()
            .arg("tests/target/misc/missing_semicolon.slang")
            .assert()
            .code(65);
    }

    #[test]
    fn runtime_error_exits_with_70() {
        Command::cargo_bin("slang").unwrap()
            .arg("tests/target/variable/undefined.slang")
            .assert()
            .code(70);
    }

    #[test]
    fn clean_run_exits_with_0() {
        Command::cargo_bin("slang").unwrap()
            .arg("tests/target/block/scope.slang")
            .assert()
            .stdout("2\n1\n")
            .success();
    }
}
