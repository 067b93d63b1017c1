use std::sync::atomic::{AtomicBool, Ordering};

use crate::object::Object;
use crate::token::{Token, Type};

static HAD_ERROR: AtomicBool = AtomicBool::new(false);
static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

/// Checks if a static error occurred during scanning, parsing or resolution.
/// A latched static error suppresses execution of the current run.
pub fn has_error() -> bool {
    HAD_ERROR.load(Ordering::Relaxed)
}

/// Checks if an error occurred during runtime.
pub fn has_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.load(Ordering::Relaxed)
}

/// Resets the static error latch.
/// The prompt calls this between lines so one bad line does not poison the session.
pub fn clear_static_error() {
    HAD_ERROR.store(false, Ordering::Relaxed);
}

/// Reports a diagnostic on standard error and latches the static error flag.
fn report(line: usize, location: &str, message: &str) {
    eprintln!("[line {line}] Error {location}: {message}");
    HAD_ERROR.store(true, Ordering::Relaxed);
}

/// Every error type must implement this trait.
pub trait Error {
    /// Prints the error message and sets the matching error flag.
    fn throw(&self);
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self) {
        report(self.line, "", &self.message);
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self) {
        if self.token.r#type == Type::EOF {
            report(self.token.line, "at end", &self.message);
        } else {
            report(self.token.line, &format!("at '{}'", self.token.lexeme), &self.message);
        }
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self) {
        report(self.token.line, &format!("at '{}'", self.token.lexeme), &self.message);
    }
}

/// Represents an error that occurs during runtime.
/// Runtime errors unwind evaluation to the top-level `interpret`, which
/// reports them; they never abort the process directly.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self) {
        eprintln!("{message}\n[line {line}]", message = self.message, line = self.token.line);
        HAD_RUNTIME_ERROR.store(true, Ordering::Relaxed);
    }
}

/// A control transfer unwinding evaluation. `Return` and `Break` are not
/// errors; they are consumed by the function call and the innermost loop
/// respectively. `Error` carries a runtime failure to the top level.
#[derive(Debug)]
pub enum Signal {
    Error(RuntimeError),
    Return(Object),
    Break,
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Signal::Error(error)
    }
}
