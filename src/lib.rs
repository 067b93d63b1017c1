//! Slang is a small dynamically typed scripting language with lexical
//! scoping, first-class functions and classes. It is executed by a tree-walk
//! interpreter with a hand-written recursive descent parser.
//!
//! A run is a linear pipeline; each stage consumes the previous stage's
//! output and reports its problems through the [`error`](error) module:
//!
//! 1. **Scanning** — the [`scanner`](scanner) turns source text into a flat
//!    list of [`tokens`](token). Trivial problems like an unterminated string
//!    or a stray character are reported here, and the scan keeps going so one
//!    bad character does not hide the rest.
//! 2. **Parsing** — the [`parser`](parser) turns the tokens into a tree of
//!    [`expressions`](expr::Expr) and [`statements`](stmt::Stmt). On a syntax
//!    error it synchronizes to the next statement boundary and keeps parsing,
//!    so several errors can surface in a single run.
//! 3. **Resolving** — the [`resolver`](resolver) walks the tree once and
//!    records, for every variable reference, how many frames away its binding
//!    lives. It also rejects code that is syntactically fine but semantically
//!    wrong, like `return` at the top level or reading a local in its own
//!    initializer.
//! 4. **Interpreting** — the [`interpreter`](interpreter) walks the tree
//!    again and evaluates it against a chain of
//!    [`environment`](environment::Environment) frames. Runtime errors unwind
//!    to the top of the run and are reported with the offending line.
//!
//! If any of the first three stages reported an error the run stops before
//! execution: there is no point running code that is already known to be
//! wrong.

use std::fs;
use std::io::Write;
use std::process;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The driver: owns the interpreter and feeds it files or prompt lines.
/// Program output goes to the given sink, which tests swap for a buffer.
#[allow(non_camel_case_types)]
pub struct slang<'a> {
    interpreter: interpreter::Interpreter<'a>,
}

impl<'a> slang<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        slang {
            interpreter: interpreter::Interpreter::new(output),
        }
    }

    /// Runs a script file. Exits with 65 on a static error and 70 on a
    /// runtime error.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("Should have been able to read the file");

        self.run(&contents);

        if error::has_error() {
            process::exit(65);
        }
        if error::has_runtime_error() {
            process::exit(70);
        }
    }

    /// Runs the interactive prompt. An empty line ends the session; history
    /// is kept in the user's home directory across sessions.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("terminal to support line editing");

        let history = home::home_dir().map(|dir| dir.join(".slang_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if line.is_empty() {
                        break;
                    }

                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line);

                    // One bad line must not poison the next one.
                    error::clear_static_error();
                },
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(_) => break,
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }

    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::has_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::has_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::has_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}
