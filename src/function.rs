use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::Signal;
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{FnData, Stmt};
use crate::token::{Token, Type};

/// A user defined function together with the frame that was current when its
/// declaration was evaluated. Calls run in a fresh child of that frame, so a
/// function keeps seeing (and mutating) the variables it closed over.
#[derive(Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    pub closure: Rc<RefCell<Environment>>,
}

impl Function {
    pub fn new(declaration: &FnData, closure: Rc<RefCell<Environment>>) -> Self {
        Function {
            name: declaration.name.clone(),
            params: declaration.params.clone(),
            body: declaration.body.clone(),
            closure,
        }
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, Signal> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        self.params.iter().zip(arguments).for_each(|(param, argument)| {
            environment.define(&param.lexeme, argument);
        });

        match interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment))) {
            // A return statement anywhere in the body unwinds to here.
            Err(Signal::Return(value)) => Ok(value),
            Err(signal) => Err(signal),
            Ok(()) => Ok(Object::from(Literal::None)),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.params == other.params
            && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

/// A function implemented by the host and exposed to user code.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub function: fn(Vec<Object>) -> Result<Object, Signal>,
}

impl NativeFunction {
    /// The single native of the language: the host epoch tick count.
    /// The unit is opaque; the value is only meaningful compared to itself.
    pub fn clock() -> NativeFunction {
        NativeFunction {
            name: Token::new(Type::Identifier, "Clock".to_owned(), None, 0),
            function: |_| {
                let ticks = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .expect("host clock to be past the epoch")
                    .as_nanos();
                Ok(Object::from(ticks as f64))
            },
        }
    }
}

impl Callable for NativeFunction {
    fn call(&self, _interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, Signal> {
        (self.function)(arguments)
    }

    fn arity(&self) -> usize {
        0
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.function == other.function
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}
