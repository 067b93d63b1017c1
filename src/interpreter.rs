use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Signal};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, UnaryData, VariableData,
};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{
    BlockData, BreakData, ClassData, ExpressionData, FnData, IfData, PrintData, ReturnData, Stmt,
    StmtVisitor, VarData, WhileData,
};
use crate::token::{Token, Type};

/// Requires a number operand for a unary operator.
fn check_number_operand(operator: &Token, operand: &Object) -> Result<f64, Signal> {
    match operand {
        Object::Literal(Literal::Number(number)) => Ok(*number),
        _ => Err(RuntimeError {
            token: operator.clone(),
            message: "Operand must be a number.".to_string(),
        }.into()),
    }
}

/// Requires number operands for a binary operator.
fn check_number_operands(operator: &Token, left: &Object, right: &Object) -> Result<(f64, f64), Signal> {
    match (left, right) {
        (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
            Ok((*left, *right))
        },
        _ => Err(RuntimeError {
            token: operator.clone(),
            message: "Operands must be numbers.".to_string(),
        }.into()),
    }
}

/// Executes a resolved AST by walking it.
///
/// Statements run against a chain of environment frames rooted at the global
/// frame. Program output goes through the injected sink so tests can capture
/// it; diagnostics go through the error module.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));
        globals.borrow_mut().define("clock", Object::from(NativeFunction::clock()));

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Executes the statements in order. A runtime error aborts the run and
    /// is reported here; the latched flag decides the process exit code.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(signal) = self.execute(statement) {
                match signal {
                    Signal::Error(error) => error.throw(),
                    // The resolver rejects top level `return` and `break`.
                    Signal::Return(_) | Signal::Break => unreachable!(),
                }
                return;
            }
        }
    }

    /// Records the scope distance for an expression identity.
    /// Called by the resolver; the interpreter never re-resolves.
    pub fn resolve(&mut self, id: usize, depth: usize) {
        self.locals.insert(id, depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Signal> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, Signal> {
        expr.accept(self)
    }

    /// Executes statements with `environment` as the current frame.
    /// The previous frame is restored on every exit path, unwinds included.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), Signal> {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    /// Reads a variable at its resolved frame, or from the global frame when
    /// no distance was recorded.
    fn look_up_variable(&self, id: usize, name: &Token) -> Result<Object, Signal> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }.map_err(Signal::from)
    }
}

impl<'a> ExprVisitor<Result<Object, Signal>> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> Result<Object, Signal> {
        Ok(Object::from(literal.clone()))
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> Result<Object, Signal> {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => {
                let number = check_number_operand(&unary.operator, &right)?;
                Ok(Object::from(-number))
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> Result<Object, Signal> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        match binary.operator.r#type {
            Type::Greater => {
                let (left, right) = check_number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left > right))
            },
            Type::GreaterEqual => {
                let (left, right) = check_number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left >= right))
            },
            Type::Less => {
                let (left, right) = check_number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left < right))
            },
            Type::LessEqual => {
                let (left, right) = check_number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left <= right))
            },
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::Slash => {
                let (left, right) = check_number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left / right))
            },
            Type::Star => {
                let (left, right) = check_number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left * right))
            },
            Type::Minus => {
                let (left, right) = check_number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left - right))
            },
            Type::Plus => match (left, right) {
                (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
                    Ok(Object::from(left + right))
                },
                (Object::Literal(Literal::String(left)), Object::Literal(Literal::String(right))) => {
                    Ok(Object::from(left + &right))
                },
                _ => Err(RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be two numbers or two strings.".to_string(),
                }.into()),
            },
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> Result<Object, Signal> {
        let left = self.evaluate(&logical.left)?;

        // The deciding operand is returned as is, not coerced to a boolean.
        if logical.operator.r#type == Type::Or {
            if left.is_truthy() {
                return Ok(left);
            }
        } else if !left.is_truthy() {
            return Ok(left);
        }

        self.evaluate(&logical.right)
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> Result<Object, Signal> {
        self.evaluate(&grouping.expr)
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> Result<Object, Signal> {
        self.look_up_variable(variable.id, &variable.name)
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> Result<Object, Signal> {
        let value = self.evaluate(&assign.value)?;

        // Exactly one frame is written: the resolved one, or the global.
        match self.locals.get(&assign.id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())
                    .map_err(Signal::from)?;
            },
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> Result<Object, Signal> {
        let callee = self.evaluate(&call.callee)?;

        let function: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(function) => function,
            Object::Class(class) => class,
            _ => return Err(RuntimeError {
                token: call.paren.clone(),
                message: "Can only call functions.".to_string(),
            }.into()),
        };

        if call.arguments.len() != function.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!(
                    "Expected {} arguments, but got {}.",
                    function.arity(),
                    call.arguments.len(),
                ),
            }.into());
        }

        let mut arguments = Vec::new();
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        function.call(self, arguments)
    }

    fn visit_get_expr(&mut self, get: &GetData) -> Result<Object, Signal> {
        let object = self.evaluate(&get.object)?;

        match object {
            Object::Instance(instance) => instance.borrow().get(&get.name).map_err(Signal::from),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }.into()),
        }
    }

    fn visit_set_expr(&mut self, set: &SetData) -> Result<Object, Signal> {
        // The object is evaluated before the value.
        let object = self.evaluate(&set.object)?;

        match object {
            Object::Instance(instance) => {
                let value = self.evaluate(&set.value)?;
                instance.borrow_mut().set(&set.name, value.clone());
                Ok(value)
            },
            _ => Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            }.into()),
        }
    }
}

impl<'a> StmtVisitor<Result<(), Signal>> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, expression: &ExpressionData) -> Result<(), Signal> {
        self.evaluate(&expression.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, print: &PrintData) -> Result<(), Signal> {
        let value = self.evaluate(&print.expr)?;
        writeln!(self.output, "{value}").expect("output sink to be writable");
        Ok(())
    }

    fn visit_var_stmt(&mut self, var: &VarData) -> Result<(), Signal> {
        let value = match &var.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::None),
        };

        self.environment.borrow_mut().define(&var.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, block: &BlockData) -> Result<(), Signal> {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&block.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) -> Result<(), Signal> {
        if self.evaluate(&if_stmt.condition)?.is_truthy() {
            self.execute(&if_stmt.then_branch)?;
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.execute(else_branch)?;
        }

        Ok(())
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) -> Result<(), Signal> {
        if self.evaluate(&while_stmt.condition)?.is_truthy() {
            loop {
                match self.execute(&while_stmt.body) {
                    Err(Signal::Break) => break,
                    result => result?,
                }

                if !self.evaluate(&while_stmt.condition)?.is_truthy() {
                    break;
                }
            }
        } else if let Some(else_branch) = &while_stmt.else_branch {
            // The else branch runs only when the loop never ran at all.
            self.execute(else_branch)?;
        }

        Ok(())
    }

    fn visit_fn_stmt(&mut self, fn_stmt: &FnData) -> Result<(), Signal> {
        // The frame current at declaration time becomes the closure.
        let function = Function::new(fn_stmt, Rc::clone(&self.environment));
        self.environment.borrow_mut().define(&fn_stmt.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) -> Result<(), Signal> {
        let value = match &return_stmt.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::None),
        };

        Err(Signal::Return(value))
    }

    fn visit_break_stmt(&mut self, _break_stmt: &BreakData) -> Result<(), Signal> {
        Err(Signal::Break)
    }

    fn visit_class_stmt(&mut self, class: &ClassData) -> Result<(), Signal> {
        self.environment.borrow_mut().define(&class.name.lexeme, Object::from(Literal::None));

        let mut methods = HashMap::new();
        for method in &class.methods {
            let Stmt::Fn(declaration) = method else { unreachable!() };
            let function = Function::new(declaration, Rc::clone(&self.environment));
            methods.insert(declaration.name.lexeme.clone(), function);
        }

        let class_object = Rc::new(Class::new(class.name.lexeme.clone(), methods));
        self.environment.borrow_mut().assign(&class.name, Object::from(class_object))
            .map_err(Signal::from)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    /// Runs a clean source snippet and returns everything it printed.
    fn run(source: &str) -> String {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let tokens = Scanner::new(source).scan_tokens();
        let statements = Parser::new(tokens).parse();
        Resolver::new(&mut interpreter).resolve(&statements);
        interpreter.interpret(&statements);

        drop(interpreter);
        String::from_utf8(output).expect("interpreter output to be valid utf-8")
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(run("print 1 + 2 * 3;"), "7\n");
    }

    #[test]
    fn block_scoping() {
        assert_eq!(run("let a = 1; { let a = 2; print a; } print a;"), "2\n1\n");
    }

    #[test]
    fn while_loop_counts() {
        assert_eq!(run("let i = 0; while (i < 3) { print i; i = i + 1; }"), "0\n1\n2\n");
    }

    #[test]
    fn while_else_runs_only_when_never_entered() {
        assert_eq!(run("while (false) print 1; else print 2;"), "2\n");
        assert_eq!(run("let i = 0; while (i < 2) i = i + 1; else print \"never\"; print i;"), "2\n");
    }

    #[test]
    fn zero_is_falsy_in_conditions() {
        assert_eq!(run("if (0) print \"yes\"; else print \"no\";"), "no\n");
        assert_eq!(run("print !0;"), "true\n");
    }

    #[test]
    fn short_circuit_returns_the_deciding_operand() {
        assert_eq!(run("print 1 and 2;"), "2\n");
        assert_eq!(run("print none or \"fallback\";"), "fallback\n");
        assert_eq!(run("print false and 2;"), "false\n");
        assert_eq!(run("print \"first\" or 2;"), "first\n");
    }

    #[test]
    fn short_circuit_skips_the_right_operand() {
        let source = "\
            fn boom() { print \"called\"; return true; }\n\
            print false and boom();\n\
            print true or boom();\n";
        assert_eq!(run(source), "false\ntrue\n");
    }

    #[test]
    fn fibonacci() {
        let source = "\
            fn fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }\n\
            print fib(10);\n";
        assert_eq!(run(source), "55\n");
    }

    #[test]
    fn closure_counters_are_independent() {
        let source = "\
            fn make() { let n = 0; fn inc() { n = n + 1; return n; } return inc; }\n\
            let c = make();\n\
            let d = make();\n\
            print c(); print c(); print c();\n\
            print d();\n";
        assert_eq!(run(source), "1\n2\n3\n1\n");
    }

    #[test]
    fn resolver_pins_captured_scope() {
        let source = "\
            let x = \"outer\";\n\
            {\n\
              fn show() { print x; }\n\
              show();\n\
              let x = \"inner\";\n\
              show();\n\
            }\n";
        assert_eq!(run(source), "outer\nouter\n");
    }

    #[test]
    fn fields_on_instances() {
        let source = "\
            class Point {}\n\
            let p = Point();\n\
            p.x = 3;\n\
            p.y = 4;\n\
            print p.x + p.y;\n";
        assert_eq!(run(source), "7\n");
    }

    #[test]
    fn equality_rules() {
        assert_eq!(run("print 1 == \"1\";"), "false\n");
        assert_eq!(run("print none == none;"), "true\n");
        assert_eq!(run("print none == false;"), "false\n");
        assert_eq!(run("print \"a\" + \"b\" == \"ab\";"), "true\n");
    }

    #[test]
    fn display_forms() {
        assert_eq!(run("fn f() {} print f;"), "<fn f>\n");
        assert_eq!(run("print clock;"), "<native fn Clock>\n");
        assert_eq!(run("class C {} print C;"), "class <C>\n");
        assert_eq!(run("class C {} print C();"), "instance of class <C>\n");
        assert_eq!(run("print none;"), "none\n");
        assert_eq!(run("print 2.5 * 2;"), "5\n");
        assert_eq!(run("print 1 / 2;"), "0.500000\n");
    }

    #[test]
    fn methods_come_from_the_class_table() {
        let source = "\
            class Greeter { hello() { print \"hi\"; } }\n\
            let g = Greeter();\n\
            let m = g.hello;\n\
            m();\n\
            g.hello();\n";
        assert_eq!(run(source), "hi\nhi\n");
    }

    #[test]
    fn fields_shadow_methods() {
        let source = "\
            class Box { label() { return \"method\"; } }\n\
            let b = Box();\n\
            b.label = \"field\";\n\
            print b.label;\n";
        assert_eq!(run(source), "field\n");
    }

    #[test]
    fn break_unwinds_only_the_innermost_loop() {
        let source = "\
            let i = 0;\n\
            while (i < 3) {\n\
              let j = 0;\n\
              while (true) {\n\
                j = j + 1;\n\
                if (j == 2) break;\n\
              }\n\
              print j;\n\
              i = i + 1;\n\
            }\n";
        assert_eq!(run(source), "2\n2\n2\n");
    }

    #[test]
    fn for_loop_matches_desugared_while() {
        let for_output = run("for (let i = 0; i < 3; i = i + 1) print i;");
        let while_output = run("{ let i = 0; while (i < 3) { print i; i = i + 1; } }");
        assert_eq!(for_output, "0\n1\n2\n");
        assert_eq!(for_output, while_output);
    }

    #[test]
    fn return_without_value_yields_none() {
        assert_eq!(run("fn f() { return; } print f();"), "none\n");
        assert_eq!(run("fn f() {} print f();"), "none\n");
    }

    #[test]
    fn arrow_function_body() {
        assert_eq!(run("fn double(x) => x * 2; print double(21);"), "42\n");
    }

    #[test]
    fn assignment_is_an_expression() {
        assert_eq!(run("let a = 1; print a = 2; print a;"), "2\n2\n");
    }
}
