use std::collections::HashMap;
use std::mem;

use crate::error::{Error, ResolveError};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, UnaryData, VariableData,
};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::stmt::{
    BlockData, BreakData, ClassData, ExpressionData, FnData, IfData, PrintData, ReturnData, Stmt,
    StmtVisitor, VarData, WhileData,
};
use crate::token::Token;

/// The kind of function body currently being resolved.
enum FnKind {
    None,
    Function,
    Method,
}

/// The static analysis pass between the parser and the interpreter.
///
/// Walks the AST once and records, for every variable reference, how many
/// frames separate the reference from its binding. The interpreter later uses
/// the recorded distance to address the exact frame instead of searching the
/// chain by name. Also rejects the handful of constructs that are
/// syntactically valid but semantically wrong before anything runs: `return`
/// outside a function, `break` outside a loop, redeclaration in the same
/// scope and reading a local in its own initializer.
///
/// The resolver never executes user code and never aborts; it only reports.
pub struct Resolver<'a, 'o> {
    interpreter: &'a mut Interpreter<'o>,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FnKind,
    in_loop: bool,
}

impl<'a, 'o> Resolver<'a, 'o> {
    pub fn new(interpreter: &'a mut Interpreter<'o>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FnKind::None,
            in_loop: false,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    /// Resolves a function body in a fresh scope holding the parameters.
    /// The enclosing function kind and loop flag are restored afterwards; a
    /// `break` inside the body must belong to a loop inside the body.
    fn resolve_function(&mut self, function: &FnData, kind: FnKind) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);
        let enclosing_loop = mem::replace(&mut self.in_loop, false);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.in_loop = enclosing_loop;
        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Inserts the name into the innermost scope, marked not yet usable.
    /// The global scope is implicit and never tracked.
    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        let scope = self.scopes.last_mut().expect("scope stack to be not empty");
        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: "Already variable with this name in this scope.".to_string(),
            }.throw();
        }
        scope.insert(name.lexeme.to_owned(), false);
    }

    /// Marks the name as usable in the innermost scope.
    fn define(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        self.scopes
            .last_mut()
            .expect("scope stack to be not empty")
            .insert(name.lexeme.to_owned(), true);
    }

    /// Records the distance from the reference to the scope that binds the
    /// name. No record means the binding is (or is expected to be) global.
    fn resolve_local(&mut self, id: usize, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, i);
                return;
            }
        }
    }
}

impl<'a, 'o> ExprVisitor<()> for Resolver<'a, 'o> {
    fn visit_literal_expr(&mut self, _literal: &Literal) {}

    fn visit_unary_expr(&mut self, unary: &UnaryData) {
        self.resolve_expr(&unary.expr);
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) {
        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) {
        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) {
        self.resolve_expr(&grouping.expr);
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) {
        if let Some(scope) = self.scopes.last() {
            if let Some(defined) = scope.get(&variable.name.lexeme) {
                if !defined {
                    ResolveError {
                        token: variable.name.to_owned(),
                        message: "Can't read local variable in its own initializer.".to_string(),
                    }.throw();
                }
            }
        }

        self.resolve_local(variable.id, &variable.name);
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) {
        self.resolve_expr(&assign.value);
        self.resolve_local(assign.id, &assign.name);
    }

    fn visit_call_expr(&mut self, call: &CallData) {
        self.resolve_expr(&call.callee);

        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, get: &GetData) {
        self.resolve_expr(&get.object);
    }

    fn visit_set_expr(&mut self, set: &SetData) {
        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
    }
}

impl<'a, 'o> StmtVisitor<()> for Resolver<'a, 'o> {
    fn visit_expression_stmt(&mut self, expression: &ExpressionData) {
        self.resolve_expr(&expression.expr);
    }

    fn visit_print_stmt(&mut self, print: &PrintData) {
        self.resolve_expr(&print.expr);
    }

    fn visit_var_stmt(&mut self, var: &VarData) {
        self.declare(&var.name);
        if let Some(initializer) = &var.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&var.name);
    }

    fn visit_block_stmt(&mut self, block: &BlockData) {
        self.begin_scope();
        self.resolve(&block.statements);
        self.end_scope();
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) {
        self.resolve_expr(&if_stmt.condition);
        self.resolve_stmt(&if_stmt.then_branch);
        if let Some(else_branch) = &if_stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) {
        self.resolve_expr(&while_stmt.condition);

        let enclosing_loop = mem::replace(&mut self.in_loop, true);
        self.resolve_stmt(&while_stmt.body);
        self.in_loop = enclosing_loop;

        // The else branch is not part of the loop body; `break` is not
        // allowed in it.
        if let Some(else_branch) = &while_stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_fn_stmt(&mut self, fn_stmt: &FnData) {
        self.declare(&fn_stmt.name);
        self.define(&fn_stmt.name);

        self.resolve_function(fn_stmt, FnKind::Function);
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) {
        if let FnKind::None = self.current_function {
            ResolveError {
                token: return_stmt.keyword.clone(),
                message: "Can't return from top level code.".to_string(),
            }.throw();
        }

        if let Some(value) = &return_stmt.value {
            self.resolve_expr(value);
        }
    }

    fn visit_break_stmt(&mut self, break_stmt: &BreakData) {
        if !self.in_loop {
            ResolveError {
                token: break_stmt.keyword.clone(),
                message: "break is not allowed here.".to_string(),
            }.throw();
        }
    }

    fn visit_class_stmt(&mut self, class: &ClassData) {
        self.declare(&class.name);
        self.define(&class.name);

        for method in &class.methods {
            let Stmt::Fn(function) = method else { unreachable!() };
            self.resolve_function(function, FnKind::Method);
        }
    }
}
