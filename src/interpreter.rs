//! Component L — Interpreter.
//!
//! Owns everything Components G–K need to cooperate (operand stack, run
//! stack, name table, environment cache, cd stack) plus loop-nesting and
//! interactive-mode bookkeeping, per spec.md §4.L. The AST and its arena
//! are NOT long-lived fields here: each `execute` call owns one `Script`
//! (arena + string pool + body) for the duration of that parse-execute
//! cycle and resets its arena when done, matching spec.md §3's "Script …
//! lifetime: a single parse-execute cycle" — the same bulk-free-then-reuse
//! shape as the C allocator, without a shared mutable arena field to
//! juggle across calls.
//!
//! Sub-expression results are threaded through ordinary Rust return values
//! (the `Flow` enum below) rather than literally pushed through the
//! `OperandStack` at every step; the operand stack is still used at the two
//! places spec.md calls out as externally observable: a builtin's "push
//! exactly one value" contract, and the interactive REPL's per-statement
//! echo.

use crate::argv::ArgumentVector;
use crate::ast::{
    Arith, AtomKind, AtomOperator, BinaryKind, CompoundString, Segment, Stmt, UnaryKind, VarRef,
};
use crate::builtins;
use crate::env_cache::EnvironmentCache;
use crate::error::{ShellError, ShellResult};
use crate::name_table::NameTable;
use crate::operand_stack::OperandStack;
use crate::parser::Parser;
use crate::run_stack::RunStack;
use crate::value::Value;

/// The result of evaluating one AST node: a plain value, or one of the two
/// control-flow signals a `while` loop intercepts. Never surfaced to a
/// caller of `Interpreter::execute` — `ShellError` carries fatal errors,
/// `Flow` carries non-fatal ones.
#[derive(Debug, Clone)]
pub enum Flow {
    Value(Value),
    Break(Value),
    Continue,
}

impl Flow {
    pub fn into_value(self) -> Value {
        match self {
            Flow::Value(v) | Flow::Break(v) => v,
            Flow::Continue => Value::Void,
        }
    }
}

pub struct Interpreter {
    operand_stack: OperandStack,
    run_stack: RunStack,
    name_table: NameTable,
    env_cache: EnvironmentCache,
    cd_stack: Vec<String>,
    loop_nesting_count: u32,
    history: Vec<String>,
    pub is_interactive: bool,
    exit_code: Option<i32>,
    start_time: std::time::Instant,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let mut name_table = NameTable::new();
        builtins::register_all(&mut name_table);
        Interpreter {
            operand_stack: OperandStack::new(),
            run_stack: RunStack::new(),
            name_table,
            env_cache: EnvironmentCache::new(),
            cd_stack: Vec::new(),
            loop_nesting_count: 0,
            history: Vec::new(),
            is_interactive: false,
            exit_code: None,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn uptime_millis(&self) -> i32 {
        self.start_time.elapsed().as_millis() as i32
    }

    // ---- accessors used by builtins ----

    pub fn run_stack(&self) -> &RunStack {
        &self.run_stack
    }

    pub fn run_stack_mut(&mut self) -> &mut RunStack {
        &mut self.run_stack
    }

    pub fn push_result(&mut self, v: Value) {
        self.operand_stack.push(v);
    }

    pub fn cd_stack_mut(&mut self) -> &mut Vec<String> {
        &mut self.cd_stack
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn push_history_line(&mut self, line: String) {
        self.history.push(line);
    }

    pub fn request_exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }

    pub fn exit_requested(&self) -> Option<i32> {
        self.exit_code
    }

    // ---- top-level execution, per spec.md §4.L ----

    pub fn execute(&mut self, src: &str, interactive: bool) -> ShellResult<Value> {
        let mut script = Parser::new().parse(src)?;
        self.run_stack.push_scope();

        let statements = script.arena.expr_list(script.body).statements.clone();
        let mut last = Value::Void;
        let mut failure: Option<ShellError> = None;

        for stmt_id in statements {
            match self.eval_stmt(&script.arena, stmt_id) {
                Ok(flow) => {
                    let v = flow.into_value();
                    if interactive && !matches!(v, Value::Void | Value::Never) {
                        println!("{}", v);
                    }
                    last = v;
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        let _ = self.run_stack.pop_scope();
        self.operand_stack.pop_all();
        script.arena.reset();

        match failure {
            Some(e) => Err(e),
            None => Ok(last),
        }
    }

    fn eval_block(&mut self, arena: &crate::arena::Arena, block: crate::ast::Block) -> ShellResult<Flow> {
        self.run_stack.push_scope();
        let statements = arena.expr_list(block).statements.clone();
        let mut last = Flow::Value(Value::Void);
        let mut failure: Option<ShellError> = None;
        for stmt_id in statements {
            match self.eval_stmt(arena, stmt_id) {
                Ok(flow @ (Flow::Break(_) | Flow::Continue)) => {
                    last = flow;
                    break;
                }
                Ok(flow) => last = flow,
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        self.run_stack.pop_scope().expect("block scope always balanced");
        match failure {
            Some(e) => Err(e),
            None => Ok(last),
        }
    }

    fn eval_stmt(&mut self, arena: &crate::arena::Arena, id: crate::arena::NodeId<Stmt>) -> ShellResult<Flow> {
        let stmt = arena.stmt(id).clone();
        match stmt {
            Stmt::Null => Ok(Flow::Value(Value::Void)),
            Stmt::Arithmetic(expr) => self.eval_arith(arena, expr),
            Stmt::Assignment(lhs, rhs) => self.eval_assignment(arena, lhs, rhs),
            Stmt::VarDecl(modifiers, vref, expr) => {
                let value = match self.eval_arith(arena, expr)? {
                    Flow::Value(v) => v,
                    other => return Ok(other),
                };
                self.run_stack
                    .declare_variable(modifiers, vref.scope.clone(), vref.name.clone(), value)?;
                Ok(Flow::Value(Value::Void))
            }
            Stmt::Continue => {
                if self.loop_nesting_count == 0 {
                    Err(ShellError::NotLoop)
                } else {
                    Ok(Flow::Continue)
                }
            }
            Stmt::Break(expr) => {
                if self.loop_nesting_count == 0 {
                    return Err(ShellError::NotLoop);
                }
                let value = match expr {
                    Some(e) => match self.eval_arith(arena, e)? {
                        Flow::Value(v) => v,
                        other => return Ok(other),
                    },
                    None => Value::Void,
                };
                Ok(Flow::Break(value))
            }
        }
    }

    fn eval_assignment(
        &mut self,
        arena: &crate::arena::Arena,
        lhs: crate::arena::NodeId<Arith>,
        rhs: crate::arena::NodeId<Arith>,
    ) -> ShellResult<Flow> {
        let value = match self.eval_arith(arena, rhs)? {
            Flow::Value(v) => v,
            other => return Ok(other),
        };
        let vref = match arena.arith(lhs) {
            Arith::VarRef(vref) => vref.clone(),
            // `x = e`, with no `$`, is still an assignment: a bare word
            // naming a single undecorated atom is the same lvalue shorthand
            // a shell's own `x=value` uses on the left of `=`.
            Arith::Command(slots) => match Self::bare_identifier(arena, slots) {
                Some(name) => VarRef::unscoped(name),
                None => return Err(ShellError::NotLValue),
            },
            _ => return Err(ShellError::NotLValue),
        };
        let var = self
            .run_stack
            .get_variable_mut(vref.scope.as_deref(), &vref.name)?;
        if !var.modifiers.mutable {
            return Err(ShellError::Immutable);
        }
        var.value = value;
        Ok(Flow::Value(Value::Void))
    }

    /// A `Command` counts as a bare-identifier lvalue only when it is a
    /// single argv slot holding exactly one `UnquotedString` atom — `x`, not
    /// `x y` or `"x"` or `5`.
    fn bare_identifier(
        arena: &crate::arena::Arena,
        slots: &[Vec<crate::arena::NodeId<crate::ast::Atom>>],
    ) -> Option<std::rc::Rc<str>> {
        if slots.len() != 1 || slots[0].len() != 1 {
            return None;
        }
        match &arena.atom(slots[0][0]).kind {
            AtomKind::UnquotedString(name) => Some(name.clone()),
            _ => None,
        }
    }

    fn eval_arith(&mut self, arena: &crate::arena::Arena, id: crate::arena::NodeId<Arith>) -> ShellResult<Flow> {
        let node = arena.arith(id).clone();
        match node {
            Arith::Literal(v) => Ok(Flow::Value(v)),
            Arith::CompoundString(cs) => {
                let s = self.eval_compound_string(arena, cs)?;
                Ok(Flow::Value(Value::init_cstring(s)))
            }
            Arith::VarRef(vref) => {
                let var = self.run_stack.get_variable(vref.scope.as_deref(), &vref.name)?;
                Ok(Flow::Value(var.value.clone()))
            }
            Arith::Command(slots) => self.eval_command(arena, slots),
            Arith::Unary(kind, inner) => self.eval_unary(arena, kind, inner),
            Arith::Binary(kind, lhs, rhs) => self.eval_binary(arena, kind, lhs, rhs),
            Arith::If(cond, then_block, else_block) => self.eval_if(arena, cond, then_block, else_block),
            Arith::While(cond, body) => self.eval_while(arena, cond, body),
        }
    }

    fn eval_unary(
        &mut self,
        arena: &crate::arena::Arena,
        kind: UnaryKind,
        inner: crate::arena::NodeId<Arith>,
    ) -> ShellResult<Flow> {
        let v = match self.eval_arith(arena, inner)? {
            Flow::Value(v) => v,
            other => return Ok(other),
        };
        match kind {
            UnaryKind::Positive => Ok(Flow::Value(v.unary_op(crate::value::UnaryOp::Positive)?)),
            UnaryKind::Negative => Ok(Flow::Value(v.unary_op(crate::value::UnaryOp::Negative)?)),
            UnaryKind::Not => Ok(Flow::Value(v.unary_op(crate::value::UnaryOp::Not)?)),
            UnaryKind::Parenthesized => Ok(Flow::Value(v)),
        }
    }

    fn eval_binary(
        &mut self,
        arena: &crate::arena::Arena,
        kind: BinaryKind,
        lhs: crate::arena::NodeId<Arith>,
        rhs: crate::arena::NodeId<Arith>,
    ) -> ShellResult<Flow> {
        match kind {
            BinaryKind::Disjunction => {
                let l = match self.eval_arith(arena, lhs)? {
                    Flow::Value(v) => v,
                    other => return Ok(other),
                };
                if l.is_truthy()? {
                    return Ok(Flow::Value(Value::Bool(true)));
                }
                self.eval_arith(arena, rhs)
            }
            BinaryKind::Conjunction => {
                let l = match self.eval_arith(arena, lhs)? {
                    Flow::Value(v) => v,
                    other => return Ok(other),
                };
                if !l.is_truthy()? {
                    return Ok(Flow::Value(Value::Bool(false)));
                }
                self.eval_arith(arena, rhs)
            }
            BinaryKind::Pipeline => {
                // Parses, but connecting two commands' stdio was never
                // wired up in the original source either; surface that
                // plainly instead of quietly running both sides in sequence.
                Err(ShellError::NotImplemented("pipeline execution"))
            }
            other_kind => {
                let l = match self.eval_arith(arena, lhs)? {
                    Flow::Value(v) => v,
                    other => return Ok(other),
                };
                let r = match self.eval_arith(arena, rhs)? {
                    Flow::Value(v) => v,
                    other => return Ok(other),
                };
                let op = to_value_binary_op(other_kind);
                Ok(Flow::Value(l.binary_op(r, op)?))
            }
        }
    }

    fn eval_if(
        &mut self,
        arena: &crate::arena::Arena,
        cond: crate::arena::NodeId<Arith>,
        then_block: crate::ast::Block,
        else_block: Option<crate::ast::Block>,
    ) -> ShellResult<Flow> {
        let cond_val = match self.eval_arith(arena, cond)? {
            Flow::Value(v) => v,
            other => return Ok(other),
        };
        let cond_bool = match cond_val {
            Value::Bool(b) => b,
            _ => return Err(ShellError::TypeMismatch),
        };
        if cond_bool {
            self.eval_block(arena, then_block)
        } else if let Some(else_block) = else_block {
            self.eval_block(arena, else_block)
        } else {
            Ok(Flow::Value(Value::Void))
        }
    }

    fn eval_while(
        &mut self,
        arena: &crate::arena::Arena,
        cond: crate::arena::NodeId<Arith>,
        body: crate::ast::Block,
    ) -> ShellResult<Flow> {
        self.loop_nesting_count += 1;
        let mut last = Value::Void;
        let result = loop {
            let cond_val = match self.eval_arith(arena, cond) {
                Ok(Flow::Value(v)) => v,
                Ok(other) => break Ok(other),
                Err(e) => break Err(e),
            };
            let cond_bool = match cond_val {
                Value::Bool(b) => b,
                _ => break Err(ShellError::TypeMismatch),
            };
            if !cond_bool {
                break Ok(Flow::Value(last));
            }
            match self.eval_block(arena, body) {
                Ok(Flow::Value(v)) => last = v,
                Ok(Flow::Continue) => continue,
                Ok(Flow::Break(v)) => break Ok(Flow::Value(v)),
                Err(e) => break Err(e),
            }
        };
        self.loop_nesting_count -= 1;
        result
    }

    fn eval_compound_string(
        &mut self,
        arena: &crate::arena::Arena,
        id: crate::arena::NodeId<CompoundString>,
    ) -> ShellResult<String> {
        let segments = arena.compound_string(id).segments.clone();
        let mut out = String::new();
        for seg_id in segments {
            let seg = arena.segment(seg_id).clone();
            match seg {
                Segment::StringLiteral(s) => out.push_str(&s),
                Segment::EscapeSequence(c) => out.push(c),
                Segment::VarRef(vref) => {
                    let var = self.run_stack.get_variable(vref.scope.as_deref(), &vref.name)?;
                    out.push_str(&var.value.to_canonical_string());
                }
                Segment::ArithmeticExpression(expr_id) => match self.eval_arith(arena, expr_id)? {
                    Flow::Value(v) => out.push_str(&v.to_canonical_string()),
                    _ => return Err(ShellError::NotLoop),
                },
            }
        }
        Ok(out)
    }

    fn serialize_atom(&mut self, arena: &crate::arena::Arena, id: crate::arena::NodeId<crate::ast::Atom>) -> ShellResult<String> {
        let atom = arena.atom(id).clone();
        Ok(match atom.kind {
            AtomKind::Character(c) => c.to_string(),
            AtomKind::UnquotedString(s) | AtomKind::SingleQuotedString(s) | AtomKind::BacktickString(s) => {
                s.to_string()
            }
            AtomKind::DoubleQuotedString(cs) | AtomKind::DoubleBacktickString(cs) => {
                self.eval_compound_string(arena, cs)?
            }
            AtomKind::EscapedCharacter(c) => c.to_string(),
            AtomKind::Integer(n) => n.to_string(),
            AtomKind::VariableReference(vref) => {
                let var = self.run_stack.get_variable(vref.scope.as_deref(), &vref.name)?;
                var.value.to_canonical_string()
            }
            AtomKind::ArithmeticExpression(expr_id) => match self.eval_arith(arena, expr_id)? {
                Flow::Value(v) => v.to_canonical_string(),
                _ => return Err(ShellError::NotLoop),
            },
            AtomKind::Operator(op) => operator_text(op).to_string(),
        })
    }

    fn eval_command(
        &mut self,
        arena: &crate::arena::Arena,
        slots: Vec<Vec<crate::arena::NodeId<crate::ast::Atom>>>,
    ) -> ShellResult<Flow> {
        let mut forced_external = false;
        if let Some(first_slot) = slots.first() {
            if let Some(first_atom) = first_slot.first() {
                forced_external = matches!(
                    arena.atom(*first_atom).kind,
                    AtomKind::BacktickString(_) | AtomKind::DoubleBacktickString(_)
                );
            }
        }

        let mut av = ArgumentVector::new();
        av.open();
        for slot in &slots {
            for atom_id in slot {
                let piece = self.serialize_atom(arena, *atom_id)?;
                av.append_string(&piece);
            }
            av.end_of_arg();
        }
        av.close();
        let argv = av.into_argv();

        if argv.is_empty() || argv[0].is_empty() {
            return Err(ShellError::Syntax("empty command".into()));
        }

        let env = self.env_cache.get_environment(&self.run_stack).to_vec();

        if !forced_external {
            if let Some(cb) = self.name_table.get_name(&argv[0]) {
                cb(self, &argv, &env)?;
                let result = self.operand_stack.pop()?;
                return Ok(Flow::Value(result));
            }
        }

        self.spawn_external(&argv, &env)
    }

    fn spawn_external(&mut self, argv: &[String], env: &[(String, String)]) -> ShellResult<Flow> {
        let program = &argv[0];
        let resolved = if program.contains('/') {
            program.clone()
        } else {
            format!("/System/Commands/{}", program)
        };

        let mut cmd = std::process::Command::new(&resolved);
        cmd.args(&argv[1..]);
        cmd.env_clear();
        cmd.envs(env.iter().map(|(k, v)| (k.clone(), v.clone())));

        match cmd.status() {
            Ok(status) if status.success() => Ok(Flow::Value(Value::Void)),
            Ok(status) => {
                match status.code() {
                    Some(code) => eprintln!("{}: exited with status {}", program, code),
                    None => eprintln!("{}: terminated by signal", program),
                }
                Ok(Flow::Value(Value::Void))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ShellError::NoCmd(program.clone())),
            Err(e) => Err(ShellError::Io(e)),
        }
    }
}

fn to_value_binary_op(kind: BinaryKind) -> crate::value::BinaryOp {
    use crate::value::BinaryOp as V;
    match kind {
        BinaryKind::Equals => V::Equals,
        BinaryKind::NotEquals => V::NotEquals,
        BinaryKind::LessEquals => V::LessEquals,
        BinaryKind::GreaterEquals => V::GreaterEquals,
        BinaryKind::Less => V::Less,
        BinaryKind::Greater => V::Greater,
        BinaryKind::Addition => V::Addition,
        BinaryKind::Subtraction => V::Subtraction,
        BinaryKind::Multiplication => V::Multiplication,
        BinaryKind::Division => V::Division,
        BinaryKind::Modulo => V::Modulo,
        BinaryKind::Disjunction | BinaryKind::Conjunction | BinaryKind::Pipeline => {
            unreachable!("handled directly in eval_binary")
        }
    }
}

fn operator_text(op: AtomOperator) -> &'static str {
    match op {
        AtomOperator::Lt => "<",
        AtomOperator::Le => "<=",
        AtomOperator::Gt => ">",
        AtomOperator::Ge => ">=",
        AtomOperator::EqEq => "==",
        AtomOperator::NotEq => "!=",
        AtomOperator::Plus => "+",
        AtomOperator::Minus => "-",
        AtomOperator::Star => "*",
        AtomOperator::Slash => "/",
        AtomOperator::Percent => "%",
        AtomOperator::Assign => "=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literal_evaluates_to_itself() {
        let mut interp = Interpreter::new();
        let result = interp.execute("42\n", false).unwrap();
        assert_eq!(result, Value::Integer(42));
    }

    #[test]
    fn arithmetic_precedence() {
        let mut interp = Interpreter::new();
        let result = interp.execute("1 + 2 * 3\n", false).unwrap();
        assert_eq!(result, Value::Integer(7));
    }

    #[test]
    fn var_decl_and_read() {
        let mut interp = Interpreter::new();
        let result = interp.execute("let x = 5\n$x\n", false).unwrap();
        assert_eq!(result, Value::Integer(5));
    }

    #[test]
    fn mutable_assignment() {
        let mut interp = Interpreter::new();
        let result = interp.execute("var x = 1\n$x = 2\n$x\n", false).unwrap();
        assert_eq!(result, Value::Integer(2));
    }

    #[test]
    fn immutable_assignment_fails() {
        let mut interp = Interpreter::new();
        let result = interp.execute("let x = 1\n$x = 2\n", false);
        assert!(matches!(result, Err(ShellError::Immutable)));
    }

    #[test]
    fn undefined_variable_fails() {
        let mut interp = Interpreter::new();
        let result = interp.execute("$missing\n", false);
        assert!(matches!(result, Err(ShellError::UndefVar(_))));
    }

    #[test]
    fn if_else_picks_branch() {
        let mut interp = Interpreter::new();
        let result = interp.execute("if 1 == 2 { 10 } else { 20 }\n", false).unwrap();
        assert_eq!(result, Value::Integer(20));
    }

    #[test]
    fn while_loop_with_break_value() {
        let mut interp = Interpreter::new();
        let result = interp
            .execute("var i = 0\nwhile 1 == 1 { $i = $i + 1\n if $i == 3 { break $i } }\n", false)
            .unwrap();
        assert_eq!(result, Value::Integer(3));
    }

    #[test]
    fn break_outside_loop_is_not_loop_error() {
        let mut interp = Interpreter::new();
        let result = interp.execute("break\n", false);
        assert!(matches!(result, Err(ShellError::NotLoop)));
    }

    #[test]
    fn division_by_zero_is_fatal() {
        let mut interp = Interpreter::new();
        let result = interp.execute("1 / 0\n", false);
        assert!(matches!(result, Err(ShellError::DivByZero)));
    }

    #[test]
    fn double_quoted_string_interpolates_variable() {
        let mut interp = Interpreter::new();
        let result = interp.execute("let name = \"world\"\n\"hi $name\"\n", false).unwrap();
        assert_eq!(result, Value::init_cstring("hi world"));
    }
}
