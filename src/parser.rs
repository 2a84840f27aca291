//! Component F — Parser.
//!
//! Recursive descent with hand-written precedence climbing, per spec.md
//! §4.F. Every node produced lands in the `Script`'s own `Arena` and
//! `StringPool`. Design decisions filling gaps the informal grammar in
//! spec.md leaves open (recorded in `DESIGN.md`):
//!
//! - A variable reference always carries its `$` sigil (`$x`, `$scope:x`);
//!   a bare word is never a var-ref. A bare leading identifier followed by
//!   `=` is still a legal assignment target, the same way a shell's own
//!   `x=value` needs no sigil on the left; `eval_assignment` recognizes a
//!   single-atom bare-identifier `Command` as an lvalue. Anything else on
//!   the left of `=` (a multi-atom command, an arithmetic expression, ...)
//!   is rejected at evaluation time with `NotLValue`, not at parse time.
//!   This only covers the left side: a bare word on the *right* of `=`
//!   still starts a `Command` and keeps swallowing whatever operator
//!   tokens follow it as argv text (see below), so `x = $y + 1` reads
//!   back, but `x = y + 1` dispatches `y` as an external command instead.
//! - `=` ends a `Command`'s atom list rather than being swallowed as an
//!   operator atom, so `assignment := arith '=' arith` gets a chance to
//!   fire; the other operator-shaped tokens (`<`, `<=`, `>`, `>=`, `==`,
//!   `!=`, `+`, `-`, `*`, `/`, `%`, `!`) are still swallowed as literal
//!   atoms (spec.md §3 lists them among the legal atom kinds) so idioms
//!   like `test 1 -le 2` or `echo a == b` pass their operators straight
//!   through as argv text. `&&`/`||`/`|` also end a command early, since
//!   they sit structurally above `primary` in the grammar and join two
//!   commands together.
//! - A parenthesized group inside a `Command`'s atom list (`echo ("a" +
//!   "b")`) parses as an `ArithmeticExpression` atom rather than ending
//!   the command, mirroring the original source's `case '(':` inside its
//!   command-atom loop.

use crate::arena::{Arena, NodeId};
use crate::ast::{
    Arith, Atom, AtomKind, AtomOperator, BinaryKind, CompoundString, ExprList, Script, Segment,
    Stmt, UnaryKind, VarModifiers, VarRef,
};
use crate::error::{ShellError, ShellResult};
use crate::lexer::{LexMode, LexVarRef, Lexer, TokenKind};
use crate::string_pool::StringPool;
use crate::value::Value;

pub struct Parser {
    lexer: Lexer,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            lexer: Lexer::new(),
        }
    }

    /// Parses `src` into a fresh `Script`, with its own arena and string
    /// pool per spec.md §3.
    pub fn parse(&mut self, src: &str) -> ShellResult<Script> {
        let mut arena = Arena::new();
        let mut pool = StringPool::new();
        self.lexer.set_input(src);
        let body = self.parse_expr_list(&mut arena, &mut pool)?;
        if !matches!(self.lexer.get_token().kind, TokenKind::Eof) {
            return Err(ShellError::Syntax(format!(
                "unexpected trailing token: {:?}",
                self.lexer.get_token().kind
            )));
        }
        Ok(Script { arena, pool, body })
    }

    fn varref_from_lex(&self, v: LexVarRef, pool: &mut StringPool) -> VarRef {
        VarRef {
            scope: v.scope.as_deref().map(|s| pool.intern(s)),
            name: pool.intern(&v.name),
        }
    }

    fn at_list_end(&self) -> bool {
        matches!(
            self.lexer.get_token().kind,
            TokenKind::Eof | TokenKind::RBrace
        )
    }

    fn at_stmt_end(&self) -> bool {
        matches!(
            self.lexer.get_token().kind,
            TokenKind::Eof | TokenKind::RBrace | TokenKind::Newline | TokenKind::Semi | TokenKind::Amp
        )
    }

    fn parse_expr_list(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<ExprList>> {
        let mut list = ExprList::default();
        loop {
            while matches!(
                self.lexer.get_token().kind,
                TokenKind::Newline | TokenKind::Semi | TokenKind::Amp
            ) {
                self.lexer.consume_token();
            }
            if self.at_list_end() {
                break;
            }
            let stmt = self.parse_stmt(arena, pool)?;
            list.push(stmt);
            match self.lexer.get_token().kind {
                TokenKind::Newline | TokenKind::Semi | TokenKind::Amp => {
                    self.lexer.consume_token();
                }
                TokenKind::Eof | TokenKind::RBrace => {}
                ref other => {
                    return Err(ShellError::Syntax(format!(
                        "expected statement terminator, found {:?}",
                        other
                    )))
                }
            }
        }
        Ok(arena.alloc_expr_list(list))
    }

    fn parse_block(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<ExprList>> {
        self.expect(TokenKind::LBrace)?;
        let list = self.parse_expr_list(arena, pool)?;
        self.expect(TokenKind::RBrace)?;
        Ok(list)
    }

    fn expect(&mut self, want: TokenKind) -> ShellResult<()> {
        if std::mem::discriminant(&self.lexer.get_token().kind) == std::mem::discriminant(&want) {
            self.lexer.consume_token();
            Ok(())
        } else {
            Err(ShellError::Syntax(format!(
                "expected {:?}, found {:?}",
                want,
                self.lexer.get_token().kind
            )))
        }
    }

    fn parse_stmt(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Stmt>> {
        if let TokenKind::Identifier(name) = &self.lexer.get_token().kind {
            match name.as_str() {
                "let" | "var" => return self.parse_var_decl(arena, pool, false),
                "public" => {
                    self.lexer.consume_token();
                    return self.parse_var_decl(arena, pool, true);
                }
                "continue" => {
                    self.lexer.consume_token();
                    return Ok(arena.alloc_stmt(Stmt::Continue));
                }
                "break" => {
                    self.lexer.consume_token();
                    let expr = if self.at_stmt_end() {
                        None
                    } else {
                        Some(self.parse_arith(arena, pool)?)
                    };
                    return Ok(arena.alloc_stmt(Stmt::Break(expr)));
                }
                _ => {}
            }
        }

        let lhs = self.parse_arith(arena, pool)?;
        if matches!(self.lexer.get_token().kind, TokenKind::Assign) {
            self.lexer.consume_token();
            let rhs = self.parse_arith(arena, pool)?;
            Ok(arena.alloc_stmt(Stmt::Assignment(lhs, rhs)))
        } else {
            Ok(arena.alloc_stmt(Stmt::Arithmetic(lhs)))
        }
    }

    fn parse_var_decl(
        &mut self,
        arena: &mut Arena,
        pool: &mut StringPool,
        public: bool,
    ) -> ShellResult<NodeId<Stmt>> {
        let mutable = match &self.lexer.get_token().kind {
            TokenKind::Identifier(k) if k == "let" => false,
            TokenKind::Identifier(k) if k == "var" => true,
            other => {
                return Err(ShellError::Syntax(format!(
                    "expected 'let' or 'var', found {:?}",
                    other
                )))
            }
        };
        self.lexer.consume_token();

        let name = match self.lexer.get_token().kind.clone() {
            TokenKind::Identifier(s) => s,
            TokenKind::UnquotedString(s) => s,
            other => {
                return Err(ShellError::Syntax(format!(
                    "expected variable name, found {:?}",
                    other
                )))
            }
        };
        self.lexer.consume_token();
        self.expect(TokenKind::Assign)?;
        let expr = self.parse_arith(arena, pool)?;

        let vref = VarRef::unscoped(pool.intern(&name));
        let modifiers = VarModifiers { mutable, public };
        Ok(arena.alloc_stmt(Stmt::VarDecl(modifiers, vref, expr)))
    }

    // ---- arithmetic/expression precedence chain ----

    fn parse_arith(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        self.parse_disjunction(arena, pool)
    }

    fn parse_disjunction(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        let mut lhs = self.parse_conjunction(arena, pool)?;
        while matches!(self.lexer.get_token().kind, TokenKind::PipePipe) {
            self.lexer.consume_token();
            let rhs = self.parse_conjunction(arena, pool)?;
            lhs = arena.alloc_arith(Arith::Binary(BinaryKind::Disjunction, lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_conjunction(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        let mut lhs = self.parse_pipeline(arena, pool)?;
        while matches!(self.lexer.get_token().kind, TokenKind::AmpAmp) {
            self.lexer.consume_token();
            let rhs = self.parse_pipeline(arena, pool)?;
            lhs = arena.alloc_arith(Arith::Binary(BinaryKind::Conjunction, lhs, rhs));
        }
        Ok(lhs)
    }

    /// `|` binds tighter than `&&`/`||` but parses only: pipeline *execution*
    /// is a non-goal, so `eval_binary` rejects `BinaryKind::Pipeline` with
    /// `ShellError::NotImplemented` rather than failing here at parse time.
    fn parse_pipeline(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        let mut lhs = self.parse_equality(arena, pool)?;
        while matches!(self.lexer.get_token().kind, TokenKind::Pipe) {
            self.lexer.consume_token();
            let rhs = self.parse_equality(arena, pool)?;
            lhs = arena.alloc_arith(Arith::Binary(BinaryKind::Pipeline, lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        let mut lhs = self.parse_comparison(arena, pool)?;
        loop {
            let kind = match self.lexer.get_token().kind {
                TokenKind::EqEq => BinaryKind::Equals,
                TokenKind::NotEq => BinaryKind::NotEquals,
                _ => break,
            };
            self.lexer.consume_token();
            let rhs = self.parse_comparison(arena, pool)?;
            lhs = arena.alloc_arith(Arith::Binary(kind, lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_comparison(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        let mut lhs = self.parse_additive(arena, pool)?;
        loop {
            let kind = match self.lexer.get_token().kind {
                TokenKind::Lt => BinaryKind::Less,
                TokenKind::LtEq => BinaryKind::LessEquals,
                TokenKind::Gt => BinaryKind::Greater,
                TokenKind::GtEq => BinaryKind::GreaterEquals,
                _ => break,
            };
            self.lexer.consume_token();
            let rhs = self.parse_additive(arena, pool)?;
            lhs = arena.alloc_arith(Arith::Binary(kind, lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        let mut lhs = self.parse_term(arena, pool)?;
        loop {
            let kind = match self.lexer.get_token().kind {
                TokenKind::Plus => BinaryKind::Addition,
                TokenKind::Minus => BinaryKind::Subtraction,
                _ => break,
            };
            self.lexer.consume_token();
            let rhs = self.parse_term(arena, pool)?;
            lhs = arena.alloc_arith(Arith::Binary(kind, lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_term(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        let mut lhs = self.parse_unary(arena, pool)?;
        loop {
            let kind = match self.lexer.get_token().kind {
                TokenKind::Star => BinaryKind::Multiplication,
                TokenKind::Slash => BinaryKind::Division,
                TokenKind::Percent => BinaryKind::Modulo,
                _ => break,
            };
            self.lexer.consume_token();
            let rhs = self.parse_unary(arena, pool)?;
            lhs = arena.alloc_arith(Arith::Binary(kind, lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        let kind = match self.lexer.get_token().kind {
            TokenKind::Plus => Some(UnaryKind::Positive),
            TokenKind::Minus => Some(UnaryKind::Negative),
            TokenKind::Bang => Some(UnaryKind::Not),
            _ => None,
        };
        if let Some(kind) = kind {
            self.lexer.consume_token();
            let inner = self.parse_unary(arena, pool)?;
            Ok(arena.alloc_arith(Arith::Unary(kind, inner)))
        } else {
            self.parse_primary(arena, pool)
        }
    }

    fn parse_primary(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        match self.lexer.get_token().kind.clone() {
            TokenKind::Integer(n) => {
                self.lexer.consume_token();
                Ok(arena.alloc_arith(Arith::Literal(Value::Integer(n))))
            }
            TokenKind::SingleQuotedString(s) => {
                self.lexer.consume_token();
                Ok(arena.alloc_arith(Arith::Literal(Value::init_cstring(s))))
            }
            TokenKind::BacktickString(s) => {
                self.lexer.consume_token();
                Ok(arena.alloc_arith(Arith::Literal(Value::init_cstring(s))))
            }
            TokenKind::DoubleQuoteDelim => {
                let cs = self.parse_compound_string(false, arena, pool)?;
                Ok(arena.alloc_arith(Arith::CompoundString(cs)))
            }
            TokenKind::DoubleBacktickDelim => {
                let cs = self.parse_compound_string(true, arena, pool)?;
                Ok(arena.alloc_arith(Arith::CompoundString(cs)))
            }
            TokenKind::VariableName(v) => {
                self.lexer.consume_token();
                let vref = self.varref_from_lex(v, pool);
                Ok(arena.alloc_arith(Arith::VarRef(vref)))
            }
            TokenKind::LParen => {
                self.lexer.consume_token();
                let inner = self.parse_arith(arena, pool)?;
                self.expect(TokenKind::RParen)?;
                Ok(arena.alloc_arith(Arith::Unary(UnaryKind::Parenthesized, inner)))
            }
            TokenKind::Identifier(name) if name == "if" => self.parse_if(arena, pool),
            TokenKind::Identifier(name) if name == "while" => self.parse_while(arena, pool),
            TokenKind::Identifier(_) | TokenKind::UnquotedString(_) | TokenKind::Character(_)
            | TokenKind::EscapedCharacter(_) => self.parse_command(arena, pool),
            other => Err(ShellError::Syntax(format!(
                "unexpected token in expression: {:?}",
                other
            ))),
        }
    }

    fn parse_if(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        self.lexer.consume_token(); // 'if'
        let cond = self.parse_arith(arena, pool)?;
        let then_block = self.parse_block(arena, pool)?;
        let else_block = if matches!(&self.lexer.get_token().kind, TokenKind::Identifier(n) if n == "else")
        {
            self.lexer.consume_token();
            Some(self.parse_block(arena, pool)?)
        } else {
            None
        };
        Ok(arena.alloc_arith(Arith::If(cond, then_block, else_block)))
    }

    fn parse_while(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        self.lexer.consume_token(); // 'while'
        let cond = self.parse_arith(arena, pool)?;
        let body = self.parse_block(arena, pool)?;
        Ok(arena.alloc_arith(Arith::While(cond, body)))
    }

    fn parse_compound_string(
        &mut self,
        in_backtick: bool,
        arena: &mut Arena,
        pool: &mut StringPool,
    ) -> ShellResult<NodeId<CompoundString>> {
        let mode = if in_backtick {
            LexMode::DoubleBacktick
        } else {
            LexMode::DoubleQuote
        };
        self.lexer.push_mode(mode);
        let mut cs = CompoundString::default();
        loop {
            let kind = self.lexer.get_token().kind.clone();
            match kind {
                TokenKind::DoubleQuoteDelim if !in_backtick => {
                    self.lexer.pop_mode();
                    break;
                }
                TokenKind::DoubleBacktickDelim if in_backtick => {
                    self.lexer.pop_mode();
                    break;
                }
                TokenKind::Eof => {
                    self.lexer.pop_mode();
                    return Err(ShellError::Syntax("unterminated compound string".into()));
                }
                TokenKind::StringSegment(s) => {
                    self.lexer.consume_token();
                    let seg = arena.alloc_segment(Segment::StringLiteral(pool.intern(&s)));
                    cs.push(seg);
                }
                TokenKind::EscapedCharacter(c) => {
                    self.lexer.consume_token();
                    let seg = arena.alloc_segment(Segment::EscapeSequence(c));
                    cs.push(seg);
                }
                TokenKind::VariableName(v) => {
                    self.lexer.consume_token();
                    let vref = self.varref_from_lex(v, pool);
                    let seg = arena.alloc_segment(Segment::VarRef(vref));
                    cs.push(seg);
                }
                other => {
                    self.lexer.pop_mode();
                    return Err(ShellError::Syntax(format!(
                        "unexpected token in compound string: {:?}",
                        other
                    )));
                }
            }
        }
        Ok(arena.alloc_compound_string(cs))
    }

    fn command_atom_terminates(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Newline
                | TokenKind::Semi
                | TokenKind::Amp
                | TokenKind::AmpAmp
                | TokenKind::Pipe
                | TokenKind::PipePipe
                | TokenKind::Eof
                | TokenKind::RBrace
                | TokenKind::RParen
                | TokenKind::Assign
        )
    }

    fn parse_command(&mut self, arena: &mut Arena, pool: &mut StringPool) -> ShellResult<NodeId<Arith>> {
        let mut slots: Vec<Vec<NodeId<Atom>>> = Vec::new();

        loop {
            let kind = self.lexer.get_token().kind.clone();
            if Self::command_atom_terminates(&kind) {
                break;
            }

            match kind {
                TokenKind::DoubleQuoteDelim => {
                    let ws = self.lexer.get_token().has_leading_whitespace;
                    let cs = self.parse_compound_string(false, arena, pool)?;
                    let atom = arena.alloc_atom(Atom::new(AtomKind::DoubleQuotedString(cs), ws));
                    Self::push_atom(&mut slots, atom, ws);
                }
                TokenKind::DoubleBacktickDelim => {
                    let ws = self.lexer.get_token().has_leading_whitespace;
                    let cs = self.parse_compound_string(true, arena, pool)?;
                    let atom = arena.alloc_atom(Atom::new(AtomKind::DoubleBacktickString(cs), ws));
                    Self::push_atom(&mut slots, atom, ws);
                }
                TokenKind::LParen => {
                    let ws = self.lexer.get_token().has_leading_whitespace;
                    self.lexer.consume_token();
                    let inner = self.parse_arith(arena, pool)?;
                    self.expect(TokenKind::RParen)?;
                    let atom = arena.alloc_atom(Atom::new(AtomKind::ArithmeticExpression(inner), ws));
                    Self::push_atom(&mut slots, atom, ws);
                }
                _ => {
                    let tok = self.lexer.consume_token();
                    let ws = tok.has_leading_whitespace;
                    let atom_kind = self.simple_atom_kind(tok.kind, pool)?;
                    let atom = arena.alloc_atom(Atom::new(atom_kind, ws));
                    Self::push_atom(&mut slots, atom, ws);
                }
            }
        }

        if slots.is_empty() {
            return Err(ShellError::Syntax("expected a command".into()));
        }
        Ok(arena.alloc_arith(Arith::Command(slots)))
    }

    fn push_atom(slots: &mut Vec<Vec<NodeId<Atom>>>, atom: NodeId<Atom>, has_leading_whitespace: bool) {
        if has_leading_whitespace || slots.is_empty() {
            slots.push(vec![atom]);
        } else {
            slots.last_mut().expect("checked non-empty").push(atom);
        }
    }

    fn simple_atom_kind(&self, kind: TokenKind, pool: &mut StringPool) -> ShellResult<AtomKind> {
        Ok(match kind {
            TokenKind::Identifier(s) | TokenKind::UnquotedString(s) => {
                AtomKind::UnquotedString(pool.intern(&s))
            }
            TokenKind::SingleQuotedString(s) => AtomKind::SingleQuotedString(pool.intern(&s)),
            TokenKind::BacktickString(s) => AtomKind::BacktickString(pool.intern(&s)),
            TokenKind::Integer(n) => AtomKind::Integer(n),
            TokenKind::VariableName(v) => AtomKind::VariableReference(self.varref_from_lex(v, pool)),
            TokenKind::EscapedCharacter(c) => AtomKind::EscapedCharacter(c),
            TokenKind::Character(c) => AtomKind::Character(c),
            TokenKind::Bang => AtomKind::Character('!'),
            TokenKind::Lt => AtomKind::Operator(AtomOperator::Lt),
            TokenKind::LtEq => AtomKind::Operator(AtomOperator::Le),
            TokenKind::Gt => AtomKind::Operator(AtomOperator::Gt),
            TokenKind::GtEq => AtomKind::Operator(AtomOperator::Ge),
            TokenKind::EqEq => AtomKind::Operator(AtomOperator::EqEq),
            TokenKind::NotEq => AtomKind::Operator(AtomOperator::NotEq),
            TokenKind::Plus => AtomKind::Operator(AtomOperator::Plus),
            TokenKind::Minus => AtomKind::Operator(AtomOperator::Minus),
            TokenKind::Star => AtomKind::Operator(AtomOperator::Star),
            TokenKind::Slash => AtomKind::Operator(AtomOperator::Slash),
            TokenKind::Percent => AtomKind::Operator(AtomOperator::Percent),
            // `Assign` never reaches here: `command_atom_terminates` always
            // ends the command's atom loop at `=` so `assignment := arith
            // '=' arith` gets a chance to fire.
            other => {
                return Err(ShellError::Syntax(format!(
                    "unexpected token inside command: {:?}",
                    other
                )))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, Stmt};

    fn parse_ok(src: &str) -> Script {
        Parser::new().parse(src).expect("parse should succeed")
    }

    #[test]
    fn integer_literal_statement() {
        let script = parse_ok("42\n");
        let list = script.arena.expr_list(script.body);
        assert_eq!(list.statements.len(), 1);
        match script.arena.stmt(list.statements[0]) {
            Stmt::Arithmetic(id) => {
                assert_eq!(script.arena.arith(*id), &Arith::Literal(Value::Integer(42)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn simple_command() {
        let script = parse_ok("echo hello world\n");
        let list = script.arena.expr_list(script.body);
        match script.arena.stmt(list.statements[0]) {
            Stmt::Arithmetic(id) => match script.arena.arith(*id) {
                Arith::Command(slots) => assert_eq!(slots.len(), 3),
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn assignment_to_var_ref() {
        let script = parse_ok("$x = 5\n");
        let list = script.arena.expr_list(script.body);
        match script.arena.stmt(list.statements[0]) {
            Stmt::Assignment(lhs, rhs) => {
                assert!(matches!(script.arena.arith(*lhs), Arith::VarRef(_)));
                assert_eq!(script.arena.arith(*rhs), &Arith::Literal(Value::Integer(5)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn var_decl() {
        let script = parse_ok("let x = 1\n");
        let list = script.arena.expr_list(script.body);
        match script.arena.stmt(list.statements[0]) {
            Stmt::VarDecl(modifiers, vref, _) => {
                assert!(!modifiers.mutable);
                assert!(!modifiers.public);
                assert_eq!(&*vref.name, "x");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn if_else_block() {
        let script = parse_ok("if 1 { 2 } else { 3 }\n");
        let list = script.arena.expr_list(script.body);
        match script.arena.stmt(list.statements[0]) {
            Stmt::Arithmetic(id) => match script.arena.arith(*id) {
                Arith::If(_, _then, Some(_else)) => {}
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn while_loop() {
        let script = parse_ok("while 1 { break }\n");
        let list = script.arena.expr_list(script.body);
        match script.arena.stmt(list.statements[0]) {
            Stmt::Arithmetic(id) => {
                assert!(matches!(script.arena.arith(*id), Arith::While(_, _)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn operator_precedence() {
        let script = parse_ok("1 + 2 * 3\n");
        let list = script.arena.expr_list(script.body);
        match script.arena.stmt(list.statements[0]) {
            Stmt::Arithmetic(id) => match script.arena.arith(*id) {
                Arith::Binary(BinaryKind::Addition, lhs, rhs) => {
                    assert_eq!(script.arena.arith(*lhs), &Arith::Literal(Value::Integer(1)));
                    assert!(matches!(
                        script.arena.arith(*rhs),
                        Arith::Binary(BinaryKind::Multiplication, _, _)
                    ));
                }
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn double_quoted_compound_string_with_var() {
        let script = parse_ok("echo \"hi $name\"\n");
        let list = script.arena.expr_list(script.body);
        match script.arena.stmt(list.statements[0]) {
            Stmt::Arithmetic(id) => match script.arena.arith(*id) {
                Arith::Command(slots) => {
                    assert_eq!(slots.len(), 2);
                }
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unterminated_block_is_syntax_error() {
        let result = Parser::new().parse("if 1 { 2 \n");
        assert!(matches!(result, Err(ShellError::Syntax(_))));
    }

    #[allow(dead_code)]
    fn block_type_check(_b: Block) {}
}
