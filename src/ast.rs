//! Component D — the AST.
//!
//! All node kinds here are arena-allocated (see `arena.rs`): a node never
//! owns another node directly, only a `NodeId<T>` handle into the `Arena`
//! that produced it. Lists that spec.md describes as "singly linked with a
//! tail pointer for O(1) append" (atoms inside a command, segments inside a
//! compound string, statements inside a block) are represented here as
//! `Vec<NodeId<_>>` instead: a `Vec` gives the same O(1)-amortized append
//! and ordered traversal a hand-rolled linked list would, without the
//! pointer-chasing — the idiomatic Rust substitute for the same behavior.

use crate::arena::NodeId;
use crate::value::Value;
use std::rc::Rc;

/// `(scope, name)` — a bare `$x` is `VarRef { scope: None, name: "x" }` and
/// resolves by dynamic-scope search; `$s:x` is `VarRef { scope: Some("s"),
/// name: "x" }` and only matches variables declared in scope `s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    pub scope: Option<Rc<str>>,
    pub name: Rc<str>,
}

impl VarRef {
    pub fn unscoped(name: Rc<str>) -> Self {
        VarRef { scope: None, name }
    }

    pub fn scoped(scope: Rc<str>, name: Rc<str>) -> Self {
        VarRef {
            scope: Some(scope),
            name,
        }
    }
}

/// Single-character operator atoms inside a `Command`'s atom sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomOperator {
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
}

/// The smallest fragment of a word, per spec.md §3. Every atom is wrapped
/// together with `has_leading_whitespace` (below) so the parser can tell
/// adjacent atoms that concatenate into one argv slot from whitespace-
/// separated atoms that form separate slots.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomKind {
    Character(char),
    UnquotedString(Rc<str>),
    SingleQuotedString(Rc<str>),
    DoubleQuotedString(NodeId<CompoundString>),
    DoubleBacktickString(NodeId<CompoundString>),
    BacktickString(Rc<str>),
    EscapedCharacter(char),
    Integer(i32),
    VariableReference(VarRef),
    ArithmeticExpression(NodeId<Arith>),
    Operator(AtomOperator),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub kind: AtomKind,
    pub has_leading_whitespace: bool,
}

impl Atom {
    pub fn new(kind: AtomKind, has_leading_whitespace: bool) -> Self {
        Atom {
            kind,
            has_leading_whitespace,
        }
    }
}

/// One piece of a double-quoted or double-backtick compound string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    StringLiteral(Rc<str>),
    EscapeSequence(char),
    VarRef(VarRef),
    ArithmeticExpression(NodeId<Arith>),
}

/// An ordered sequence of `Segment`s. Evaluates by pushing each segment's
/// string form in order, then collapsing the pushed run into a single
/// `String` value via `Value::array_to_string`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundString {
    pub segments: Vec<NodeId<Segment>>,
}

impl CompoundString {
    pub fn push(&mut self, seg: NodeId<Segment>) {
        self.segments.push(seg);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryKind {
    Positive,
    Negative,
    Not,
    Parenthesized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    Pipeline,
    Disjunction,
    Conjunction,
    Equals,
    NotEquals,
    LessEquals,
    GreaterEquals,
    Less,
    Greater,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
}

/// A `Block` is `{ expr* }`: its own `ExpressionList`, introducing a run-
/// stack scope when evaluated. It carries no node of its own beyond the
/// list it wraps.
pub type Block = NodeId<ExprList>;

/// The "Arithmetic (expression)" variant of spec.md §3 — despite the name,
/// this is the general expression grammar (including `Command`, `If`,
/// `While`), not limited to arithmetic in the everyday sense.
#[derive(Debug, Clone, PartialEq)]
pub enum Arith {
    Literal(Value),
    CompoundString(NodeId<CompoundString>),
    VarRef(VarRef),
    /// The argv-producing form: a whitespace-grouped sequence of atom runs,
    /// one `Vec<NodeId<Atom>>` per argv slot.
    Command(Vec<Vec<NodeId<Atom>>>),
    Unary(UnaryKind, NodeId<Arith>),
    Binary(BinaryKind, NodeId<Arith>, NodeId<Arith>),
    If(NodeId<Arith>, Block, Option<Block>),
    While(NodeId<Arith>, Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VarModifiers {
    pub mutable: bool,
    pub public: bool,
}

/// The "Expression (statement)" variant of spec.md §3: one entry in an
/// `ExpressionList`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Null,
    Arithmetic(NodeId<Arith>),
    Assignment(NodeId<Arith>, NodeId<Arith>),
    VarDecl(VarModifiers, VarRef, NodeId<Arith>),
    Continue,
    Break(Option<NodeId<Arith>>),
}

/// An ordered list of statements — the body of a `Block` or of the whole
/// `Script`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExprList {
    pub statements: Vec<NodeId<Stmt>>,
}

impl ExprList {
    pub fn push(&mut self, stmt: NodeId<Stmt>) {
        self.statements.push(stmt);
    }
}

/// The parse tree and supporting pools for one parse-execute cycle.
/// Lifetime: a single script or REPL line; `arena` is reset once `body` has
/// been fully evaluated. `pool` may outlive one `Script` (the interpreter
/// can keep reusing it across REPL lines) per spec.md §3.
pub struct Script {
    pub arena: crate::arena::Arena,
    pub pool: crate::string_pool::StringPool,
    pub body: Block,
}
