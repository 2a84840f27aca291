//! Crate-wide error type.
//!
//! Mirrors the shape of the abstract error kinds in the evaluator's
//! specification: one enum, one variant per kind, host I/O folded in via
//! `#[from]` the way the teacher's `ShellError`/`LexError` do it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("stack underflow")]
    Underflow,

    #[error("undefined variable: {0}")]
    UndefVar(String),

    #[error("variable already defined: {0}")]
    RedefVar(String),

    #[error("{0}: unknown command.")]
    NoCmd(String),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("type mismatch")]
    TypeMismatch,

    #[error("division by zero")]
    DivByZero,

    #[error("assignment target is not a variable")]
    NotLValue,

    #[error("variable is immutable")]
    Immutable,

    #[error("cannot use a value-less result as a command argument")]
    NoVal,

    #[error("break/continue used outside a loop")]
    NotLoop,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;
