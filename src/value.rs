//! Component B — `Value`, the single currency the evaluator passes around.
//!
//! Grounded on `examples/original_source/Commands/shell/Value.c`: the
//! operator tables below (`unary_op`, `binary_op`) mirror that file's
//! `Value_UnaryOp`/`Value_BinaryOp` switches case for case. The C source
//! manages string storage with `strdup`/`free` and a separate "no-copy"
//! flag; this crate replaces that with `Rc<String>` and `Rc::make_mut`,
//! which gives the same copy-on-write behavior (mutate only when the
//! backing is uniquely owned) without manual reference counting.

use crate::error::{ShellError, ShellResult};
use std::fmt;
use std::rc::Rc;

/// A shell string value. `Owned` is the ref-counted, potentially-shared,
/// mutable-on-unique-ownership backing described in spec.md §3. `Borrowed`
/// corresponds to the C source's `NoCopy` flag: storage owned by someone
/// else (the string pool, an environment entry) that this value only reads.
#[derive(Debug, Clone)]
pub enum RcString {
    Owned(Rc<String>),
    Borrowed(Rc<str>),
}

impl RcString {
    pub fn from_owned(s: String) -> Self {
        RcString::Owned(Rc::new(s))
    }

    pub fn from_borrowed(s: Rc<str>) -> Self {
        RcString::Borrowed(s)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RcString::Owned(rc) => rc.as_str(),
            RcString::Borrowed(rc) => rc.as_ref(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Ensures the backing is a uniquely-owned, mutable `Owned` buffer,
    /// converting a `Borrowed` or shared `Owned` into a fresh copy first.
    /// This is the copy-on-write choke point every mutating operation goes
    /// through, matching the C source's "materialize before mutate" rule.
    fn make_owned_unique(&mut self) -> &mut String {
        match self {
            RcString::Owned(rc) => Rc::make_mut(rc),
            RcString::Borrowed(rc) => {
                let owned = Rc::new(rc.to_string());
                *self = RcString::Owned(owned);
                match self {
                    RcString::Owned(rc) => Rc::make_mut(rc),
                    RcString::Borrowed(_) => unreachable!(),
                }
            }
        }
    }
}

impl PartialEq for RcString {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}
impl Eq for RcString {}

impl fmt::Display for RcString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tagged value union of spec.md §3. `Never` is the bottom value a
/// statement with no result produces; `Void` is the unit result of a
/// statement or command that succeeded without returning anything.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Never,
    Void,
    Bool(bool),
    Integer(i32),
    String(RcString),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Positive,
    Negative,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
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

impl Value {
    pub fn init_cstring(s: impl Into<String>) -> Self {
        Value::String(RcString::from_owned(s.into()))
    }

    pub fn init_borrowed(s: Rc<str>) -> Self {
        Value::String(RcString::from_borrowed(s))
    }

    pub fn is_truthy(&self) -> ShellResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Integer(i) => Ok(*i != 0),
            _ => Err(ShellError::TypeMismatch),
        }
    }

    /// Negation on Integer, logical-not on Bool, identity on `Positive`.
    /// `Parenthesized` is not a `UnaryOp` variant here — the parser simply
    /// does not wrap the inner expression, since grouping has no runtime
    /// effect once precedence has been resolved.
    pub fn unary_op(self, op: UnaryOp) -> ShellResult<Value> {
        match (self, op) {
            (Value::Integer(i), UnaryOp::Negative) => Ok(Value::Integer(-i)),
            (Value::Integer(i), UnaryOp::Positive) => Ok(Value::Integer(i)),
            (Value::Bool(b), UnaryOp::Not) => Ok(Value::Bool(!b)),
            _ => Err(ShellError::TypeMismatch),
        }
    }

    /// The binary operator table, case for case with `Value_BinaryOp` in
    /// the original C source.
    pub fn binary_op(self, rhs: Value, op: BinaryOp) -> ShellResult<Value> {
        use BinaryOp::*;
        match (self, rhs, op) {
            (Value::Bool(a), Value::Bool(b), Equals) => Ok(Value::Bool(a == b)),
            (Value::Integer(a), Value::Integer(b), Equals) => Ok(Value::Bool(a == b)),
            (Value::String(a), Value::String(b), Equals) => Ok(Value::Bool(a.as_str() == b.as_str())),

            (Value::Bool(a), Value::Bool(b), NotEquals) => Ok(Value::Bool(a != b)),
            (Value::Integer(a), Value::Integer(b), NotEquals) => Ok(Value::Bool(a != b)),
            (Value::String(a), Value::String(b), NotEquals) => Ok(Value::Bool(a.as_str() != b.as_str())),

            (Value::Integer(a), Value::Integer(b), LessEquals) => Ok(Value::Bool(a <= b)),
            (Value::String(a), Value::String(b), LessEquals) => {
                Ok(Value::Bool(a.as_str() <= b.as_str()))
            }

            (Value::Integer(a), Value::Integer(b), GreaterEquals) => Ok(Value::Bool(a >= b)),
            (Value::String(a), Value::String(b), GreaterEquals) => {
                Ok(Value::Bool(a.as_str() >= b.as_str()))
            }

            (Value::Integer(a), Value::Integer(b), Less) => Ok(Value::Bool(a < b)),
            (Value::String(a), Value::String(b), Less) => Ok(Value::Bool(a.as_str() < b.as_str())),

            (Value::Integer(a), Value::Integer(b), Greater) => Ok(Value::Bool(a > b)),
            (Value::String(a), Value::String(b), Greater) => Ok(Value::Bool(a.as_str() > b.as_str())),

            (Value::Integer(a), Value::Integer(b), Addition) => Ok(Value::Integer(a.wrapping_add(b))),
            (Value::String(mut a), Value::String(b), Addition) => {
                a.make_owned_unique().push_str(b.as_str());
                Ok(Value::String(a))
            }

            (Value::Integer(a), Value::Integer(b), Subtraction) => Ok(Value::Integer(a.wrapping_sub(b))),
            (Value::Integer(a), Value::Integer(b), Multiplication) => Ok(Value::Integer(a.wrapping_mul(b))),

            (Value::Integer(_), Value::Integer(0), Division) => Err(ShellError::DivByZero),
            (Value::Integer(a), Value::Integer(b), Division) => Ok(Value::Integer(a / b)),

            (Value::Integer(_), Value::Integer(0), Modulo) => Err(ShellError::DivByZero),
            (Value::Integer(a), Value::Integer(b), Modulo) => Ok(Value::Integer(a % b)),

            _ => Err(ShellError::TypeMismatch),
        }
    }

    /// Canonical string form: `Bool` → `"true"`/`"false"`, `Integer` → base
    /// 10 with sign, `Void`/`Never` → empty, `String` unchanged.
    pub fn to_canonical_string(&self) -> String {
        match self {
            Value::Never => String::new(),
            Value::Void => String::new(),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => "false".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::String(s) => s.as_str().to_string(),
        }
    }

    /// Converts `self` to a `String` value in place if it is not already
    /// one; a no-op for an existing `String`. Mirrors `Value_ToString`.
    pub fn to_string_value(self) -> Value {
        match self {
            Value::String(_) => self,
            other => Value::init_cstring(other.to_canonical_string()),
        }
    }

    /// Upper bound on the length of `to_canonical_string()`'s output,
    /// matching `Value_GetMaxStringLength`: 5 for Bool (`"false"`), the
    /// max digit count of an i32 for Integer, exact length for String.
    pub fn get_max_string_length(&self) -> usize {
        match self {
            Value::Never | Value::Void => 0,
            Value::Bool(_) => 5,
            Value::Integer(_) => 11, // "-2147483648"
            Value::String(s) => s.len(),
        }
    }

    /// Concatenates the string forms of `values` into one `String` value,
    /// the Rust analogue of `ValueArray_ToString`: if `values` is a single
    /// already-`String` element, it is returned unchanged rather than
    /// recopied.
    pub fn array_to_string(values: Vec<Value>) -> Value {
        if values.len() == 1 {
            if let Value::String(_) = &values[0] {
                return values.into_iter().next().unwrap();
            }
        }
        let mut out = String::with_capacity(values.iter().map(|v| v.get_max_string_length()).sum());
        for v in values {
            out.push_str(&v.to_canonical_string());
        }
        Value::init_cstring(out)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_negate_integer() {
        assert_eq!(
            Value::Integer(5).unary_op(UnaryOp::Negative).unwrap(),
            Value::Integer(-5)
        );
    }

    #[test]
    fn unary_not_bool() {
        assert_eq!(Value::Bool(true).unary_op(UnaryOp::Not).unwrap(), Value::Bool(false));
    }

    #[test]
    fn unary_type_mismatch() {
        assert!(matches!(
            Value::Bool(true).unary_op(UnaryOp::Negative),
            Err(ShellError::TypeMismatch)
        ));
    }

    #[test]
    fn string_equals_and_concat() {
        let a = Value::init_cstring("foo");
        let b = Value::init_cstring("bar");
        assert_eq!(
            a.clone().binary_op(b.clone(), BinaryOp::Equals).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            a.binary_op(b, BinaryOp::Addition).unwrap(),
            Value::init_cstring("foobar")
        );
    }

    #[test]
    fn division_by_zero() {
        assert!(matches!(
            Value::Integer(4).binary_op(Value::Integer(0), BinaryOp::Division),
            Err(ShellError::DivByZero)
        ));
    }

    #[test]
    fn modulo_by_zero() {
        assert!(matches!(
            Value::Integer(4).binary_op(Value::Integer(0), BinaryOp::Modulo),
            Err(ShellError::DivByZero)
        ));
    }

    #[test]
    fn copy_on_write_does_not_mutate_shared_backing() {
        let shared = Rc::new("hello".to_string());
        let a = Value::String(RcString::Owned(shared.clone()));
        let b = a.clone();
        let c = b.binary_op(Value::init_cstring(" world"), BinaryOp::Addition).unwrap();
        assert_eq!(c, Value::init_cstring("hello world"));
        assert_eq!(shared.as_str(), "hello");
    }

    #[test]
    fn canonical_string_forms() {
        assert_eq!(Value::Bool(true).to_canonical_string(), "true");
        assert_eq!(Value::Bool(false).to_canonical_string(), "false");
        assert_eq!(Value::Integer(-7).to_canonical_string(), "-7");
        assert_eq!(Value::Void.to_canonical_string(), "");
        assert_eq!(Value::Never.to_canonical_string(), "");
    }

    #[test]
    fn array_to_string_concatenates() {
        let vs = vec![Value::init_cstring("a"), Value::Integer(1), Value::Bool(true)];
        assert_eq!(Value::array_to_string(vs), Value::init_cstring("a1true"));
    }
}
