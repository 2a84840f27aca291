//! Black-box coverage of `Value` through the public crate API. Exhaustive
//! per-operator-pair coverage lives in `value.rs`'s own `#[cfg(test)]`
//! module; these exercise the cross-cutting properties spec.md §8 calls out.

use serena_shell::Value;

#[test]
fn integer_addition_wraps_instead_of_panicking() {
    let max = Value::Integer(i32::MAX);
    let one = Value::Integer(1);
    let result = max.binary_op(one, serena_shell::value::BinaryOp::Addition).unwrap();
    assert_eq!(result, Value::Integer(i32::MIN));
}

#[test]
fn division_by_zero_is_an_error_not_a_panic() {
    let a = Value::Integer(10);
    let b = Value::Integer(0);
    assert!(a.binary_op(b, serena_shell::value::BinaryOp::Division).is_err());
}

#[test]
fn string_equality_compares_contents_not_identity() {
    let a = Value::init_cstring("same");
    let b = Value::init_cstring("same");
    assert_eq!(
        a.binary_op(b, serena_shell::value::BinaryOp::Equals).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn canonical_string_round_trips_through_display() {
    assert_eq!(format!("{}", Value::Integer(-7)), "-7");
    assert_eq!(format!("{}", Value::Bool(true)), "true");
    assert_eq!(format!("{}", Value::Void), "");
}

#[test]
fn void_and_never_are_falsy_to_type_mismatch() {
    assert!(Value::Void.is_truthy().is_err());
    assert!(Value::Never.is_truthy().is_err());
}
