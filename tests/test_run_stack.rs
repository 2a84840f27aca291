//! Black-box coverage of `RunStack` through the public crate API.
//! Generation-counter bookkeeping and shadowing already have thorough
//! in-module coverage in `run_stack.rs`; these exercise scope lifetime and
//! redeclaration rules end to end.

use serena_shell::ast::VarModifiers;
use serena_shell::run_stack::RunStack;
use serena_shell::Value;
use std::rc::Rc;

fn mutable() -> VarModifiers {
    VarModifiers { mutable: true, public: false }
}

#[test]
fn popping_the_root_scope_underflows() {
    let mut rs = RunStack::new();
    assert!(rs.pop_scope().is_err());
}

#[test]
fn variable_does_not_outlive_its_scope() {
    let mut rs = RunStack::new();
    rs.push_scope();
    rs.declare_variable(mutable(), None, Rc::from("x"), Value::Integer(1)).unwrap();
    assert!(rs.get_variable(None, "x").is_ok());
    rs.pop_scope().unwrap();
    assert!(rs.get_variable(None, "x").is_err());
}

#[test]
fn redeclaring_in_the_same_scope_is_rejected() {
    let mut rs = RunStack::new();
    rs.declare_variable(mutable(), None, Rc::from("x"), Value::Integer(1)).unwrap();
    let result = rs.declare_variable(mutable(), None, Rc::from("x"), Value::Integer(2));
    assert!(result.is_err());
}

#[test]
fn shadowing_in_a_nested_scope_is_allowed() {
    let mut rs = RunStack::new();
    rs.declare_variable(mutable(), None, Rc::from("x"), Value::Integer(1)).unwrap();
    rs.push_scope();
    rs.declare_variable(mutable(), None, Rc::from("x"), Value::Integer(2)).unwrap();
    assert_eq!(rs.get_variable(None, "x").unwrap().value, Value::Integer(2));
    rs.pop_scope().unwrap();
    assert_eq!(rs.get_variable(None, "x").unwrap().value, Value::Integer(1));
}
