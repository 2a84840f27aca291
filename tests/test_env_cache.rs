//! Black-box coverage of `EnvironmentCache` through the public crate API,
//! complementing the in-module tests in `env_cache.rs`.

use serena_shell::ast::VarModifiers;
use serena_shell::env_cache::EnvironmentCache;
use serena_shell::run_stack::RunStack;
use serena_shell::Value;
use std::rc::Rc;

fn public() -> VarModifiers {
    VarModifiers { mutable: true, public: true }
}

#[test]
fn scoped_variable_exports_under_its_bare_name() {
    // The scope is a Run Stack lookup qualifier, not part of a child
    // process's environment — a child sees `HOST=example`, not
    // `net:HOST=example`.
    let mut rs = RunStack::new();
    rs.declare_variable(public(), Some(Rc::from("net")), Rc::from("HOST"), Value::init_cstring("example"))
        .unwrap();
    let mut cache = EnvironmentCache::new();
    let env = cache.get_environment(&rs);
    assert_eq!(env, &[("HOST".to_string(), "example".to_string())]);
}

#[test]
fn cache_rebuilds_after_a_new_public_declaration() {
    let mut rs = RunStack::new();
    let mut cache = EnvironmentCache::new();
    assert!(cache.get_environment(&rs).is_empty());

    rs.declare_variable(public(), None, Rc::from("A"), Value::init_cstring("1")).unwrap();
    let env = cache.get_environment(&rs);
    assert_eq!(env, &[("A".to_string(), "1".to_string())]);
}
