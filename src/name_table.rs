//! Component I — Name Table.
//!
//! Same shape as the Run Stack (a stack of namespace frames with dynamic,
//! innermost-first lookup), but a frame's leaf entry maps a command name to
//! a callback rather than to a `Variable`. Grounded on `Builtins.h`'s flat
//! `cmd_*` function-pointer table: this crate replaces the C function-
//! pointer array with `Rc<dyn Fn(...)>` trait objects registered by name,
//! the idiomatic substitute for a dispatch table.

use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use std::collections::HashMap;
use std::rc::Rc;

/// A builtin callback: given the interpreter, the command's argv (already
/// serialized to owned strings) and its `KEY=VALUE` environment, it pushes
/// exactly one value onto the interpreter's operand stack and returns the
/// process-style exit code.
pub type BuiltinFn = Rc<dyn Fn(&mut Interpreter, &[String], &[(String, String)]) -> ShellResult<i32>>;

struct Namespace {
    names: HashMap<Rc<str>, BuiltinFn>,
}

impl Namespace {
    fn new() -> Self {
        Namespace {
            names: HashMap::new(),
        }
    }
}

pub struct NameTable {
    namespaces: Vec<Namespace>,
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NameTable {
    /// Constructs the table with one namespace already pushed, per
    /// spec.md §4.I.
    pub fn new() -> Self {
        NameTable {
            namespaces: vec![Namespace::new()],
        }
    }

    pub fn push_namespace(&mut self) {
        self.namespaces.push(Namespace::new());
    }

    pub fn pop_namespace(&mut self) {
        if self.namespaces.len() > 1 {
            self.namespaces.pop();
        }
    }

    /// Rejects a duplicate name within the current (innermost) namespace.
    pub fn declare_name(&mut self, name: Rc<str>, callback: BuiltinFn) -> ShellResult<()> {
        let top = self.namespaces.last_mut().expect("root namespace always present");
        if top.names.contains_key(&name) {
            return Err(crate::error::ShellError::RedefVar(name.to_string()));
        }
        top.names.insert(name, callback);
        Ok(())
    }

    /// Walks from the innermost namespace toward the root.
    pub fn get_name(&self, name: &str) -> Option<BuiltinFn> {
        for ns in self.namespaces.iter().rev() {
            if let Some(cb) = ns.names.get(name) {
                return Some(cb.clone());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_and_lookup() {
        let mut nt = NameTable::new();
        let cb: BuiltinFn = Rc::new(|_ip, _argv, _envp| Ok(0));
        nt.declare_name(Rc::from("noop"), cb).unwrap();
        assert!(nt.get_name("noop").is_some());
        assert!(nt.get_name("missing").is_none());
    }

    #[test]
    fn duplicate_in_same_namespace_fails() {
        let mut nt = NameTable::new();
        let cb: BuiltinFn = Rc::new(|_ip, _argv, _envp| Ok(0));
        nt.declare_name(Rc::from("noop"), cb.clone()).unwrap();
        assert!(nt.declare_name(Rc::from("noop"), cb).is_err());
    }

    #[test]
    fn nested_namespace_shadows_and_falls_back() {
        let mut nt = NameTable::new();
        let outer: BuiltinFn = Rc::new(|_ip, _argv, _envp| Ok(1));
        let inner: BuiltinFn = Rc::new(|_ip, _argv, _envp| Ok(2));
        nt.declare_name(Rc::from("cmd"), outer).unwrap();
        nt.push_namespace();
        nt.declare_name(Rc::from("cmd"), inner).unwrap();
        assert!(nt.get_name("cmd").is_some());
        nt.pop_namespace();
        assert!(nt.get_name("cmd").is_some());
    }
}
