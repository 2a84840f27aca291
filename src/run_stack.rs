//! Component H — Run Stack.
//!
//! Scopes form a stack of frames; grounded on `examples/original_source/
//! Commands/shell/RunStack.h`, whose `RunStack_GetExportedVariablesGeneration`
//! is the direct ancestor of `RunStack::public_generation` below. A HashMap
//! keyed by `(scope, name)` replaces the C source's hand-rolled hash chain
//! per scope — same lookup behavior, no manual chaining.

use crate::ast::VarModifiers;
use crate::error::{ShellError, ShellResult};
use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct Variable {
    pub scope: Option<Rc<str>>,
    pub name: Rc<str>,
    pub modifiers: VarModifiers,
    pub value: Value,
}

type VarKey = (Option<Rc<str>>, Rc<str>);

struct Frame {
    vars: HashMap<VarKey, Variable>,
    public_count: usize,
}

impl Frame {
    fn new() -> Self {
        Frame {
            vars: HashMap::new(),
            public_count: 0,
        }
    }
}

/// A stack of variable scopes with dynamic (innermost-first) lookup and a
/// generation counter that bumps whenever the set of `Public` variables
/// visible to a future `EnvironmentCache` rebuild could have changed.
pub struct RunStack {
    frames: Vec<Frame>,
    public_generation: u64,
}

impl Default for RunStack {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStack {
    pub fn new() -> Self {
        RunStack {
            frames: vec![Frame::new()],
            public_generation: 0,
        }
    }

    pub fn push_scope(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Fails with `Underflow` when asked to pop the root scope.
    pub fn pop_scope(&mut self) -> ShellResult<()> {
        if self.frames.len() <= 1 {
            return Err(ShellError::Underflow);
        }
        let frame = self.frames.pop().expect("checked len > 1");
        if frame.public_count > 0 {
            self.public_generation += 1;
        }
        Ok(())
    }

    pub fn declare_variable(
        &mut self,
        modifiers: VarModifiers,
        scope_name: Option<Rc<str>>,
        var_name: Rc<str>,
        value: Value,
    ) -> ShellResult<()> {
        let frame = self.frames.last_mut().expect("root frame always present");
        let key = (scope_name.clone(), var_name.clone());
        if frame.vars.contains_key(&key) {
            return Err(ShellError::RedefVar(var_name.to_string()));
        }
        if modifiers.public {
            frame.public_count += 1;
            self.public_generation += 1;
        }
        frame.vars.insert(
            key,
            Variable {
                scope: scope_name,
                name: var_name,
                modifiers,
                value,
            },
        );
        Ok(())
    }

    /// Dynamic-scope search from the current (innermost) frame upward. An
    /// empty `scope_name` matches on `var_name` alone; a present one must
    /// match both.
    pub fn get_variable(&self, scope_name: Option<&str>, var_name: &str) -> ShellResult<&Variable> {
        for frame in self.frames.iter().rev() {
            for var in frame.vars.values() {
                if var.name.as_ref() != var_name {
                    continue;
                }
                match scope_name {
                    None => return Ok(var),
                    Some(s) if var.scope.as_deref() == Some(s) => return Ok(var),
                    Some(_) => continue,
                }
            }
        }
        Err(ShellError::UndefVar(var_name.to_string()))
    }

    pub fn get_variable_mut(
        &mut self,
        scope_name: Option<&str>,
        var_name: &str,
    ) -> ShellResult<&mut Variable> {
        for frame in self.frames.iter_mut().rev() {
            for var in frame.vars.values_mut() {
                if var.name.as_ref() != var_name {
                    continue;
                }
                match scope_name {
                    None => return Ok(var),
                    Some(s) if var.scope.as_deref() == Some(s) => return Ok(var),
                    Some(_) => continue,
                }
            }
        }
        Err(ShellError::UndefVar(var_name.to_string()))
    }

    /// Toggles a variable's `public` flag, keeping each frame's
    /// `public_count` (and hence the generation counter) consistent.
    pub fn set_variable_public(
        &mut self,
        scope_name: Option<&str>,
        var_name: &str,
        exported: bool,
    ) -> ShellResult<()> {
        for frame in self.frames.iter_mut().rev() {
            for var in frame.vars.values_mut() {
                if var.name.as_ref() != var_name {
                    continue;
                }
                let matches_scope = match scope_name {
                    None => true,
                    Some(s) => var.scope.as_deref() == Some(s),
                };
                if !matches_scope {
                    continue;
                }
                if var.modifiers.public != exported {
                    var.modifiers.public = exported;
                    if exported {
                        frame.public_count += 1;
                    } else {
                        frame.public_count = frame.public_count.saturating_sub(1);
                    }
                    self.public_generation += 1;
                }
                return Ok(());
            }
        }
        Err(ShellError::UndefVar(var_name.to_string()))
    }

    /// Visits every variable from the top scope down to the root; within a
    /// single scope the order is unspecified. `cb` returns `false` to stop
    /// early.
    pub fn iterate(&self, mut cb: impl FnMut(&Variable) -> bool) {
        for frame in self.frames.iter().rev() {
            for var in frame.vars.values() {
                if !cb(var) {
                    return;
                }
            }
        }
    }

    pub fn public_generation(&self) -> u64 {
        self.public_generation
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifiers(mutable: bool, public: bool) -> VarModifiers {
        VarModifiers { mutable, public }
    }

    #[test]
    fn declare_and_get() {
        let mut rs = RunStack::new();
        rs.declare_variable(modifiers(true, false), None, Rc::from("x"), Value::Integer(1))
            .unwrap();
        assert_eq!(rs.get_variable(None, "x").unwrap().value, Value::Integer(1));
    }

    #[test]
    fn redeclare_in_same_scope_fails() {
        let mut rs = RunStack::new();
        rs.declare_variable(modifiers(true, false), None, Rc::from("x"), Value::Integer(1))
            .unwrap();
        let err = rs
            .declare_variable(modifiers(true, false), None, Rc::from("x"), Value::Integer(2))
            .unwrap_err();
        assert!(matches!(err, ShellError::RedefVar(_)));
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut rs = RunStack::new();
        rs.declare_variable(modifiers(true, false), None, Rc::from("x"), Value::Integer(1))
            .unwrap();
        rs.push_scope();
        rs.declare_variable(modifiers(true, false), None, Rc::from("x"), Value::Integer(2))
            .unwrap();
        assert_eq!(rs.get_variable(None, "x").unwrap().value, Value::Integer(2));
        rs.pop_scope().unwrap();
        assert_eq!(rs.get_variable(None, "x").unwrap().value, Value::Integer(1));
    }

    #[test]
    fn pop_root_scope_underflows() {
        let mut rs = RunStack::new();
        assert!(matches!(rs.pop_scope(), Err(ShellError::Underflow)));
    }

    #[test]
    fn public_generation_bumps_on_declare_and_pop() {
        let mut rs = RunStack::new();
        let gen0 = rs.public_generation();
        rs.push_scope();
        rs.declare_variable(modifiers(true, true), None, Rc::from("PUB"), Value::init_cstring("v"))
            .unwrap();
        let gen1 = rs.public_generation();
        assert!(gen1 > gen0);
        rs.pop_scope().unwrap();
        assert!(rs.public_generation() > gen1);
    }

    #[test]
    fn scoped_lookup_requires_matching_scope() {
        let mut rs = RunStack::new();
        rs.declare_variable(
            modifiers(true, false),
            Some(Rc::from("s")),
            Rc::from("x"),
            Value::Integer(9),
        )
        .unwrap();
        assert!(rs.get_variable(Some("other"), "x").is_err());
        assert_eq!(rs.get_variable(Some("s"), "x").unwrap().value, Value::Integer(9));
    }
}
