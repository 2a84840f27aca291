//! Component J — Environment Cache.
//!
//! Grounded on `examples/original_source/Commands/shell/EnvironCache.h`:
//! rebuilds a flattened `KEY=VALUE` environment from the Run Stack's
//! `Public` variables, lazily, only when the Run Stack's public-generation
//! counter has moved since the last build. The C source iterates
//! inner-to-outer and skips a name already inserted, so an inner scope's
//! definition shadows an outer one regardless of which scope declared it —
//! a `HashSet<String>` of seen names gives the same behavior here without a
//! hand-rolled hash chain. Keyed by the variable's bare name alone (the
//! scope, if any, is a Run Stack lookup qualifier, not part of a child
//! process's view of the environment), the same way `vars.rs` lists names.
//!
//! Spawning via `std::process::Command` takes an iterator of `(key, value)`
//! pairs directly, so there is no need to materialize the C source's flat
//! null-terminated `**const char envp` pointer array — `Command::envs`
//! already is the idiomatic Rust equivalent of that contract.

use crate::run_stack::RunStack;
use std::collections::HashSet;

#[derive(Default)]
pub struct EnvironmentCache {
    generation: Option<u64>,
    entries: Vec<(String, String)>,
}

impl EnvironmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached `KEY=VALUE` pairs, rebuilding first if the Run
    /// Stack's public variables could have changed since the last call.
    pub fn get_environment(&mut self, run_stack: &RunStack) -> &[(String, String)] {
        let current = run_stack.public_generation();
        if self.generation != Some(current) {
            self.rebuild(run_stack);
            self.generation = Some(current);
        }
        &self.entries
    }

    fn rebuild(&mut self, run_stack: &RunStack) {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        run_stack.iterate(|var| {
            if var.modifiers.public {
                let key = var.name.to_string();
                if seen.insert(key.clone()) {
                    entries.push((key, var.value.to_canonical_string()));
                }
            }
            true
        });
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::VarModifiers;
    use crate::value::Value;
    use std::rc::Rc;

    fn pub_mods() -> VarModifiers {
        VarModifiers {
            mutable: true,
            public: true,
        }
    }

    #[test]
    fn rebuilds_only_when_generation_changes() {
        let mut rs = RunStack::new();
        rs.declare_variable(pub_mods(), None, Rc::from("A"), Value::init_cstring("1"))
            .unwrap();
        let mut cache = EnvironmentCache::new();
        let env = cache.get_environment(&rs).to_vec();
        assert_eq!(env, vec![("A".to_string(), "1".to_string())]);

        let env_again = cache.get_environment(&rs).to_vec();
        assert_eq!(env_again, env);
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut rs = RunStack::new();
        rs.declare_variable(pub_mods(), None, Rc::from("A"), Value::init_cstring("outer"))
            .unwrap();
        rs.push_scope();
        rs.declare_variable(pub_mods(), None, Rc::from("A"), Value::init_cstring("inner"))
            .unwrap();

        let mut cache = EnvironmentCache::new();
        let env = cache.get_environment(&rs);
        assert_eq!(env, &[("A".to_string(), "inner".to_string())]);
    }

    #[test]
    fn non_public_variables_are_excluded() {
        let mut rs = RunStack::new();
        rs.declare_variable(
            VarModifiers {
                mutable: true,
                public: false,
            },
            None,
            Rc::from("SECRET"),
            Value::init_cstring("x"),
        )
        .unwrap();
        let mut cache = EnvironmentCache::new();
        assert!(cache.get_environment(&rs).is_empty());
    }
}
