//! serena-shell — a command shell and script evaluator.
//!
//! Usage:
//!   sersh              Start interactive REPL
//!   sersh path ...     Execute each script in order, abort on first error

use serena_shell::interpreter::Interpreter;
use serena_shell::ast::VarModifiers;
use serena_shell::{rcfile, repl};
use std::process::ExitCode;
use std::rc::Rc;

/// Every `KEY=VALUE` in the parent environment becomes a `Public Mutable`
/// variable in scope `"global"`, per spec.md §6, so it round-trips back out
/// through the environment cache for spawned children.
fn seed_environment(interp: &mut Interpreter) {
    let global: Rc<str> = Rc::from("global");
    for (key, value) in std::env::vars() {
        let modifiers = VarModifiers { mutable: true, public: true };
        let _ = interp.run_stack_mut().declare_variable(
            modifiers,
            Some(global.clone()),
            Rc::from(key.as_str()),
            serena_shell::Value::init_cstring(value),
        );
    }
}

fn run_script(interp: &mut Interpreter, path: &str) -> bool {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            return false;
        }
    };

    match interp.execute(&content, false) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            false
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut interp = Interpreter::new();
    seed_environment(&mut interp);

    if args.is_empty() {
        rcfile::load_sereshrc(&mut interp);
        return match repl::run(&mut interp) {
            Ok(0) => ExitCode::SUCCESS,
            Ok(code) => ExitCode::from(code as u8),
            Err(e) => {
                eprintln!("readline error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    for path in &args {
        if !run_script(&mut interp, path) {
            return ExitCode::FAILURE;
        }
        if let Some(code) = interp.exit_requested() {
            return if code == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE };
        }
    }

    ExitCode::SUCCESS
}
