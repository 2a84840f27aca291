//! Grounded on `vars.c`: lists declared variables in two passes — local
//! (non-public) first, then public — matching `do_vars`'s two-pass
//! `iter_vars` scan.

use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_vars(ip: &mut Interpreter, _argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    let mut local_count = 0;
    ip.run_stack().iterate(|var| {
        if !var.modifiers.public {
            println!("{}={}", var.name, var.value);
            local_count += 1;
        }
        true
    });

    if local_count > 0 {
        println!();
    }

    ip.run_stack().iterate(|var| {
        if var.modifiers.public {
            println!("{}={}", var.name, var.value);
        }
        true
    });

    ip.push_result(Value::Void);
    Ok(0)
}
