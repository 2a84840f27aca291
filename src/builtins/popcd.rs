//! Grounded on `popcd.c`: changes back into the directory most recently
//! remembered by `pushcd`.

use super::diagnostic;
use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_popcd(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);

    let Some(path) = ip.cd_stack_mut().pop() else {
        diagnostic(&argv[0], "empty stack");
        return Ok(1);
    };

    match std::env::set_current_dir(&path) {
        Ok(()) => Ok(0),
        Err(e) => {
            diagnostic(&argv[0], format!("{}: {}", path, e));
            Ok(1)
        }
    }
}
