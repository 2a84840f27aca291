//! Requests that the interpreter's host loop (the REPL or script runner in
//! `main.rs`) terminate, with an optional exit code.

use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_exit(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);
    let code = match argv.get(1) {
        Some(s) => s.parse::<i32>().unwrap_or(0),
        None => 0,
    };
    ip.request_exit(code);
    Ok(0)
}
