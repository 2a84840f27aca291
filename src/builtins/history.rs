//! Prints the interactive line history accumulated by the REPL.

use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_history(ip: &mut Interpreter, _argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    for (i, line) in ip.history().iter().enumerate() {
        println!("{:5}  {}", i + 1, line);
    }
    ip.push_result(Value::Void);
    Ok(0)
}
