//! Prints its arguments, space-separated, followed by a newline.

use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_echo(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    println!("{}", argv[1..].join(" "));
    ip.push_result(Value::Void);
    Ok(0)
}
