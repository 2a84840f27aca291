//! Clears the terminal via the same ANSI escape the original `shutdown`
//! builtin uses to hide the cursor — here, to clear the screen and home the
//! cursor.

use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;
use std::io::Write;

pub fn cmd_cls(ip: &mut Interpreter, _argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().ok();
    ip.push_result(Value::Void);
    Ok(0)
}
