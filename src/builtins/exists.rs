//! Grounded on `exists.c`: pushes a `Bool` reporting whether `argv[1]`
//! names an existing filesystem entry.

use super::diagnostic;
use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_exists(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    let Some(path) = argv.get(1) else {
        diagnostic(&argv[0], "expected a path");
        ip.push_result(Value::Void);
        return Ok(1);
    };
    ip.push_result(Value::Bool(std::path::Path::new(path).exists()));
    Ok(0)
}
