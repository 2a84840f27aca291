//! Grounded on `load.c`: reads `argv[1]` whole and pushes its contents as a
//! `String` value.

use super::diagnostic;
use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_load(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    let Some(path) = argv.get(1) else {
        diagnostic(&argv[0], "expected a file path");
        ip.push_result(Value::Void);
        return Ok(1);
    };

    match std::fs::read_to_string(path) {
        Ok(text) => {
            ip.push_result(Value::init_cstring(text));
            Ok(0)
        }
        Err(e) => {
            diagnostic(&argv[0], format!("{}: {}", path, e));
            ip.push_result(Value::Void);
            Ok(1)
        }
    }
}
