//! Grounded on `input.c`: prints an optional prompt, reads one line from
//! stdin, and pushes it as a `String` value (without the trailing newline).

use super::diagnostic;
use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;
use std::io::Write;

pub fn cmd_input(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    if let Some(prompt) = argv.get(1) {
        print!("{}", prompt);
        std::io::stdout().flush().ok();
    }

    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(0) => {
            ip.push_result(Value::Void);
            Ok(0)
        }
        Ok(_) => {
            let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
            ip.push_result(Value::init_cstring(trimmed));
            Ok(0)
        }
        Err(e) => {
            diagnostic(&argv[0], e);
            ip.push_result(Value::Void);
            Ok(1)
        }
    }
}
