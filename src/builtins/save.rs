//! Grounded on `save.c`: `save [-a|--append] <text> to <path>` writes
//! `<text>` to `<path>`, truncating unless `-a`/`--append` is given.

use super::diagnostic;
use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;
use std::fs::OpenOptions;
use std::io::Write;

pub fn cmd_save(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);

    let mut append = false;
    let mut positional = Vec::new();
    for arg in &argv[1..] {
        match arg.as_str() {
            "-a" | "--append" => append = true,
            other => positional.push(other),
        }
    }

    if positional.len() != 3 || positional[1] != "to" {
        diagnostic(&argv[0], "expected 'save [-a] <text> to <path>'");
        return Ok(1);
    }
    let text = positional[0];
    let path = positional[2];

    let result = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .and_then(|mut f| f.write_all(text.as_bytes()));

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            diagnostic(&argv[0], format!("{}: {}", path, e));
            Ok(1)
        }
    }
}
