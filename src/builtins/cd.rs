//! Grounded on `cd.c`: change the process working directory to `argv[1]`.

use super::diagnostic;
use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_cd(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);

    let Some(path) = argv.get(1) else {
        diagnostic(&argv[0], "expected a path to a directory");
        return Ok(1);
    };

    match std::env::set_current_dir(path) {
        Ok(()) => Ok(0),
        Err(e) => {
            diagnostic(&argv[0], format!("{}: {}", path, e));
            Ok(1)
        }
    }
}
