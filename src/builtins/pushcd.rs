//! Grounded on `pushcd.c`: remembers the current directory on the cd stack,
//! then optionally changes into `argv[1]`.

use super::diagnostic;
use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_pushcd(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);

    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            diagnostic(&argv[0], e);
            return Ok(1);
        }
    };

    if let Some(path) = argv.get(1) {
        if let Err(e) = std::env::set_current_dir(path) {
            diagnostic(&argv[0], format!("{}: {}", path, e));
            return Ok(1);
        }
    }

    ip.cd_stack_mut().push(cwd.to_string_lossy().into_owned());
    Ok(0)
}
