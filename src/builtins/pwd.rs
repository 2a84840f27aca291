//! Grounded on `pwd.c`: prints the process working directory.

use super::diagnostic;
use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn cmd_pwd(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);
    match std::env::current_dir() {
        Ok(path) => {
            println!("{}", path.display());
            Ok(0)
        }
        Err(e) => {
            diagnostic(&argv[0], e);
            Ok(1)
        }
    }
}
