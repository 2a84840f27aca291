//! Startup script loading, grounded on the teacher's `rcfile.rs`: read a
//! dotfile to a string, split it into statements, run each one through the
//! same entry point a script file uses, and warn (never abort) on a
//! per-statement error. `~/.sereshrc` is this shell's analogue of the
//! teacher's `~/.hsabrc`; there is no separate stdlib or profile file, since
//! the original C shell has neither.

use crate::interpreter::Interpreter;
use std::env;
use std::fs;

/// Get the user's home directory.
pub(crate) fn dirs_home() -> Option<std::path::PathBuf> {
    env::var_os("HOME").map(std::path::PathBuf::from)
}

/// Load and execute `~/.sereshrc` if it exists. Silently does nothing if
/// `$HOME` is unset or the file is missing.
pub fn load_sereshrc(interp: &mut Interpreter) {
    let rc_path = match dirs_home() {
        Some(home) => home.join(".sereshrc"),
        None => return,
    };

    let content = match fs::read_to_string(&rc_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    load_rc_content(interp, &content, "~/.sereshrc");
}

/// Run each non-blank, non-comment line of rc content through the
/// interpreter, warning to stderr on failure and continuing with the rest
/// of the file rather than aborting startup.
fn load_rc_content(interp: &mut Interpreter, content: &str, source: &str) {
    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Err(e) = interp.execute(trimmed, false) {
            eprintln!("{} line {}: {}", source, line_num + 1, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_content_runs_each_statement() {
        let mut interp = Interpreter::new();
        load_rc_content(&mut interp, "let x = 1\nvar y = 2\n", "test");
        let result = interp.execute("$x + $y\n", false).unwrap();
        assert_eq!(result, crate::value::Value::Integer(3));
    }

    #[test]
    fn rc_content_skips_comments_and_blank_lines() {
        let mut interp = Interpreter::new();
        load_rc_content(&mut interp, "# a comment\n\nlet x = 5\n", "test");
        let result = interp.execute("$x\n", false).unwrap();
        assert_eq!(result, crate::value::Value::Integer(5));
    }

    #[test]
    fn rc_content_warns_but_continues_past_an_error() {
        let mut interp = Interpreter::new();
        load_rc_content(&mut interp, "$undefined\nlet x = 9\n", "test");
        let result = interp.execute("$x\n", false).unwrap();
        assert_eq!(result, crate::value::Value::Integer(9));
    }
}
