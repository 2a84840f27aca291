//! Interactive line-reading loop, grounded on the teacher's simpler
//! `Shell`-based `run_repl` in `main.rs` (the `rustyline::DefaultEditor`
//! path, not the postfix-stack-editing `HsabHelper` machinery in the
//! teacher's `repl.rs` — this shell has no operand-stack-visible REPL
//! shortcuts to support, so the plain editor is the right fit). Persists
//! history to `~/.seresh_history` across sessions the same way the
//! teacher persists `~/.hsab_history`.

use crate::interpreter::Interpreter;
use crate::rcfile::dirs_home;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn history_path() -> Option<std::path::PathBuf> {
    dirs_home().map(|h| h.join(".seresh_history"))
}

/// Run the interactive read-eval-print loop until `exit`, Ctrl-D, or a
/// builtin calls `Interpreter::request_exit`.
pub fn run(interp: &mut Interpreter) -> RlResult<i32> {
    let mut rl = DefaultEditor::new()?;

    let history_path = history_path();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    println!("sersh-{} Serena shell", VERSION);
    println!("  Type 'exit' or Ctrl-D to quit.");

    interp.is_interactive = true;

    loop {
        match rl.readline("sersh> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);
                interp.push_history_line(trimmed.to_string());

                match interp.execute(trimmed, true) {
                    Ok(_) => {}
                    Err(e) => eprintln!("{}", e),
                }

                if let Some(code) = interp.exit_requested() {
                    if let Some(ref path) = history_path {
                        let _ = rl.save_history(path);
                    }
                    return Ok(code);
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline error: {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(0)
}
