//! Builtin commands, grounded on `examples/original_source/Commands/shell/
//! builtins/*.c`. Each `cmd_*` C function took `(ip, argc, argv, envp)`,
//! parsed its own arguments with `clap` (a C argument-parsing library
//! unrelated to the Rust crate of the same name), pushed exactly one value
//! onto the interpreter's operand stack, and returned a process-style exit
//! code. This crate keeps that same `(ip, argv, envp) -> exit code, one
//! pushed value` contract but parses arguments by hand (see `main.rs` for
//! the same hand-rolled-CLI decision made for the binary's own argument
//! parsing) rather than carrying a `clap` dependency the teacher never had.

mod cd;
mod cls;
mod echo;
mod exists;
mod exit;
mod history;
mod input;
mod load;
mod os;
mod popcd;
mod pushcd;
mod pwd;
mod save;
mod vars;

use crate::name_table::NameTable;
use std::rc::Rc;

/// Prints a `<command>: <detail>` diagnostic to stderr, the Rust analogue of
/// `cmdlib.c`'s `print_error`.
pub(crate) fn diagnostic(cmd: &str, detail: impl std::fmt::Display) {
    eprintln!("{}: {}", cmd, detail);
}

pub fn register_all(nt: &mut NameTable) {
    macro_rules! register {
        ($name:expr, $func:path) => {
            nt.declare_name(Rc::from($name), Rc::new($func))
                .expect("builtin names are registered once and do not collide");
        };
    }

    register!("cd", cd::cmd_cd);
    register!("cls", cls::cmd_cls);
    register!("echo", echo::cmd_echo);
    register!("exists", exists::cmd_exists);
    register!("exit", exit::cmd_exit);
    register!("history", history::cmd_history);
    register!("input", input::cmd_input);
    register!("load", load::cmd_load);
    register!("popcd", popcd::cmd_popcd);
    register!("pushcd", pushcd::cmd_pushcd);
    register!("pwd", pwd::cmd_pwd);
    register!("save", save::cmd_save);
    register!("vars", vars::cmd_vars);

    register!("delay", os::cmd_delay);
    register!("delete", os::cmd_delete);
    register!("id", os::cmd_id);
    register!("list", os::cmd_list);
    register!("makedir", os::cmd_makedir);
    register!("rename", os::cmd_rename);
    register!("shutdown", os::cmd_shutdown);
    register!("type", os::cmd_type);
    register!("uptime", os::cmd_uptime);
}
