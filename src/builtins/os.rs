//! Filesystem- and process-level builtins, grounded on the corresponding
//! single-purpose C sources: `delay.c`, `delete.c`, `id.c`, `list.c`,
//! `makedir.c`, `rename.c`, `shutdown.c`, `type.c`, `uptime.c`. Bundled into
//! one module here since each is a few lines wrapping a single std::fs or
//! std::process call — the Rust equivalents of the single libc/Serena-API
//! call each C builtin wrapped.

use super::diagnostic;
use crate::error::ShellResult;
use crate::interpreter::Interpreter;
use crate::value::Value;
use std::io::{Read, Write};
use std::time::Duration;

pub fn cmd_delay(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);
    let Some(ms_str) = argv.get(1) else {
        diagnostic(&argv[0], "expected a ms duration value");
        return Ok(1);
    };
    match ms_str.parse::<u64>() {
        Ok(ms) => {
            std::thread::sleep(Duration::from_millis(ms));
            Ok(0)
        }
        Err(_) => {
            diagnostic(&argv[0], "expected a ms duration value");
            Ok(1)
        }
    }
}

pub fn cmd_delete(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);
    if argv.len() < 2 {
        diagnostic(&argv[0], "expected paths of files to delete");
        return Ok(1);
    }
    for path in &argv[1..] {
        if let Err(e) = std::fs::remove_file(path) {
            diagnostic(&argv[0], format!("{}: {}", path, e));
            return Ok(1);
        }
    }
    Ok(0)
}

pub fn cmd_id(ip: &mut Interpreter, _argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    #[cfg(unix)]
    {
        // SAFETY: getuid/getgid take no arguments and cannot fail.
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        println!("uid={}, gid={}", uid, gid);
    }
    #[cfg(not(unix))]
    {
        println!("uid=0, gid=0");
    }
    ip.push_result(Value::Void);
    Ok(0)
}

pub fn cmd_list(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);

    let mut show_all = false;
    let mut paths: Vec<&str> = Vec::new();
    for arg in &argv[1..] {
        match arg.as_str() {
            "-a" | "--all" => show_all = true,
            other => paths.push(other),
        }
    }
    if paths.is_empty() {
        paths.push(".");
    }

    let mut any_error = false;
    let multiple = paths.len() > 1;
    for path in &paths {
        if multiple {
            println!("{}:", path);
        }
        match std::fs::read_dir(path) {
            Ok(entries) => {
                let mut names: Vec<String> = entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .filter(|n| show_all || !n.starts_with('.'))
                    .collect();
                names.sort();
                for name in names {
                    println!("{}", name);
                }
            }
            Err(e) => {
                diagnostic(&argv[0], format!("{}: {}", path, e));
                any_error = true;
            }
        }
    }

    Ok(if any_error { 1 } else { 0 })
}

pub fn cmd_makedir(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);
    let Some(path) = argv.get(1) else {
        diagnostic(&argv[0], "expected a path");
        return Ok(1);
    };
    match std::fs::create_dir(path) {
        Ok(()) => Ok(0),
        Err(e) => {
            diagnostic(&argv[0], format!("{}: {}", path, e));
            Ok(1)
        }
    }
}

pub fn cmd_rename(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);
    let (Some(old_path), Some(new_path)) = (argv.get(1), argv.get(2)) else {
        diagnostic(&argv[0], "expected a path and a destination path");
        return Ok(1);
    };
    match std::fs::rename(old_path, new_path) {
        Ok(()) => Ok(0),
        Err(e) => {
            diagnostic(&argv[0], format!("{}: {}", old_path, e));
            Ok(1)
        }
    }
}

/// Unlike the original, which spins forever after printing its message (the
/// shell there is the whole OS's init process), this one just reports the
/// message and returns — this process has a parent to return control to.
pub fn cmd_shutdown(ip: &mut Interpreter, _argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    println!("It is now safe to turn power off.");
    ip.push_result(Value::Void);
    Ok(0)
}

pub fn cmd_type(ip: &mut Interpreter, argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    ip.push_result(Value::Void);
    let Some(path) = argv.get(1) else {
        return Ok(0);
    };

    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            diagnostic(&argv[0], format!("{}: {}", path, e));
            return Ok(1);
        }
    };

    let mut buf = [0u8; 16];
    let mut addr: usize = 0;
    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                diagnostic(&argv[0], format!("{}: {}", path, e));
                return Ok(1);
            }
        };
        print_hex_line(addr, &buf[..n]);
        addr += n;
    }
    Ok(0)
}

fn print_hex_line(addr: usize, bytes: &[u8]) {
    print!("{:08x}:  ", addr);
    for b in bytes {
        print!("{:02x} ", b);
    }
    for _ in bytes.len()..16 {
        print!("   ");
    }
    print!(" |");
    for &b in bytes {
        let ch = if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' };
        print!("{}", ch);
    }
    println!("|");
    std::io::stdout().flush().ok();
}

pub fn cmd_uptime(ip: &mut Interpreter, _argv: &[String], _envp: &[(String, String)]) -> ShellResult<i32> {
    let millis = ip.uptime_millis();
    ip.push_result(Value::Integer(millis));
    Ok(0)
}
