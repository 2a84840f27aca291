//! End-to-end interpreter coverage: scripts that exercise command dispatch,
//! builtins, and error propagation together, on top of `interpreter.rs`'s
//! own in-module unit tests of single evaluator operations.

use serena_shell::{Interpreter, Value};

#[test]
fn exists_builtin_pushes_a_bool() {
    let mut interp = Interpreter::new();
    let result = interp.execute("exists /\n", false).unwrap();
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn exists_builtin_false_for_missing_path() {
    let mut interp = Interpreter::new();
    let result = interp
        .execute("exists /no/such/path/hopefully-missing\n", false)
        .unwrap();
    assert_eq!(result, Value::Bool(false));
}

#[test]
fn unknown_command_is_nocmd_error() {
    let mut interp = Interpreter::new();
    let result = interp.execute("this-command-does-not-exist-anywhere\n", false);
    assert!(matches!(result, Err(serena_shell::ShellError::NoCmd(_))));
}

#[test]
fn exit_builtin_records_the_requested_code() {
    let mut interp = Interpreter::new();
    interp.execute("exit 7\n", false).unwrap();
    assert_eq!(interp.exit_requested(), Some(7));
}

#[test]
fn string_concatenation_via_addition() {
    let mut interp = Interpreter::new();
    let result = interp
        .execute("let a = \"foo\"\nlet b = \"bar\"\n$a + $b\n", false)
        .unwrap();
    assert_eq!(result, Value::init_cstring("foobar"));
}

#[test]
fn nested_while_loops_each_track_their_own_break() {
    let mut interp = Interpreter::new();
    let result = interp
        .execute(
            "var total = 0\nvar i = 0\nwhile $i < 3 {\n  var j = 0\n  while $j < 3 {\n    $total = $total + 1\n    $j = $j + 1\n  }\n  $i = $i + 1\n}\n$total\n",
            false,
        )
        .unwrap();
    assert_eq!(result, Value::Integer(9));
}

#[test]
fn redeclaring_a_variable_in_the_same_statement_list_fails() {
    let mut interp = Interpreter::new();
    let result = interp.execute("let x = 1\nlet x = 2\n", false);
    assert!(matches!(result, Err(serena_shell::ShellError::RedefVar(_))));
}

#[test]
fn pipeline_parses_but_evaluation_reports_not_implemented() {
    let mut interp = Interpreter::new();
    let result = interp.execute("echo a | echo b\n", false);
    assert!(matches!(
        result,
        Err(serena_shell::ShellError::NotImplemented(_))
    ));
}

#[test]
fn public_variable_is_visible_to_a_spawned_child_environment() {
    // `load` is a builtin, but the real point here is that declaring a
    // Public variable and then running any command doesn't error out while
    // rebuilding the environment cache.
    let mut interp = Interpreter::new();
    let result = interp.execute("public var GREETING = \"hi\"\npwd\n", false);
    assert!(result.is_ok());
}
