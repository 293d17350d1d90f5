// End-to-end scenarios for the PQEK pipeline: source text in, console
// messages and diagnostics out.

use std::thread;

use pqek::runtime::{ChannelConsole, MemoryConsole, Message, Value};
use pqek::{Interpreter, Options, PqekError, Severity};
use pretty_assertions::assert_eq;

fn run(source: &str, inputs: &[&str]) -> (Result<pqek::Summary, PqekError>, MemoryConsole) {
    let mut console = MemoryConsole::with_inputs(inputs.iter().copied());
    let result = pqek::run(source, &Options::default(), &mut console);
    (result, console)
}

fn semantic_messages(error: PqekError) -> Vec<String> {
    match error {
        PqekError::SemanticErrors(errors) => errors.iter().map(|e| e.message()).collect(),
        other => panic!("Expected semantic errors, got {:?}", other),
    }
}

#[test]
fn declare_assign_and_print() {
    let (result, console) = run("x Entero; x = 5; Mensaje.Texto(\"ok\");", &[]);

    assert!(result.unwrap().is_clean());
    assert_eq!(
        console.texts(Severity::Info),
        vec!["Running program...", "Variable declared: x (Entero)", "x = 5", "ok"]
    );
    assert!(console.texts(Severity::Error).is_empty());
}

#[test]
fn undeclared_target_stops_before_execution() {
    let (result, console) = run("x Entero; y = x + 3;", &[]);

    let messages = semantic_messages(result.unwrap_err());
    assert_eq!(messages, vec!["assignment to undeclared target 'y'".to_string()]);
    assert!(!console.texts(Severity::Info).contains(&"Running program..."));
}

#[test]
fn duplicate_declaration_reported_once() {
    let (result, _) = run("x Entero; x Real;", &[]);

    let messages = semantic_messages(result.unwrap_err());
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("duplicate declaration of 'x'"));
}

#[test]
fn undeclared_operand_reports_each_failed_check() {
    let (result, console) = run("x Entero; x = z + 1;", &[]);

    let messages = semantic_messages(result.unwrap_err());
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], "reference to undeclared variable 'z'");
    assert!(messages[1].starts_with("cannot apply '+'"));
    assert!(messages[2].starts_with("incompatible type"));
    assert!(console.texts(Severity::Success).contains(&"Syntax OK"));
}

#[test]
fn real_arithmetic_is_logged_with_decimal_comma() {
    let (result, console) = run("x Real; x = 3,5; y Real; y = x * 2;", &[]);

    assert!(result.unwrap().is_clean());
    assert!(console.texts(Severity::Info).contains(&"x = 3,5"));
    assert!(console.texts(Severity::Info).contains(&"y = 7,0"));
}

#[test]
fn invalid_character_is_reported_and_skipped() {
    let (result, console) = run("x Entero; x = #5;", &[]);

    let summary = result.unwrap();
    assert_eq!(summary.lexical_errors, 1);
    assert_eq!(summary.runtime_errors, 0);
    assert_eq!(console.texts(Severity::Error), vec!["Lexer Error: Unexpected character '#' at 1:15"]);
    assert!(console.texts(Severity::Info).contains(&"x = 5"));
}

#[test]
fn zero_based_lexer_lines_option() {
    let mut console = MemoryConsole::new();
    let options = Options {
        zero_based_lexer_lines: true,
    };
    pqek::run("x Entero;\nx = 1 $;", &options, &mut console).unwrap();

    assert_eq!(console.texts(Severity::Error), vec!["Lexer Error: Unexpected character '$' at 1:7"]);
}

#[test]
fn runtime_failure_does_not_stop_later_statements() {
    let source = "cero Entero; cero = 0; r Real; r = 10 / cero; ok Entero; ok = 1 + 1;";
    let (result, console) = run(source, &[]);

    assert_eq!(result.unwrap().runtime_errors, 1);
    let errors = console.texts(Severity::Error);
    assert_eq!(errors[0], "Execution error (Assign): Division by zero");
    assert_eq!(errors[1], "Execution finished with 1 error(s)");
    assert!(console.texts(Severity::Info).contains(&"ok = 2"));
}

#[test]
fn unassigned_variable_fails_only_at_runtime() {
    let (result, console) = run("x Entero; y Entero; y = x + 1;", &[]);

    assert_eq!(result.unwrap().runtime_errors, 1);
    assert!(console.texts(Severity::Error)[0].contains("unassigned variable 'x'"));
}

#[test]
fn syntax_error_is_fatal() {
    let (result, console) = run("x Entero;\nx = 1 +;\nMensaje.Texto(\"never\");", &[]);

    match result.unwrap_err() {
        PqekError::ParseError { message, .. } => {
            assert_eq!(message, "Unexpected token ';' (kind=SEMICOLON) at line 2");
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
    assert!(console.messages().is_empty());
}

#[test]
fn captured_values_feed_later_statements() {
    let source = "a Entero; a = Captura.Entero(); b Real; b = Captura.Real(); c Real; c = a + b;";
    let (result, console) = run(source, &["2", "0,5"]);

    assert!(result.unwrap().is_clean());
    assert!(console.texts(Severity::Info).contains(&"c = 2,5"));
}

#[test]
fn channel_console_hands_input_across_threads() {
    let program = pqek::parse(pqek::tokenize("n Entero; n = Captura.Entero(); d Entero; d = n * 2;", &Options::default())).unwrap();
    pqek::analyze(&program).unwrap();

    let (console, handle) = ChannelConsole::new();
    let worker = thread::spawn(move || {
        let mut interpreter = Interpreter::new(console);
        interpreter.interpret(&program);
        interpreter.value_of("d").cloned()
    });

    // Execution is suspended at the prompt until a value arrives
    loop {
        let message = handle.recv().expect("interpreter stopped before asking for input");
        if message == Message::new("Enter a value of type Entero:", Severity::Info) {
            break;
        }
    }
    assert!(handle.supply("21"));

    assert_eq!(worker.join().unwrap(), Some(Value::Integer(42)));
    let rest: Vec<String> = handle.drain().into_iter().map(|m| m.text).collect();
    assert_eq!(rest, vec!["n = 21", "Variable declared: d (Entero)", "d = 42"]);
}
