use super::*;
use pretty_assertions::assert_eq;

fn err(n: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!("error {n}"))
        .at_line(n)
}

#[test]
fn tenth_error_is_fatal() {
    let mut queue = DiagnosticQueue::new();
    for n in 1..10 {
        assert!(queue.emit_error(err(n)).is_ok(), "error {n} should be accepted");
    }
    let tenth = queue.emit_error(err(10));
    assert_eq!(tenth, Err(FatalError::TooManyErrors { count: 10 }));
    assert_eq!(queue.error_count(), 10);
}

#[test]
fn eleventh_error_is_never_recorded() {
    let mut queue = DiagnosticQueue::new();
    for n in 1..=10 {
        let _ = queue.emit_error(err(n));
    }
    assert!(queue.emit_error(err(11)).is_err());

    let flushed = queue.flush();
    assert_eq!(flushed.len(), 10);
    assert!(flushed.iter().all(|d| d.message != "error 11"));
}

#[test]
fn report_all_disables_limit() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    for n in 1..=25 {
        assert!(queue.emit_error(err(n)).is_ok());
    }
    assert!(!queue.limit_reached());
    assert_eq!(queue.error_count(), 25);
}

#[test]
fn custom_limit() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        report_all: false,
    });
    assert!(queue.emit_error(err(1)).is_ok());
    assert!(queue.emit_error(err(2)).is_err());
    assert!(queue.limit_reached());
}

#[test]
fn warnings_do_not_count() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 1,
        report_all: false,
    });
    for _ in 0..5 {
        queue.warn(Diagnostic::warning(ErrorCode::E2004).with_message("w"));
    }
    assert_eq!(queue.error_count(), 0);
    assert_eq!(queue.warning_count(), 5);
    assert!(queue.has_errors().is_none());
}

#[test]
fn insertion_order_is_preserved() {
    let mut queue = DiagnosticQueue::new();
    let _ = queue.emit_error(err(30));
    let _ = queue.emit_error(err(2));
    let _ = queue.emit_soft_error(err(17));

    let lines: Vec<u32> = queue.peek().map(|d| d.line).collect();
    assert_eq!(lines, vec![30, 2, 17]);
}

#[test]
fn soft_and_hard_are_tracked() {
    let mut queue = DiagnosticQueue::new();
    let _ = queue.add_with_severity(err(1), DiagnosticSeverity::Soft);
    assert!(!queue.has_hard_error());
    assert_eq!(queue.soft_error_count(), 1);

    let _ = queue.add_with_severity(err(2), DiagnosticSeverity::Hard);
    assert!(queue.has_hard_error());
}

#[test]
fn flush_resets_state() {
    let mut queue = DiagnosticQueue::new();
    let _ = queue.emit_error(err(1));
    assert!(queue.has_errors().is_some());

    let flushed = queue.flush();
    assert_eq!(flushed.len(), 1);
    assert!(queue.is_empty());
    assert_eq!(queue.error_count(), 0);
    assert!(!queue.has_hard_error());
}

#[test]
fn too_many_errors_diagnostic() {
    let diag = too_many_errors(42);
    assert_eq!(diag.code, ErrorCode::E9002);
    assert_eq!(diag.line, 42);
}
