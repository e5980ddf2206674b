use super::*;
use crate::error::{ClirkError, UserFacingError};
use serde_json::json;
use std::sync::{Barrier, Mutex};
use std::thread;
use std::time::Duration;

fn plain() {
    colored::control::set_override(false);
}

fn shutdown() -> Shutdown {
    plain();
    Shutdown::with_command_name("test-cli")
}

fn finish(shutdown: &Shutdown, cause: Cause, exit_code: Option<i32>) -> (i32, Vec<String>) {
    let mut out = Vec::new();
    let code = shutdown.finish(&cause, exit_code, &mut out);
    let text = String::from_utf8(out).expect("utf8 output");
    (code, text.lines().map(str::to_string).collect())
}

#[test]
fn no_cause_exits_zero_silently() {
    let (code, lines) = finish(&shutdown(), Cause::None, None);
    assert_eq!(code, 0);
    assert!(lines.is_empty());
}

#[test]
fn null_json_cause_is_no_cause() {
    let (code, lines) = finish(&shutdown(), serde_json::Value::Null.into(), None);
    assert_eq!(code, 0);
    assert!(lines.is_empty());
}

#[test]
fn numeric_cause_is_exit_code() {
    let (code, lines) = finish(&shutdown(), 5.into(), None);
    assert_eq!(code, 5);
    assert_eq!(lines, vec!["✖ Exiting. (Error #5)"]);
}

#[test]
fn zero_cause_still_counts_as_error() {
    let (code, lines) = finish(&shutdown(), 0.into(), None);
    assert_eq!(code, 1);
    assert_eq!(lines, vec!["✖ Exiting. (Error #0)"]);
}

#[test]
fn user_facing_error_with_text_hint() {
    let cause = UserFacingError::new("X").with_hint("Y").into();
    let (code, lines) = finish(&shutdown(), cause, None);
    assert_eq!(code, 1);
    assert_eq!(lines, vec!["✖ X", "Y"]);
}

#[test]
fn user_facing_error_with_help_hint() {
    let cause = UserFacingError::new("Something went wrong.")
        .with_help_hint()
        .into();
    let (code, lines) = finish(&shutdown(), cause, None);
    assert_eq!(code, 1);
    assert_eq!(
        lines,
        vec![
            "✖ Something went wrong.",
            "Run test-cli --help for usage information."
        ]
    );
}

#[test]
fn user_facing_error_with_empty_hint_prints_message_only() {
    let cause = UserFacingError::new("Oops.").with_hint("").into();
    let (_, lines) = finish(&shutdown(), cause, None);
    assert_eq!(lines, vec!["✖ Oops."]);
}

#[test]
fn prompt_cancellation_is_terminated() {
    let (code, lines) = finish(&shutdown(), ClirkError::PromptCancelled.into(), None);
    assert_eq!(code, 1);
    assert_eq!(lines, vec!["💀 Terminated. (Prompt Cancelled)"]);
}

#[test]
fn unknown_cause_is_stringified() {
    let (code, lines) = finish(&shutdown(), "unexpected".into(), None);
    assert_eq!(code, 1);
    assert_eq!(lines, vec!["✖ unexpected"]);
}

#[test]
fn empty_or_messageless_causes_never_log_blank_lines() {
    let (code, lines) = finish(&shutdown(), "".into(), None);
    assert_eq!(code, 1);
    assert_eq!(lines, vec![r#"✖ Unknown Error ("")"#]);

    let (_, lines) = finish(&shutdown(), json!(42).into(), None);
    assert_eq!(lines, vec!["✖ Unknown Error (42)"]);

    let (_, lines) = finish(&shutdown(), json!({"code": 3}).into(), None);
    assert_eq!(lines, vec![r#"✖ Unknown Error ({"code":3})"#]);

    let (_, lines) = finish(&shutdown(), json!({"message": "boom"}).into(), None);
    assert_eq!(lines, vec!["✖ boom"]);
}

#[test]
fn explicit_code_wins() {
    let cause = Cause::from_error(Box::new(std::io::Error::other("Custom error")));
    let (code, lines) = finish(&shutdown(), cause, Some(2));
    assert_eq!(code, 2);
    assert_eq!(lines, vec!["✖ Custom error"]);

    let (code, lines) = finish(&shutdown(), Cause::None, Some(2));
    assert_eq!(code, 2);
    assert!(lines.is_empty());
}

#[test]
fn boxed_errors_are_classified() {
    let user_facing: crate::error::BoxError = Box::new(UserFacingError::new("x"));
    assert!(matches!(Cause::from_error(user_facing), Cause::UserFacing(_)));

    let cancelled: crate::error::BoxError = Box::new(ClirkError::PromptCancelled);
    assert!(matches!(Cause::from_error(cancelled), Cause::PromptCancelled));

    let other: crate::error::BoxError = Box::new(ClirkError::MissingPackagePath);
    assert!(matches!(Cause::from_error(other), Cause::Unknown(_)));
}

#[test]
fn failing_step_does_not_block_later_steps() {
    let shutdown = shutdown();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let a_calls = Arc::clone(&calls);
    shutdown.on_teardown(step(move |code, _| {
        a_calls.lock().expect("lock").push(("a", code));
        Err("a failed".into())
    }));
    let b_calls = Arc::clone(&calls);
    shutdown.on_teardown(step(move |code, _| {
        b_calls.lock().expect("lock").push(("b", code));
        Ok(())
    }));

    let (code, lines) = finish(&shutdown, Cause::None, None);
    assert_eq!(code, 1);
    assert_eq!(lines, vec!["✖ Error in teardown step: a failed"]);
    // b sees the escalated code
    assert_eq!(*calls.lock().expect("lock"), vec![("a", 0), ("b", 1)]);
}

#[test]
fn failing_step_keeps_nonzero_code() {
    let shutdown = shutdown();
    shutdown.on_teardown(step(|_, _| Err("nope".into())));
    let (code, _) = finish(&shutdown, 7.into(), None);
    assert_eq!(code, 7);
}

#[test]
fn panicking_step_is_caught_and_escalates() {
    let shutdown = shutdown();
    shutdown.on_teardown(step(|_, _| panic!("step exploded")));
    let mut out = Vec::new();
    let code = shutdown.run_teardown(0, &Cause::None, &mut out);
    assert_eq!(code, 1);
    let text = String::from_utf8(out).expect("utf8 output");
    assert!(text.contains("Error in teardown step: step exploded"));
}

#[test]
fn step_error_without_message_is_named_unknown() {
    let shutdown = shutdown();
    shutdown.on_teardown(step(|_, _| Err(String::new().into())));
    let (code, lines) = finish(&shutdown, Cause::None, None);
    assert_eq!(code, 1);
    assert_eq!(lines, vec!["✖ Error in teardown step: Unknown Error (N/A)"]);
}

#[test]
fn concurrent_runs_do_not_interleave() {
    let shutdown = shutdown();
    let events = Arc::new(Mutex::new(Vec::new()));
    let step_events = Arc::clone(&events);
    shutdown.on_teardown(step(move |_, _| {
        step_events.lock().expect("lock").push("enter");
        thread::sleep(Duration::from_millis(100));
        step_events.lock().expect("lock").push("leave");
        Ok(())
    }));

    let barrier = Barrier::new(2);
    thread::scope(|scope| {
        for _ in 0..2 {
            scope.spawn(|| {
                barrier.wait();
                shutdown.run_teardown(0, &Cause::None, &mut Vec::<u8>::new())
            });
        }
    });

    assert_eq!(
        *events.lock().expect("lock"),
        vec!["enter", "leave", "enter", "leave"]
    );
}

#[test]
fn steps_receive_the_cause() {
    let shutdown = shutdown();
    let seen = Arc::new(Mutex::new(None));
    let seen_in_step = Arc::clone(&seen);
    shutdown.on_teardown(step(move |code, cause| {
        *seen_in_step.lock().expect("lock") = Some((code, cause.is_error()));
        Ok(())
    }));
    let (code, _) = finish(&shutdown, 3.into(), None);
    assert_eq!(code, 3);
    assert_eq!(*seen.lock().expect("lock"), Some((3, true)));
}

#[test]
fn registry_has_set_semantics() {
    let registry = TeardownRegistry::new();
    let a = step(|_, _| Ok(()));
    let b = step(|_, _| Ok(()));

    assert!(registry.register(Arc::clone(&a)));
    assert!(!registry.register(Arc::clone(&a)));
    assert!(registry.register(Arc::clone(&b)));
    assert_eq!(registry.len(), 2);

    assert!(registry.unregister(&a));
    assert!(!registry.unregister(&a));
    assert!(!registry.contains(&a));
    assert!(registry.contains(&b));
    assert_eq!(registry.len(), 1);
}

#[test]
fn steps_persist_across_runs() {
    let registry = TeardownRegistry::new();
    let runs = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&runs);
    registry.register(step(move |_, _| {
        *counter.lock().expect("lock") += 1;
        Ok(())
    }));

    registry.run(0, &Cause::None, |_| {});
    registry.run(0, &Cause::None, |_| {});
    assert_eq!(*runs.lock().expect("lock"), 2);
    assert_eq!(registry.len(), 1);
}

#[test]
fn clones_share_the_registry() {
    let shutdown = shutdown();
    let clone = shutdown.clone();
    let s = step(|_, _| Ok(()));
    clone.on_teardown(Arc::clone(&s));
    assert!(shutdown.teardown().contains(&s));
    shutdown.off_teardown(&s);
    assert!(clone.teardown().is_empty());
}

#[test]
fn command_basename_strips_directories() {
    assert_eq!(command_basename("./path/to/test-command"), "test-command");
    assert_eq!(command_basename("tool"), "tool");
}
