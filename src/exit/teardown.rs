use super::cause::Cause;
use crate::error::BoxError;
use crate::utils::stringify::{UnknownCause, stringify_error};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cleanup callback run before the process exits. Receives the exit code and
/// the cause that triggered the exit.
pub type TeardownStep = Arc<dyn Fn(i32, &Cause) -> Result<(), BoxError> + Send + Sync>;

/// Wrap a closure as a [`TeardownStep`].
pub fn step<F>(f: F) -> TeardownStep
where
    F: Fn(i32, &Cause) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Insertion-ordered set of teardown steps. Identity is the `Arc` allocation,
/// so registering a clone of an already registered step is a no-op.
#[derive(Default)]
pub struct TeardownRegistry {
    steps: Mutex<Vec<TeardownStep>>,
    /// Held for a whole run; concurrent exits tear down one after another.
    running: Mutex<()>,
}

fn same_step(a: &TeardownStep, b: &TeardownStep) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl TeardownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TeardownStep>> {
        self.steps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `false` if the step was already registered.
    pub fn register(&self, step: TeardownStep) -> bool {
        let mut steps = self.lock();
        if steps.iter().any(|s| same_step(s, &step)) {
            return false;
        }
        steps.push(step);
        true
    }

    /// Returns `false` if the step was not registered.
    pub fn unregister(&self, step: &TeardownStep) -> bool {
        let mut steps = self.lock();
        let before = steps.len();
        steps.retain(|s| !same_step(s, step));
        steps.len() != before
    }

    pub fn contains(&self, step: &TeardownStep) -> bool {
        self.lock().iter().any(|s| same_step(s, step))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Run every step in registration order and return the final exit code.
    ///
    /// Steps run one after another on the calling thread, and runs started
    /// from other threads wait for this one to finish. A step returning an
    /// error or panicking is reported through `on_failure` and turns a
    /// successful code 0 into 1; a non-zero code is never changed. Remaining
    /// steps run regardless.
    pub fn run(&self, code: i32, cause: &Cause, mut on_failure: impl FnMut(&str)) -> i32 {
        let _running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        // Steps may (un)register while running, so iterate a snapshot.
        let steps: Vec<TeardownStep> = self.lock().clone();
        let mut code = code;

        for (index, step) in steps.iter().enumerate() {
            tracing::debug!(step = index, code, "running teardown step");
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| step(code, cause)));
            let message = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(err)) => stringify_error(&UnknownCause::Error(err)),
                Err(payload) => panic_message(payload.as_ref()),
            };
            tracing::warn!(step = index, error = %message, "teardown step failed");
            on_failure(&message);
            if code == 0 {
                code = 1;
            }
        }

        code
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "teardown step panicked".to_string()
    }
}
