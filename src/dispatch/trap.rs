use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{Error, Result};

/// Run a closure, converting an unwind into [`Error::TaskPanicked`].
pub(crate) fn capture<F, T>(work: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    match catch_unwind(AssertUnwindSafe(work)) {
        Ok(value) => Ok(value),
        Err(payload) => Err(Error::TaskPanicked(panic_message(payload.as_ref()))),
    }
}

/// Best-effort extraction of the panic message from a payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_success() {
        let result = capture(|| 42);
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_capture_panic() {
        let result: Result<()> = capture(|| {
            panic!("boom");
        });

        match result {
            Err(Error::TaskPanicked(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_capture_formatted_panic() {
        let result: Result<()> = capture(|| {
            panic!("bad value: {}", 7);
        });

        match result {
            Err(Error::TaskPanicked(msg)) => assert_eq!(msg, "bad value: 7"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_opaque_payload() {
        let result: Result<()> = capture(|| {
            std::panic::panic_any(7_u32);
        });

        match result {
            Err(Error::TaskPanicked(msg)) => assert_eq!(msg, "unknown panic"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
