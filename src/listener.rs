use std::sync::Arc;

use crate::{Event, Response};

/// Capability implemented by everything that can observe a dispatch.
///
/// `previous` is the response returned by the listener that ran just
/// before this one (`None` for the first in the chain); whatever this
/// listener returns is handed to the next one, and the last return value
/// becomes the trigger's result.
///
/// Listeners must be `Send + Sync` so a manager holding them can be moved
/// behind a mutex shared between threads.
pub trait Listener: Send + Sync {
    fn invoke(&self, event: &mut Event, previous: Response) -> Response;
}

impl<F> Listener for F
where
    F: Fn(&mut Event, Response) -> Response + Send + Sync,
{
    fn invoke(&self, event: &mut Event, previous: Response) -> Response {
        self(event, previous)
    }
}

/// Wrap a closure into a reference-counted listener handle.
///
/// The returned `Arc` is the listener's identity: keep a clone of it to
/// detach the registration later. Two separately wrapped closures are
/// distinct listeners even when their behavior is identical.
pub fn listener<F>(f: F) -> Arc<dyn Listener>
where
    F: Fn(&mut Event, Response) -> Response + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_closure_is_a_listener() {
        let doubler = listener(|_event: &mut Event, previous: Response| {
            previous.and_then(|v| v.as_i64()).map(|n| Value::from(n * 2))
        });
        let mut event = Event::new("math").unwrap();
        assert_eq!(
            doubler.invoke(&mut event, Some(Value::from(21))),
            Some(Value::from(42))
        );
        assert_eq!(doubler.invoke(&mut event, None), None);
    }

    #[test]
    fn test_identity_is_per_handle() {
        let a = listener(|_: &mut Event, _: Response| None);
        let b = listener(|_: &mut Event, _: Response| None);
        assert!(Arc::ptr_eq(&a, &a.clone()));
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
