use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::{Event, Listener, Outcome, Params, Result, Target};

/// One (listener, priority) pair attached under an event name.
#[derive(Clone)]
struct Registration {
    listener: Arc<dyn Listener>,
    priority: i32,
}

/// Registrations for one event name, lazily kept in dispatch order.
///
/// Invariant: equal-priority entries appear in attach order at all times.
/// Pushing, retaining and stable sorting all preserve it, so sorting at
/// any point yields the same deterministic order.
#[derive(Default)]
struct ListenerList {
    entries: Vec<Registration>,
    sorted: bool,
}

impl ListenerList {
    fn sort(&mut self) {
        if !self.sorted {
            self.entries.sort_by(|a, b| b.priority.cmp(&a.priority));
            self.sorted = true;
        }
    }
}

/// In-process publish/subscribe dispatcher.
///
/// Listeners attach under an event name with a priority; triggering the
/// name runs them highest-priority first (ties in attach order), threading
/// each listener's response into the next. Any listener can stop the
/// chain via [`Event::stop_propagation`].
///
/// The manager does no internal locking. It is `Send`, so a
/// multi-threaded host shares one instance behind a single external mutex
/// (see [`crate::provide`]).
///
/// # Examples
///
/// ```rust
/// use hibiki::{EventManager, Outcome, Response, Value, listener};
///
/// let mut events = EventManager::new();
/// events.attach("greet", listener(|_event, _previous: Response| {
///     Some(Value::from("hello"))
/// }));
///
/// let outcome = events.trigger("greet")?;
/// assert_eq!(outcome, Outcome::Handled(Some(Value::from("hello"))));
/// # Ok::<(), hibiki::Error>(())
/// ```
#[derive(Default)]
pub struct EventManager {
    registry: HashMap<String, ListenerList>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener with the default priority (0).
    pub fn attach(&mut self, event: &str, listener: Arc<dyn Listener>) -> bool {
        self.attach_with_priority(event, listener, 0)
    }

    /// Attach a listener under an explicit priority; higher runs earlier.
    ///
    /// Always succeeds. The same handle may be attached any number of
    /// times; each registration is independent. The name is not validated
    /// here — an unmatchable name only surfaces when a trigger tries to
    /// construct an [`Event`] for it.
    pub fn attach_with_priority(
        &mut self,
        event: &str,
        listener: Arc<dyn Listener>,
        priority: i32,
    ) -> bool {
        let list = self.registry.entry(event.to_string()).or_default();
        list.entries.push(Registration { listener, priority });
        list.sorted = false;
        trace!(event, priority, "listener attached");
        true
    }

    /// Detach every registration of `listener` under `event`.
    ///
    /// Identity is pointer identity: only handles cloned from the `Arc`
    /// that was attached match. Returns `true` iff at least one
    /// registration was removed; unknown names and non-matching listeners
    /// return `false` with no effect.
    pub fn detach(&mut self, event: &str, listener: &Arc<dyn Listener>) -> bool {
        let Some(list) = self.registry.get_mut(event) else {
            return false;
        };
        let before = list.entries.len();
        list.entries
            .retain(|registration| !Arc::ptr_eq(&registration.listener, listener));
        let detached = list.entries.len() < before;
        if list.entries.is_empty() {
            self.registry.remove(event);
        }
        if detached {
            trace!(event, "listener detached");
        }
        detached
    }

    /// Drop all registrations under `event`. Unknown names are fine.
    pub fn clear_listeners(&mut self, event: &str) {
        self.registry.remove(event);
    }

    /// Number of registrations currently attached under `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry.get(event).map_or(0, |list| list.entries.len())
    }

    /// Trigger `event` with no target and no parameters.
    pub fn trigger(&mut self, event: &str) -> Result<Outcome> {
        self.trigger_with(event, None, Params::new())
    }

    /// Trigger `event`, constructing the [`Event`] from the given parts.
    ///
    /// Fails with [`crate::Error::InvalidName`] when the name does not
    /// satisfy the event name grammar; nothing is invoked in that case.
    pub fn trigger_with(
        &mut self,
        event: &str,
        target: Option<Target>,
        params: Params,
    ) -> Result<Outcome> {
        let mut event = Event::new(event)?.with_params(params);
        event.set_target(target);
        Ok(self.trigger_event(&mut event))
    }

    /// Dispatch a caller-built event to its listeners.
    ///
    /// The lookup key is resolved once, before the first listener runs;
    /// renaming the event from inside a listener does not redirect the
    /// dispatch already in flight. Event mutations (parameters,
    /// propagation flag) are visible to later listeners and, through the
    /// caller's own `&mut` borrow, after the call returns.
    pub fn trigger_event(&mut self, event: &mut Event) -> Outcome {
        let name = event.name().to_string();
        let snapshot = match self.registry.get_mut(&name) {
            Some(list) if !list.entries.is_empty() => {
                list.sort();
                list.entries.clone()
            }
            _ => {
                trace!(event = %name, "no listeners");
                return Outcome::Unhandled;
            }
        };

        debug!(event = %name, listeners = snapshot.len(), "dispatching");

        let mut response = None;
        for registration in &snapshot {
            response = registration.listener.invoke(event, response);
            if event.is_propagation_stopped() {
                trace!(event = %name, "propagation stopped");
                break;
            }
        }
        Outcome::Handled(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Response, listener};

    #[test]
    fn test_attach_returns_true() {
        let mut manager = EventManager::new();
        assert!(manager.attach("anything", listener(|_: &mut Event, _: Response| None)));
        assert_eq!(manager.listener_count("anything"), 1);
    }

    #[test]
    fn test_attach_does_not_validate_name() {
        let mut manager = EventManager::new();
        assert!(manager.attach("not a valid name!", listener(|_: &mut Event, _: Response| None)));
        // The bad name only surfaces once a trigger builds an Event for it.
        assert!(manager.trigger("not a valid name!").is_err());
    }

    #[test]
    fn test_listener_count_unknown_name() {
        let manager = EventManager::new();
        assert_eq!(manager.listener_count("nope"), 0);
    }

    #[test]
    fn test_detach_unknown_name() {
        let mut manager = EventManager::new();
        let handle = listener(|_: &mut Event, _: Response| None);
        assert!(!manager.detach("nope", &handle));
    }

    #[test]
    fn test_detach_drops_emptied_list() {
        let mut manager = EventManager::new();
        let handle = listener(|_: &mut Event, _: Response| None);
        manager.attach("solo", handle.clone());
        assert!(manager.detach("solo", &handle));
        assert_eq!(manager.listener_count("solo"), 0);
        assert_eq!(manager.trigger("solo").unwrap(), Outcome::Unhandled);
    }

    #[test]
    fn test_clear_listeners_unknown_name() {
        let mut manager = EventManager::new();
        manager.clear_listeners("never.attached");
        assert_eq!(manager.trigger("never.attached").unwrap(), Outcome::Unhandled);
    }

    #[test]
    fn test_list_stays_sorted_between_triggers() {
        let mut list = ListenerList::default();
        for priority in [0, 10, -5] {
            list.entries.push(Registration {
                listener: listener(|_: &mut Event, _: Response| None),
                priority,
            });
        }
        list.sort();
        let order: Vec<_> = list.entries.iter().map(|r| r.priority).collect();
        assert_eq!(order, vec![10, 0, -5]);
        assert!(list.sorted);
        list.sort(); // no-op
        assert_eq!(
            list.entries.iter().map(|r| r.priority).collect::<Vec<_>>(),
            vec![10, 0, -5]
        );
    }
}
