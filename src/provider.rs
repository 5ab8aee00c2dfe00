use std::sync::{Arc, Mutex};

use crate::EventManager;

/// Shared handle shape handed out to host wiring.
///
/// The manager does no internal locking; one mutex around the whole
/// instance is the supported way to share it between threads.
pub type SharedManager = Arc<Mutex<EventManager>>;

/// Singleton-preserving acquisition: hand back a previously-constructed
/// manager unchanged, or construct a fresh one.
///
/// This is the whole integration contract with a host's service wiring;
/// everything else about how the host registers or names the instance is
/// the host's concern.
pub fn provide(previous: Option<SharedManager>) -> SharedManager {
    previous.unwrap_or_else(|| Arc::new(Mutex::new(EventManager::new())))
}
