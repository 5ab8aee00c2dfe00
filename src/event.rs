use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{Error, ParamKey, Params, Result, Value};

/// Opaque reference to whatever the event is about.
///
/// The dispatcher never looks inside it; listeners that know the concrete
/// type get it back via [`Event::target_as`].
pub type Target = Arc<dyn Any + Send + Sync>;

/// Mutable value object shared by every listener of one dispatch.
///
/// An event carries a validated name, an optional opaque target, an
/// ordered parameter bag and a propagation flag. It lives for the duration
/// of one trigger call and is passed to each listener by mutable
/// reference, so parameter changes and the propagation flag are visible to
/// every later listener and, for caller-built events, to the caller after
/// the trigger returns.
///
/// Names must match `[A-Za-z0-9_.]+`; construction and renaming both
/// validate and fail with [`Error::InvalidName`] otherwise.
pub struct Event {
    name: String,
    target: Option<Target>,
    params: Params,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event with the given name, no target and empty params.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            target: None,
            params: Params::new(),
            propagation_stopped: false,
        })
    }

    /// Attach a target.
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Replace the parameter bag.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the event. Re-validates; on failure the old name is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Downcast the target to a concrete type.
    pub fn target_as<T: Any>(&self) -> Option<&T> {
        self.target.as_ref().and_then(|target| target.downcast_ref())
    }

    pub fn set_target(&mut self, target: Option<Target>) {
        self.target = target;
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    pub fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    /// Value stored under `key`, or `None` when absent.
    pub fn param(&self, key: impl Into<ParamKey>) -> Option<&Value> {
        self.params.get(key)
    }

    /// Raise or clear the flag that halts dispatch after the current
    /// listener returns.
    pub fn stop_propagation(&mut self, flag: bool) {
        self.propagation_stopped = flag;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("propagation_stopped", &self.propagation_stopped)
            .finish_non_exhaustive()
    }
}

fn validate_name(name: &str) -> Result {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}
