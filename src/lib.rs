//! Hibiki - Synchronous event dispatcher
//!
//! An in-process publish/subscribe dispatcher: listeners register under an
//! event name with a priority, and a trigger runs them highest-priority
//! first, threading each listener's response into the next one.
//!
//! See `demos/hello-world.rs` and `demos/pipeline.rs`.

mod error;
mod event;
mod listener;
mod manager;
mod outcome;
mod params;
mod provider;

pub use error::Error;
pub use event::{Event, Target};
pub use listener::{Listener, listener};
pub use manager::EventManager;
pub use outcome::Outcome;
pub use params::{ParamKey, Params};
pub use provider::{SharedManager, provide};

pub use serde_json::Value;

pub type Result<T = ()> = std::result::Result<T, Error>;

/// A listener's return value, threaded through the dispatch chain.
pub type Response = Option<Value>;
