//! The host messaging channel the bridge attaches to.
//!
//! This models just enough of a host method-call channel to express the
//! attach/detach lifecycle: named channels, one handler per channel, and a
//! reply that is either a success value, an error, or "not implemented".

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{sys, Vibrator};

/// Name of the channel the vibration bridge registers on.
pub const CHANNEL: &str = "vibration";

/// An inbound method call: a method name plus named arguments.
///
/// Arguments arrive dynamically typed from the host side; recognized methods
/// validate them into a typed request before dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    /// The method name, e.g. `"vibrate"`.
    pub method: String,
    /// Named arguments; `Value::Null` when the method takes none.
    #[serde(default)]
    pub args: Value,
}

impl MethodCall {
    /// A call with no arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Value::Null,
        }
    }

    /// A call with named arguments.
    pub fn with_args(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// Look up a named argument.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.args.as_object().and_then(|map| map.get(name))
    }
}

/// The outcome of a method call, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Reply {
    /// The call completed; `value` is the result (null for void methods).
    Success {
        /// The result value.
        value: Value,
    },
    /// The call was recognized but failed.
    Error {
        /// Stable machine-readable code.
        code: String,
        /// Human-readable description.
        message: String,
    },
    /// The method name is not handled on this channel.
    NotImplemented,
}

impl Reply {
    /// A success reply carrying a value.
    #[must_use]
    pub fn success(value: Value) -> Self {
        Self::Success { value }
    }

    /// A success reply with a null value, for void methods.
    #[must_use]
    pub fn done() -> Self {
        Self::Success { value: Value::Null }
    }

    /// An error reply.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// A handler bound to a named channel.
pub trait MethodHandler: Send + Sync {
    /// Handle one inbound call and produce its reply.
    fn on_method_call(&self, call: MethodCall) -> Reply;
}

/// The host's channel registry: routes calls to whichever handler is
/// currently bound to the channel name.
#[derive(Default)]
pub struct Messenger {
    handlers: Mutex<HashMap<String, Arc<dyn MethodHandler>>>,
}

impl Messenger {
    /// An empty messenger with no bound channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `channel`, replacing any previous handler.
    pub fn set_handler(&self, channel: impl Into<String>, handler: Arc<dyn MethodHandler>) {
        self.handlers
            .lock()
            .unwrap()
            .insert(channel.into(), handler);
    }

    /// Release the handler bound to `channel`, if any.
    pub fn clear_handler(&self, channel: &str) {
        self.handlers
            .lock()
            .unwrap()
            .remove(channel);
    }

    /// Whether a handler is currently bound to `channel`.
    #[must_use]
    pub fn has_handler(&self, channel: &str) -> bool {
        self.handlers
            .lock()
            .unwrap()
            .contains_key(channel)
    }

    /// Deliver a call to the channel's handler.
    ///
    /// A channel with no bound handler answers [`Reply::NotImplemented`],
    /// mirroring how a detached plugin simply stops receiving calls.
    pub fn invoke(&self, channel: &str, call: MethodCall) -> Reply {
        let handler = self
            .handlers
            .lock()
            .unwrap()
            .get(channel)
            .cloned();

        match handler {
            Some(handler) => handler.on_method_call(call),
            None => Reply::NotImplemented,
        }
    }
}

impl std::fmt::Debug for Messenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let channels: Vec<String> = self
            .handlers
            .lock()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        f.debug_struct("Messenger").field("channels", &channels).finish()
    }
}

/// What the host hands to a bridge at attachment: the messenger to register
/// on and the vibrator service to delegate to.
///
/// The service stays owned by the host; the bridge only clones the shared
/// handle for the duration of its attachment.
#[derive(Clone)]
pub struct HostHandle {
    messenger: Arc<Messenger>,
    vibrator: Arc<dyn Vibrator>,
}

impl HostHandle {
    /// A handle wiring an explicit vibrator service.
    pub fn new(messenger: Arc<Messenger>, vibrator: Arc<dyn Vibrator>) -> Self {
        Self { messenger, vibrator }
    }

    /// A handle wiring the current platform's vibrator service.
    ///
    /// On platforms whose service needs host context to bind (Android), this
    /// falls back to a no-actuator device; construct the service explicitly
    /// and use [`HostHandle::new`] instead.
    #[must_use]
    pub fn for_platform(messenger: Arc<Messenger>) -> Self {
        Self {
            messenger,
            vibrator: sys::default_device(),
        }
    }

    /// The host messenger.
    #[must_use]
    pub fn messenger(&self) -> &Arc<Messenger> {
        &self.messenger
    }

    /// The host's vibrator service.
    #[must_use]
    pub fn vibrator(&self) -> &Arc<dyn Vibrator> {
        &self.vibrator
    }
}

impl std::fmt::Debug for HostHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostHandle")
            .field("messenger", &self.messenger)
            .finish_non_exhaustive()
    }
}
