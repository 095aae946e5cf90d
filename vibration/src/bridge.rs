//! The capability bridge: channel lifecycle and request dispatch.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::channel::{HostHandle, MethodCall, MethodHandler, Messenger, Reply, CHANNEL};
use crate::request::VibrationRequest;
use crate::{HostPlatform, PlatformSupport, VibrationError, Vibrator};

/// Bridges the `vibration` channel onto the platform vibration service.
///
/// The bridge is created with a [`PlatformSupport`] gate (the current
/// platform's by default) and stays inert until [`open`](Self::open) binds
/// it to a host: that registers it as the channel handler and takes a shared
/// handle onto the host's vibrator service. [`close`](Self::close) releases
/// the registration again.
pub struct VibrationBridge {
    platform: Arc<dyn PlatformSupport>,
    attachment: Option<Attachment>,
}

struct Attachment {
    messenger: Arc<Messenger>,
}

impl VibrationBridge {
    /// A bridge gated by the current platform's capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform(Arc::new(HostPlatform))
    }

    /// A bridge with an explicit platform gate, for hosts and tests that
    /// need to substitute capability detection.
    pub fn with_platform(platform: Arc<dyn PlatformSupport>) -> Self {
        Self {
            platform,
            attachment: None,
        }
    }

    /// Attach to the host: bind the vibrator service out of `handle` and
    /// register on the `vibration` channel.
    ///
    /// # Errors
    /// Returns [`VibrationError::AlreadyAttached`] if the bridge is open.
    pub fn open(&mut self, handle: &HostHandle) -> Result<(), VibrationError> {
        if self.attachment.is_some() {
            return Err(VibrationError::AlreadyAttached);
        }

        let dispatcher = Arc::new(Dispatcher {
            vibrator: Arc::clone(handle.vibrator()),
            platform: Arc::clone(&self.platform),
        });

        let messenger = Arc::clone(handle.messenger());
        messenger.set_handler(CHANNEL, dispatcher);
        self.attachment = Some(Attachment { messenger });

        debug!("vibration channel attached");
        Ok(())
    }

    /// Detach from the host, releasing the channel registration and the
    /// service handle. Closing a closed bridge is a no-op.
    pub fn close(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            attachment.messenger.clear_handler(CHANNEL);
            debug!("vibration channel detached");
        }
    }

    /// Whether the bridge is currently attached to a host.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.attachment.is_some()
    }
}

impl Default for VibrationBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for VibrationBridge {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for VibrationBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VibrationBridge")
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

/// The per-attachment handler: owns the service handle and the dispatch
/// switch over the four recognized methods.
struct Dispatcher {
    vibrator: Arc<dyn Vibrator>,
    platform: Arc<dyn PlatformSupport>,
}

impl Dispatcher {
    fn has_amplitude_control(&self) -> bool {
        // Graceful degradation: old platform versions answer false even when
        // the hardware could do it.
        self.platform.supports_amplitude_control() && self.vibrator.has_amplitude_control()
    }

    fn dispatch(&self, request: VibrationRequest) -> Result<Value, VibrationError> {
        match request {
            VibrationRequest::HasVibrator => Ok(Value::Bool(self.vibrator.has_vibrator())),
            VibrationRequest::HasAmplitudeControl => {
                Ok(Value::Bool(self.has_amplitude_control()))
            }
            VibrationRequest::Vibrate {
                duration_ms,
                amplitude,
            } => {
                if self.vibrator.has_vibrator() {
                    if self.platform.supports_amplitude_control() {
                        self.vibrator.vibrate_with_amplitude(duration_ms, amplitude)?;
                    } else {
                        self.vibrator.vibrate(duration_ms)?;
                    }
                }
                Ok(Value::Null)
            }
            VibrationRequest::Cancel => {
                if self.vibrator.has_vibrator() {
                    self.vibrator.cancel()?;
                }
                Ok(Value::Null)
            }
        }
    }
}

impl MethodHandler for Dispatcher {
    fn on_method_call(&self, call: MethodCall) -> Reply {
        match VibrationRequest::from_call(&call) {
            Ok(Some(request)) => match self.dispatch(request) {
                Ok(value) => Reply::success(value),
                Err(err) => Reply::error(err.code(), err.to_string()),
            },
            Ok(None) => {
                debug!("unhandled method call: {}", call.method);
                Reply::NotImplemented
            }
            Err(err) => {
                warn!("rejecting `{}` call: {err}", call.method);
                Reply::error(err.code(), err.to_string())
            }
        }
    }
}
