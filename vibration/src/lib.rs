//! Cross-platform vibration motor bridge.
//!
//! This crate exposes a device's vibration motor to an application layer
//! through a small method-call channel named `vibration`. Four calls are
//! understood: `hasVibrator`, `hasAmplitudeControl`, `vibrate` and `cancel`;
//! anything else answers "not implemented".
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use vibekit_vibration::{HostHandle, Messenger, MethodCall, VibrationBridge, CHANNEL};
//!
//! let messenger = Arc::new(Messenger::new());
//! let handle = HostHandle::for_platform(Arc::clone(&messenger));
//!
//! let mut bridge = VibrationBridge::new();
//! bridge.open(&handle)?;
//!
//! let reply = messenger.invoke(CHANNEL, MethodCall::new("hasVibrator"));
//! ```

#![warn(missing_docs)]

// Internal platform-specific implementations.
mod sys;

mod bridge;
mod channel;
mod request;

pub use bridge::VibrationBridge;
pub use channel::{HostHandle, Messenger, MethodCall, MethodHandler, Reply, CHANNEL};
pub use request::{Amplitude, VibrationRequest};

/// The platform vibration service the bridge delegates to.
///
/// The host owns the actual actuator; implementations of this trait are thin
/// handles onto it. All triggering is fire-and-forget: the call returns once
/// the platform has accepted the request, not when the motor stops.
pub trait Vibrator: Send + Sync {
    /// Whether the device exposes a vibration actuator at all.
    fn has_vibrator(&self) -> bool;

    /// Whether the device reports amplitude-controlled vibration.
    ///
    /// This is the device's own answer; the platform-version gate is layered
    /// on top by the bridge via [`PlatformSupport`].
    fn has_amplitude_control(&self) -> bool;

    /// Trigger a duration-only one-shot vibration.
    ///
    /// # Errors
    /// Returns a [`VibrationError`] if the platform rejects the request.
    fn vibrate(&self, duration_ms: u64) -> Result<(), VibrationError>;

    /// Trigger a one-shot vibration at the given amplitude.
    ///
    /// [`Amplitude::Default`] lets the platform pick its own intensity.
    ///
    /// # Errors
    /// Returns a [`VibrationError`] if the platform rejects the request.
    fn vibrate_with_amplitude(
        &self,
        duration_ms: u64,
        amplitude: Amplitude,
    ) -> Result<(), VibrationError>;

    /// Stop any ongoing vibration.
    ///
    /// # Errors
    /// Returns a [`VibrationError`] if the platform rejects the request.
    fn cancel(&self) -> Result<(), VibrationError>;
}

/// Platform-level capability detection, injected into the bridge at
/// construction so tests can substitute it without simulating OS versions.
pub trait PlatformSupport: Send + Sync {
    /// Whether the platform version supports amplitude-controlled vibration.
    fn supports_amplitude_control(&self) -> bool;
}

/// The current platform's capability answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformSupport for HostPlatform {
    fn supports_amplitude_control(&self) -> bool {
        sys::supports_amplitude_control()
    }
}

/// A vibrator handle for devices with no actuator.
///
/// Capability queries answer `false` and every operation is a successful
/// no-op, matching the silent-degradation contract of the channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVibrator;

impl Vibrator for NullVibrator {
    fn has_vibrator(&self) -> bool {
        false
    }

    fn has_amplitude_control(&self) -> bool {
        false
    }

    fn vibrate(&self, _duration_ms: u64) -> Result<(), VibrationError> {
        Ok(())
    }

    fn vibrate_with_amplitude(
        &self,
        _duration_ms: u64,
        _amplitude: Amplitude,
    ) -> Result<(), VibrationError> {
        Ok(())
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        Ok(())
    }
}

/// Errors that can occur in the vibration bridge.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VibrationError {
    /// The bridge is already attached to a host channel.
    #[error("bridge already attached")]
    AlreadyAttached,
    /// A recognized method was called with missing or invalid arguments.
    #[error("invalid arguments for `{method}`: {reason}")]
    InvalidArguments {
        /// The method whose arguments were rejected.
        method: String,
        /// What was wrong with them.
        reason: String,
    },
    /// The platform vibration service reported a fault.
    #[error("platform error: {0}")]
    Platform(String),
}

impl VibrationError {
    /// Stable error code carried in channel error replies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyAttached => "already-attached",
            Self::InvalidArguments { .. } => "bad-args",
            Self::Platform(_) => "platform-error",
        }
    }
}
