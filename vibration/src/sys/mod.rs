//! Platform-specific vibrator implementations.

use std::sync::Arc;

use crate::Vibrator;

/// Android platform implementation.
#[cfg(target_os = "android")]
pub mod android;

#[cfg(any(target_os = "ios", target_os = "macos"))]
mod apple;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(any(target_os = "ios", target_os = "macos"))]
use self::apple as platform;

#[cfg(target_os = "windows")]
use self::windows as platform;

#[cfg(target_os = "linux")]
use self::linux as platform;

#[cfg(target_os = "android")]
use self::android as platform;

// Fallback for unsupported platforms: no actuator, everything degrades to
// the silent no-op path.
#[cfg(not(any(
    target_os = "ios",
    target_os = "macos",
    target_os = "android",
    target_os = "windows",
    target_os = "linux"
)))]
mod platform {
    use std::sync::Arc;

    use crate::{NullVibrator, Vibrator};

    pub(crate) fn default_device() -> Arc<dyn Vibrator> {
        Arc::new(NullVibrator)
    }

    pub(crate) fn supports_amplitude_control() -> bool {
        false
    }
}

/// The current platform's vibrator service, where it can be bound without
/// host context.
pub(crate) fn default_device() -> Arc<dyn Vibrator> {
    platform::default_device()
}

/// Whether the current platform version supports amplitude control.
pub(crate) fn supports_amplitude_control() -> bool {
    platform::supports_amplitude_control()
}
