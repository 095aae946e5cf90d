//! Linux vibrator implementation.

use std::sync::Arc;

use crate::{Amplitude, VibrationError, Vibrator};

/// Linux vibrator handle.
///
/// No rumble device is wired up yet, so this reports no actuator and lets
/// every operation degrade to the silent no-op path.
// TODO: drive a rumble-capable evdev device (FF_RUMBLE) when one is present
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxVibrator;

impl Vibrator for LinuxVibrator {
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

pub(crate) fn default_device() -> Arc<dyn Vibrator> {
    Arc::new(LinuxVibrator)
}

pub(crate) fn supports_amplitude_control() -> bool {
    false
}
