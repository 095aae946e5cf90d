//! Apple platform (iOS/macOS) vibrator implementation using swift-bridge.

use std::sync::Arc;

use crate::{Amplitude, VibrationError, Vibrator};

#[swift_bridge::bridge]
mod ffi {
    extern "Swift" {
        fn vibrator_present() -> bool;
        fn vibrate_one_shot(duration_ms: u64, amplitude: i32);
        fn cancel_vibration();
    }
}

/// Handle onto the host's haptics engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppleVibrator;

impl Vibrator for AppleVibrator {
    fn has_vibrator(&self) -> bool {
        ffi::vibrator_present()
    }

    fn has_amplitude_control(&self) -> bool {
        // Intensity-controlled haptics exist on iPhones only; Macs have no
        // body actuator to drive.
        cfg!(target_os = "ios") && ffi::vibrator_present()
    }

    fn vibrate(&self, duration_ms: u64) -> Result<(), VibrationError> {
        ffi::vibrate_one_shot(duration_ms, Amplitude::Default.as_raw());
        Ok(())
    }

    fn vibrate_with_amplitude(
        &self,
        duration_ms: u64,
        amplitude: Amplitude,
    ) -> Result<(), VibrationError> {
        ffi::vibrate_one_shot(duration_ms, amplitude.as_raw());
        Ok(())
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        ffi::cancel_vibration();
        Ok(())
    }
}

pub(crate) fn default_device() -> Arc<dyn Vibrator> {
    Arc::new(AppleVibrator)
}

pub(crate) fn supports_amplitude_control() -> bool {
    cfg!(target_os = "ios")
}
