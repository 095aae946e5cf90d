//! Windows vibrator implementation using WinRT `Devices.Haptics`.

use std::sync::Arc;

use windows::Devices::Haptics::{
    KnownSimpleHapticsControllerWaveforms, SimpleHapticsController, VibrationAccessStatus,
    VibrationDevice,
};
use windows::Foundation::TimeSpan;

use crate::{Amplitude, VibrationError, Vibrator};

// TimeSpan counts 100 ns ticks.
const TICKS_PER_MS: i64 = 10_000;

fn platform_err(err: &windows::core::Error) -> VibrationError {
    VibrationError::Platform(err.to_string())
}

fn controller() -> Result<Option<SimpleHapticsController>, VibrationError> {
    let access = VibrationDevice::RequestAccessAsync()
        .map_err(|e| platform_err(&e))?
        .get()
        .map_err(|e| platform_err(&e))?;

    if access != VibrationAccessStatus::Allowed {
        return Ok(None);
    }

    let device = match VibrationDevice::GetDefaultAsync()
        .map_err(|e| platform_err(&e))?
        .get()
    {
        Ok(device) => device,
        // No vibration device on this machine.
        Err(_) => return Ok(None),
    };

    device
        .SimpleHapticsController()
        .map(Some)
        .map_err(|e| platform_err(&e))
}

fn buzz(
    controller: &SimpleHapticsController,
    duration_ms: u64,
    intensity: Option<f64>,
) -> Result<(), VibrationError> {
    let waveform = KnownSimpleHapticsControllerWaveforms::BuzzContinuous()
        .map_err(|e| platform_err(&e))?;

    let supported = controller
        .SupportedFeedback()
        .map_err(|e| platform_err(&e))?;

    let duration = TimeSpan {
        Duration: i64::try_from(duration_ms).unwrap_or(i64::MAX) * TICKS_PER_MS,
    };

    for feedback in supported {
        let candidate = feedback.Waveform().map_err(|e| platform_err(&e))?;
        if candidate == waveform {
            controller
                .SendHapticFeedbackForPlayCount(&feedback, intensity.unwrap_or(1.0), 1, duration)
                .map_err(|e| platform_err(&e))?;
            return Ok(());
        }
    }

    // No continuous buzz waveform on this controller; nothing to play.
    Ok(())
}

/// Handle onto the default WinRT vibration device.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsVibrator;

impl Vibrator for WindowsVibrator {
    fn has_vibrator(&self) -> bool {
        matches!(controller(), Ok(Some(_)))
    }

    fn has_amplitude_control(&self) -> bool {
        match controller() {
            Ok(Some(controller)) => controller.IsIntensitySupported().unwrap_or(false),
            _ => false,
        }
    }

    fn vibrate(&self, duration_ms: u64) -> Result<(), VibrationError> {
        match controller()? {
            Some(controller) => buzz(&controller, duration_ms, None),
            None => Ok(()),
        }
    }

    fn vibrate_with_amplitude(
        &self,
        duration_ms: u64,
        amplitude: Amplitude,
    ) -> Result<(), VibrationError> {
        let intensity = match amplitude {
            Amplitude::Default => None,
            Amplitude::Fixed(level) => Some(f64::from(level) / 255.0),
        };
        match controller()? {
            Some(controller) => buzz(&controller, duration_ms, intensity),
            None => Ok(()),
        }
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        match controller()? {
            Some(controller) => controller.StopFeedback().map_err(|e| platform_err(&e)),
            None => Ok(()),
        }
    }
}

pub(crate) fn default_device() -> Arc<dyn Vibrator> {
    Arc::new(WindowsVibrator)
}

pub(crate) fn supports_amplitude_control() -> bool {
    true
}
