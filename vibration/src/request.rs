//! Typed vibration requests, validated at the channel boundary.

use serde_json::Value;

use crate::channel::MethodCall;
use crate::VibrationError;

/// Vibration amplitude as carried on the wire: `-1` for the platform
/// default, otherwise a fixed level in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amplitude {
    /// Let the platform pick its default intensity.
    Default,
    /// A fixed intensity level.
    Fixed(u8),
}

impl Amplitude {
    /// Parse a raw wire value. `None` if outside `[-1, 255]`.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            -1 => Some(Self::Default),
            0..=255 => Some(Self::Fixed(raw as u8)),
            _ => None,
        }
    }

    /// The raw wire encoding: `-1` for default, the level otherwise.
    ///
    /// Android's `VibrationEffect.DEFAULT_AMPLITUDE` uses the same `-1`
    /// convention, so this feeds the JNI call unchanged.
    #[must_use]
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Default => -1,
            Self::Fixed(level) => i32::from(level),
        }
    }
}

/// A validated request on the `vibration` channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationRequest {
    /// Does the device expose a vibration actuator?
    HasVibrator,
    /// Does the device support amplitude-controlled vibration?
    HasAmplitudeControl,
    /// Trigger a one-shot vibration.
    Vibrate {
        /// Pulse length in milliseconds.
        duration_ms: u64,
        /// Requested intensity.
        amplitude: Amplitude,
    },
    /// Stop any ongoing vibration.
    Cancel,
}

impl VibrationRequest {
    /// Validate a raw method call into a typed request.
    ///
    /// `Ok(None)` means the method name is not part of this channel's
    /// surface and the caller should answer "not implemented".
    ///
    /// # Errors
    /// Returns [`VibrationError::InvalidArguments`] when a recognized method
    /// carries missing, mistyped or out-of-range arguments.
    pub fn from_call(call: &MethodCall) -> Result<Option<Self>, VibrationError> {
        match call.method.as_str() {
            "hasVibrator" => Ok(Some(Self::HasVibrator)),
            "hasAmplitudeControl" => Ok(Some(Self::HasAmplitudeControl)),
            "cancel" => Ok(Some(Self::Cancel)),
            "vibrate" => {
                let duration = int_argument(call, "duration")?;
                let duration_ms = u64::try_from(duration).map_err(|_| invalid(
                    call,
                    format!("`duration` must be non-negative, got {duration}"),
                ))?;

                let raw = int_argument(call, "amplitude")?;
                let amplitude = Amplitude::from_raw(raw).ok_or_else(|| invalid(
                    call,
                    format!("`amplitude` must be in [-1, 255], got {raw}"),
                ))?;

                Ok(Some(Self::Vibrate {
                    duration_ms,
                    amplitude,
                }))
            }
            _ => Ok(None),
        }
    }
}

fn int_argument(call: &MethodCall, name: &str) -> Result<i64, VibrationError> {
    match call.argument(name) {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| invalid(call, format!("`{name}` is not an integer"))),
        Some(other) => Err(invalid(
            call,
            format!("`{name}` has wrong type: {other}"),
        )),
        None => Err(invalid(call, format!("missing `{name}`"))),
    }
}

fn invalid(call: &MethodCall, reason: String) -> VibrationError {
    VibrationError::InvalidArguments {
        method: call.method.clone(),
        reason,
    }
}
