//! Android vibrator implementation using JNI.
//!
//! Binds `android.os.Vibrator` out of the application context and drives it
//! directly: `VibrationEffect.createOneShot` on SDK 26+, the legacy
//! `vibrate(long)` overload below that.

use std::sync::Arc;

use jni::objects::{GlobalRef, JObject, JValue};
use jni::{JNIEnv, JavaVM};
use log::warn;

use crate::{Amplitude, NullVibrator, VibrationError, Vibrator};

/// First SDK with `VibrationEffect` and amplitude control (Android O).
const AMPLITUDE_CONTROL_SDK: i32 = 26;

fn platform_err(context: &str, err: jni::errors::Error) -> VibrationError {
    VibrationError::Platform(format!("{context}: {err}"))
}

/// Read `android.os.Build$VERSION.SDK_INT`.
fn sdk_int(env: &mut JNIEnv) -> Result<i32, VibrationError> {
    env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .map_err(|e| platform_err("SDK_INT lookup failed", e))?
        .i()
        .map_err(|e| platform_err("SDK_INT not an int", e))
}

/// Handle onto the system `android.os.Vibrator` service.
pub struct AndroidVibrator {
    vm: JavaVM,
    vibrator: GlobalRef,
    sdk_int: i32,
}

impl AndroidVibrator {
    /// Bind the vibrator service out of an application `Context`.
    ///
    /// # Errors
    /// Returns a [`VibrationError`] if the service lookup fails.
    pub fn from_context(env: &mut JNIEnv, context: &JObject) -> Result<Self, VibrationError> {
        let service_name = env
            .new_string("vibrator")
            .map_err(|e| platform_err("new_string failed", e))?;

        let vibrator = env
            .call_method(
                context,
                "getSystemService",
                "(Ljava/lang/String;)Ljava/lang/Object;",
                &[JValue::Object(&service_name)],
            )
            .map_err(|e| platform_err("getSystemService failed", e))?
            .l()
            .map_err(|e| platform_err("getSystemService result", e))?;

        let vibrator = env
            .new_global_ref(vibrator)
            .map_err(|e| platform_err("new_global_ref failed", e))?;

        let sdk_int = sdk_int(env)?;

        let vm = env
            .get_java_vm()
            .map_err(|e| platform_err("get_java_vm failed", e))?;

        Ok(Self {
            vm,
            vibrator,
            sdk_int,
        })
    }

    fn with_env<T>(
        &self,
        context: &'static str,
        f: impl FnOnce(&mut JNIEnv, &JObject) -> jni::errors::Result<T>,
    ) -> Result<T, VibrationError> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| platform_err("attach_current_thread failed", e))?;
        f(&mut env, self.vibrator.as_obj()).map_err(|e| platform_err(context, e))
    }
}

impl Vibrator for AndroidVibrator {
    fn has_vibrator(&self) -> bool {
        self.with_env("hasVibrator failed", |env, vibrator| {
            env.call_method(vibrator, "hasVibrator", "()Z", &[])?.z()
        })
        .unwrap_or_else(|e| {
            warn!("{e}");
            false
        })
    }

    fn has_amplitude_control(&self) -> bool {
        // hasAmplitudeControl() does not exist below SDK 26.
        if self.sdk_int < AMPLITUDE_CONTROL_SDK {
            return false;
        }
        self.with_env("hasAmplitudeControl failed", |env, vibrator| {
            env.call_method(vibrator, "hasAmplitudeControl", "()Z", &[])?
                .z()
        })
        .unwrap_or_else(|e| {
            warn!("{e}");
            false
        })
    }

    fn vibrate(&self, duration_ms: u64) -> Result<(), VibrationError> {
        let duration = i64::try_from(duration_ms)
            .map_err(|_| VibrationError::Platform("duration out of range".into()))?;
        self.with_env("vibrate failed", |env, vibrator| {
            env.call_method(vibrator, "vibrate", "(J)V", &[JValue::Long(duration)])?
                .v()
        })
    }

    fn vibrate_with_amplitude(
        &self,
        duration_ms: u64,
        amplitude: Amplitude,
    ) -> Result<(), VibrationError> {
        if self.sdk_int < AMPLITUDE_CONTROL_SDK {
            // VibrationEffect is unavailable; amplitude is ignored.
            return self.vibrate(duration_ms);
        }
        let duration = i64::try_from(duration_ms)
            .map_err(|_| VibrationError::Platform("duration out of range".into()))?;
        self.with_env("vibrate with effect failed", |env, vibrator| {
            let effect = env
                .call_static_method(
                    "android/os/VibrationEffect",
                    "createOneShot",
                    "(JI)Landroid/os/VibrationEffect;",
                    &[JValue::Long(duration), JValue::Int(amplitude.as_raw())],
                )?
                .l()?;
            env.call_method(
                vibrator,
                "vibrate",
                "(Landroid/os/VibrationEffect;)V",
                &[JValue::Object(&effect)],
            )?
            .v()
        })
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        self.with_env("cancel failed", |env, vibrator| {
            env.call_method(vibrator, "cancel", "()V", &[])?.v()
        })
    }
}

impl std::fmt::Debug for AndroidVibrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidVibrator")
            .field("sdk_int", &self.sdk_int)
            .finish_non_exhaustive()
    }
}

/// Platform gate answering from the SDK level read at construction.
#[derive(Debug, Clone, Copy)]
pub struct AndroidPlatform {
    sdk_int: i32,
}

impl AndroidPlatform {
    /// Read the SDK level once from a JNI env.
    ///
    /// # Errors
    /// Returns a [`VibrationError`] if the version lookup fails.
    pub fn from_env(env: &mut JNIEnv) -> Result<Self, VibrationError> {
        Ok(Self {
            sdk_int: sdk_int(env)?,
        })
    }
}

impl crate::PlatformSupport for AndroidPlatform {
    fn supports_amplitude_control(&self) -> bool {
        self.sdk_int >= AMPLITUDE_CONTROL_SDK
    }
}

// Without a Context there is nothing to bind; hosts construct
// AndroidVibrator::from_context and wire it through HostHandle::new.
pub(crate) fn default_device() -> Arc<dyn Vibrator> {
    Arc::new(NullVibrator)
}

// Conservative without an env to read SDK_INT from; hosts inject
// AndroidPlatform::from_env instead.
pub(crate) fn supports_amplitude_control() -> bool {
    false
}
