//! Channel-level tests for the vibration bridge.
//!
//! Validates that:
//! 1. Capability queries reflect the device and the platform gate
//! 2. `vibrate` picks the amplitude or duration-only path per platform support
//! 3. Devices without an actuator degrade to silent no-ops
//! 4. Unknown methods answer "not implemented", bad arguments answer an error
//! 5. `open`/`close` bind and release the channel handler

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use vibekit_vibration::{
    Amplitude, HostHandle, Messenger, MethodCall, PlatformSupport, Reply, VibrationBridge,
    VibrationError, Vibrator, CHANNEL,
};

/// What the stub motor was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Vibrate { duration_ms: u64 },
    VibrateWithAmplitude { duration_ms: u64, amplitude: Amplitude },
    Cancel,
}

/// A recording vibrator with configurable capability answers.
struct StubVibrator {
    present: bool,
    amplitude_capable: bool,
    commands: Mutex<Vec<Command>>,
}

impl StubVibrator {
    fn new(present: bool, amplitude_capable: bool) -> Self {
        Self {
            present,
            amplitude_capable,
            commands: Mutex::new(Vec::new()),
        }
    }

    fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }
}

impl Vibrator for StubVibrator {
    fn has_vibrator(&self) -> bool {
        self.present
    }

    fn has_amplitude_control(&self) -> bool {
        self.amplitude_capable
    }

    fn vibrate(&self, duration_ms: u64) -> Result<(), VibrationError> {
        self.commands
            .lock()
            .unwrap()
            .push(Command::Vibrate { duration_ms });
        Ok(())
    }

    fn vibrate_with_amplitude(
        &self,
        duration_ms: u64,
        amplitude: Amplitude,
    ) -> Result<(), VibrationError> {
        self.commands
            .lock()
            .unwrap()
            .push(Command::VibrateWithAmplitude {
                duration_ms,
                amplitude,
            });
        Ok(())
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        self.commands.lock().unwrap().push(Command::Cancel);
        Ok(())
    }
}

/// A vibrator that faults on every trigger, for error-propagation tests.
struct FaultyVibrator;

impl Vibrator for FaultyVibrator {
    fn has_vibrator(&self) -> bool {
        true
    }

    fn has_amplitude_control(&self) -> bool {
        true
    }

    fn vibrate(&self, _duration_ms: u64) -> Result<(), VibrationError> {
        Err(VibrationError::Platform("motor is on fire".into()))
    }

    fn vibrate_with_amplitude(
        &self,
        _duration_ms: u64,
        _amplitude: Amplitude,
    ) -> Result<(), VibrationError> {
        Err(VibrationError::Platform("motor is on fire".into()))
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        Err(VibrationError::Platform("motor is on fire".into()))
    }
}

struct StubPlatform {
    amplitude_control: bool,
}

impl PlatformSupport for StubPlatform {
    fn supports_amplitude_control(&self) -> bool {
        self.amplitude_control
    }
}

struct Rig {
    messenger: Arc<Messenger>,
    vibrator: Arc<StubVibrator>,
    bridge: VibrationBridge,
}

impl Rig {
    fn new(present: bool, device_amplitude: bool, platform_amplitude: bool) -> Self {
        let messenger = Arc::new(Messenger::new());
        let vibrator = Arc::new(StubVibrator::new(present, device_amplitude));
        let handle = HostHandle::new(Arc::clone(&messenger), vibrator.clone());

        let mut bridge = VibrationBridge::with_platform(Arc::new(StubPlatform {
            amplitude_control: platform_amplitude,
        }));
        bridge.open(&handle).unwrap();

        Self {
            messenger,
            vibrator,
            bridge,
        }
    }

    fn call(&self, method: &str) -> Reply {
        self.messenger.invoke(CHANNEL, MethodCall::new(method))
    }

    fn vibrate(&self, duration: i64, amplitude: i64) -> Reply {
        self.messenger.invoke(
            CHANNEL,
            MethodCall::with_args(
                "vibrate",
                json!({ "duration": duration, "amplitude": amplitude }),
            ),
        )
    }
}

fn success_value(reply: &Reply) -> &Value {
    match reply {
        Reply::Success { value } => value,
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn has_vibrator_reflects_device() {
    let rig = Rig::new(true, false, false);
    assert_eq!(success_value(&rig.call("hasVibrator")), &json!(true));

    let rig = Rig::new(false, false, false);
    assert_eq!(success_value(&rig.call("hasVibrator")), &json!(false));
}

#[test]
fn amplitude_control_requires_platform_support() {
    // Capable hardware on an old platform version still answers false.
    let rig = Rig::new(true, true, false);
    assert_eq!(
        success_value(&rig.call("hasAmplitudeControl")),
        &json!(false)
    );
}

#[test]
fn amplitude_control_requires_device_support() {
    let rig = Rig::new(true, false, true);
    assert_eq!(
        success_value(&rig.call("hasAmplitudeControl")),
        &json!(false)
    );

    let rig = Rig::new(true, true, true);
    assert_eq!(
        success_value(&rig.call("hasAmplitudeControl")),
        &json!(true)
    );
}

#[test]
fn vibrate_without_platform_support_is_duration_only() {
    let rig = Rig::new(true, false, false);
    let reply = rig.vibrate(500, -1);

    assert_eq!(reply, Reply::done());
    assert_eq!(
        rig.vibrator.commands(),
        vec![Command::Vibrate { duration_ms: 500 }]
    );
}

#[test]
fn vibrate_with_amplitude_support_carries_amplitude() {
    let rig = Rig::new(true, true, true);
    let reply = rig.vibrate(500, 128);

    assert_eq!(reply, Reply::done());
    assert_eq!(
        rig.vibrator.commands(),
        vec![Command::VibrateWithAmplitude {
            duration_ms: 500,
            amplitude: Amplitude::Fixed(128),
        }]
    );
}

#[test]
fn default_amplitude_passes_through() {
    let rig = Rig::new(true, true, true);
    let reply = rig.vibrate(500, -1);

    assert_eq!(reply, Reply::done());
    assert_eq!(
        rig.vibrator.commands(),
        vec![Command::VibrateWithAmplitude {
            duration_ms: 500,
            amplitude: Amplitude::Default,
        }]
    );
}

#[test]
fn vibrate_without_actuator_is_a_silent_noop() {
    let rig = Rig::new(false, false, true);
    let reply = rig.vibrate(500, 128);

    assert_eq!(reply, Reply::done());
    assert!(rig.vibrator.commands().is_empty());
}

#[test]
fn cancel_without_actuator_is_a_silent_noop() {
    let rig = Rig::new(false, false, false);
    assert_eq!(rig.call("cancel"), Reply::done());
    assert!(rig.vibrator.commands().is_empty());
}

#[test]
fn cancel_stops_the_motor() {
    let rig = Rig::new(true, false, false);
    assert_eq!(rig.call("cancel"), Reply::done());
    assert_eq!(rig.vibrator.commands(), vec![Command::Cancel]);
}

#[test]
fn unknown_method_is_not_implemented() {
    let rig = Rig::new(true, true, true);
    assert_eq!(rig.call("vibratePattern"), Reply::NotImplemented);
}

#[test]
fn missing_arguments_are_rejected() {
    let rig = Rig::new(true, true, true);
    let reply = rig
        .messenger
        .invoke(CHANNEL, MethodCall::new("vibrate"));

    match reply {
        Reply::Error { code, .. } => assert_eq!(code, "bad-args"),
        other => panic!("expected error, got {other:?}"),
    }
    assert!(rig.vibrator.commands().is_empty());
}

#[test]
fn out_of_range_amplitude_is_rejected() {
    let rig = Rig::new(true, true, true);
    let reply = rig.vibrate(500, 300);

    match reply {
        Reply::Error { code, .. } => assert_eq!(code, "bad-args"),
        other => panic!("expected error, got {other:?}"),
    }
    assert!(rig.vibrator.commands().is_empty());
}

#[test]
fn negative_duration_is_rejected() {
    let rig = Rig::new(true, true, true);
    let reply = rig.vibrate(-500, 128);

    match reply {
        Reply::Error { code, .. } => assert_eq!(code, "bad-args"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn mistyped_arguments_are_rejected() {
    let rig = Rig::new(true, true, true);
    let reply = rig.messenger.invoke(
        CHANNEL,
        MethodCall::with_args("vibrate", json!({ "duration": "500", "amplitude": -1 })),
    );

    match reply {
        Reply::Error { code, .. } => assert_eq!(code, "bad-args"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn platform_faults_surface_as_error_replies() {
    let messenger = Arc::new(Messenger::new());
    let handle = HostHandle::new(Arc::clone(&messenger), Arc::new(FaultyVibrator));
    let mut bridge = VibrationBridge::with_platform(Arc::new(StubPlatform {
        amplitude_control: true,
    }));
    bridge.open(&handle).unwrap();

    let reply = messenger.invoke(
        CHANNEL,
        MethodCall::with_args("vibrate", json!({ "duration": 500, "amplitude": -1 })),
    );

    match reply {
        Reply::Error { code, message } => {
            assert_eq!(code, "platform-error");
            assert!(message.contains("motor is on fire"));
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn open_registers_the_vibration_channel() {
    let rig = Rig::new(true, false, false);
    assert!(rig.bridge.is_open());
    assert!(rig.messenger.has_handler(CHANNEL));
}

#[test]
fn close_releases_the_channel() {
    let mut rig = Rig::new(true, false, false);
    rig.bridge.close();

    assert!(!rig.bridge.is_open());
    assert!(!rig.messenger.has_handler(CHANNEL));
    assert_eq!(rig.call("hasVibrator"), Reply::NotImplemented);

    // Closing again stays a no-op.
    rig.bridge.close();
    assert!(!rig.bridge.is_open());
}

#[test]
fn reopening_an_open_bridge_fails() {
    let mut rig = Rig::new(true, false, false);
    let handle = HostHandle::new(Arc::clone(&rig.messenger), Arc::new(StubVibrator::new(true, true)));

    assert!(matches!(
        rig.bridge.open(&handle),
        Err(VibrationError::AlreadyAttached)
    ));
}

#[test]
fn bridge_can_reopen_after_close() {
    let mut rig = Rig::new(true, false, false);
    rig.bridge.close();

    let handle = HostHandle::new(Arc::clone(&rig.messenger), rig.vibrator.clone());
    rig.bridge.open(&handle).unwrap();

    assert_eq!(success_value(&rig.call("hasVibrator")), &json!(true));
}

#[test]
fn dropping_the_bridge_detaches_it() {
    let messenger = Arc::new(Messenger::new());
    {
        let handle =
            HostHandle::new(Arc::clone(&messenger), Arc::new(StubVibrator::new(true, false)));
        let mut bridge = VibrationBridge::with_platform(Arc::new(StubPlatform {
            amplitude_control: false,
        }));
        bridge.open(&handle).unwrap();
        assert!(messenger.has_handler(CHANNEL));
    }
    assert!(!messenger.has_handler(CHANNEL));
}
