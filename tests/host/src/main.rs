//! Host-side smoke test for vibekit-vibration
//!
//! Run with: cargo run -p vibekit-vibration-test

use std::sync::Arc;

use serde_json::json;
use vibekit_vibration::{HostHandle, Messenger, MethodCall, VibrationBridge, CHANNEL};

fn main() {
    println!("=== Vibration Channel Test ===\n");

    let messenger = Arc::new(Messenger::new());
    let handle = HostHandle::for_platform(Arc::clone(&messenger));

    let mut bridge = VibrationBridge::new();
    bridge.open(&handle).expect("bridge failed to attach");

    println!(
        "hasVibrator:         {:?}",
        messenger.invoke(CHANNEL, MethodCall::new("hasVibrator"))
    );
    println!(
        "hasAmplitudeControl: {:?}",
        messenger.invoke(CHANNEL, MethodCall::new("hasAmplitudeControl"))
    );
    println!(
        "vibrate(500, -1):    {:?}",
        messenger.invoke(
            CHANNEL,
            MethodCall::with_args("vibrate", json!({ "duration": 500, "amplitude": -1 }))
        )
    );
    println!(
        "vibrate(500, 128):   {:?}",
        messenger.invoke(
            CHANNEL,
            MethodCall::with_args("vibrate", json!({ "duration": 500, "amplitude": 128 }))
        )
    );
    println!(
        "cancel:              {:?}",
        messenger.invoke(CHANNEL, MethodCall::new("cancel"))
    );
    println!(
        "vibratePattern:      {:?}",
        messenger.invoke(CHANNEL, MethodCall::new("vibratePattern"))
    );

    bridge.close();
    println!("\n=== Test Complete ===");
}
