//! # VibeKit
//!
//! Device-vibration bridging for applications embedding a cross-platform
//! host shell, across macOS, iOS, Android, Windows, and Linux.
//!
//! VibeKit is modular: enable only the features you need.
//!
//! - `vibration`: the vibration motor bridge: capability queries, one-shot
//!   vibration and cancellation over a small method-call channel.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! vibekit = { version = "0.1", features = ["vibration"] }
//! ```
//!
//! ```ignore
//! use std::sync::Arc;
//! use vibekit::vibration::{HostHandle, Messenger, MethodCall, VibrationBridge, CHANNEL};
//!
//! let messenger = Arc::new(Messenger::new());
//! let handle = HostHandle::for_platform(Arc::clone(&messenger));
//!
//! let mut bridge = VibrationBridge::new();
//! bridge.open(&handle)?;
//!
//! let reply = messenger.invoke(CHANNEL, MethodCall::new("hasVibrator"));
//! ```

#[cfg(feature = "vibration")]
pub use vibekit_vibration as vibration;
