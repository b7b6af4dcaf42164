//! # bridge_lights_rs
//!
//! An async Rust library for driving lights and switches behind a
//! networked lighting bridge.
//!
//! The crate is vendor neutral: the wire protocol lives behind the
//! [`BridgeClient`] trait, and everything built on top of it works the same
//! for any bridge that implements it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bridge_lights_rs::{Bridge, Color, LightState};
//! use futures::StreamExt;
//!
//! async fn run(client: impl bridge_lights_rs::BridgeClient) -> Result<(), bridge_lights_rs::Error> {
//!     let bridge = Bridge::new(client);
//!
//!     // Only the fields that differ from the light's state are written.
//!     let mut light = bridge.light("1").await?;
//!     light.set_state(&LightState::new(true, 0.8, "2700k".parse()?)).await?;
//!
//!     // React to a wall switch.
//!     let switch = bridge.sensor("12").await?;
//!     let mut events = switch.button_events();
//!     while let Some(event) = events.next().await {
//!         println!("button {} {}", event.button, event.kind);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Colors**: Parse hex, `rgb(...)`, `hsv(...)` and Kelvin (`2700k`) with [`Color`]
//! - **Minimal Writes**: [`reconcile`] computes the smallest write for a desired [`LightState`]
//! - **Buttons**: Debounced press/hold/release events as a [`futures::Stream`] via [`ButtonEvents`]
//! - **Bookkeeping**: Listing, discovery and removal of devices through [`Bridge`] and [`BridgeRegistry`]
//!
//! ## Runtime Selection
//!
//! Button polling runs as a background task, so one async runtime has to be
//! selected with feature flags:
//!
//! - `runtime-tokio` (default): Use the tokio async runtime
//! - `runtime-async-std`: Use the async-std runtime
//! - `runtime-smol`: Use the smol runtime

mod bridge;
mod client;
mod detector;
mod errors;
mod events;
mod light;
mod payload;
mod reconcile;
mod registry;
pub mod runtime;
mod sensor;
mod status;
mod types;

// Re-export public API
pub use bridge::Bridge;
pub use client::{BridgeClient, LightInfo, RawSensorState, SensorInfo};
pub use detector::{ButtonDetector, SensorState};
pub use errors::{ColorError, Error};
pub use events::{ButtonEvents, PollConfig};
pub use light::Light;
pub use payload::LightStateUpdate;
pub use reconcile::{
    BYTE_SCALE, HUE_SCALE, MIRED_HYSTERESIS, kelvin_to_mired, mired_to_kelvin, project, reconcile,
};
pub use registry::BridgeRegistry;
pub use sensor::Sensor;
pub use status::{EFFECT_NONE, PhysicalLightState};
pub use types::{
    ButtonEvent, ButtonEventKind, Color, ColorMode, KELVIN_MAX, KELVIN_MIN, LightState,
};
