//! Sensor handles.

use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use futures::future;
use log::debug;

use crate::client::{BridgeClient, SensorInfo};
use crate::detector::{ButtonDetector, SensorState};
use crate::errors::Error;
use crate::events::{ButtonEvents, PollConfig};

type Result<T> = std::result::Result<T, Error>;

/// A sensor behind a bridge.
///
/// The handle keeps the button detector memory for its whole lifetime.
/// Readings through [`Sensor::state`] and every event stream opened from the
/// handle (or its clones) share it, so a press is reported once even across
/// resubscribes.
#[derive(Debug)]
pub struct Sensor<C> {
    client: Arc<C>,
    info: SensorInfo,
    detector: Arc<Mutex<ButtonDetector>>,
    poll: PollConfig,
}

impl<C> Clone for Sensor<C> {
    fn clone(&self) -> Self {
        Sensor {
            client: Arc::clone(&self.client),
            info: self.info.clone(),
            detector: Arc::clone(&self.detector),
            poll: self.poll,
        }
    }
}

impl<C: BridgeClient> Sensor<C> {
    /// Vendor type of wall switches and dimmer remotes.
    pub const BUTTON_TYPE: &'static str = "ZLLSwitch";
    /// Vendor type of the bridge's built-in daylight sensor.
    pub const DAYLIGHT_TYPE: &'static str = "Daylight";

    pub(crate) fn new(client: Arc<C>, info: SensorInfo) -> Self {
        Sensor {
            client,
            info,
            detector: Arc::new(Mutex::new(ButtonDetector::new())),
            poll: PollConfig::default(),
        }
    }

    /// Use a different polling cadence for streams opened from now on.
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Stable unique ID of the sensor on its bridge.
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// Display name as stored on the bridge.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Vendor sensor type, e.g. [`Sensor::BUTTON_TYPE`].
    pub fn kind(&self) -> &str {
        &self.info.sensor_type
    }

    /// Whether this is a switch that reports button events.
    pub fn is_button(&self) -> bool {
        self.info.sensor_type == Self::BUTTON_TYPE
    }

    /// Whether this is the bridge's daylight sensor.
    pub fn is_daylight(&self) -> bool {
        self.info.sensor_type == Self::DAYLIGHT_TYPE
    }

    /// Sensors cannot be renamed through the bridge.
    pub async fn set_name(&self, _name: &str) -> Result<()> {
        Err(Error::Unsupported)
    }

    /// Take one reading and decode it.
    pub async fn state(&self) -> Result<SensorState> {
        let raw = self.client.read_sensor_state(&self.info.id).await?;
        Ok(ButtonDetector::observe_shared(&self.detector, &raw, Utc::now()))
    }

    /// Stream button events until the stream is cancelled or dropped.
    pub fn button_events(&self) -> ButtonEvents {
        self.button_events_until(future::pending())
    }

    /// Stream button events until `cancel` resolves.
    ///
    /// Polling starts right away in a background task and stops promptly
    /// once `cancel` completes.
    pub fn button_events_until<F>(&self, cancel: F) -> ButtonEvents
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!("subscribing to button events of sensor {}", self.info.id);
        ButtonEvents::spawn(
            Arc::clone(&self.client),
            self.info.id.clone(),
            Arc::clone(&self.detector),
            self.poll,
            cancel,
        )
    }

    /// Remove the sensor from the bridge.
    pub async fn forget(self) -> Result<()> {
        self.client.delete_sensor(&self.info.id).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::{FutureExt, StreamExt};

    use super::*;
    use crate::client::RawSensorState;
    use crate::client::fake::FakeBridge;
    use crate::types::ButtonEvent;

    fn sensor(bridge: &Arc<FakeBridge>, sensor_type: &str) -> Sensor<FakeBridge> {
        bridge.add_sensor("3", sensor_type);
        let info = bridge.state().sensors[0].clone();
        Sensor::new(Arc::clone(bridge), info)
    }

    fn raw(code: u32) -> RawSensorState {
        RawSensorState {
            last_updated: Utc::now(),
            button_event: code,
            daylight: true,
        }
    }

    #[test]
    fn test_kind() {
        let bridge = Arc::new(FakeBridge::new());
        let switch = sensor(&bridge, "ZLLSwitch");
        assert!(switch.is_button());
        assert!(!switch.is_daylight());
        assert_eq!(switch.kind(), "ZLLSwitch");
        assert_eq!(switch.name(), "Sensor 3");

        let bridge = Arc::new(FakeBridge::new());
        let daylight = sensor(&bridge, "Daylight");
        assert!(daylight.is_daylight());
        assert!(!daylight.is_button());
    }

    #[tokio::test]
    async fn test_set_name_is_unsupported() {
        let bridge = Arc::new(FakeBridge::new());
        let switch = sensor(&bridge, "ZLLSwitch");
        let err = switch.set_name("Hallway").await.unwrap_err();
        assert!(err.is_unsupported());
    }

    #[tokio::test]
    async fn test_state_debounces_between_reads() {
        let bridge = Arc::new(FakeBridge::new());
        let switch = sensor(&bridge, "ZLLSwitch");
        bridge.set_sensor("3", raw(4000));

        let first = switch.state().await.unwrap();
        assert_eq!(first.button_events, vec![ButtonEvent::press(4)]);
        let second = switch.state().await.unwrap();
        assert!(second.button_events.is_empty());
        assert_eq!(second.daylight, None);
    }

    #[tokio::test]
    async fn test_state_reports_daylight_when_idle() {
        let bridge = Arc::new(FakeBridge::new());
        let daylight = sensor(&bridge, "Daylight");
        bridge.set_sensor("3", raw(0));

        let state = daylight.state().await.unwrap();
        assert_eq!(state.daylight, Some(true));
    }

    #[tokio::test]
    async fn test_state_propagates_not_found() {
        let bridge = Arc::new(FakeBridge::new());
        let switch = sensor(&bridge, "ZLLSwitch");
        let err = switch.state().await.unwrap_err();
        assert!(matches!(err, Error::SensorNotFound(id) if id == "3"));
    }

    #[tokio::test]
    async fn test_button_events_until() {
        let bridge = Arc::new(FakeBridge::new());
        let switch = sensor(&bridge, "ZLLSwitch").with_poll_config(PollConfig {
            active_interval: Duration::from_millis(1),
            ..PollConfig::default()
        });
        bridge.set_sensor("3", raw(1003));

        let (tx, rx) = futures::channel::oneshot::channel::<()>();
        let mut events = switch.button_events_until(async move {
            let _ = rx.await;
        });
        assert_eq!(events.next().await, Some(ButtonEvent::release(1)));

        tx.send(()).unwrap();
        assert_eq!(events.next().await, None);
    }

    #[tokio::test]
    async fn test_resubscribe_does_not_repeat_press() {
        let bridge = Arc::new(FakeBridge::new());
        let switch = sensor(&bridge, "ZLLSwitch").with_poll_config(PollConfig {
            active_interval: Duration::from_millis(1),
            ..PollConfig::default()
        });
        bridge.set_sensor("3", raw(1000));

        let mut first = switch.button_events();
        assert_eq!(first.next().await, Some(ButtonEvent::press(1)));
        first.cancel();
        drop(first);

        let mut second = switch.button_events();
        crate::runtime::sleep(Duration::from_millis(30)).await;
        assert!(second.next().now_or_never().is_none());
        second.cancel();

        assert!(switch.state().await.unwrap().button_events.is_empty());
        let copy = switch.clone();
        assert!(copy.state().await.unwrap().button_events.is_empty());
    }

    #[tokio::test]
    async fn test_forget() {
        let bridge = Arc::new(FakeBridge::new());
        let switch = sensor(&bridge, "ZLLSwitch");
        switch.forget().await.unwrap();
        assert!(bridge.state().sensors.is_empty());
    }
}
