//! The contract a vendor bridge client has to fulfil.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::payload::LightStateUpdate;
use crate::status::PhysicalLightState;

type Result<T> = std::result::Result<T, Error>;

/// A light as listed by the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightInfo {
    /// Stable unique ID of the light.
    pub id: String,
    pub name: String,
    pub state: PhysicalLightState,
}

/// A sensor as listed by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorInfo {
    /// Stable unique ID of the sensor. Virtual sensors have none and are
    /// left out of [`crate::Bridge::sensors`].
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Vendor sensor type, e.g. `ZLLSwitch` or `Daylight`.
    #[serde(rename = "type")]
    pub sensor_type: String,
}

/// One raw sensor reading.
///
/// `button_event` packs the button index and phase as
/// `button * 1000 + phase`, with phase 0 = press, 1 = hold,
/// 2 = short release and 3 = long release. 0 means no event yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSensorState {
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub button_event: u32,
    #[serde(default)]
    pub daylight: bool,
}

/// Network access to one bridge.
///
/// Implementations own the wire protocol, authentication and retries; every
/// failure should surface as [`Error::DeviceIo`] (or a not-found error for
/// unknown IDs). Nothing here is retried by the caller.
pub trait BridgeClient: Send + Sync + 'static {
    /// Serial number or other stable ID of the bridge.
    fn bridge_id(&self) -> &str;

    fn bridge_name(&self) -> &str;

    fn lights(&self) -> impl Future<Output = Result<Vec<LightInfo>>> + Send;

    fn sensors(&self) -> impl Future<Output = Result<Vec<SensorInfo>>> + Send;

    /// Fetch a fully populated physical snapshot of one light.
    fn read_light_state(&self, id: &str)
    -> impl Future<Output = Result<PhysicalLightState>> + Send;

    /// Send a partial write. Only the fields set on `update` are sent.
    fn write_light_state(
        &self,
        id: &str,
        update: &LightStateUpdate,
    ) -> impl Future<Output = Result<()>> + Send;

    fn rename_light(&self, id: &str, name: &str) -> impl Future<Output = Result<()>> + Send;

    fn delete_light(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    fn read_sensor_state(&self, id: &str) -> impl Future<Output = Result<RawSensorState>> + Send;

    fn delete_sensor(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Ask the bridge to look for lights that are not paired yet.
    fn search_new_lights(&self) -> impl Future<Output = Result<()>> + Send;

    /// Ask the bridge to look for sensors that are not paired yet.
    fn search_new_sensors(&self) -> impl Future<Output = Result<()>> + Send;
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    use super::*;

    /// In-memory bridge used by the handle tests.
    #[derive(Debug, Default)]
    pub(crate) struct FakeBridge {
        inner: Mutex<FakeState>,
    }

    #[derive(Debug, Default)]
    pub(crate) struct FakeState {
        pub lights: Vec<LightInfo>,
        pub sensors: Vec<SensorInfo>,
        pub sensor_states: HashMap<String, RawSensorState>,
        /// Lights that show up after the next search.
        pub unpaired_lights: Vec<LightInfo>,
        pub writes: Vec<(String, LightStateUpdate)>,
        pub sensor_reads: usize,
        pub light_searches: usize,
        pub sensor_searches: usize,
        pub fail_io: bool,
    }

    impl FakeBridge {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn state(&self) -> MutexGuard<'_, FakeState> {
            self.inner.lock().unwrap()
        }

        pub(crate) fn add_light(&self, id: &str, state: PhysicalLightState) {
            self.state().lights.push(LightInfo {
                id: id.to_string(),
                name: format!("Light {id}"),
                state,
            });
        }

        pub(crate) fn add_sensor(&self, id: &str, sensor_type: &str) {
            self.state().sensors.push(SensorInfo {
                id: id.to_string(),
                name: format!("Sensor {id}"),
                sensor_type: sensor_type.to_string(),
            });
        }

        pub(crate) fn set_sensor(&self, id: &str, raw: RawSensorState) {
            self.state().sensor_states.insert(id.to_string(), raw);
        }

        fn check_io(&self, action: &str) -> Result<()> {
            if self.state().fail_io {
                Err(Error::device_io(
                    action,
                    std::io::Error::new(std::io::ErrorKind::TimedOut, "receive timeout"),
                ))
            } else {
                Ok(())
            }
        }
    }

    impl BridgeClient for FakeBridge {
        fn bridge_id(&self) -> &str {
            "001788fffe000001"
        }

        fn bridge_name(&self) -> &str {
            "Fake Bridge"
        }

        async fn lights(&self) -> Result<Vec<LightInfo>> {
            self.check_io("list lights")?;
            Ok(self.state().lights.clone())
        }

        async fn sensors(&self) -> Result<Vec<SensorInfo>> {
            self.check_io("list sensors")?;
            Ok(self.state().sensors.clone())
        }

        async fn read_light_state(&self, id: &str) -> Result<PhysicalLightState> {
            self.check_io("read light")?;
            self.state()
                .lights
                .iter()
                .find(|l| l.id == id)
                .map(|l| l.state.clone())
                .ok_or_else(|| Error::LightNotFound(id.to_string()))
        }

        async fn write_light_state(&self, id: &str, update: &LightStateUpdate) -> Result<()> {
            self.check_io("write light")?;
            let mut state = self.state();
            let light = state
                .lights
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| Error::LightNotFound(id.to_string()))?;
            light.state.apply(update);
            state.writes.push((id.to_string(), update.clone()));
            Ok(())
        }

        async fn rename_light(&self, id: &str, name: &str) -> Result<()> {
            self.check_io("rename light")?;
            let mut state = self.state();
            let light = state
                .lights
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| Error::LightNotFound(id.to_string()))?;
            light.name = name.to_string();
            Ok(())
        }

        async fn delete_light(&self, id: &str) -> Result<()> {
            self.check_io("delete light")?;
            self.state().lights.retain(|l| l.id != id);
            Ok(())
        }

        async fn read_sensor_state(&self, id: &str) -> Result<RawSensorState> {
            self.check_io("read sensor")?;
            let mut state = self.state();
            state.sensor_reads += 1;
            state
                .sensor_states
                .get(id)
                .copied()
                .ok_or_else(|| Error::SensorNotFound(id.to_string()))
        }

        async fn delete_sensor(&self, id: &str) -> Result<()> {
            self.check_io("delete sensor")?;
            self.state().sensors.retain(|s| s.id != id);
            Ok(())
        }

        async fn search_new_lights(&self) -> Result<()> {
            self.check_io("search lights")?;
            let mut state = self.state();
            state.light_searches += 1;
            let found = std::mem::take(&mut state.unpaired_lights);
            state.lights.extend(found);
            Ok(())
        }

        async fn search_new_sensors(&self) -> Result<()> {
            self.check_io("search sensors")?;
            self.state().sensor_searches += 1;
            Ok(())
        }
    }
}
