//! Bridge handles: entry point for lights and sensors behind one hub.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use crate::client::BridgeClient;
use crate::errors::Error;
use crate::light::Light;
use crate::sensor::Sensor;

type Result<T> = std::result::Result<T, Error>;

/// One bridge and the devices paired with it.
///
/// Cloning is cheap; clones share the same client.
#[derive(Debug)]
pub struct Bridge<C> {
    client: Arc<C>,
}

impl<C> Clone for Bridge<C> {
    fn clone(&self) -> Self {
        Bridge {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: BridgeClient> Bridge<C> {
    /// Wrap a client for one bridge.
    pub fn new(client: C) -> Self {
        Bridge {
            client: Arc::new(client),
        }
    }

    /// Stable ID of the bridge, as reported by its client.
    pub fn id(&self) -> &str {
        self.client.bridge_id()
    }

    /// Display name of the bridge.
    pub fn name(&self) -> &str {
        self.client.bridge_name()
    }

    /// The underlying client, for vendor specific calls.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Look up a paired light by ID.
    pub async fn light(&self, id: &str) -> Result<Light<C>> {
        self.client
            .lights()
            .await?
            .into_iter()
            .find(|info| info.id == id)
            .map(|info| Light::new(Arc::clone(&self.client), info))
            .ok_or_else(|| Error::LightNotFound(id.to_string()))
    }

    /// Look up a paired sensor by ID.
    pub async fn sensor(&self, id: &str) -> Result<Sensor<C>> {
        if id.is_empty() {
            return Err(Error::SensorNotFound(String::new()));
        }
        self.client
            .sensors()
            .await?
            .into_iter()
            .find(|info| info.id == id)
            .map(|info| Sensor::new(Arc::clone(&self.client), info))
            .ok_or_else(|| Error::SensorNotFound(id.to_string()))
    }

    /// All paired lights.
    pub async fn lights(&self) -> Result<Vec<Light<C>>> {
        let lights = self.client.lights().await?;
        Ok(lights
            .into_iter()
            .map(|info| Light::new(Arc::clone(&self.client), info))
            .collect())
    }

    /// All sensors with a stable ID. Virtual sensors are left out.
    pub async fn sensors(&self) -> Result<Vec<Sensor<C>>> {
        let sensors = self.client.sensors().await?;
        Ok(sensors
            .into_iter()
            .filter(|info| !info.id.is_empty())
            .map(|info| Sensor::new(Arc::clone(&self.client), info))
            .collect())
    }

    /// Search for unpaired lights and return the ones that were added.
    pub async fn discover_lights(&self) -> Result<Vec<Light<C>>> {
        let known: HashSet<String> = self
            .client
            .lights()
            .await?
            .into_iter()
            .map(|info| info.id)
            .collect();

        self.client.search_new_lights().await?;

        let found: Vec<_> = self
            .lights()
            .await?
            .into_iter()
            .filter(|light| !known.contains(light.id()))
            .collect();
        debug!("bridge {} found {} new lights", self.id(), found.len());
        Ok(found)
    }

    /// Search for unpaired sensors and return the ones that were added.
    pub async fn discover_sensors(&self) -> Result<Vec<Sensor<C>>> {
        let known: HashSet<String> = self
            .client
            .sensors()
            .await?
            .into_iter()
            .map(|info| info.id)
            .collect();

        self.client.search_new_sensors().await?;

        let found: Vec<_> = self
            .sensors()
            .await?
            .into_iter()
            .filter(|sensor| !known.contains(sensor.id()))
            .collect();
        debug!("bridge {} found {} new sensors", self.id(), found.len());
        Ok(found)
    }
}
