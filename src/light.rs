//! Individual light control.

use std::sync::Arc;

use log::debug;
use serde_json::{Value, json};

use crate::client::{BridgeClient, LightInfo};
use crate::errors::Error;
use crate::reconcile::{project, reconcile};
use crate::status::PhysicalLightState;
use crate::types::LightState;

type Result<T> = std::result::Result<T, Error>;

/// A light behind a bridge.
///
/// The handle caches the last physical state it read or wrote. Writes are
/// computed against that cache, so a light whose state was changed from
/// elsewhere should be refreshed with [`Light::state`] first.
///
/// # Example
///
/// ```ignore
/// use bridge_lights_rs::{Color, LightState};
///
/// let mut light = bridge.light("00:17:88:01:00:bd:c7:b9-0b").await?;
/// light
///     .set_state(&LightState::new(true, 0.8, "2700k".parse()?))
///     .await?;
/// ```
#[derive(Debug)]
pub struct Light<C> {
    client: Arc<C>,
    id: String,
    name: String,
    physical: PhysicalLightState,
}

impl<C> Clone for Light<C> {
    fn clone(&self) -> Self {
        Light {
            client: Arc::clone(&self.client),
            id: self.id.clone(),
            name: self.name.clone(),
            physical: self.physical.clone(),
        }
    }
}

impl<C: BridgeClient> Light<C> {
    pub(crate) fn new(client: Arc<C>, info: LightInfo) -> Self {
        Light {
            client,
            id: info.id,
            name: info.name,
            physical: info.state,
        }
    }

    /// Stable unique ID of the light on its bridge.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name as last read from or written to the bridge.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cached hardware state, as last read or written.
    pub fn physical(&self) -> &PhysicalLightState {
        &self.physical
    }

    /// Rename the light on the bridge.
    pub async fn set_name(&mut self, name: &str) -> Result<()> {
        self.client.rename_light(&self.id, name).await?;
        self.name = name.to_string();
        Ok(())
    }

    /// Refresh the cached hardware state and return it as a [`LightState`].
    pub async fn state(&mut self) -> Result<LightState> {
        self.physical = self.client.read_light_state(&self.id).await?;
        Ok(project(&self.physical))
    }

    /// Bring the light to `desired`, issuing at most one write.
    ///
    /// Nothing is sent when the cached state already matches.
    pub async fn set_state(&mut self, desired: &LightState) -> Result<()> {
        let Some(update) = reconcile(desired, &self.physical) else {
            debug!("light {} already matches, skipping write", self.id);
            return Ok(());
        };

        debug!("writing light {}: {:?}", self.id, update);
        self.client.write_light_state(&self.id, &update).await?;
        self.physical.apply(&update);
        Ok(())
    }

    /// Remove the light from the bridge.
    pub async fn forget(self) -> Result<()> {
        self.client.delete_light(&self.id).await
    }

    /// Returns a JSON snapshot of the cached state, for bug reports.
    pub fn diagnostics(&self) -> Value {
        let logical = project(&self.physical);
        json!({
            "id": self.id,
            "name": self.name,
            "bridge": self.client.bridge_id(),
            "physical": serde_json::to_value(&self.physical).unwrap_or(Value::Null),
            "state": {
                "power": logical.power,
                "brightness": logical.brightness,
                "color": logical.color.hex(),
                "kelvin": logical.color.kelvin(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::client::fake::FakeBridge;
    use crate::types::{Color, ColorMode};

    fn light(bridge: &Arc<FakeBridge>, state: PhysicalLightState) -> Light<FakeBridge> {
        bridge.add_light("1", state);
        let info = bridge.state().lights[0].clone();
        Light::new(Arc::clone(bridge), info)
    }

    #[tokio::test]
    async fn test_set_state_writes_once() {
        let bridge = Arc::new(FakeBridge::new());
        let mut light = light(&bridge, PhysicalLightState::default());
        let desired = LightState::new(true, 1.0, Color::from_str("hsv(0, 1, 1)").unwrap());

        light.set_state(&desired).await.unwrap();
        light.set_state(&desired).await.unwrap();

        let writes = bridge.state().writes.clone();
        assert_eq!(writes.len(), 1);
        let (id, update) = &writes[0];
        assert_eq!(id, "1");
        assert_eq!(update.hue(), Some(1));
        assert_eq!(light.physical().bri, 254);
        assert_eq!(light.physical().color_mode, ColorMode::Hs);
    }

    #[tokio::test]
    async fn test_set_state_power_off() {
        let bridge = Arc::new(FakeBridge::new());
        let mut light = light(
            &bridge,
            PhysicalLightState {
                on: true,
                bri: 200,
                ..PhysicalLightState::default()
            },
        );

        let desired = LightState::new(false, 1.0, Color::from_kelvin(3000));
        light.set_state(&desired).await.unwrap();

        let writes = bridge.state().writes.clone();
        assert_eq!(writes.len(), 1);
        assert_eq!(
            serde_json::to_value(&writes[0].1).unwrap(),
            json!({"on": false})
        );
        assert!(!light.physical().on);
        assert_eq!(light.physical().bri, 200);
    }

    #[tokio::test]
    async fn test_state_refreshes_cache() {
        let bridge = Arc::new(FakeBridge::new());
        let mut light = light(&bridge, PhysicalLightState::default());

        bridge.state().lights[0].state = PhysicalLightState {
            on: true,
            bri: 254,
            ct: 250,
            color_mode: ColorMode::Ct,
            ..PhysicalLightState::default()
        };

        let state = light.state().await.unwrap();
        assert!(state.power);
        assert_eq!(state.color.kelvin(), 4000);
        assert_eq!(light.physical().ct, 250);
    }

    #[tokio::test]
    async fn test_device_error_is_propagated() {
        let bridge = Arc::new(FakeBridge::new());
        let mut light = light(&bridge, PhysicalLightState::default());
        bridge.state().fail_io = true;

        let desired = LightState::new(true, 0.5, Color::from_kelvin(2700));
        let err = light.set_state(&desired).await.unwrap_err();
        assert!(matches!(err, Error::DeviceIo { .. }));
        // The cache only follows successful writes.
        assert!(!light.physical().on);

        assert!(matches!(light.state().await, Err(Error::DeviceIo { .. })));
    }

    #[tokio::test]
    async fn test_set_name_and_forget() {
        let bridge = Arc::new(FakeBridge::new());
        let mut light = light(&bridge, PhysicalLightState::default());

        light.set_name("Desk").await.unwrap();
        assert_eq!(light.name(), "Desk");
        assert_eq!(bridge.state().lights[0].name, "Desk");

        light.forget().await.unwrap();
        assert!(bridge.state().lights.is_empty());
    }

    #[test]
    fn test_diagnostics() {
        let bridge = Arc::new(FakeBridge::new());
        let light = light(
            &bridge,
            PhysicalLightState {
                on: true,
                bri: 254,
                hue: 0,
                sat: 254,
                ..PhysicalLightState::default()
            },
        );

        let diag = light.diagnostics();
        assert_eq!(diag["id"], "1");
        assert_eq!(diag["bridge"], "001788fffe000001");
        assert_eq!(diag["physical"]["colormode"], "hs");
        assert_eq!(diag["state"]["color"], "ff0000");
        assert_eq!(diag["state"]["power"], true);
    }
}
