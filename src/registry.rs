//! Bookkeeping of known bridges.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::bridge::Bridge;
use crate::client::BridgeClient;
use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Bridges keyed by ID, safe to share between tasks.
///
/// Bridges are listed in the order they were added.
#[derive(Debug)]
pub struct BridgeRegistry<C> {
    bridges: Mutex<Vec<Bridge<C>>>,
}

impl<C> Default for BridgeRegistry<C> {
    fn default() -> Self {
        BridgeRegistry {
            bridges: Mutex::new(Vec::new()),
        }
    }
}

impl<C: BridgeClient> BridgeRegistry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn bridges(&self) -> MutexGuard<'_, Vec<Bridge<C>>> {
        // The list stays consistent even if a holder panicked.
        self.bridges.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a bridge, returning the one it replaces, if any.
    pub fn add(&self, bridge: Bridge<C>) -> Option<Bridge<C>> {
        let mut bridges = self.bridges();
        match bridges.iter_mut().find(|b| b.id() == bridge.id()) {
            Some(existing) => {
                debug!("replacing bridge {}", bridge.id());
                Some(std::mem::replace(existing, bridge))
            }
            None => {
                debug!("adding bridge {}", bridge.id());
                bridges.push(bridge);
                None
            }
        }
    }

    /// The bridge registered under `id`.
    pub fn get(&self, id: &str) -> Result<Bridge<C>> {
        self.bridges()
            .iter()
            .find(|b| b.id() == id)
            .cloned()
            .ok_or_else(|| Error::BridgeNotFound(id.to_string()))
    }

    /// Unregister and return the bridge registered under `id`.
    pub fn remove(&self, id: &str) -> Result<Bridge<C>> {
        let mut bridges = self.bridges();
        let index = bridges
            .iter()
            .position(|b| b.id() == id)
            .ok_or_else(|| Error::BridgeNotFound(id.to_string()))?;
        Ok(bridges.remove(index))
    }

    /// All registered bridges, oldest first.
    pub fn list(&self) -> Vec<Bridge<C>> {
        self.bridges().clone()
    }

    pub fn len(&self) -> usize {
        self.bridges().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bridges().is_empty()
    }
}
