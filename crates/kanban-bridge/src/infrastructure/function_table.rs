//! Name → inbound relay registry.
//!
//! Stands in for the page's global scope when the host runs the front-end
//! in-process: the bridge registers its inbound relay under the configured
//! function name and the host calls it by that name.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::application::bridge::InboundRelay;
use crate::application::ports::InboundRegistry;
use crate::domain::BridgeError;

#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: Mutex<HashMap<String, InboundRelay>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls the relay registered as `name` with `text`.
    ///
    /// The table lock is released before the relay runs, so the front-end
    /// may re-enter the table from inside its inbound port.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnknownFunction`] if nothing is registered as
    /// `name`.
    pub fn call(&self, name: &str, text: impl Into<String>) -> Result<(), BridgeError> {
        let relay = self
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| BridgeError::UnknownFunction(name.to_string()))?;
        relay.call(text);
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, InboundRelay>> {
        self.functions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InboundRegistry for FunctionTable {
    fn register(&self, name: &str, relay: InboundRelay) {
        if self.lock().insert(name.to_string(), relay).is_some() {
            warn!(function = name, "inbound function re-registered; previous relay replaced");
        }
    }
}
