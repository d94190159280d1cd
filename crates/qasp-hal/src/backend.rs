//! Backend trait and configuration.
//!
//! Backends are synchronous: [`Backend::run`] blocks until every shot has
//! been sampled. Sampling mutates backend state (its random number
//! generator), hence `&mut self`.

use serde::{Deserialize, Serialize};

use qasp_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Configuration for a backend instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> HalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read an unsigned integer from the extra map.
    ///
    /// Missing keys yield `None`; present keys of the wrong type are an error.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!(
                    "'{key}' must be a non-negative integer, got {value}"
                ))
            }),
        }
    }
}

/// Trait for backends that can sample circuits.
pub trait Backend {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Run `circuit` for `shots` shots and return the measured histogram.
    fn run(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;

    /// Check a circuit and shot count against the backend's capabilities.
    fn validate(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        let caps = self.capabilities();
        if circuit.num_qubits() > caps.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but {} only supports {}",
                circuit.num_qubits(),
                caps.name,
                caps.num_qubits
            )));
        }
        if shots == 0 || shots > caps.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} (must be between 1 and {})",
                caps.max_shots
            )));
        }
        Ok(())
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Counts;

    struct FixedBackend {
        caps: Capabilities,
    }

    impl Backend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        fn run(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
            self.validate(circuit, shots)?;
            let mut counts = Counts::new();
            counts.insert("0".repeat(circuit.num_clbits()), u64::from(shots));
            Ok(ExecutionResult::new(counts, shots))
        }
    }

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("test").with_extra("max_qubits", serde_json::json!(12));
        assert_eq!(config.name, "test");
        assert_eq!(config.extra_u64("max_qubits").unwrap(), Some(12));
        assert_eq!(config.extra_u64("seed").unwrap(), None);

        let bad = BackendConfig::new("test").with_extra("seed", serde_json::json!("abc"));
        assert!(matches!(
            bad.extra_u64("seed"),
            Err(HalError::Configuration(_))
        ));
    }

    #[test]
    fn test_backend_config_from_json_flattens_extra() {
        let config = BackendConfig::from_json(r#"{"name": "sim", "seed": 7}"#).unwrap();
        assert_eq!(config.name, "sim");
        assert_eq!(config.extra_u64("seed").unwrap(), Some(7));
    }

    #[test]
    fn test_default_validate() {
        let mut backend = FixedBackend {
            caps: Capabilities::simulator(2),
        };
        let ok = Circuit::with_size("ok", 2, 2);
        let big = Circuit::with_size("big", 3, 0);

        assert_eq!(backend.run(&ok, 5).unwrap().counts.get("00"), 5);
        assert!(matches!(
            backend.run(&big, 5),
            Err(HalError::CircuitTooLarge(_))
        ));
        assert!(matches!(
            backend.run(&ok, 0),
            Err(HalError::InvalidShots(_))
        ));
    }
}
