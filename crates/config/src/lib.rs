use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Logical level on a pin, as seen by a register read.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PinLevel {
    High,
    Low,
}

impl PinLevel {
    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl FromStr for PinLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let v = value.trim().to_ascii_lowercase();
        match v.as_str() {
            "high" | "1" => Ok(Self::High),
            "low" | "0" => Ok(Self::Low),
            _ => Err(format!(
                "unsupported pin level '{}'; supported: high, low",
                value
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModeName {
    Positive,
    Negative,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LedLevel {
    On,
    Off,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioInputs {
    /// Bytes preloaded into the UART receive queue; the polling loop
    /// consumes at most one per iteration.
    #[serde(default)]
    pub serial: String,
    /// Initial pushbutton level.
    #[serde(default = "default_button_level")]
    pub button: PinLevel,
}

fn default_button_level() -> PinLevel {
    PinLevel::Low
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioLimits {
    pub max_iterations: u64,
}

/// Pushbutton level change applied before the given iteration runs.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ButtonEvent {
    pub at_iteration: u64,
    pub button: PinLevel,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FinalModeAssertion {
    pub final_mode: ModeName,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LedAssertion {
    pub led: LedLevel,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum ScenarioAssertion {
    FinalMode(FinalModeAssertion),
    Led(LedAssertion),
}

/// A scripted simulator run: inputs, iteration budget, and the expected
/// final state.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub schema_version: String,
    pub inputs: ScenarioInputs,
    pub limits: ScenarioLimits,
    #[serde(default)]
    pub events: Vec<ButtonEvent>,
    #[serde(default)]
    pub assertions: Vec<ScenarioAssertion>,
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open scenario at {:?}", path.as_ref()))?;
        let scenario: Self = serde_yaml::from_reader(f).context("Failed to parse scenario YAML")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Build an unscripted scenario from command-line flags.
    pub fn ad_hoc(serial: String, button: PinLevel, max_iterations: u64) -> Result<Self> {
        let scenario = Self {
            schema_version: "1.0".to_string(),
            inputs: ScenarioInputs { serial, button },
            limits: ScenarioLimits { max_iterations },
            events: Vec::new(),
            assertions: Vec::new(),
        };
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != "1.0" {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '1.0'",
                self.schema_version
            );
        }

        if self.limits.max_iterations == 0 {
            anyhow::bail!("Limit 'max_iterations' must be greater than zero");
        }

        if !self.inputs.serial.is_ascii() {
            anyhow::bail!("Input 'serial' must be ASCII; one byte per character");
        }

        for event in &self.events {
            if event.at_iteration >= self.limits.max_iterations {
                anyhow::bail!(
                    "Event at iteration {} is outside the iteration budget {}",
                    event.at_iteration,
                    self.limits.max_iterations
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_scenario() {
        let yaml = r#"
schema_version: "1.0"
inputs:
  serial: "pn"
  button: high
limits:
  max_iterations: 100
events:
  - at_iteration: 5
    button: low
assertions:
  - final_mode: negative
  - led: "on"
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.inputs.serial, "pn");
        assert_eq!(scenario.inputs.button, PinLevel::High);
        assert_eq!(scenario.limits.max_iterations, 100);
        assert_eq!(scenario.events.len(), 1);
        assert_eq!(scenario.assertions.len(), 2);
        assert!(matches!(
            scenario.assertions[0],
            ScenarioAssertion::FinalMode(FinalModeAssertion {
                final_mode: ModeName::Negative
            })
        ));
    }

    #[test]
    fn test_button_defaults_to_low() {
        let yaml = r#"
schema_version: "1.0"
inputs:
  serial: "p"
limits:
  max_iterations: 10
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.inputs.button, PinLevel::Low);
    }

    #[test]
    fn test_invalid_version() {
        let yaml = r#"
schema_version: "2.0"
inputs:
  serial: ""
limits:
  max_iterations: 10
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("Unsupported schema_version"));
    }

    #[test]
    fn test_invalid_max_iterations() {
        let yaml = r#"
schema_version: "1.0"
inputs:
  serial: ""
limits:
  max_iterations: 0
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("max_iterations"));
    }

    #[test]
    fn test_event_outside_budget() {
        let yaml = r#"
schema_version: "1.0"
inputs:
  serial: ""
limits:
  max_iterations: 10
events:
  - at_iteration: 10
    button: high
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("iteration budget"));
    }

    #[test]
    fn test_non_ascii_serial_rejected() {
        let scenario = Scenario::ad_hoc("pß".to_string(), PinLevel::Low, 10);
        assert!(scenario.is_err());
    }

    #[test]
    fn test_pin_level_from_str() {
        assert_eq!("high".parse::<PinLevel>(), Ok(PinLevel::High));
        assert_eq!("LOW".parse::<PinLevel>(), Ok(PinLevel::Low));
        assert!("pressed".parse::<PinLevel>().is_err());
    }
}
