use crate::board::Board;
use polarled_config::{LedLevel, ModeName, Scenario, ScenarioAssertion};
use polarled_hal::app::{self, SystemMode};
use polarled_hal::{gpio, uart};

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("assertion {index} failed: expected {expected}, got {actual}")]
    AssertionFailed {
        index: usize,
        expected: String,
        actual: String,
    },
}

/// Observable result of a scenario run.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub iterations_run: u64,
    pub final_mode: SystemMode,
    pub led_on: bool,
    pub tx_bytes: Vec<u8>,
}

/// A completed run: the board (for snapshots) plus the outcome.
#[derive(Debug)]
pub struct ScenarioRun {
    pub board: Board,
    pub outcome: ScenarioOutcome,
}

fn mode_of(name: ModeName) -> SystemMode {
    match name {
        ModeName::Positive => SystemMode::Positive,
        ModeName::Negative => SystemMode::Negative,
    }
}

/// Run the firmware's bring-up and polling loop against a fresh board for
/// the scenario's iteration budget. Serial bytes are preloaded; button
/// events apply before their iteration runs.
pub fn execute(scenario: &Scenario) -> ScenarioRun {
    let mut board = Board::new();
    board.push_serial(scenario.inputs.serial.as_bytes());
    board.set_button(scenario.inputs.button.is_high());

    uart::init(&mut board);
    gpio::init(&mut board);

    let mut mode = SystemMode::default();
    for iteration in 0..scenario.limits.max_iterations {
        for event in &scenario.events {
            if event.at_iteration == iteration {
                tracing::debug!("iteration {}: button -> {:?}", iteration, event.button);
                board.set_button(event.button.is_high());
            }
        }

        let before = mode;
        app::poll_once(&mut board, &mut mode);
        if mode != before {
            tracing::info!("iteration {}: mode {:?} -> {:?}", iteration, before, mode);
        }
    }

    let outcome = ScenarioOutcome {
        iterations_run: scenario.limits.max_iterations,
        final_mode: mode,
        led_on: board.led_is_on(),
        tx_bytes: board.tx_output().to_vec(),
    };

    ScenarioRun { board, outcome }
}

/// Check every scenario assertion against the outcome; the first failure
/// is returned as an error.
pub fn check_assertions(
    scenario: &Scenario,
    outcome: &ScenarioOutcome,
) -> Result<(), ScenarioError> {
    for (index, assertion) in scenario.assertions.iter().enumerate() {
        match assertion {
            ScenarioAssertion::FinalMode(expected) => {
                let want = mode_of(expected.final_mode);
                if outcome.final_mode != want {
                    return Err(ScenarioError::AssertionFailed {
                        index,
                        expected: format!("final mode {:?}", want),
                        actual: format!("final mode {:?}", outcome.final_mode),
                    });
                }
            }
            ScenarioAssertion::Led(expected) => {
                let want_on = expected.led == LedLevel::On;
                if outcome.led_on != want_on {
                    return Err(ScenarioError::AssertionFailed {
                        index,
                        expected: format!("led {}", if want_on { "on" } else { "off" }),
                        actual: format!("led {}", if outcome.led_on { "on" } else { "off" }),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polarled_config::{
        ButtonEvent, FinalModeAssertion, LedAssertion, PinLevel, ScenarioInputs, ScenarioLimits,
    };

    fn scenario(serial: &str, button: PinLevel, max_iterations: u64) -> Scenario {
        Scenario {
            schema_version: "1.0".to_string(),
            inputs: ScenarioInputs {
                serial: serial.to_string(),
                button,
            },
            limits: ScenarioLimits { max_iterations },
            events: Vec::new(),
            assertions: Vec::new(),
        }
    }

    #[test]
    fn test_execute_reaches_negative_mode() {
        let run = execute(&scenario("n", PinLevel::Low, 10));
        assert_eq!(run.outcome.final_mode, SystemMode::Negative);
        assert!(run.outcome.led_on); // Negative + button low = LED on
        assert_eq!(run.outcome.iterations_run, 10);
    }

    #[test]
    fn test_button_event_applies_mid_run() {
        let mut s = scenario("", PinLevel::Low, 10);
        s.events.push(ButtonEvent {
            at_iteration: 5,
            button: PinLevel::High,
        });
        let run = execute(&s);
        // Positive mode tracks the button, which ended high.
        assert_eq!(run.outcome.final_mode, SystemMode::Positive);
        assert!(run.outcome.led_on);
    }

    #[test]
    fn test_check_assertions_pass_and_fail() {
        let mut s = scenario("n", PinLevel::High, 10);
        s.assertions.push(ScenarioAssertion::FinalMode(
            FinalModeAssertion {
                final_mode: ModeName::Negative,
            },
        ));
        s.assertions.push(ScenarioAssertion::Led(LedAssertion {
            led: LedLevel::Off,
        }));

        let run = execute(&s);
        assert!(check_assertions(&s, &run.outcome).is_ok());

        s.assertions[0] = ScenarioAssertion::FinalMode(FinalModeAssertion {
            final_mode: ModeName::Positive,
        });
        let err = check_assertions(&s, &run.outcome).unwrap_err();
        assert!(err.to_string().contains("assertion 0 failed"));
    }

    #[test]
    fn test_firmware_transmits_nothing() {
        let run = execute(&scenario("pnp", PinLevel::High, 20));
        assert!(run.outcome.tx_bytes.is_empty());
    }
}
