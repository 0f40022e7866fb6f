pub mod board;
pub mod peripherals;
pub mod runner;


pub use board::Board;
pub use runner::{check_assertions, execute, ScenarioError, ScenarioOutcome, ScenarioRun};
