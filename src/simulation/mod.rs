//! Round-driven simulation of a trust graph with compliant and malicious
//! participants.
//!
//! Each round asks every node for its proposal, delivers the proposals along
//! the trust graph and hands every node its candidates. After the last round
//! one more broadcast is taken from every compliant node as its verdict.

pub mod config;
pub mod report;
pub mod runner;

pub use config::SimulationConfig;
pub use report::{NodeOutcome, SimulationReport};
pub use runner::Simulation;
