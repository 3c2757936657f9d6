use thiserror::Error;

use crate::consensus::message::PeerId;

/// Usage-order violations of the node contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("followees have not been set")]
    FolloweesNotSet,

    #[error("followees can only be set once")]
    FolloweesAlreadySet,

    #[error("pending transactions have not been set")]
    NotSeeded,

    #[error("pending transactions can only be set once")]
    AlreadySeeded,

    #[error("terminal broadcast already taken after {num_rounds} rounds")]
    SimulationFinished { num_rounds: u64 },

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("simulation needs at least one node")]
    NoNodes,

    #[error("node {0} stopped before the simulation finished")]
    NodeStopped(PeerId),

    #[error("node {peer}: {source}")]
    Node {
        peer: PeerId,
        #[source]
        source: NodeError,
    },
}
