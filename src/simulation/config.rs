use crate::{
    common::error::SimulationError,
    consensus::processor::{NodeConfig, Strategy},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub num_nodes: usize,
    /// Probability of each directed follow edge.
    pub graph_edge_prob: f64,
    /// Probability that a node is malicious.
    pub malicious_prob: f64,
    /// Probability that a node starts out knowing a given transaction.
    pub tx_distribution_prob: f64,
    pub num_rounds: u64,
    pub num_txs: usize,
    pub seed: u64,
    pub strategy: Strategy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_nodes: 100,
            graph_edge_prob: 0.1,
            malicious_prob: 0.15,
            tx_distribution_prob: 0.01,
            num_rounds: 10,
            num_txs: 500,
            seed: 0,
            strategy: Strategy::GossipNew,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.num_nodes == 0 {
            return Err(SimulationError::NoNodes);
        }
        for (name, value) in [
            ("graph_edge_prob", self.graph_edge_prob),
            ("malicious_prob", self.malicious_prob),
            ("tx_distribution_prob", self.tx_distribution_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimulationError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }

    /// What each node is constructed with.
    pub fn node_config(&self) -> NodeConfig {
        NodeConfig::new(
            self.graph_edge_prob,
            self.malicious_prob,
            self.tx_distribution_prob,
            self.num_rounds,
        )
    }
}
