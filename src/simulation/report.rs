use std::{collections::HashSet, fmt};

use crate::consensus::{
    message::{PeerId, Transaction},
    processor::Strategy,
};

#[derive(Debug, Clone)]
pub struct NodeOutcome {
    pub peer: PeerId,
    pub verdict: HashSet<Transaction>,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub strategy: Strategy,
    pub num_rounds: u64,
    pub num_nodes: usize,
    pub malicious: Vec<PeerId>,
    /// Final broadcast of every compliant node, ordered by peer.
    pub outcomes: Vec<NodeOutcome>,
    /// Sum of proposal sizes over all nodes and simulation rounds.
    pub transactions_broadcast: usize,
}

impl SimulationReport {
    /// True when every compliant node ended with the same set.
    pub fn consensus_reached(&self) -> bool {
        match self.outcomes.split_first() {
            Some((first, rest)) => rest.iter().all(|outcome| outcome.verdict == first.verdict),
            None => true,
        }
    }

    /// Size of the largest group of compliant nodes with identical verdicts.
    pub fn largest_agreement(&self) -> usize {
        let mut best = 0;
        for outcome in &self.outcomes {
            let agreeing = self
                .outcomes
                .iter()
                .filter(|other| other.verdict == outcome.verdict)
                .count();
            best = best.max(agreeing);
        }
        best
    }

    pub fn verdict_of(&self, peer: PeerId) -> Option<&HashSet<Transaction>> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.peer == peer)
            .map(|outcome| &outcome.verdict)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "strategy:               {}", self.strategy)?;
        writeln!(f, "rounds:                 {}", self.num_rounds)?;
        writeln!(f, "nodes:                  {} ({} malicious)", self.num_nodes, self.malicious.len())?;
        writeln!(f, "transactions broadcast: {}", self.transactions_broadcast)?;
        writeln!(
            f,
            "agreement:              {}/{} compliant nodes",
            self.largest_agreement(),
            self.outcomes.len()
        )?;
        for outcome in &self.outcomes {
            writeln!(f, "  node {:>4}: {} transactions", outcome.peer, outcome.verdict.len())?;
        }
        Ok(())
    }
}
