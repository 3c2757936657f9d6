use std::collections::HashSet;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::trace;

use crate::common::error::NodeError;
use super::{
    message::{Candidate, Transaction},
    processor::{Node, NodeConfig},
};

/*
    Faulty participants. They sit in the same trust graph as compliant
    nodes and answer the same calls, but they ignore the trust filter and
    broadcast whatever their behaviour dictates. A compliant node's only
    protection is not following them.
*/

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MaliciousKind {
    /// Never broadcasts anything.
    Silent,
    /// Echoes everything it heard plus one invented transaction per round.
    Flooding,
    /// Echoes everything it heard on even rounds, nothing on odd rounds.
    Flapping,
}

impl MaliciousKind {
    pub const ALL: [MaliciousKind; 3] = [MaliciousKind::Silent, MaliciousKind::Flooding, MaliciousKind::Flapping];

    pub fn choose(rng: &mut impl Rng) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&MaliciousKind::Silent)
    }
}

pub struct MaliciousNode {
    kind: MaliciousKind,
    config: NodeConfig,
    rng: StdRng,
    heard: HashSet<Transaction>,
    round: u64,
}

impl MaliciousNode {
    pub fn new(kind: MaliciousKind, config: NodeConfig, seed: u64) -> Self {
        MaliciousNode {
            kind,
            config,
            rng: StdRng::seed_from_u64(seed),
            heard: HashSet::new(),
            round: 0,
        }
    }

    pub fn kind(&self) -> MaliciousKind {
        self.kind
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
}

impl Node for MaliciousNode {
    fn set_followees(&mut self, _follows: Vec<bool>) -> Result<(), NodeError> {
        Ok(())
    }

    fn set_pending_transactions(&mut self, pending: HashSet<Transaction>) -> Result<(), NodeError> {
        self.heard.extend(pending);
        Ok(())
    }

    fn propose_broadcast(&mut self) -> Result<HashSet<Transaction>, NodeError> {
        self.round += 1;
        let proposal = match self.kind {
            MaliciousKind::Silent => HashSet::new(),
            MaliciousKind::Flooding => {
                let mut proposal = self.heard.clone();
                proposal.insert(Transaction::from_id(self.rng.gen()));
                proposal
            }
            MaliciousKind::Flapping if self.round % 2 == 0 => self.heard.clone(),
            MaliciousKind::Flapping => HashSet::new(),
        };
        trace!(kind = ?self.kind, round = self.round, proposed = proposal.len(), "Malicious broadcast");
        Ok(proposal)
    }

    fn receive_from_followees(&mut self, candidates: HashSet<Candidate>) -> Result<(), NodeError> {
        self.heard.extend(candidates.into_iter().map(|candidate| candidate.tx));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NodeConfig {
        NodeConfig::new(0.1, 0.3, 0.01, 4)
    }

    #[test]
    fn test_silent_never_broadcasts() {
        let mut node = MaliciousNode::new(MaliciousKind::Silent, config(), 1);
        node.set_pending_transactions([Transaction::from_id(1)].into_iter().collect()).unwrap();

        for _ in 0..5 {
            assert!(node.propose_broadcast().unwrap().is_empty());
        }
    }

    #[test]
    fn test_flooding_invents_transactions() {
        let mut node = MaliciousNode::new(MaliciousKind::Flooding, config(), 1);
        let seed: HashSet<Transaction> = [Transaction::from_id(1)].into_iter().collect();
        node.set_pending_transactions(seed.clone()).unwrap();

        let proposal = node.propose_broadcast().unwrap();

        assert_eq!(proposal.len(), 2);
        assert!(proposal.is_superset(&seed));
    }

    #[test]
    fn test_flooding_is_deterministic_per_seed() {
        let mut a = MaliciousNode::new(MaliciousKind::Flooding, config(), 7);
        let mut b = MaliciousNode::new(MaliciousKind::Flooding, config(), 7);

        assert_eq!(a.propose_broadcast().unwrap(), b.propose_broadcast().unwrap());
    }

    #[test]
    fn test_flapping_alternates() {
        let mut node = MaliciousNode::new(MaliciousKind::Flapping, config(), 1);
        node.receive_from_followees([Candidate::new(Transaction::from_id(3), 9)].into_iter().collect())
            .unwrap();

        assert!(node.propose_broadcast().unwrap().is_empty());
        assert_eq!(node.propose_broadcast().unwrap().len(), 1);
        assert!(node.propose_broadcast().unwrap().is_empty());
    }
}
