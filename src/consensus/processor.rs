use std::{collections::HashSet, fmt, str::FromStr};

use tracing::{debug, trace};

use crate::common::error::NodeError;
use super::{
    filter::{Admission, ReceiveFilter},
    message::{Candidate, Transaction},
    peers::TrustFilter,
    store::{KnowledgeStore, PendingDelta},
};

/*
    A node lives through numRounds rounds. Each round the harness asks every
    node what it proposes to its followers, distributes those proposals as
    candidates along the trust graph and hands every node the candidates it
    collected. After the last round the harness asks once more; that final
    proposal is the node's verdict and must contain everything it knows.

    The node cannot see round numbers, it only counts broadcast calls: calls
    1..=numRounds belong to the simulation, call numRounds + 1 is terminal.
*/

/// Environment the node is constructed in. Only `num_rounds` drives the
/// compliant strategies; the rest describes the graph other node variants
/// may react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeConfig {
    pub graph_edge_prob: f64,
    pub malicious_prob: f64,
    pub tx_distribution_prob: f64,
    pub num_rounds: u64,
}

impl NodeConfig {
    pub fn new(graph_edge_prob: f64, malicious_prob: f64, tx_distribution_prob: f64, num_rounds: u64) -> Self {
        NodeConfig {
            graph_edge_prob,
            malicious_prob,
            tx_distribution_prob,
            num_rounds,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strategy {
    /// Resend the whole knowledge store every round.
    NeverForget,
    /// Resend only what was admitted since the last broadcast, flush
    /// everything on the terminal call.
    GossipNew,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Simulation,
    Terminal,
}

impl Phase {
    /// Phase of the `round`-th broadcast call, counting from 1.
    pub fn for_round(round: u64, num_rounds: u64) -> Self {
        if round > num_rounds {
            Phase::Terminal
        } else {
            Phase::Simulation
        }
    }
}

/// The calls a harness makes on every participant, compliant or not.
pub trait Node: Send {
    fn set_followees(&mut self, follows: Vec<bool>) -> Result<(), NodeError>;

    fn set_pending_transactions(&mut self, pending: HashSet<Transaction>) -> Result<(), NodeError>;

    fn propose_broadcast(&mut self) -> Result<HashSet<Transaction>, NodeError>;

    fn receive_from_followees(&mut self, candidates: HashSet<Candidate>) -> Result<(), NodeError>;
}

enum Scheduler {
    NeverForget,
    GossipNew { delta: PendingDelta },
}

pub struct CompliantNode {
    config: NodeConfig,
    strategy: Strategy,
    trust: Option<TrustFilter>,
    seeded: bool,
    store: KnowledgeStore,
    scheduler: Scheduler,
    round: u64,
}

impl CompliantNode {
    pub fn new(config: NodeConfig, strategy: Strategy) -> Self {
        let scheduler = match strategy {
            Strategy::NeverForget => Scheduler::NeverForget,
            Strategy::GossipNew => Scheduler::GossipNew {
                delta: PendingDelta::new(),
            },
        };
        CompliantNode {
            config,
            strategy,
            trust: None,
            seeded: false,
            store: KnowledgeStore::new(),
            scheduler,
            round: 0,
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of broadcast calls made so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Buffered novelty, `None` for strategies without one.
    pub fn pending_delta(&self) -> Option<&PendingDelta> {
        match &self.scheduler {
            Scheduler::NeverForget => None,
            Scheduler::GossipNew { delta } => Some(delta),
        }
    }

    fn ensure_ready(&self) -> Result<(), NodeError> {
        if self.trust.is_none() {
            return Err(NodeError::FolloweesNotSet);
        }
        if !self.seeded {
            return Err(NodeError::NotSeeded);
        }
        if self.round > self.config.num_rounds {
            return Err(NodeError::SimulationFinished {
                num_rounds: self.config.num_rounds,
            });
        }
        Ok(())
    }
}

impl Node for CompliantNode {
    fn set_followees(&mut self, follows: Vec<bool>) -> Result<(), NodeError> {
        if self.trust.is_some() {
            return Err(NodeError::FolloweesAlreadySet);
        }
        let trust = TrustFilter::new(follows);
        debug!(followees = trust.followee_count(), peers = trust.len(), "Installed trust filter");
        self.trust = Some(trust);
        Ok(())
    }

    fn set_pending_transactions(&mut self, pending: HashSet<Transaction>) -> Result<(), NodeError> {
        if self.seeded {
            return Err(NodeError::AlreadySeeded);
        }
        self.store.seed(&pending);
        if let Scheduler::GossipNew { delta } = &mut self.scheduler {
            delta.extend(&pending);
        }
        self.seeded = true;
        debug!(seeded = pending.len(), "Seeded knowledge store");
        Ok(())
    }

    fn propose_broadcast(&mut self) -> Result<HashSet<Transaction>, NodeError> {
        self.ensure_ready()?;
        self.round += 1;
        let phase = Phase::for_round(self.round, self.config.num_rounds);

        let proposal = match &mut self.scheduler {
            Scheduler::GossipNew { delta } if phase == Phase::Simulation => delta.flush(),
            _ => self.store.snapshot(),
        };

        if phase == Phase::Terminal {
            debug!(round = self.round, known = proposal.len(), "Terminal broadcast");
        } else {
            trace!(round = self.round, proposed = proposal.len(), "Broadcast");
        }
        Ok(proposal)
    }

    fn receive_from_followees(&mut self, candidates: HashSet<Candidate>) -> Result<(), NodeError> {
        self.ensure_ready()?;
        let Some(trust) = self.trust.as_ref() else {
            return Err(NodeError::FolloweesNotSet);
        };
        let delta = match &mut self.scheduler {
            Scheduler::NeverForget => None,
            Scheduler::GossipNew { delta } => Some(delta),
        };

        let Admission { admitted, duplicates, rejected } =
            ReceiveFilter::new(trust, &mut self.store, delta).apply(&candidates);
        trace!(round = self.round, admitted, duplicates, rejected, known = self.store.len(), "Received candidates");
        Ok(())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::NeverForget => f.write_str("never-forget"),
            Strategy::GossipNew => f.write_str("gossip-new"),
        }
    }
}

impl FromStr for Strategy {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never-forget" => Ok(Strategy::NeverForget),
            "gossip-new" => Ok(Strategy::GossipNew),
            other => Err(NodeError::UnknownStrategy(other.to_string())),
        }
    }
}
