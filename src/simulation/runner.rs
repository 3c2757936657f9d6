use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::{
    common::error::SimulationError,
    consensus::{
        malicious::{MaliciousKind, MaliciousNode},
        message::{PeerId, Transaction},
        processor::{CompliantNode, Node},
    },
    network::{deliver, NodeHandle, TrustGraph},
};
use super::{
    config::SimulationConfig,
    report::{NodeOutcome, SimulationReport},
};

pub struct Simulation {
    config: SimulationConfig,
    graph: TrustGraph,
    handles: Vec<NodeHandle>,
    malicious: Vec<PeerId>,
    transactions_broadcast: usize,
}

impl Simulation {
    /// Builds the graph, spawns every node, installs followees and seeds
    /// pending transactions. All randomness comes from `config.seed`, so the
    /// same seed yields the same environment whatever the strategy.
    pub async fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let node_config = config.node_config();

        let graph = TrustGraph::random(config.num_nodes, config.graph_edge_prob, &mut rng);

        let mut malicious = Vec::new();
        let mut handles = Vec::with_capacity(config.num_nodes);
        for peer in 0..config.num_nodes {
            let node: Box<dyn Node> = if rng.gen_bool(config.malicious_prob) {
                let kind = MaliciousKind::choose(&mut rng);
                debug!(peer, ?kind, "Malicious node");
                malicious.push(peer);
                Box::new(MaliciousNode::new(kind, node_config, rng.gen()))
            } else {
                Box::new(CompliantNode::new(node_config, config.strategy))
            };
            handles.push(NodeHandle::spawn(peer, node));
        }

        for handle in &handles {
            handle.set_followees(graph.followees_of(handle.id)).await?;
        }

        let transactions: Vec<Transaction> = (0..config.num_txs).map(|_| Transaction::from_id(rng.gen())).collect();
        for handle in &handles {
            let pending: HashSet<Transaction> = transactions
                .iter()
                .filter(|_| rng.gen_bool(config.tx_distribution_prob))
                .copied()
                .collect();
            handle.set_pending_transactions(pending).await?;
        }

        info!(
            nodes = config.num_nodes,
            edges = graph.edge_count(),
            malicious = malicious.len(),
            transactions = transactions.len(),
            strategy = %config.strategy,
            "Simulation created"
        );

        Ok(Simulation {
            config,
            graph,
            handles,
            malicious,
            transactions_broadcast: 0,
        })
    }

    pub fn graph(&self) -> &TrustGraph {
        &self.graph
    }

    pub fn malicious(&self) -> &[PeerId] {
        &self.malicious
    }

    /// One broadcast + receive cycle across all nodes. Every node's
    /// broadcast completes before any node receives.
    pub async fn step(&mut self, round: u64) -> Result<(), SimulationError> {
        let proposals = self.broadcast_all().await?;
        let volume: usize = proposals.iter().map(HashSet::len).sum();
        self.transactions_broadcast += volume;

        let inboxes = deliver(&self.graph, &proposals);
        let mut pending = Vec::with_capacity(self.handles.len());
        for (handle, candidates) in self.handles.iter().zip(inboxes) {
            pending.push(handle.begin_receive(candidates).await?);
        }
        for reply in pending {
            reply.wait().await?;
        }

        debug!(round, volume, "Round complete");
        Ok(())
    }

    async fn broadcast_all(&self) -> Result<Vec<HashSet<Transaction>>, SimulationError> {
        let mut pending = Vec::with_capacity(self.handles.len());
        for handle in &self.handles {
            pending.push(handle.begin_broadcast().await?);
        }
        let mut proposals = Vec::with_capacity(pending.len());
        for reply in pending {
            proposals.push(reply.wait().await?);
        }
        Ok(proposals)
    }

    /// Runs every round, takes the terminal broadcast and stops the nodes.
    pub async fn run(mut self) -> Result<SimulationReport, SimulationError> {
        for round in 1..=self.config.num_rounds {
            self.step(round).await?;
        }

        let verdicts = self.broadcast_all().await?;
        let outcomes = verdicts
            .into_iter()
            .enumerate()
            .filter(|(peer, _)| !self.malicious.contains(peer))
            .map(|(peer, verdict)| NodeOutcome { peer, verdict })
            .collect();

        let report = SimulationReport {
            strategy: self.config.strategy,
            num_rounds: self.config.num_rounds,
            num_nodes: self.config.num_nodes,
            malicious: self.malicious,
            outcomes,
            transactions_broadcast: self.transactions_broadcast,
        };
        info!(
            agreement = report.largest_agreement(),
            compliant = report.outcomes.len(),
            broadcast = report.transactions_broadcast,
            "Simulation finished"
        );

        for handle in self.handles {
            handle.shutdown().await;
        }
        Ok(report)
    }
}
