pub mod graph;
pub mod node;

pub use graph::*;
pub use node::*;

use std::collections::HashSet;

use crate::consensus::message::{Candidate, Transaction};

/*
    Delivery is point-to-point along the trust graph. Whatever a node
    proposes in a round reaches each of its followers as candidates tagged
    with the proposer's index. Nodes never touch each other's state; every
    follower gets its own copy.
*/

/// `proposals[s]` is what node `s` broadcast this round. Returns, for each
/// node `f`, the candidates it collected from the nodes it follows.
pub fn deliver(graph: &TrustGraph, proposals: &[HashSet<Transaction>]) -> Vec<HashSet<Candidate>> {
    (0..graph.len())
        .map(|follower| {
            proposals
                .iter()
                .enumerate()
                .filter(|(sender, _)| graph.follows(follower, *sender))
                .flat_map(|(sender, txs)| txs.iter().map(move |tx| Candidate::new(*tx, sender)))
                .collect()
        })
        .collect()
}
