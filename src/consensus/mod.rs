pub mod filter;
pub mod malicious;
pub mod message;
pub mod peers;
pub mod processor;
pub mod store;

pub use filter::*;
pub use malicious::*;
pub use message::*;
pub use peers::*;
pub use processor::*;
pub use store::*;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn candidates_from(sender: PeerId, txs: &HashSet<Transaction>) -> HashSet<Candidate> {
        txs.iter().map(|tx| Candidate::new(*tx, sender)).collect()
    }

    #[test]
    fn test_end_to_end() {
        // Arrange: chain 0 <- 1 <- 2, node 1 follows 0 and node 2 follows 1
        let num_rounds = 2;
        let config = NodeConfig::new(0.1, 0.0, 0.01, num_rounds);
        let follows = [vec![false, false, false], vec![true, false, false], vec![false, true, false]];
        let seeds = [
            HashSet::from([Transaction::from_id(1)]),
            HashSet::from([Transaction::from_id(2)]),
            HashSet::new(),
        ];

        let mut nodes: Vec<CompliantNode> = (0..3)
            .map(|_| CompliantNode::new(config, Strategy::GossipNew))
            .collect();
        for (peer, node) in nodes.iter_mut().enumerate() {
            node.set_followees(follows[peer].clone()).unwrap();
            node.set_pending_transactions(seeds[peer].clone()).unwrap();
        }

        // Act: two rounds of broadcast then receive
        for _ in 0..num_rounds {
            let proposals: Vec<HashSet<Transaction>> =
                nodes.iter_mut().map(|node| node.propose_broadcast().unwrap()).collect();
            for node in nodes.iter_mut() {
                let mut inbox = HashSet::new();
                for (sender, proposal) in proposals.iter().enumerate() {
                    inbox.extend(candidates_from(sender, proposal));
                }
                node.receive_from_followees(inbox).unwrap();
            }
        }

        // Assert: node 0's seed travelled two hops, nothing flowed backwards
        let verdicts: Vec<HashSet<Transaction>> =
            nodes.iter_mut().map(|node| node.propose_broadcast().unwrap()).collect();
        assert_eq!(verdicts[0], HashSet::from([Transaction::from_id(1)]));
        assert_eq!(verdicts[1], HashSet::from([Transaction::from_id(1), Transaction::from_id(2)]));
        assert_eq!(verdicts[2], HashSet::from([Transaction::from_id(1), Transaction::from_id(2)]));
    }
}
