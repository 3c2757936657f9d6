use rand::Rng;

use crate::consensus::message::PeerId;

/// Directed trust graph: `follows(a, b)` means `a` accepts candidates sent
/// by `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustGraph {
    follows: Vec<Vec<bool>>,
}

impl TrustGraph {
    /// Every edge `a -> b` with `a != b` is present with probability
    /// `edge_prob`.
    pub fn random(num_nodes: usize, edge_prob: f64, rng: &mut impl Rng) -> Self {
        let follows = (0..num_nodes)
            .map(|a| {
                (0..num_nodes)
                    .map(|b| a != b && rng.gen_bool(edge_prob))
                    .collect()
            })
            .collect();
        TrustGraph { follows }
    }

    pub fn from_rows(follows: Vec<Vec<bool>>) -> Self {
        TrustGraph { follows }
    }

    pub fn len(&self) -> usize {
        self.follows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.follows.is_empty()
    }

    pub fn follows(&self, follower: PeerId, followee: PeerId) -> bool {
        self.follows
            .get(follower)
            .and_then(|row| row.get(followee))
            .copied()
            .unwrap_or(false)
    }

    /// Row handed to `follower` through `set_followees`.
    pub fn followees_of(&self, follower: PeerId) -> Vec<bool> {
        self.follows.get(follower).cloned().unwrap_or_default()
    }

    pub fn edge_count(&self) -> usize {
        self.follows.iter().flatten().filter(|edge| **edge).count()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_random_graph_has_no_self_edges() {
        let mut rng = StdRng::seed_from_u64(3);
        let graph = TrustGraph::random(20, 1.0, &mut rng);

        for node in 0..20 {
            assert!(!graph.follows(node, node));
        }
        assert_eq!(graph.edge_count(), 20 * 19);
    }

    #[test]
    fn test_random_graph_is_seeded() {
        let a = TrustGraph::random(30, 0.2, &mut StdRng::seed_from_u64(11));
        let b = TrustGraph::random(30, 0.2, &mut StdRng::seed_from_u64(11));

        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_lookup() {
        let graph = TrustGraph::from_rows(vec![vec![false, true], vec![false, false]]);

        assert!(graph.follows(0, 1));
        assert!(!graph.follows(0, 5));
        assert!(graph.followees_of(7).is_empty());
    }
}
