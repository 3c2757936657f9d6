use super::message::PeerId;

/// Which peers this node listens to. `follows[p]` is true iff candidates
/// sent by `p` are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustFilter {
    follows: Vec<bool>,
}

impl TrustFilter {
    pub fn new(follows: Vec<bool>) -> Self {
        TrustFilter { follows }
    }

    /// Out-of-range senders are rejected.
    pub fn accepts(&self, sender: PeerId) -> bool {
        self.follows.get(sender).copied().unwrap_or(false)
    }

    pub fn followees(&self) -> impl Iterator<Item = PeerId> + '_ {
        self.follows
            .iter()
            .enumerate()
            .filter_map(|(peer, follows)| follows.then_some(peer))
    }

    pub fn followee_count(&self) -> usize {
        self.follows.iter().filter(|follows| **follows).count()
    }

    pub fn len(&self) -> usize {
        self.follows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.follows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts() {
        let filter = TrustFilter::new(vec![true, false, true, false]);

        assert!(filter.accepts(0));
        assert!(!filter.accepts(1));
        assert!(filter.accepts(2));
        assert!(!filter.accepts(3));
        assert_eq!(filter.followee_count(), 2);
        assert_eq!(filter.followees().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_out_of_range_sender_rejected() {
        let filter = TrustFilter::new(vec![true; 3]);

        assert!(!filter.accepts(3));
        assert!(!filter.accepts(usize::MAX));
    }
}
