use std::collections::HashSet;

use tracing::trace;

use super::{
    message::Candidate,
    peers::TrustFilter,
    store::{KnowledgeStore, PendingDelta},
};

/// What happened to one batch of candidates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub admitted: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

/// Admits candidates from trusted senders into the store. Novel admissions
/// are also queued in `delta` when one is given.
pub struct ReceiveFilter<'a> {
    trust: &'a TrustFilter,
    store: &'a mut KnowledgeStore,
    delta: Option<&'a mut PendingDelta>,
}

impl<'a> ReceiveFilter<'a> {
    pub fn new(
        trust: &'a TrustFilter,
        store: &'a mut KnowledgeStore,
        delta: Option<&'a mut PendingDelta>,
    ) -> Self {
        ReceiveFilter { trust, store, delta }
    }

    pub fn apply(mut self, candidates: &HashSet<Candidate>) -> Admission {
        let mut admission = Admission::default();
        for candidate in candidates {
            if !self.trust.accepts(candidate.sender) {
                trace!(sender = candidate.sender, tx = %candidate.tx, "Dropped candidate from untrusted sender");
                admission.rejected += 1;
                continue;
            }

            if self.store.admit(candidate.tx) {
                if let Some(delta) = self.delta.as_deref_mut() {
                    delta.insert(candidate.tx);
                }
                admission.admitted += 1;
            } else {
                admission.duplicates += 1;
            }
        }
        admission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::message::Transaction;

    fn candidates(pairs: &[(u64, usize)]) -> HashSet<Candidate> {
        pairs
            .iter()
            .map(|(id, sender)| Candidate::new(Transaction::from_id(*id), *sender))
            .collect()
    }

    #[test]
    fn test_untrusted_sender_never_admitted() {
        let trust = TrustFilter::new(vec![true, false, false, false]);
        let mut store = KnowledgeStore::new();
        let mut delta = PendingDelta::new();

        let admission = ReceiveFilter::new(&trust, &mut store, Some(&mut delta))
            .apply(&candidates(&[(5, 3), (6, 1)]));

        assert_eq!(admission.rejected, 2);
        assert!(store.is_empty());
        assert!(delta.is_empty());
    }

    #[test]
    fn test_duplicates_are_idempotent() {
        let trust = TrustFilter::new(vec![true, true]);
        let mut store = KnowledgeStore::new();
        let mut delta = PendingDelta::new();

        let admission = ReceiveFilter::new(&trust, &mut store, Some(&mut delta))
            .apply(&candidates(&[(1, 0), (1, 1)]));

        assert_eq!(admission.admitted, 1);
        assert_eq!(admission.duplicates, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(delta.len(), 1);

        // Later round, same transaction again
        let admission = ReceiveFilter::new(&trust, &mut store, Some(&mut delta))
            .apply(&candidates(&[(1, 1)]));

        assert_eq!(admission.admitted, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_known_transaction_not_queued_again() {
        let trust = TrustFilter::new(vec![true]);
        let mut store = KnowledgeStore::new();
        store.admit(Transaction::from_id(1));
        let mut delta = PendingDelta::new();

        ReceiveFilter::new(&trust, &mut store, Some(&mut delta)).apply(&candidates(&[(1, 0), (2, 0)]));

        assert!(!delta.contains(&Transaction::from_id(1)));
        assert!(delta.contains(&Transaction::from_id(2)));
    }

    #[test]
    fn test_without_delta_only_admits() {
        let trust = TrustFilter::new(vec![true]);
        let mut store = KnowledgeStore::new();

        let admission = ReceiveFilter::new(&trust, &mut store, None).apply(&candidates(&[(1, 0)]));

        assert_eq!(admission.admitted, 1);
        assert!(store.contains(&Transaction::from_id(1)));
    }
}
