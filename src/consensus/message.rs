use std::fmt;

use crate::common::crypto::{digest_of, short_hex, Digest, Hashable};

/*
    Participants are numbered by their position in the trust graph. A
    transaction is only an identity; nodes never look inside it, they only
    compare it. A candidate is what a node collects from the peers it
    listens to: the transaction plus the peer that broadcast it this round.
*/

/// Index of a participant in the trust graph, in `[0, N)`.
pub type PeerId = usize;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transaction {
    id: Digest,
}

impl Transaction {
    pub fn from_payload(payload: &[u8]) -> Self {
        Transaction {
            id: digest_of([payload]),
        }
    }

    /// Identity derived from a numeric id handed out by the harness.
    pub fn from_id(id: u64) -> Self {
        Transaction::from_payload(&id.to_be_bytes())
    }

    pub fn id(&self) -> &Digest {
        &self.id
    }
}

impl Hashable for Transaction {
    fn hash(&self) -> Digest {
        self.id
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction({})", short_hex(&self.id))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&short_hex(&self.id))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Candidate {
    pub tx: Transaction,
    pub sender: PeerId,
}

impl Candidate {
    pub fn new(tx: Transaction, sender: PeerId) -> Self {
        Candidate { tx, sender }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_transaction_identity_by_value() {
        assert_eq!(Transaction::from_id(7), Transaction::from_id(7));
        assert_ne!(Transaction::from_id(7), Transaction::from_id(8));
        assert_eq!(Transaction::from_id(7).hash(), *Transaction::from_id(7).id());
    }

    #[test]
    fn test_candidates_deduplicate_on_sender_and_tx() {
        let tx = Transaction::from_id(1);
        let candidates: HashSet<Candidate> = [
            Candidate::new(tx, 0),
            Candidate::new(tx, 0),
            Candidate::new(tx, 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(candidates.len(), 2);
    }
}
