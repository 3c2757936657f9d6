use std::collections::HashSet;

use super::message::Transaction;

/// Every transaction this node has ever admitted. Only grows.
#[derive(Debug, Default)]
pub struct KnowledgeStore {
    transactions: HashSet<Transaction>,
}

impl KnowledgeStore {
    pub fn new() -> Self {
        KnowledgeStore {
            transactions: HashSet::new(),
        }
    }

    pub fn seed(&mut self, initial: &HashSet<Transaction>) {
        self.transactions.extend(initial.iter().copied());
    }

    /// Returns true if `tx` was not known before.
    pub fn admit(&mut self, tx: Transaction) -> bool {
        self.transactions.insert(tx)
    }

    pub fn snapshot(&self) -> HashSet<Transaction> {
        self.transactions.clone()
    }

    pub fn contains(&self, tx: &Transaction) -> bool {
        self.transactions.contains(tx)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Transactions admitted since the last flush.
#[derive(Debug, Default)]
pub struct PendingDelta {
    transactions: HashSet<Transaction>,
}

impl PendingDelta {
    pub fn new() -> Self {
        PendingDelta {
            transactions: HashSet::new(),
        }
    }

    pub fn extend(&mut self, txs: &HashSet<Transaction>) {
        self.transactions.extend(txs.iter().copied());
    }

    pub fn insert(&mut self, tx: Transaction) {
        self.transactions.insert(tx);
    }

    /// Hands out the buffered transactions and leaves the buffer empty.
    pub fn flush(&mut self) -> HashSet<Transaction> {
        std::mem::take(&mut self.transactions)
    }

    pub fn contains(&self, tx: &Transaction) -> bool {
        self.transactions.contains(tx)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
