use std::collections::HashSet;

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::{
    common::error::{NodeError, SimulationError},
    consensus::{
        message::{Candidate, PeerId, Transaction},
        processor::Node,
    },
};

const COMMAND_BUFFER: usize = 8;

type Reply<T> = oneshot::Sender<Result<T, NodeError>>;

pub enum Command {
    SetFollowees(Vec<bool>, Reply<()>),
    SetPendingTransactions(HashSet<Transaction>, Reply<()>),
    ProposeBroadcast(Reply<HashSet<Transaction>>),
    ReceiveFromFollowees(HashSet<Candidate>, Reply<()>),
}

/// A node running in its own task. The harness talks to it only through
/// commands; the node's state never leaves the task.
pub struct NodeHandle {
    pub id: PeerId,
    cmd_tx: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

/// Reply to a command that has been sent but not yet awaited.
pub struct Pending<T> {
    peer: PeerId,
    rx: oneshot::Receiver<Result<T, NodeError>>,
}

impl<T> Pending<T> {
    pub async fn wait(self) -> Result<T, SimulationError> {
        let peer = self.peer;
        self.rx
            .await
            .map_err(|_| SimulationError::NodeStopped(peer))?
            .map_err(|source| SimulationError::Node { peer, source })
    }
}

impl NodeHandle {
    pub fn spawn(id: PeerId, node: Box<dyn Node>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(NodeTask { id, node, cmd_rx }.run());
        NodeHandle { id, cmd_tx, task }
    }

    async fn send<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Result<Pending<T>, SimulationError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| SimulationError::NodeStopped(self.id))?;
        Ok(Pending { peer: self.id, rx })
    }

    pub async fn set_followees(&self, follows: Vec<bool>) -> Result<(), SimulationError> {
        self.send(|reply| Command::SetFollowees(follows, reply)).await?.wait().await
    }

    pub async fn set_pending_transactions(&self, pending: HashSet<Transaction>) -> Result<(), SimulationError> {
        self.send(|reply| Command::SetPendingTransactions(pending, reply)).await?.wait().await
    }

    /// Sends the broadcast request without waiting, so that every node of a
    /// round can work at once.
    pub async fn begin_broadcast(&self) -> Result<Pending<HashSet<Transaction>>, SimulationError> {
        self.send(Command::ProposeBroadcast).await
    }

    pub async fn begin_receive(&self, candidates: HashSet<Candidate>) -> Result<Pending<()>, SimulationError> {
        self.send(|reply| Command::ReceiveFromFollowees(candidates, reply)).await
    }

    pub async fn propose_broadcast(&self) -> Result<HashSet<Transaction>, SimulationError> {
        self.begin_broadcast().await?.wait().await
    }

    pub async fn receive_from_followees(&self, candidates: HashSet<Candidate>) -> Result<(), SimulationError> {
        self.begin_receive(candidates).await?.wait().await
    }

    pub async fn shutdown(self) {
        drop(self.cmd_tx);
        if let Err(err) = self.task.await {
            warn!(peer = self.id, %err, "Node task ended abnormally");
        }
    }
}

struct NodeTask {
    id: PeerId,
    node: Box<dyn Node>,
    cmd_rx: mpsc::Receiver<Command>,
}

impl NodeTask {
    async fn run(mut self) {
        debug!(peer = self.id, "Node task started");
        while let Some(command) = self.cmd_rx.recv().await {
            // A dropped reply receiver means the harness gave up on this call.
            match command {
                Command::SetFollowees(follows, reply) => {
                    let _ = reply.send(self.node.set_followees(follows));
                }
                Command::SetPendingTransactions(pending, reply) => {
                    let _ = reply.send(self.node.set_pending_transactions(pending));
                }
                Command::ProposeBroadcast(reply) => {
                    let _ = reply.send(self.node.propose_broadcast());
                }
                Command::ReceiveFromFollowees(candidates, reply) => {
                    let _ = reply.send(self.node.receive_from_followees(candidates));
                }
            }
        }
        debug!(peer = self.id, "Node task stopped");
    }
}
