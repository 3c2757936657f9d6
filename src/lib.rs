/*
    Consensus from trust. Every participant follows a fixed set of peers in
    a random trust graph, some fraction of which are faulty. Nodes gossip
    transactions for a fixed number of rounds, admitting only what their
    followees send them. There is no voting; a faulty node can only reach a
    compliant one that chose to follow it. After the last round every
    compliant node reports everything it knows, and well-connected compliant
    nodes should report the same set.

    Two compliant strategies satisfy the same contract. NeverForget resends
    its whole knowledge every round. GossipNew resends only what it learned
    since its previous broadcast and flushes the full set on the terminal
    call, so per-round traffic no longer grows with the size of the set.
*/

pub mod common;
pub mod consensus;
pub mod network;
pub mod simulation;
