use clap::Parser;
use tracing_subscriber::EnvFilter;

use trust_gossip::{consensus::Strategy, simulation::{Simulation, SimulationConfig}};

#[derive(Parser, Debug)]
#[command(name = "trust-gossip")]
#[command(about = "Simulate round-based gossip over a random trust graph")]
struct Args {
    /// Number of participants
    #[arg(short, long, default_value = "100")]
    nodes: usize,

    /// Probability of each follow edge
    #[arg(long, default_value = "0.1")]
    graph_edge_prob: f64,

    /// Probability that a participant is malicious
    #[arg(long, default_value = "0.15")]
    malicious_prob: f64,

    /// Probability that a participant starts out with a given transaction
    #[arg(long, default_value = "0.01")]
    tx_distribution_prob: f64,

    /// Number of gossip rounds before the verdict
    #[arg(short, long, default_value = "10")]
    rounds: u64,

    /// Number of distinct transactions in play
    #[arg(long, default_value = "500")]
    txs: usize,

    /// Seed for graph, malicious nodes and transaction placement
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// never-forget or gossip-new
    #[arg(long, default_value = "gossip-new")]
    strategy: Strategy,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let config = SimulationConfig {
        num_nodes: args.nodes,
        graph_edge_prob: args.graph_edge_prob,
        malicious_prob: args.malicious_prob,
        tx_distribution_prob: args.tx_distribution_prob,
        num_rounds: args.rounds,
        num_txs: args.txs,
        seed: args.seed,
        strategy: args.strategy,
    };

    let report = Simulation::new(config).await?.run().await?;
    print!("{report}");
    Ok(())
}
