use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "ledger-core",
    about = "Produce signed blocks from a shared memory pool and append them to an in-memory ledger"
)]
pub struct Opt {
    #[arg(long, default_value_t = 5, help = "Number of blocks to produce after genesis")]
    pub blocks: u32,

    #[arg(long = "txs-per-block", default_value_t = 4, help = "Transactions each producer submits per block")]
    pub txs_per_block: usize,

    #[arg(long, default_value_t = 2, help = "Number of threads submitting transactions")]
    pub producers: usize,

    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,
}
