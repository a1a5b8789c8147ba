// Block production demo: several threads feed one memory pool, a single
// producer drains it into signed blocks and appends them to the ledger.
use clap::Parser;
use ledger_core::{
    current_timestamp, Block, Blockchain, Config, Header, LedgerError, MemoryPool, Opt,
    PrivateKey, Transaction,
};
use log::{error, info, warn};
use rand::RngCore;
use std::process;
use std::thread;

const PAYLOAD_LEN: usize = 32;

fn main() {
    let opt = Opt::parse();

    let (config, env_error) = match &opt.config {
        Some(path) => match Config::load(path) {
            Ok(config) => (config, None),
            Err(e) => {
                eprintln!("Failed to load config {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => match Config::from_env() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
    };

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    if let Some(e) = env_error {
        warn!("Ignoring invalid environment configuration: {e}");
    }

    if let Err(e) = run(&opt, &config) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run(opt: &Opt, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let validator = PrivateKey::generate()?;
    info!("Signing validator {}", validator.public_key().address());

    let mut genesis = Block::generate_genesis_block(config.block_version, vec![])?;
    genesis.sign(&validator);
    let chain = Blockchain::new(genesis)?;
    let pool = MemoryPool::from_config(config);

    let per_producer = opt.txs_per_block;
    for _ in 0..opt.blocks {
        let pool_ref = &pool;
        let results: Vec<ledger_core::Result<()>> = thread::scope(|s| {
            let handles: Vec<_> = (0..opt.producers)
                .map(|_| s.spawn(move || submit_random_transactions(pool_ref, per_producer)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(LedgerError::ThreadPanicked("producer".to_string()))
                    })
                })
                .collect()
        });
        for result in results {
            result?;
        }

        let transactions: Vec<Transaction> = pool
            .drain_pending()
            .iter()
            .map(|tx| tx.as_ref().clone())
            .collect();

        let tip = chain.tip();
        let header = Header::new(
            config.block_version,
            tip.hash(),
            tip.height + 1,
            current_timestamp()?,
        );
        let mut block = Block::new_block(header, transactions);
        block.sign(&validator);

        let event = chain.add_block(&block)?;
        println!("{}", serde_json::to_string(&event)?);
    }

    info!(
        "Finished at height {} with tip {} ({} transactions seen)",
        chain.height(),
        chain.tip_hash(),
        pool.all_count()
    );
    Ok(())
}

fn submit_random_transactions(pool: &MemoryPool, count: usize) -> ledger_core::Result<()> {
    let sender = PrivateKey::generate()?;
    let receiver = PrivateKey::generate()?.public_key();
    let mut rng = rand::thread_rng();

    for _ in 0..count {
        let mut payload = vec![0u8; PAYLOAD_LEN];
        rng.fill_bytes(&mut payload);
        pool.add(Transaction::new_signed(&sender, receiver, payload));
    }

    Ok(())
}
