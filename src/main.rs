// src/main.rs

use std::path::Path;

use duelist::{cli, config, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("duelist error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    let cfg = {
        let _bootstrap = logging::init_bootstrap_logging(args.log_level)?;
        config::load_or_default(args.config.as_deref().map(Path::new))?
    };
    let _log_guard = logging::init_logging(args.log_level, &cfg.logging)?;
    run(cfg).await
}
