use clap::Parser;
use iei_registry::app::outcome::{resolve, Job};
use iei_registry::{CliConfig, EnrichPipeline, EtlEngine};

#[derive(Parser)]
#[command(name = "process_genes")]
#[command(about = "Merge ranked predictions and reference gene lists into the registry")]
struct Args {
    #[command(flatten)]
    common: CliConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    args.common.init_logging();
    tracing::info!("Starting registry enrichment");

    let config = match args.common.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let pipeline = EnrichPipeline::new(args.common.storage(), config);
    let engine = EtlEngine::new(pipeline);

    let outcome = resolve(Job::Enrich, engine.run().await);
    let code = outcome.emit();
    if code > 0 {
        std::process::exit(code);
    }
}
