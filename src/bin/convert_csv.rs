use clap::Parser;
use iei_registry::app::outcome::{resolve, Job};
use iei_registry::{CliConfig, EtlEngine, ImportPipeline};

#[derive(Parser)]
#[command(name = "convert_csv")]
#[command(about = "Replace the registry with the ranks of the ranked prediction CSV")]
struct Args {
    #[command(flatten)]
    common: CliConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    args.common.init_logging();
    tracing::info!("Starting CSV import");

    let config = match args.common.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let pipeline = ImportPipeline::new(args.common.storage(), config);
    let engine = EtlEngine::new(pipeline);

    // 匯入失敗只回報，不改退出碼
    let outcome = resolve(Job::Import, engine.run().await);
    let code = outcome.emit();
    if code > 0 {
        std::process::exit(code);
    }
}
