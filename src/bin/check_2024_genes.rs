use clap::Parser;
use iei_registry::{CliConfig, EtlEngine, ReportPipeline};

#[derive(Parser)]
#[command(name = "check_2024_genes")]
#[command(about = "List top-ranked genes that are in the 2024 IUIS list")]
struct Args {
    #[command(flatten)]
    common: CliConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.common.init_logging();

    let config = args.common.load()?;
    let engine = EtlEngine::new(ReportPipeline::new(args.common.storage(), config));

    let table = engine.run().await?;
    print!("{}", table);
    Ok(())
}
