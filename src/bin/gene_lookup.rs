use clap::Parser;
use iei_registry::{CliConfig, EtlEngine, LookupPipeline};

#[derive(Parser)]
#[command(name = "gene_lookup")]
#[command(about = "Show the rank and classification of genes in the registry")]
struct Args {
    #[command(flatten)]
    common: CliConfig,

    /// Gene symbols to look up (case-insensitive). Without any, the top genes are listed.
    genes: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.common.init_logging();

    let config = args.common.load()?;
    let pipeline = LookupPipeline::new(args.common.storage(), config, args.genes);

    let output = EtlEngine::new(pipeline).run().await?;
    print!("{}", output);
    Ok(())
}
