use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use shared::{
    Config, ContentGenerator, GNewsClient, GenerationSettings, GroqClient, NewsQuery, Pipeline,
    RunOutcome,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cgtech-news", version)]
#[command(about = "Turn today's AI news into LinkedIn, Twitter, TikTok, YouTube and Facebook content packs")]
struct Args {
    /// Directory that receives the dated CGTECH-Daily-News folder (default: ./output)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_env()?;
    let output_dir = args.output_dir.unwrap_or(config.output_dir);

    let gnews = GNewsClient::new(config.gnews_api_key)?;
    let groq = GroqClient::new(config.groq_api_key)?;
    let generator = ContentGenerator::new(groq, GenerationSettings::default());
    let pipeline = Pipeline::new(gnews, generator, NewsQuery::default(), output_dir);

    let today = Local::now().date_naive();
    match pipeline.run(today).await? {
        RunOutcome::NoArticles => {}
        RunOutcome::Completed { dir, articles } => {
            println!(
                "\n✅ CGTECH multi-platform content pack generated ({} articles):",
                articles
            );
            println!("{}", dir.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    run(args).await.context("Error running CGTECH automation")
}
