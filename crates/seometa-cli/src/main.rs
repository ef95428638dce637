mod catalog;

use clap::{Parser, Subcommand};
use seometa_core::{AppConfig, ProductInput, DEFAULT_COUNTRY, DEFAULT_LANGUAGE};
use seometa_generator::SeoGenerator;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "seometa-cli")]
#[command(about = "Generate and apply SEO metadata for catalog products")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate metadata from product fields given on the command line
    Generate {
        /// Product name
        #[arg(long)]
        name: String,
        #[arg(long)]
        short_description: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Country code (e.g., BR)
        #[arg(long, default_value = DEFAULT_COUNTRY)]
        country: String,
        /// Locale tag (e.g., pt-BR, es-AR, en-US)
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
        /// Skip the generation service even when an API key is configured
        #[arg(long)]
        fallback_only: bool,
    },
    /// Fetch a catalog product, generate its metadata and optionally save it
    Sku {
        sku: String,
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
        /// Write the generated metadata back to the catalog
        #[arg(long)]
        apply: bool,
    },
    /// Print the raw catalog record for a SKU
    Fetch { sku: String },
    /// Print a product's current SEO attribute values
    ShowSeo { sku: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = seometa_core::load_app_config()?;
    init_tracing(&config)?;

    match cli.command {
        Commands::Generate {
            name,
            short_description,
            description,
            country,
            language,
            fallback_only,
        } => {
            let generator = if fallback_only {
                SeoGenerator::fallback_only()
            } else {
                SeoGenerator::from_config(&config)?
            };
            let product = ProductInput {
                name,
                short_description,
                description,
                country,
                language,
            };
            let generated = generator.generate(&product).await;
            tracing::info!(source = %generated.source, "metadata generated");
            println!("{}", serde_json::to_string_pretty(&generated.output)?);
        }
        Commands::Sku {
            sku,
            language,
            apply,
        } => catalog::run_sku(&config, &sku, &language, apply).await?,
        Commands::Fetch { sku } => catalog::run_fetch(&config, &sku).await?,
        Commands::ShowSeo { sku } => catalog::run_show_seo(&config, &sku).await?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays pipeable JSON.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
