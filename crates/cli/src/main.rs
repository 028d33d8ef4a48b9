mod render;
mod session;

use anyhow::{Context, Result, anyhow, bail};
use chef_client::config::GEMINI_API_KEY_ENV;
use chef_client::{ChefClientError, ChefConfig, ContentProvider, GeminiChef, GeneratedImage};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::CategoryFilter;
use server::InteractionController;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Mediterránea - AI generated Mediterranean recipe book
#[derive(Parser)]
#[command(name = "mediterranea")]
#[command(about = "Browse, rate and photograph AI generated Mediterranean recipes", long_about = None)]
struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini REST endpoint
    #[arg(long, env = "GEMINI_BASE_URL")]
    base_url: Option<String>,

    /// Model used for recipe text
    #[arg(long)]
    recipe_model: Option<String>,

    /// Model used for dish photos
    #[arg(long)]
    image_model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "120")]
    timeout_secs: u64,

    /// Seed for the fictional initial ratings
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a menu and list it
    List {
        /// all, primero, segundo or postre
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// Text to look for in titles, summaries and ingredients
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Generate a menu and show one recipe in full
    Show {
        /// Recipe id
        id: String,
    },

    /// Generate a menu and save an AI photo of one recipe
    Photo {
        /// Recipe id
        id: String,

        /// Output file (defaults to <id>.<ext>)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Interactive session: browse, open, rate and photograph recipes
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let provider: Arc<dyn ContentProvider> =
        Arc::new(GeminiChef::new(config).context("Failed to create Gemini client")?);
    let controller = match cli.seed {
        Some(seed) => InteractionController::with_seed(seed),
        None => InteractionController::new(),
    };

    match cli.command {
        Commands::List { category, search } => {
            handle_list(controller, provider, category, search).await?
        }
        Commands::Show { id } => handle_show(controller, provider, &id).await?,
        Commands::Photo { id, out } => handle_photo(controller, provider, &id, out).await?,
        Commands::Browse => session::run(controller, provider).await?,
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<ChefConfig> {
    // Without a flag, fall back to the environment directly
    let config = match &cli.api_key {
        Some(key) if key.trim().is_empty() => {
            return Err(ChefClientError::MissingApiKey { var: GEMINI_API_KEY_ENV }.into());
        }
        Some(key) => ChefConfig::new(key.as_str()),
        None => ChefConfig::from_env()?,
    };

    let mut config = config.with_timeout(Duration::from_secs(cli.timeout_secs.max(1)));
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(model) = &cli.recipe_model {
        config = config.with_recipe_model(model.as_str());
    }
    if let Some(model) = &cli.image_model {
        config = config.with_image_model(model.as_str());
    }
    Ok(config)
}

/// Load a menu, printing progress. Fails when the provider produced nothing.
async fn load_menu(
    controller: &mut InteractionController,
    provider: &Arc<dyn ContentProvider>,
) -> Result<usize> {
    println!("{}", "El Chef AI está creando el menú...".green());
    let start = Instant::now();
    let count = controller.load(provider.as_ref()).await.unwrap_or(0);
    if count == 0 {
        bail!("No se pudieron cargar las recetas en este momento.");
    }
    println!("{} {} recetas en {:?}", "✓".green(), count, start.elapsed());
    Ok(count)
}

/// Handle the 'list' command
async fn handle_list(
    mut controller: InteractionController,
    provider: Arc<dyn ContentProvider>,
    category: CategoryFilter,
    search: String,
) -> Result<()> {
    load_menu(&mut controller, &provider).await?;
    controller.set_category(category);
    controller.set_search(search);
    render::print_list(controller.query(), &controller.visible());
    Ok(())
}

/// Handle the 'show' command
async fn handle_show(
    mut controller: InteractionController,
    provider: Arc<dyn ContentProvider>,
    id: &str,
) -> Result<()> {
    load_menu(&mut controller, &provider).await?;
    open_or_list(&mut controller, id)?;
    render::print_view(controller.view(), controller.display_image().as_deref());
    Ok(())
}

/// Handle the 'photo' command
async fn handle_photo(
    mut controller: InteractionController,
    provider: Arc<dyn ContentProvider>,
    id: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    load_menu(&mut controller, &provider).await?;
    open_or_list(&mut controller, id)?;

    println!("{}", "Generando foto...".magenta());
    if !controller.request_image(provider.as_ref()).await {
        bail!("No se pudo generar la foto.");
    }

    let uri = controller
        .view()
        .selected
        .as_ref()
        .and_then(|r| r.image_url.clone())
        .ok_or_else(|| anyhow!("Photo was not attached to the recipe"))?;
    let image = GeneratedImage::from_data_uri(&uri).context("Malformed image data")?;
    let path = out.unwrap_or_else(|| PathBuf::from(format!("{}.{}", id, image.extension())));
    std::fs::write(&path, &image.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Foto guardada en {}", "✓".green(), path.display());
    Ok(())
}

/// Open `id`, or list the freshly generated ids when it does not exist.
fn open_or_list(controller: &mut InteractionController, id: &str) -> Result<()> {
    if controller.open(id).is_some() {
        return Ok(());
    }
    let ids: Vec<&str> = controller
        .store()
        .collection()
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    Err(anyhow!(
        "No existe ninguna receta con id '{}'. Recetas generadas: {}",
        id,
        ids.join(", ")
    ))
}
