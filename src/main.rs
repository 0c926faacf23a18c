use anyhow::{Context, Result};
use clap::Parser;
use scene_composer::app::App;
use scene_composer::encoder::ImageFile;
use scene_composer::models::Config;
use scene_composer::session::Session;
use scene_composer::Error;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "scene-composer")]
#[command(about = "Place the people from your photos into a described scene")]
struct CliArgs {
    /// Description of the scene to create.
    #[arg(short, long)]
    prompt: String,

    /// Where to write the PNG. Defaults to scene_<uuid>.png in the current directory.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Reference photos (JPEG, PNG or WEBP), sent in the order given.
    #[arg(value_name = "PHOTO", required = true)]
    photos: Vec<PathBuf>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(format!("scene_{}.png", Uuid::new_v4()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scene_composer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let app = App::new(&config);

    let files = args.photos.iter().map(ImageFile::from_path).collect();
    let session = Session::new().select(files)?.with_prompt(args.prompt)?;
    let session = app.submit(&session).await?;

    match (session.result(), session.error()) {
        (Some(image), _) => {
            let output = args.output.unwrap_or_else(default_output_path);
            tokio::fs::write(&output, &image.data)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Saved generated scene to {}", output.display());
            Ok(())
        }
        (None, Some(e @ Error::NoImageProduced { .. })) => {
            error!("{} Try a different prompt or other photos.", e);
            std::process::exit(1);
        }
        (None, Some(e)) => {
            error!("Generation failed: {}", e);
            std::process::exit(1);
        }
        (None, None) => anyhow::bail!("Session ended in unexpected state: {:?}", session.phase()),
    }
}
