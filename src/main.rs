use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use scrollwatch::config::Config;
use scrollwatch::errors::{self, Result, info};
use scrollwatch::replay::{self, ReplayScript};
use scrollwatch::utils;

#[derive(Parser, Debug)]
#[command(name = "scrollwatch")]
#[command(about = "Scrollwatch - report scroll activity and direction")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted scroll session and print every status change
    Replay {
        script: PathBuf,
    },
    /// Write the default configuration
    InitConfig {
        path: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.debug { LevelFilter::DEBUG } else { LevelFilter::WARN })
        .compact()
        .init();
    errors::set_debug_output(args.debug);

    if let Err(e) = run(args).await {
        errors::error(&e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Replay { script } => {
            let config = Config::load_or_default(args.config.as_deref()).await?;
            let script = ReplayScript::load(&script).await?;

            replay::replay(&script, &config.tracker, |offset, status| {
                println!("{} {}", utils::format_offset(offset), status);
            }).await;
        }
        Command::InitConfig { path } => {
            let path = match path.or(args.config) {
                Some(path) => path,
                None => utils::get_config_path()?,
            };

            Config::default().save(&path).await?;
            info!("Wrote default config to {}", path.display());
            println!("{}", path.display());
        }
    }

    Ok(())
}
