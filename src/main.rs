//! typeahead - search a JSON collection as you type.

use tracing::{error, info};
use typeahead::cli::Cli;
use typeahead::config::{Config, Settings};
use typeahead::error::{Result, TypeaheadError};
use typeahead::items::load_items;
use typeahead::logging;
use typeahead::tui::{self, App};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse_args();

    if cli.is_headless() {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}: {}", e.category(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    cli.validate_headless().map_err(TypeaheadError::config)?;

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let settings = Settings::resolve(&cli, &config)?;
    info!("Loading items from: {}", settings.items_path.display());
    let items = load_items(&settings.items_path, settings.pointer.as_deref())?;

    let app = App::new(items, &settings)?;

    if cli.is_headless() {
        return tui::headless::run_headless(&cli, app);
    }

    tui::run(app)?;
    Ok(0)
}
