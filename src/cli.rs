//! Command-line argument parsing for typeahead.
//!
//! Uses clap to parse the items source, autocomplete overrides and headless
//! mode options.

use clap::Parser;
use std::path::PathBuf;

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output of the final screen.
    #[default]
    Text,
    /// JSON output with screen, state, and metadata.
    Json,
    /// Frame-by-frame output showing state after each event.
    Frames,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "frames" => Ok(Self::Frames),
            _ => Err(format!(
                "Invalid output format: {s}. Expected: text, json, or frames"
            )),
        }
    }
}

/// Search a JSON collection as you type.
#[derive(Parser, Debug)]
#[command(name = "typeahead")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON file with the items to search
    #[arg(value_name = "ITEMS", env = "TYPEAHEAD_ITEMS")]
    pub items: Option<PathBuf>,

    /// JSON pointer to the item array (e.g., /data/users)
    #[arg(long, value_name = "POINTER")]
    pub pointer: Option<String>,

    /// Field that uniquely identifies each item
    #[arg(short = 'k', long, value_name = "FIELD")]
    pub primary_key: Option<String>,

    /// Field written into the input when a row is selected
    #[arg(short = 's', long, value_name = "FIELD")]
    pub select_field: Option<String>,

    /// Text shown when nothing matches
    #[arg(long, value_name = "TEXT")]
    pub no_result_text: Option<String>,

    /// Prefix for row element ids
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Placeholder shown in the empty input
    #[arg(long, value_name = "TEXT")]
    pub placeholder: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // === Headless mode options ===
    /// Run in headless mode (no terminal UI, for testing/automation)
    #[arg(long)]
    pub headless: bool,

    /// Comma-separated events to execute in headless mode (e.g., "type:al,key:down")
    #[arg(long, value_name = "EVENTS")]
    pub events: Option<String>,

    /// Path to script file with events (use "-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Screen size for headless mode (WIDTHxHEIGHT, e.g., "80x24")
    #[arg(long, value_name = "SIZE", default_value = "80x24")]
    pub size: String,

    /// Output format for headless mode
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,

    /// Write output to file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Stop on first assertion failure
    #[arg(long)]
    pub fail_fast: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Returns true if headless mode is enabled.
    pub fn is_headless(&self) -> bool {
        self.headless
    }

    /// Parses the screen size from the --size argument.
    /// Returns (width, height) or an error.
    pub fn parse_screen_size(&self) -> std::result::Result<(u16, u16), String> {
        let (w, h) = self.size.split_once('x').ok_or_else(|| {
            format!(
                "Invalid size format: '{}'. Expected WIDTHxHEIGHT (e.g., 80x24)",
                self.size
            )
        })?;
        let width = w
            .parse::<u16>()
            .map_err(|_| format!("Invalid width: '{}'", w))?;
        let height = h
            .parse::<u16>()
            .map_err(|_| format!("Invalid height: '{}'", h))?;
        Ok((width, height))
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }

    /// Validates headless mode arguments.
    /// Returns an error message if validation fails.
    pub fn validate_headless(&self) -> std::result::Result<(), String> {
        if !self.headless {
            return Ok(());
        }

        if self.events.is_none() && self.script.is_none() {
            return Err("--headless requires --events or --script".to_string());
        }

        self.parse_screen_size()?;
        self.parse_output_format()?;

        Ok(())
    }
}
