use crate::types::TemplateType;
use crate::view::View;
use clap::Parser;
use std::path::PathBuf;

/// Location of the optional config file
/// Uses platform-specific config directories:
/// - Linux: ~/.config/corep-assistant/config.toml
/// - macOS: ~/Library/Application Support/corep-assistant/config.toml
/// - Windows: %APPDATA%/corep-assistant/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("corep-assistant").join("config.toml"))
}

/// Which view(s) to print after a one-shot query
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewArg {
    All,
    Template,
    References,
    Validation,
    Audit,
}

impl ViewArg {
    /// Views to render, in display order
    pub fn views(&self) -> Vec<View> {
        match self {
            ViewArg::All => View::ALL.to_vec(),
            ViewArg::Template => vec![View::Template],
            ViewArg::References => vec![View::References],
            ViewArg::Validation => vec![View::Validation],
            ViewArg::Audit => vec![View::Audit],
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "corep-assistant")]
#[command(about = "Ask a regulatory reporting question and review the populated COREP template")]
#[command(version)]
pub struct CliArgs {
    /// Natural-language question to send to the analysis service
    #[arg(long, short = 'q', value_name = "QUESTION")]
    pub question: Option<String>,

    /// Description of the reporting scenario
    #[arg(long, value_name = "TEXT", conflicts_with = "scenario_file")]
    pub scenario: Option<String>,

    /// Read the scenario description from a file
    #[arg(long, value_name = "PATH")]
    pub scenario_file: Option<PathBuf>,

    /// COREP template to populate (default: own_funds_cr1, or the config file's template_type)
    #[arg(long = "template", short = 't', value_enum)]
    pub template_type: Option<TemplateType>,

    /// Which view(s) to print
    #[arg(long, value_enum, default_value = "all")]
    pub view: ViewArg,

    /// Export the full report as JSON after a successful query
    #[arg(long)]
    pub export: bool,

    /// Directory the export is written to (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Analysis service base URL (overrides COREP_API_URL and the config file)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start an interactive session
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Check service health and exit
    #[arg(long)]
    pub health: bool,

    /// Show regulatory document collection statistics and exit
    #[arg(long)]
    pub stats: bool,

    /// Show the field layout of the selected template and exit
    #[arg(long)]
    pub schema: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Override console width (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        let info_modes = [self.health, self.stats, self.schema].iter().filter(|m| **m).count();
        if info_modes > 1 {
            return Err("Specify at most one of --health, --stats or --schema".to_string());
        }

        if self.interactive && info_modes > 0 {
            return Err("--interactive cannot be combined with --health, --stats or --schema".to_string());
        }

        if !self.interactive && info_modes == 0 {
            match &self.question {
                None => {
                    return Err("A question is required: pass --question <QUESTION> or use --interactive".to_string());
                }
                Some(q) if q.trim().is_empty() => {
                    return Err("Question must not be empty".to_string());
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
