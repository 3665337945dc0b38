mod api;
mod cli;
mod config;
mod console_format;
mod controller;
mod error;
mod report;
mod session;
mod types;
mod ui;
mod view;

#[cfg(test)]
mod test_fixtures;

use api::{AnalysisClient, UreqTransport};
use config::Settings;
use console_format::TableWriter;
use error::ServiceError;
use session::Session;
use std::io::{self, Write};
use std::process;

/// Exit status when the query or service call failed
const EXIT_FAILED: i32 = 1;
/// Exit status for unusable arguments or configuration
const EXIT_USAGE: i32 = 2;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        process::exit(EXIT_USAGE);
    }

    // Set console width override if specified (for testing)
    if let Some(width) = args.console_width {
        console_format::set_console_width(width);
    }

    let settings = match config::build_settings(&args) {
        Ok(s) => s,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            process::exit(EXIT_USAGE);
        }
    };
    log::debug!("{:?}", settings);

    let client = AnalysisClient::new(UreqTransport::new(), settings.base_url.clone());
    let width = console_format::console_width();

    let exit_code = if args.health || args.stats || args.schema {
        run_info(&client, &args, &settings, width)
    } else if args.interactive {
        run_interactive(client, &settings, width)
    } else {
        run_one_shot(client, &args, &settings, width)
    };

    process::exit(exit_code);
}

/// `--health`, `--stats` or `--schema`
fn run_info(client: &AnalysisClient<UreqTransport>, args: &cli::CliArgs, settings: &Settings, width: usize) -> i32 {
    let mut out = TableWriter::new(io::stdout().lock(), settings.use_colors);

    let result: Result<io::Result<()>, ServiceError> = if args.health {
        client.health().map(|h| report::write_health(&mut out, &h, width))
    } else if args.stats {
        client.document_stats().map(|s| report::write_document_stats(&mut out, &s, width))
    } else {
        client.template_schema(settings.template_type).map(|s| report::write_template_schema(&mut out, &s, width))
    };

    match result {
        Ok(Ok(())) => 0,
        Ok(Err(e)) => {
            ui::print_error(&format!("Failed to write output: {}", e));
            EXIT_FAILED
        }
        Err(e) => {
            log::warn!("{}", e);
            ui::print_error(&e.user_message());
            EXIT_FAILED
        }
    }
}

fn run_interactive(client: AnalysisClient<UreqTransport>, settings: &Settings, width: usize) -> i32 {
    ui::status(&format!("connected to {}", settings.base_url));
    let mut session = Session::new(client, settings, width, io::stdout());
    match session.run_interactive(io::stdin().lock()).and_then(|()| session.into_writer().flush()) {
        Ok(()) => 0,
        Err(e) => {
            ui::print_error(&format!("Session ended: {}", e));
            EXIT_FAILED
        }
    }
}

fn run_one_shot(client: AnalysisClient<UreqTransport>, args: &cli::CliArgs, settings: &Settings, width: usize) -> i32 {
    let question = args.question.as_deref().unwrap_or_default();
    let mut session = Session::new(client, settings, width, io::stdout().lock());

    let outcome = session.run_once(question, &args.view.views(), args.export);
    match outcome.and_then(|ok| session.into_writer().flush().map(|()| ok)) {
        Ok(true) => 0,
        Ok(false) => EXIT_FAILED,
        Err(e) => {
            ui::print_error(&format!("Failed to write output: {}", e));
            EXIT_FAILED
        }
    }
}
