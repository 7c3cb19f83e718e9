mod error;
mod hardware;
mod cli;
mod commands;
mod output;
mod panel;
mod view;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, Format};
use commands::{handle_panel_command, handle_report_command, handle_section_command};
use output::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing(default_filter(&cli));

    let result = match &cli.command {
        None => handle_report_command(Format::Text),
        Some(Commands::Report { format }) => handle_report_command(*format),
        Some(Commands::Section { section, format }) => {
            handle_section_command((*section).into(), *format)
        }
        Some(Commands::Panel) => handle_panel_command(),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. The panel owns the terminal, so it stays quiet
/// unless asked.
fn default_filter(cli: &Cli) -> &'static str {
    match (&cli.command, cli.verbose) {
        (_, true) => "debug",
        (Some(Commands::Panel), false) => "off",
        _ => "warn",
    }
}

fn init_tracing(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
