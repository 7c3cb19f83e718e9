use clap::{Parser, Subcommand, ValueEnum};

use crate::hardware::types::SectionKind;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "pc-monitor")]
#[command(about = "Hardware and system status report for this machine")]
pub struct Cli {
    /// Log collector diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the full report once
    Report {
        /// Output format (text, json, or yaml)
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print a single report section
    Section {
        /// Which section to collect
        #[arg(value_enum)]
        section: SectionArg,

        /// Output format (text, json, or yaml)
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Interactive full-screen panel with manual refresh
    Panel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    System,
    Cpu,
    CpuFan,
    Memory,
    Disk,
    Network,
    Battery,
    Gpu,
    Motherboard,
}

impl From<SectionArg> for SectionKind {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::System => SectionKind::System,
            SectionArg::Cpu => SectionKind::Cpu,
            SectionArg::CpuFan => SectionKind::CpuFan,
            SectionArg::Memory => SectionKind::Memory,
            SectionArg::Disk => SectionKind::Disk,
            SectionArg::Network => SectionKind::Network,
            SectionArg::Battery => SectionKind::Battery,
            SectionArg::Gpu => SectionKind::Gpu,
            SectionArg::Motherboard => SectionKind::Motherboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_console_report() {
        let cli = Cli::try_parse_from(["pc-monitor"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_section_with_format() {
        let cli = Cli::try_parse_from(["pc-monitor", "section", "cpu-fan", "--format", "json", "-v"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Section { section, format }) => {
                assert_eq!(SectionKind::from(section), SectionKind::CpuFan);
                assert_eq!(format, Format::Json);
            }
            _ => panic!("expected section subcommand"),
        }
    }

    #[test]
    fn test_report_defaults_to_text() {
        let cli = Cli::try_parse_from(["pc-monitor", "report"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Report { format: Format::Text })));
        assert!(Cli::try_parse_from(["pc-monitor", "section", "printer"]).is_err());
    }
}
