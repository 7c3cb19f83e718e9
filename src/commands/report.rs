use tracing::info;

use crate::cli::Format;
use crate::hardware::collector::PRIVILEGE_WARNING;
use crate::hardware::sources::Capabilities;
use crate::hardware::types::SectionKind;
use crate::hardware::{collect_full_report, collect_section, detect_capabilities, SAMPLE_WINDOW};
use crate::output::{output_data, print_info, print_warning};
use crate::view::ConsoleView;

pub fn handle_report_command(format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let caps = detect_capabilities();
    let mut view = ConsoleView::stdout();

    let report = collect_full_report(&caps, SAMPLE_WINDOW);
    info!(sections = report.sections.len(), "report assembled");
    output_data(&report, format, &mut view)
}

pub fn handle_section_command(
    kind: SectionKind,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let caps = detect_capabilities();
    warn_if_unprivileged(&caps, format);

    let section = collect_section(&caps, kind, SAMPLE_WINDOW);
    if section.is_omitted() && format == Format::Text {
        print_info(&format!("{}: nothing to report on this machine", kind.title()));
        return Ok(());
    }

    output_data(&section, format, &mut ConsoleView::stdout())
}

fn warn_if_unprivileged(caps: &Capabilities, format: Format) {
    // Structured output stays parseable; the warning is text-only.
    if !caps.elevated && format == Format::Text {
        print_warning(PRIVILEGE_WARNING);
    }
}
