use tracing::debug;

use crate::hardware::{collect_full_report, detect_capabilities, SAMPLE_WINDOW};
use crate::panel::run_panel;

pub fn handle_panel_command() -> Result<(), Box<dyn std::error::Error>> {
    let caps = detect_capabilities();

    run_panel(|| {
        debug!("assembling report for panel");
        collect_full_report(&caps, SAMPLE_WINDOW).render()
    })?;
    Ok(())
}
