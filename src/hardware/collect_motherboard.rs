use tracing::debug;

use crate::error::CollectError;
use crate::hardware::sources::{Capability, ManagementService};
use crate::hardware::types::{BaseboardRecord, Section, SectionKind};

pub const MANAGEMENT_MISSING: &str =
    "Hardware management service not available; motherboard info cannot be read.";

const NOT_SPECIFIED: &str = "Not Specified";

pub fn collect_motherboard_info(
    management: &Capability<Box<dyn ManagementService>>,
) -> Result<Section, CollectError> {
    let mut section = Section::new(SectionKind::Motherboard);

    let service = match management.require() {
        Ok(service) => service,
        Err(e) => {
            debug!(error = %e, "skipping baseboard query");
            section.push(MANAGEMENT_MISSING);
            return Ok(section);
        }
    };

    match service.baseboards() {
        Ok(boards) => {
            for board in &boards {
                render_board(&mut section, board);
            }
        }
        Err(e) => {
            debug!(error = %e, "baseboard query failed");
            section.push(format!("Could not retrieve ({})", e));
        }
    }

    Ok(section)
}

fn render_board(section: &mut Section, board: &BaseboardRecord) {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string());

    section.push(format!("Manufacturer: {}", field(&board.manufacturer)));
    section.push(format!("Product: {}", field(&board.product)));
    if let Some(version) = &board.version {
        section.push(format!("Version: {}", version));
    }
    section.push(format!("Serial Number: {}", field(&board.serial_number)));
}
