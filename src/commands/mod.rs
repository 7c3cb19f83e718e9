pub mod report;
pub mod panel;

pub use report::{handle_report_command, handle_section_command};
pub use panel::handle_panel_command;
