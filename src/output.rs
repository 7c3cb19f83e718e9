use serde::Serialize;

use crate::cli::Format;
use crate::hardware::types::{Report, Section};
use crate::view::ReportView;

/// Plain-text form of something the CLI can print.
pub trait TextRender {
    fn to_text(&self) -> String;
}

impl TextRender for Report {
    fn to_text(&self) -> String {
        self.render()
    }
}

impl TextRender for Section {
    fn to_text(&self) -> String {
        self.render()
    }
}

pub fn format_data<T: Serialize + TextRender>(
    data: &T,
    format: Format,
) -> Result<String, Box<dyn std::error::Error>> {
    let text = match format {
        Format::Json => serde_json::to_string_pretty(data)?,
        Format::Yaml => serde_yaml::to_string(data)?,
        Format::Text => data.to_text(),
    };
    Ok(text)
}

pub fn output_data<T: Serialize + TextRender>(
    data: &T,
    format: Format,
    view: &mut dyn ReportView,
) -> Result<(), Box<dyn std::error::Error>> {
    view.replace(&format_data(data, format)?);
    Ok(())
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31m❌ Error: {}\x1b[0m", message);
}

pub fn print_warning(message: &str) {
    println!("\x1b[33m⚠️  Warning: {}\x1b[0m", message);
}

pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}
