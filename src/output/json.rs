use super::{Formatter, PlaybackLine};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, line: &PlaybackLine) -> String {
        serde_json::to_string(line).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
