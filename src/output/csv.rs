use super::{Formatter, PlaybackLine};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, line: &PlaybackLine) -> String {
        format!(
            "{},{:.3},{:.3},{:.3},{},{},{:.6},{:.6},{:.6},{:.6},{}",
            line.tick,
            line.time_s,
            line.window_start_s,
            line.window_end_s,
            line.rows,
            line.unit,
            line.roll_acceleration_command,
            line.measured_roll_rate,
            line.roll_attitude_command,
            line.measured_roll_attitude,
            line.halted
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some(
            "tick,time_s,window_start_s,window_end_s,rows,unit,roll_acceleration_command,measured_roll_rate,roll_attitude_command,measured_roll_attitude,halted",
        )
    }
}
