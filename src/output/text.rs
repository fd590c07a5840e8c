use super::{Formatter, PlaybackLine};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, line: &PlaybackLine) -> String {
        let halted = if line.halted { " [halted]" } else { "" };
        if self.verbose {
            format!(
                "t: {:>6.1} s  pdot cmd: {:>9.4}  p: {:>9.4}  phi cmd: {:>9.4}  phi: {:>9.4} {} (window {:.1}-{:.1} s, {} rows){}",
                line.time_s,
                line.roll_acceleration_command,
                line.measured_roll_rate,
                line.roll_attitude_command,
                line.measured_roll_attitude,
                line.unit,
                line.window_start_s,
                line.window_end_s,
                line.rows,
                halted
            )
        } else {
            format!(
                "t: {:>6.1} s  p: {:>9.4}  phi: {:>9.4} {}{}",
                line.time_s, line.measured_roll_rate, line.measured_roll_attitude, line.unit, halted
            )
        }
    }
}
