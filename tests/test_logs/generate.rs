use rollsweep::telemetry::{Sample, SampleTable};

/// Log from 0 to `seconds` at `rate_hz` with every channel a sinusoid of
/// `frequency_hz` and the given amplitude
pub fn sinusoid_log(seconds: u32, rate_hz: u32, frequency_hz: f64, amplitude: f64) -> SampleTable {
    let rows = seconds as usize * rate_hz as usize + 1;
    let samples = (0..rows)
        .map(|k| {
            let t = k as f64 / rate_hz as f64;
            let v = amplitude * (2.0 * std::f64::consts::PI * frequency_hz * t).sin();
            Sample {
                time_s: t,
                roll_acceleration_command: v,
                measured_roll_rate: v,
                roll_attitude_command: v,
                measured_roll_attitude: v,
            }
        })
        .collect();
    SampleTable::new(samples).unwrap()
}

/// Log with every channel held at `value`
#[allow(dead_code)]
pub fn constant_log(seconds: u32, rate_hz: u32, value: f64) -> SampleTable {
    let samples = sinusoid_log(seconds, rate_hz, 0.0, 0.0)
        .samples()
        .iter()
        .map(|s| s.map_signals(|_| value))
        .collect();
    SampleTable::new(samples).unwrap()
}

/// CSV text for a short log, columns in a non-canonical order with an extra
/// column the reader should ignore
#[allow(dead_code)]
pub fn sweep_csv(rows: usize) -> String {
    let mut csv = String::from(
        "measuredRollAttitude_rad,time_s,rollAccelerationCommand_rps2,notes,measuredRollRate_rps,rollAttitudeCommand_rad\n",
    );
    for k in 0..rows {
        let t = k as f64 * 0.5;
        csv.push_str(&format!(
            "{},{},{},row {},{},{}\n",
            0.01 * k as f64,
            t,
            1.0,
            k,
            -0.5,
            0.02 * k as f64
        ));
    }
    csv
}
