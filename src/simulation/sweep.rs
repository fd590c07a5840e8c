//! Synthetic roll-attitude frequency sweep.
//!
//! The attitude command is a logarithmic chirp `phi_c = A sin(theta(t))` with
//! instantaneous frequency rising from `start_frequency_hz` to
//! `end_frequency_hz`. The rate and acceleration commands are its first and
//! second time derivatives, so the acceleration command integrates back to
//! the attitude command. The measured rate tracks the rate command through a
//! first-order lag; the measured attitude integrates the measured rate with a
//! first-order correction towards the attitude command.

use std::f64::consts::PI;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::Deserialize;

use crate::error::{Result, SweepError};
use crate::telemetry::Sample;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Length of the log in whole seconds
    pub duration_s: u32,
    /// Rows per second
    pub sample_rate_hz: u32,
    pub start_frequency_hz: f64,
    pub end_frequency_hz: f64,
    /// Peak attitude command in radians
    pub attitude_amplitude_rad: f64,
    /// Rate-loop time constant in seconds
    pub rate_time_constant_s: f64,
    /// Attitude-loop time constant in seconds
    pub attitude_time_constant_s: f64,
    /// Standard deviation of the noise added to measured channels
    pub noise_std: f64,
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            duration_s: 200,
            sample_rate_hz: 100,
            start_frequency_hz: 0.05,
            end_frequency_hz: 0.7,
            attitude_amplitude_rad: 0.1,
            rate_time_constant_s: 0.08,
            attitude_time_constant_s: 0.5,
            noise_std: 0.002,
            seed: None,
        }
    }
}

impl SweepConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_noise(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration_s == 0 || self.sample_rate_hz == 0 {
            return Err(SweepError::Config(
                "duration and sample rate must be positive".to_string(),
            ));
        }
        if !(self.start_frequency_hz > 0.0 && self.end_frequency_hz >= self.start_frequency_hz) {
            return Err(SweepError::Config(format!(
                "sweep must satisfy 0 < start ({}) <= end ({})",
                self.start_frequency_hz, self.end_frequency_hz
            )));
        }
        if !(self.rate_time_constant_s > 0.0 && self.attitude_time_constant_s > 0.0) {
            return Err(SweepError::Config(
                "time constants must be positive".to_string(),
            ));
        }
        if !(self.noise_std.is_finite() && self.noise_std >= 0.0) {
            return Err(SweepError::Config(format!(
                "noise standard deviation must be finite and non-negative, got {}",
                self.noise_std
            )));
        }
        Ok(())
    }

    /// Sweep phase and its first two derivatives at `t`
    fn phase(&self, t: f64) -> (f64, f64, f64) {
        let f0 = self.start_frequency_hz;
        let duration = self.duration_s as f64;
        let ratio = self.end_frequency_hz / f0;
        if (ratio - 1.0).abs() < 1e-12 {
            let omega = 2.0 * PI * f0;
            return (omega * t, omega, 0.0);
        }
        let growth = ratio.ln() / duration;
        let omega = 2.0 * PI * f0 * (growth * t).exp();
        let theta = 2.0 * PI * f0 * ((growth * t).exp() - 1.0) / growth;
        (theta, omega, omega * growth)
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Generate a sweep log with rows at `k / sample_rate_hz` seconds
pub fn generate_sweep(config: &SweepConfig) -> Result<Vec<Sample>> {
    config.validate()?;

    let rate = config.sample_rate_hz as f64;
    let dt = 1.0 / rate;
    let rows = config.duration_s as usize * config.sample_rate_hz as usize + 1;
    let amplitude = config.attitude_amplitude_rad;

    let noise = Normal::new(0.0, config.noise_std)
        .map_err(|e| SweepError::Config(format!("invalid noise level: {}", e)))?;
    let mut rng = create_rng(config.seed);

    let mut rate_state = 0.0;
    let mut attitude_state = 0.0;
    let mut samples = Vec::with_capacity(rows);

    for k in 0..rows {
        let t = k as f64 / rate;
        let (theta, omega, omega_dot) = config.phase(t);
        let (sin, cos) = theta.sin_cos();

        let attitude_command = amplitude * sin;
        let rate_command = amplitude * omega * cos;
        let acceleration_command = amplitude * (omega_dot * cos - omega * omega * sin);

        samples.push(Sample {
            time_s: t,
            roll_acceleration_command: acceleration_command,
            measured_roll_rate: rate_state + noise.sample(&mut rng),
            roll_attitude_command: attitude_command,
            measured_roll_attitude: attitude_state + noise.sample(&mut rng),
        });

        rate_state += dt / config.rate_time_constant_s * (rate_command - rate_state);
        attitude_state += dt
            * (rate_state + (attitude_command - attitude_state) / config.attitude_time_constant_s);
    }

    log::debug!(
        "Generated {} rows: {:.3}-{:.3} Hz sweep over {} s",
        samples.len(),
        config.start_frequency_hz,
        config.end_frequency_hz,
        config.duration_s
    );

    Ok(samples)
}
