use anyhow::{Context, Result};
use clap::Parser;
use rollsweep::save_log;
use rollsweep::simulation::{SweepConfig, generate_sweep};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "generate_log")]
#[command(about = "Generate a synthetic roll attitude frequency sweep log")]
struct Args {
    /// TOML sweep configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output CSV file
    #[arg(short, long, default_value = "roll_attitude_frequency_sweep.csv")]
    output: PathBuf,

    /// Seed for reproducible noise
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log length in seconds (CLI override)
    #[arg(short, long)]
    duration: Option<u32>,

    /// Rows per second (CLI override)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Measurement noise standard deviation (CLI override)
    #[arg(long)]
    noise: Option<f64>,

    /// Write a JSON manifest of the generation parameters next to the log
    #[arg(long)]
    manifest: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    file: String,
    rows: usize,
    duration_s: u32,
    sample_rate_hz: u32,
    start_frequency_hz: f64,
    end_frequency_hz: f64,
    noise_std: f64,
    seed: Option<u64>,
}

fn load_toml_config(path: &Path) -> Result<SweepConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_sweep_config(base: SweepConfig, args: &Args) -> SweepConfig {
    let mut config = base;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(duration) = args.duration {
        config.duration_s = duration;
    }
    if let Some(rate) = args.sample_rate {
        config.sample_rate_hz = rate;
    }
    if let Some(noise) = args.noise {
        config.noise_std = noise;
    }
    config
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let base = match args.config {
        Some(ref path) => load_toml_config(path)?,
        None => SweepConfig::default(),
    };
    let config = build_sweep_config(base, &args);

    let samples = generate_sweep(&config).context("Failed to generate sweep")?;

    if let Some(parent) = args.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    save_log(&args.output, &samples).context("Failed to write sweep log")?;

    if args.manifest {
        let manifest = Manifest {
            file: args.output.display().to_string(),
            rows: samples.len(),
            duration_s: config.duration_s,
            sample_rate_hz: config.sample_rate_hz,
            start_frequency_hz: config.start_frequency_hz,
            end_frequency_hz: config.end_frequency_hz,
            noise_std: config.noise_std,
            seed: config.seed,
        };
        let manifest_path = args.output.with_extension("json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} rows ({} s at {} Hz) in {}",
        samples.len(),
        config.duration_s,
        config.sample_rate_hz,
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file_config() {
        let args = Args::parse_from(["generate_log", "--duration", "60", "--seed", "9"]);
        let base: SweepConfig = toml::from_str("duration_s = 120\nnoise_std = 0.01\n").unwrap();
        let config = build_sweep_config(base, &args);
        assert_eq!(config.duration_s, 60);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.noise_std, 0.01);
        assert_eq!(config.sample_rate_hz, 100);
    }
}
