mod test_logs;

use approx::assert_relative_eq;
use rollsweep::analysis::{DisplayWindow, SpectrumEstimator, UnitMode};
use rollsweep::dashboard::{PostProcessRequest, SweepDashboard};
use rollsweep::telemetry::Channel;

#[test]
fn test_sinusoid_peaks_within_one_bin() {
    let mut estimator = SpectrumEstimator::new();
    let period = 0.01;

    for (n, f0) in [(64, 12.5), (100, 7.0), (256, 3.3), (1000, 0.75), (3001, 0.5)] {
        let values: Vec<f64> = (0..n)
            .map(|k| (2.0 * std::f64::consts::PI * f0 * k as f64 * period).sin())
            .collect();
        let spectrum = estimator.compute(&values, period);
        let resolution = spectrum.resolution_hz().unwrap();
        let (peak_hz, _) = spectrum.positive_peak().unwrap();

        assert!(
            (peak_hz - f0).abs() <= resolution,
            "N = {}: peak at {} Hz, expected {} Hz (bin {} Hz)",
            n,
            peak_hz,
            f0,
            resolution
        );
    }
}

#[test]
fn test_single_sample_spectrum() {
    let mut estimator = SpectrumEstimator::new();
    let spectrum = estimator.compute(&[-0.75], 0.01);
    assert_eq!(spectrum.frequencies_hz, vec![0.0]);
    assert_eq!(spectrum.magnitudes, vec![0.75]);
}

#[test]
fn test_six_bin_spectrum_is_symmetric() {
    let table = test_logs::sinusoid_log(5, 1, 0.1, 1.0);
    let mut dashboard = SweepDashboard::new(&table);
    let figures = dashboard
        .post_process(&PostProcessRequest {
            unit: UnitMode::Radians,
            start_time_s: 0.0,
            channels: vec![Channel::MeasuredRollRate],
        })
        .unwrap();

    assert_eq!(figures.window, DisplayWindow::new(0, 5));
    let series = &figures.frequency.panels[0].series[1];
    assert_eq!(series.len(), 6);
    assert_eq!(series.points[3][0], 0.0);
    assert_relative_eq!(series.points[0][0], -0.5);
    assert_relative_eq!(series.points[2][1], series.points[4][1], epsilon = 1e-12);
    assert_relative_eq!(series.points[1][1], series.points[5][1], epsilon = 1e-12);
}

#[test]
fn test_spectrum_over_post_process_window() {
    let table = test_logs::sinusoid_log(200, 100, 0.5, 0.2);
    let mut dashboard = SweepDashboard::new(&table);
    let figures = dashboard
        .post_process(&PostProcessRequest {
            unit: UnitMode::Radians,
            start_time_s: 170.0,
            channels: vec![Channel::MeasuredRollAttitude],
        })
        .unwrap();

    let series = &figures.frequency.panels[0].series[1];
    assert_eq!(series.len(), 3001);
    let (peak_hz, peak) = series
        .points
        .iter()
        .filter(|p| p[0] > 0.0)
        .map(|p| (p[0], p[1]))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap();
    assert!((peak_hz - 0.5).abs() <= 1.0 / 30.01);
    // Half the amplitude lands in each of the two mirrored peaks
    assert_relative_eq!(peak, 0.1, epsilon = 0.01);
}

#[test]
fn test_degree_spectrum_scales_magnitudes() {
    let table = test_logs::constant_log(20, 10, 0.5);
    let mut dashboard = SweepDashboard::new(&table);
    let request = |unit| PostProcessRequest {
        unit,
        start_time_s: 10.0,
        channels: vec![Channel::RollAttitudeCommand],
    };

    let rad = dashboard.post_process(&request(UnitMode::Radians)).unwrap();
    let deg = dashboard.post_process(&request(UnitMode::Degrees)).unwrap();

    let dc = |figures: &rollsweep::PostProcessFigures| {
        let series = &figures.frequency.panels[0].series[1];
        series.points[series.len() / 2]
    };
    assert_eq!(dc(&rad)[0], 0.0);
    assert_relative_eq!(dc(&rad)[1], 0.5, epsilon = 1e-12);
    assert_relative_eq!(dc(&deg)[1], 0.5_f64.to_degrees(), epsilon = 1e-9);
    // Frequency axis does not depend on the display unit
    assert_eq!(dc(&deg)[0], 0.0);
}
