mod test_logs;

use rollsweep::analysis::{DisplayWindow, UnitMode};
use rollsweep::config::PlaybackConfig;
use rollsweep::dashboard::SweepDashboard;
use rollsweep::playback::{PlaybackDriver, PlaybackState, cursor_for_tick, tick_for_cursor};

fn config(tick_period_ms: u32, history_seconds: u32) -> PlaybackConfig {
    PlaybackConfig {
        tick_period_ms,
        history_seconds,
    }
}

#[test]
fn test_halts_on_last_second() {
    let table = test_logs::sinusoid_log(200, 100, 0.2, 0.1);
    let mut driver = PlaybackDriver::new(&table, &config(1000, 30)).unwrap();

    let frame = driver.tick(&table, 199).unwrap();
    assert_eq!(frame.cursor_s, 199);
    assert_eq!(driver.state(), PlaybackState::Running);

    let frame = driver.tick(&table, 200).unwrap();
    assert_eq!(frame.cursor_s, 200);
    assert_eq!(frame.index, 20_000);
    assert_eq!(driver.state(), PlaybackState::Halted);
}

#[test]
fn test_full_replay_tick_count() {
    let table = test_logs::sinusoid_log(200, 100, 0.2, 0.1);

    for (period_ms, expected_ticks) in [(1000, 201), (500, 402), (2000, 101), (200_000, 2)] {
        let mut driver = PlaybackDriver::new(&table, &config(period_ms, 30)).unwrap();
        let mut ticks = 0;
        let mut tick = 0;
        while !driver.is_halted() {
            driver.tick(&table, tick).unwrap();
            ticks += 1;
            tick += 1;
        }
        assert_eq!(ticks, expected_ticks, "tick period {} ms", period_ms);
        assert_eq!(driver.last_frame().unwrap().cursor_s, 200);
    }
}

#[test]
fn test_trailing_window_during_replay() {
    let table = test_logs::sinusoid_log(200, 100, 0.2, 0.1);
    let mut driver = PlaybackDriver::new(&table, &config(1000, 30)).unwrap();

    // Inside the history length the window starts at the first row
    assert_eq!(driver.tick(&table, 30).unwrap().window, DisplayWindow::new(0, 3000));
    // Past it the window holds history / period rows behind the cursor
    assert_eq!(driver.tick(&table, 31).unwrap().window, DisplayWindow::new(100, 3100));

    let mut driver = PlaybackDriver::new(&table, &config(1000, 0)).unwrap();
    assert_eq!(driver.tick(&table, 0).unwrap().window, DisplayWindow::new(0, 0));
    assert_eq!(driver.tick(&table, 50).unwrap().window, DisplayWindow::new(5000, 5000));
}

#[test]
fn test_playback_view_over_replay() {
    let table = test_logs::sinusoid_log(60, 10, 0.1, 0.05);
    let mut driver = PlaybackDriver::new(&table, &config(1000, 10)).unwrap();
    let mut dashboard = SweepDashboard::new(&table);

    let frame = driver.tick(&table, 25).unwrap();
    let figure = dashboard.playback_view(&frame, UnitMode::Degrees);
    let attitude = &figure.panels[2];
    let phi = &attitude.series[1];

    assert_eq!(phi.len(), 101);
    assert_eq!(phi.points.first().unwrap()[0], 15.0);
    assert_eq!(phi.points.last().unwrap()[0], 25.0);
    let limit = attitude.y_range.unwrap()[1];
    assert!((limit - 0.11_f64.to_degrees()).abs() < 1e-9);
}

#[test]
fn test_incompatible_tick_period_rejected() {
    // 25 ms rows: every 100 ms cursor lands on a row
    let table = test_logs::sinusoid_log(10, 40, 0.1, 0.05);
    assert!(PlaybackDriver::new(&table, &config(100, 5)).is_ok());

    // 500 ms is not a multiple of the 1 s row period
    let table = test_logs::sinusoid_log(10, 1, 0.1, 0.05);
    assert!(PlaybackDriver::new(&table, &config(500, 5)).is_err());
    assert!(PlaybackDriver::new(&table, &config(1000, 5)).is_ok());
}

#[test]
fn test_tick_period_change_resumes_without_overshoot() {
    let table = test_logs::sinusoid_log(200, 100, 0.2, 0.1);
    let mut driver = PlaybackDriver::new(&table, &config(100, 30)).unwrap();
    let shown = driver.tick(&table, 1500).unwrap();
    assert_eq!(shown.cursor_s, 150);

    for period_ms in [100, 500, 1000, 2000, 200_000] {
        let mut resumed = PlaybackDriver::new(&table, &config(period_ms, 30)).unwrap();
        let mut tick = tick_for_cursor(shown.cursor_s, period_ms);
        assert!(cursor_for_tick(tick, period_ms) <= shown.cursor_s);

        let mut last = resumed.tick(&table, tick).unwrap();
        while !resumed.is_halted() {
            tick += 1;
            last = resumed.tick(&table, tick).unwrap();
        }
        assert_eq!(last.cursor_s, 200);
    }
}

#[test]
fn test_halted_replay_stays_halted_after_period_change() {
    let table = test_logs::sinusoid_log(20, 10, 0.2, 0.1);
    let mut driver = PlaybackDriver::new(&table, &config(2000, 5)).unwrap();
    let held = driver.tick(&table, 10).unwrap();
    assert!(driver.is_halted());

    let mut resumed = PlaybackDriver::new(&table, &config(1000, 5)).unwrap();
    let frame = resumed.tick(&table, tick_for_cursor(held.cursor_s, 1000)).unwrap();
    assert_eq!(frame.cursor_s, 20);
    assert!(resumed.is_halted());
}
