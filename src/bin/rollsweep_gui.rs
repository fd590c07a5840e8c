use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use rollsweep::analysis::UnitMode;
use rollsweep::chart::Figure;
use rollsweep::config::{DashboardConfig, PlaybackConfig};
use rollsweep::constants::{
    HISTORY_MAX_S, HISTORY_STEP_S, TICK_PERIOD_MAX_MS, TICK_PERIOD_MIN_MS, TICK_PERIOD_STEP_MS,
};
use rollsweep::dashboard::{PostProcessFigures, PostProcessRequest, SweepDashboard};
use rollsweep::playback::{PlaybackDriver, PlaybackFrame, TickClock, tick_for_cursor};
use rollsweep::{Channel, SampleTable, load_log};

const MAX_LOG_LINES: usize = 500;

#[derive(Parser, Debug)]
#[command(name = "rollsweep_gui")]
#[command(about = "Roll frequency sweep dashboard - GUI", long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    log: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    unit: Option<UnitMode>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct GuiLogger {
    tx: Sender<String>,
    max_level: log::LevelFilter,
}

impl log::Log for GuiLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let _ = self
                .tx
                .send(format!("[{}] {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Playback,
    PostProcess,
}

struct SweepGuiApp {
    dashboard: SweepDashboard<'static>,
    table: &'static SampleTable,
    log_rx: Receiver<String>,
    log_lines: VecDeque<String>,
    page: Page,
    unit: UnitMode,

    // Playback page
    tick_period_ms: u32,
    history_seconds: u32,
    driver: Option<PlaybackDriver>,
    driver_error: Option<String>,
    clock: TickClock,
    next_tick: u64,
    frame: Option<PlaybackFrame>,
    playback_figure: Option<(PlaybackFrame, UnitMode, Figure)>,

    // Post-processing page
    slider_step_s: f64,
    start_time_s: f64,
    selected: [bool; 4],
    last_request: Option<PostProcessRequest>,
    post_figures: Option<PostProcessFigures>,
    post_error: Option<String>,
}

impl SweepGuiApp {
    fn new(
        _cc: &eframe::CreationContext<'_>,
        table: &'static SampleTable,
        config: DashboardConfig,
        log_rx: Receiver<String>,
    ) -> Self {
        let dashboard = SweepDashboard::new(table);
        let post = &config.post_process;
        let start_time_s = post
            .start_time_s
            .unwrap_or_else(|| dashboard.default_start_time());
        let selected = Channel::ALL.map(|c| post.channels.contains(&c));

        let mut app = Self {
            dashboard,
            table,
            log_rx,
            log_lines: VecDeque::new(),
            page: Page::Playback,
            unit: config.display.unit,
            tick_period_ms: config.playback.tick_period_ms,
            history_seconds: config.playback.history_seconds,
            driver: None,
            driver_error: None,
            clock: TickClock::new(config.playback.tick_period_ms),
            next_tick: 0,
            frame: None,
            playback_figure: None,
            slider_step_s: post.slider_step_s,
            start_time_s,
            selected,
            last_request: None,
            post_figures: None,
            post_error: None,
        };
        app.rebuild_driver();
        app
    }

    /// Build a driver for the current controls and replay the shown cursor into it
    ///
    /// The tick counter is rescaled to the current period so a change of tick
    /// period neither jumps past the end of the log nor loses a halt.
    fn rebuild_driver(&mut self) {
        let config = PlaybackConfig {
            tick_period_ms: self.tick_period_ms,
            history_seconds: self.history_seconds,
        };
        match PlaybackDriver::new(self.table, &config) {
            Ok(mut driver) => {
                if let Some(frame) = self.frame {
                    let resume = tick_for_cursor(frame.cursor_s, self.tick_period_ms);
                    match driver.tick(self.table, resume) {
                        Ok(frame) => {
                            self.frame = Some(frame);
                            self.next_tick = resume + 1;
                            self.clock.seek(resume);
                        }
                        Err(e) => {
                            log::warn!("Cannot resume playback: {}", e);
                            self.frame = None;
                            self.next_tick = 0;
                            self.clock.reset();
                        }
                    }
                    if driver.is_halted() {
                        self.clock.pause();
                    }
                }
                self.driver = Some(driver);
                self.driver_error = None;
            }
            Err(e) => {
                log::warn!("Playback unavailable: {}", e);
                self.driver = None;
                self.driver_error = Some(e.to_string());
                self.clock.pause();
            }
        }
    }

    fn restart(&mut self) {
        self.clock.reset();
        self.next_tick = 0;
        self.frame = None;
        if let Some(driver) = self.driver.as_mut() {
            driver.restart();
        }
    }

    fn toggle_play(&mut self) {
        if self.clock.is_running() {
            self.clock.pause();
            return;
        }
        if self.driver.as_ref().is_some_and(|d| d.is_halted()) {
            self.restart();
        }
        if self.driver.is_some() {
            self.clock.start();
        }
    }

    fn drain_logs(&mut self) {
        while let Ok(line) = self.log_rx.try_recv() {
            self.log_lines.push_back(line);
            while self.log_lines.len() > MAX_LOG_LINES {
                self.log_lines.pop_front();
            }
        }
    }

    /// Feed every tick the clock has produced since the last repaint
    fn advance_playback(&mut self) {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        let target = self.clock.ticks();
        while self.next_tick <= target && !driver.is_halted() {
            match driver.tick(self.table, self.next_tick) {
                Ok(frame) => self.frame = Some(frame),
                Err(e) => {
                    log::warn!("Playback stopped: {}", e);
                    self.clock.pause();
                    break;
                }
            }
            self.next_tick += 1;
        }
        if driver.is_halted() && self.clock.is_running() {
            self.clock.pause();
        }
    }

    fn current_playback_figure(&mut self) -> Option<&Figure> {
        let frame = self.frame?;
        let stale = !matches!(
            &self.playback_figure,
            Some((f, unit, _)) if *f == frame && *unit == self.unit
        );
        if stale {
            let figure = self.dashboard.playback_view(&frame, self.unit);
            self.playback_figure = Some((frame, self.unit, figure));
        }
        self.playback_figure.as_ref().map(|(_, _, figure)| figure)
    }

    fn post_request(&self) -> PostProcessRequest {
        let positions = self.dashboard.slider_positions(self.slider_step_s);
        let start_time_s = positions
            .iter()
            .copied()
            .min_by(|a, b| (a - self.start_time_s).abs().total_cmp(&(b - self.start_time_s).abs()))
            .unwrap_or(self.start_time_s);
        PostProcessRequest {
            unit: self.unit,
            start_time_s,
            channels: Channel::ALL
                .iter()
                .zip(self.selected)
                .filter(|(_, on)| *on)
                .map(|(c, _)| *c)
                .collect(),
        }
    }

    fn refresh_post_process(&mut self) {
        let request = self.post_request();
        if self.last_request.as_ref() == Some(&request) {
            return;
        }
        match self.dashboard.post_process(&request) {
            Ok(figures) => {
                self.post_figures = Some(figures);
                self.post_error = None;
            }
            Err(e) => {
                log::warn!("Post-processing failed: {}", e);
                self.post_figures = None;
                self.post_error = Some(e.to_string());
            }
        }
        self.last_request = Some(request);
    }

    fn draw_playback_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.clock.is_running() { "Pause" } else { "Play" };
            if ui
                .add_enabled(self.driver.is_some(), egui::Button::new(label))
                .clicked()
            {
                self.toggle_play();
            }
            if ui.button("Restart").clicked() {
                self.restart();
            }
            ui.separator();

            ui.label(egui::RichText::new("Tick:").color(egui::Color32::LIGHT_GRAY));
            let tick = ui.add(
                egui::Slider::new(&mut self.tick_period_ms, TICK_PERIOD_MIN_MS..=TICK_PERIOD_MAX_MS)
                    .step_by(TICK_PERIOD_STEP_MS as f64)
                    .logarithmic(true)
                    .suffix(" ms"),
            );
            if tick.changed() {
                self.clock.set_period(self.tick_period_ms);
                self.rebuild_driver();
            }

            ui.label(egui::RichText::new("History:").color(egui::Color32::LIGHT_GRAY));
            let history = ui.add(
                egui::Slider::new(&mut self.history_seconds, 0..=HISTORY_MAX_S)
                    .step_by(HISTORY_STEP_S as f64)
                    .suffix(" s"),
            );
            if history.changed() {
                self.rebuild_driver();
            }

            ui.separator();
            match self.frame {
                Some(frame) => {
                    ui.label(
                        egui::RichText::new(format!("t = {} s", frame.cursor_s))
                            .color(egui::Color32::WHITE)
                            .monospace(),
                    );
                }
                None => {
                    ui.label(egui::RichText::new("---").color(egui::Color32::DARK_GRAY));
                }
            }
            if self.driver.as_ref().is_some_and(|d| d.is_halted()) {
                ui.label(
                    egui::RichText::new("END OF LOG")
                        .color(egui::Color32::from_rgb(255, 80, 80))
                        .strong(),
                );
            }
        });

        if let Some(err) = &self.driver_error {
            ui.label(egui::RichText::new(err).color(egui::Color32::from_rgb(255, 100, 100)));
        }
    }

    fn draw_post_controls(&mut self, ui: &mut egui::Ui) {
        let first = self.table.first_time();
        let last = self.table.last_time();
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Start:").color(egui::Color32::LIGHT_GRAY));
            ui.add(
                egui::Slider::new(&mut self.start_time_s, first..=last)
                    .step_by(self.slider_step_s)
                    .suffix(" s"),
            );
        });
        ui.horizontal(|ui| {
            for (channel, on) in Channel::ALL.iter().zip(self.selected.iter_mut()) {
                ui.checkbox(on, channel.description());
            }
        });
        if let Some(err) = &self.post_error {
            ui.label(egui::RichText::new(err).color(egui::Color32::from_rgb(255, 100, 100)));
        }
    }
}

fn draw_figure(ui: &mut egui::Ui, id: &str, figure: &Figure, plot_height: f32) {
    let link_group = ui.id().with((id, "x_link"));
    ui.label(egui::RichText::new(&figure.title).color(egui::Color32::WHITE).strong());

    let last = figure.panels.len().saturating_sub(1);
    for (i, panel) in figure.panels.iter().enumerate() {
        ui.label(
            egui::RichText::new(&panel.title)
                .color(egui::Color32::LIGHT_GRAY)
                .small(),
        );
        let mut plot = Plot::new((id, i))
            .height(plot_height)
            .y_axis_label(panel.y_label.clone())
            .y_axis_min_width(60.0)
            .link_axis(link_group, [true, false])
            .show_axes([i == last, true])
            .legend(Legend::default());
        if i == last {
            plot = plot.x_axis_label(figure.x_label.clone());
        }
        if let Some([lo, hi]) = panel.y_range {
            plot = plot.include_y(lo).include_y(hi).allow_drag(false).allow_zoom(false);
        }
        plot.show(ui, |plot_ui| {
            for series in &panel.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                plot_ui.line(Line::new(series.name.clone(), points));
            }
        });
        ui.add_space(4.0);
    }
}

impl eframe::App for SweepGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_logs();

        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if self.page == Page::Playback && ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.toggle_play();
        }

        self.advance_playback();
        if self.page == Page::PostProcess {
            self.refresh_post_process();
        }

        egui::TopBottomPanel::top("page_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.page, Page::Playback, "Real Time Data");
                ui.selectable_value(&mut self.page, Page::PostProcess, "Post Processing");
                ui.separator();
                ui.label(egui::RichText::new("Unit:").color(egui::Color32::LIGHT_GRAY));
                ui.radio_value(&mut self.unit, UnitMode::Radians, "rad");
                ui.radio_value(&mut self.unit, UnitMode::Degrees, "deg");
            });
        });

        egui::TopBottomPanel::bottom("debug_log")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Log")
                            .color(egui::Color32::LIGHT_GRAY)
                            .strong(),
                    );
                    if ui.small_button("Clear").clicked() {
                        self.log_lines.clear();
                    }
                });
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.log_lines {
                            ui.label(
                                egui::RichText::new(line)
                                    .font(egui::FontId::monospace(11.0))
                                    .color(egui::Color32::from_rgb(180, 180, 180)),
                            );
                        }
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Playback => {
                self.draw_playback_controls(ui);
                ui.add_space(4.0);
                if let Some(figure) = self.current_playback_figure().cloned() {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        draw_figure(ui, "playback", &figure, 160.0);
                    });
                }
            }
            Page::PostProcess => {
                self.draw_post_controls(ui);
                ui.add_space(4.0);
                if let Some(figures) = &self.post_figures {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        draw_figure(ui, "strip", &figures.strip, 140.0);
                        ui.separator();
                        draw_figure(ui, "time_overlay", &figures.time, 200.0);
                        ui.separator();
                        draw_figure(ui, "frequency_overlay", &figures.frequency, 200.0);
                    });
                }
            }
        });

        match self.clock.until_next_tick() {
            Some(wait) => ctx.request_repaint_after(wait),
            None => ctx.request_repaint(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let (tx, rx) = crossbeam_channel::unbounded::<String>();
    let logger = GuiLogger {
        tx,
        max_level: log_level,
    };
    log::set_boxed_logger(Box::new(logger)).ok();
    log::set_max_level(log_level);

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(unit) = args.unit {
        config.display.unit = unit;
    }
    let log_path = args
        .log
        .or_else(|| config.log_path.clone())
        .context("No sweep log given (use --log or set log_path in the config file)")?;

    let table = load_log(&log_path)
        .with_context(|| format!("Failed to load sweep log {}", log_path.display()))?;
    // Read-only for the rest of the session
    let table: &'static SampleTable = Box::leak(Box::new(table));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 850.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Roll Attitude Frequency Sweep"),
        ..Default::default()
    };

    eframe::run_native(
        "Roll Sweep Dashboard",
        native_options,
        Box::new(move |cc| Ok(Box::new(SweepGuiApp::new(cc, table, config, rx)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
