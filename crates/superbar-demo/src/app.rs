//! Demo application state.

use std::path::Path;

use peniko::Color;
use superbar_core::{ConfigError, Duration, Instant, SuperBar, SuperBarConfig};
use superbar_widgets::{SuperBarWidget, from_color32, sizing, theme, to_color32};
use thiserror::Error;

/// Delay before the scripted transition starts.
const ANIMATION_DELAY: Duration = Duration::from_secs(5);
/// Length of the scripted transition.
const ANIMATION_DURATION: Duration = Duration::from_millis(3000);
const ANIMATION_FROM: f64 = 0.0;
const ANIMATION_TO: f64 = 90.0;

/// Errors loading the demo's config file.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Read a JSON bar config from disk.
pub fn load_config(path: impl AsRef<Path>) -> Result<SuperBarConfig, DemoError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = SuperBarConfig::from_json(&json)?;
    log::info!("Loaded config from: {:?}", path);
    Ok(config)
}

/// Blend from the bar's configured color towards red as the value grows.
fn heat_color(base: Color) -> impl Fn(f64, f64, f64) -> Color {
    let from = base.to_rgba8();
    move |value, max, min| {
        let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::from_rgba8(lerp(from.r, 255), lerp(from.g, 0), lerp(from.b, 0), from.a)
    }
}

pub struct DemoApp {
    bar: SuperBar,
    started: Instant,
    /// Whether the delayed transition has been kicked off.
    scripted: bool,
    heat: bool,
}

impl DemoApp {
    pub fn new(config: SuperBarConfig) -> Self {
        let mut bar = SuperBar::new(config);
        bar.set_on_selection_moved(|value, max, min, _bar| {
            log::info!("Selection moved: {} ({}..{})", value, min, max);
        });
        bar.set_on_selection_changed(|value, _max, _min, _bar| {
            log::info!("Selection changed: {}", value);
        });

        Self {
            bar,
            started: Instant::now(),
            scripted: false,
            heat: false,
        }
    }

    /// Start the scripted transition once its delay has passed.
    fn run_script(&mut self, ctx: &egui::Context, now: Instant) {
        if self.scripted {
            return;
        }
        let elapsed = now.duration_since(self.started);
        if elapsed >= ANIMATION_DELAY {
            log::info!("Animating {} -> {}", ANIMATION_FROM, ANIMATION_TO);
            self.bar
                .animate_value(ANIMATION_TO, Some(ANIMATION_FROM), ANIMATION_DURATION, now);
            self.scripted = true;
        } else {
            ctx.request_repaint_after(ANIMATION_DELAY - elapsed);
        }
    }

    fn set_heat(&mut self, heat: bool) {
        self.heat = heat;
        if heat {
            let base: Color = self.bar.to_config().bar_color.into();
            self.bar.set_color_formatter(heat_color(base));
        } else {
            self.bar.reset_color_formatter();
        }
    }
}

impl DemoApp {
    fn set_knob_color(&mut self, color: egui::Color32) {
        self.bar.set_control_color(from_color32(color));
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_script(ctx, Instant::now());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("SuperBar");
            ui.add_space(sizing::SPACING);

            ui.add(SuperBarWidget::new(&mut self.bar).width(f32::INFINITY));
            ui.add_space(sizing::SPACING);

            ui.label(
                egui::RichText::new(format!("Value: {:.1}", self.bar.value())).color(theme::TEXT),
            );

            let (min, max) = (self.bar.min(), self.bar.max());
            let mut overlay = self.bar.overlay_value();
            if ui
                .add(egui::Slider::new(&mut overlay, min..=max).text("Overlay"))
                .changed()
            {
                self.bar.set_overlay_value(overlay);
            }

            ui.horizontal(|ui| {
                let mut touch = self.bar.is_touch_enabled();
                if ui.checkbox(&mut touch, "Touch enabled").changed() {
                    self.bar.set_touch_enabled(touch);
                }

                let mut heat = self.heat;
                if ui.checkbox(&mut heat, "Color by value").changed() {
                    self.set_heat(heat);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Knob");
                let mut knob = to_color32(self.bar.to_config().control_color.into());
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut knob,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    self.set_knob_color(knob);
                }
            });

            if self.bar.is_animating() {
                ui.label(egui::RichText::new("Animating...").color(theme::TEXT_MUTED));
            }
        });
    }
}
