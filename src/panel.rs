use std::time::Instant;

use eframe::egui::{self, vec2, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui};

use crate::edit::{self, EditBuffer, EditKey, EditOutcome};
use crate::engine::{TimerEngine, ViewState};
use crate::message::{MessageSender, OverlayMessage};
use crate::settings::Settings;
use crate::sound;
use crate::time_value::TimeValue;

/// Container height requested for the full layout, in pixels.
pub const NORMAL_HEIGHT: u32 = 260;
/// Container height requested for the compact layout.
pub const COMPACT_HEIGHT: u32 = 44;

const TEXT_COLOR: Color32 = Color32::from_rgb(230, 232, 240);
const ACCENT_COLOR: Color32 = Color32::from_rgb(94, 156, 255);
const TRACK_COLOR: Color32 = Color32::from_gray(58);
const EDIT_COLOR: Color32 = Color32::from_rgb(255, 200, 90);
const FINISHED_COLOR: Color32 = Color32::from_rgb(255, 105, 97);

/// Binds the engine's view state to the two layouts and relays resize/close
/// requests to the embedding host. The panel never touches container
/// geometry itself.
pub struct TimerPanel {
    engine: TimerEngine,
    edit: Option<EditBuffer>,
    tx: MessageSender,
    quick_add: Vec<u32>,
    alert_tone: bool,
}

impl TimerPanel {
    pub fn new(tx: MessageSender, settings: &Settings) -> Self {
        Self {
            engine: TimerEngine::with_start(TimeValue::from_seconds(settings.start_seconds)),
            edit: None,
            tx,
            quick_add: settings.quick_add.clone(),
            alert_tone: settings.alert_tone,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TimerEngine {
        &mut self.engine
    }

    /// Render one frame: pump due ticks, drain the alert latch, then draw
    /// whichever layout the view state selects.
    pub fn ui(&mut self, ui: &mut Ui, now: Instant) {
        self.engine.advance(now);
        if self.engine.take_alert() {
            tracing::info!("countdown finished");
            if self.alert_tone {
                sound::play_alert();
            }
        }
        if self.engine.is_editing() {
            self.handle_edit_keys(ui.ctx());
        }
        let view = self.engine.view();
        if view.compact {
            self.compact_ui(ui, &view, now);
        } else {
            self.normal_ui(ui, &view, now);
        }
    }

    /// Switch layouts and ask the host for the matching container height.
    pub fn toggle_compact(&mut self) {
        self.engine.toggle_compact();
        let height = if self.engine.is_compact() {
            COMPACT_HEIGHT
        } else {
            NORMAL_HEIGHT
        };
        self.send(OverlayMessage::Resize { height });
    }

    /// Ask the host to tear the overlay down.
    pub fn request_close(&self) {
        self.send(OverlayMessage::Close);
    }

    fn send(&self, msg: OverlayMessage) {
        if let Err(err) = self.tx.send(msg) {
            tracing::debug!("overlay channel closed: {err}");
        }
    }

    fn begin_edit(&mut self, now: Instant) {
        if self.edit.is_none() {
            self.edit = Some(self.engine.begin_edit(now));
        }
    }

    fn display_text(&self, view: &ViewState) -> String {
        match &self.edit {
            Some(buffer) if view.editing => buffer.text(),
            _ => view.display.clone(),
        }
    }

    fn handle_edit_keys(&mut self, ctx: &egui::Context) {
        let keys: Vec<egui::Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed: true, .. } => Some(*key),
                    _ => None,
                })
                .collect()
        });
        for key in keys {
            let Some(buffer) = self.edit.as_mut() else {
                break;
            };
            match edit::apply(buffer, map_key(key)) {
                EditOutcome::Committed => {
                    let digits = buffer.digits().to_string();
                    self.engine.commit_edit(&digits);
                    self.edit = None;
                }
                EditOutcome::Cancelled => {
                    self.engine.cancel_edit();
                    self.edit = None;
                }
                EditOutcome::Changed | EditOutcome::Ignored => {}
            }
        }
    }

    fn normal_ui(&mut self, ui: &mut Ui, view: &ViewState, now: Instant) {
        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("🗙").clicked() {
                    self.request_close();
                }
                if ui.small_button("🗕").clicked() {
                    self.toggle_compact();
                }
            });
        });

        let text = self.display_text(view);
        let ring = self.progress_ring(ui, view, &text);
        if ring.clicked() && !view.editing {
            self.begin_edit(now);
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let pad = (ui.available_width() - 96.0).max(0.0) / 2.0;
            ui.add_space(pad);
            if view.start_pause_visible
                && ui
                    .add_sized([44.0, 28.0], egui::Button::new(view.start_pause_glyph))
                    .clicked()
            {
                self.engine.start_pause(now);
            }
            let reset = egui::Button::new("⟲");
            let reset = if view.reset_emphasized {
                reset.fill(ACCENT_COLOR)
            } else {
                reset
            };
            if ui.add_sized([44.0, 28.0], reset).clicked() {
                self.engine.reset();
            }
        });

        if view.quick_add_visible {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let mut clicked = None;
                for &step in &self.quick_add {
                    if ui.small_button(format_step(step)).clicked() {
                        clicked = Some(step);
                    }
                }
                if let Some(step) = clicked {
                    self.engine.quick_add(step);
                }
            });
        }
    }

    fn compact_ui(&mut self, ui: &mut Ui, view: &ViewState, now: Instant) {
        let text = self.display_text(view);
        ui.horizontal(|ui| {
            let color = if view.editing {
                EDIT_COLOR
            } else if view.finished {
                FINISHED_COLOR
            } else {
                TEXT_COLOR
            };
            let label = egui::RichText::new(text).monospace().size(16.0).color(color);
            let time = ui.add(egui::Label::new(label).sense(Sense::click()));
            if time.clicked() && !view.editing {
                self.begin_edit(now);
            }
            if view.start_pause_visible {
                let button = egui::Button::new(view.start_pause_glyph).small();
                let button = if view.running {
                    button.fill(ACCENT_COLOR)
                } else {
                    button
                };
                if ui.add(button).clicked() {
                    self.engine.start_pause(now);
                }
            }
            let reset = egui::Button::new("⟲").small();
            let reset = if view.reset_emphasized {
                reset.fill(ACCENT_COLOR)
            } else {
                reset
            };
            if ui.add(reset).clicked() {
                self.engine.reset();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("🗙").clicked() {
                    self.request_close();
                }
                if ui.small_button("🗖").clicked() {
                    self.toggle_compact();
                }
            });
        });
    }

    /// Ring sweep plus the centered, clickable time field. Full circle at
    /// start, empty at completion.
    fn progress_ring(&self, ui: &mut Ui, view: &ViewState, text: &str) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(vec2(ui.available_width(), 150.0), Sense::click());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = 62.0;

        painter.circle_stroke(center, radius, Stroke::new(6.0, TRACK_COLOR));
        let sweep = (1.0 - view.progress).clamp(0.0, 1.0);
        if sweep > 0.0 {
            let segments = ((64.0 * sweep).ceil() as usize).max(2);
            let start = -std::f32::consts::FRAC_PI_2;
            let points: Vec<Pos2> = (0..=segments)
                .map(|i| {
                    let angle =
                        start + std::f32::consts::TAU * sweep * (i as f32 / segments as f32);
                    center + radius * vec2(angle.cos(), angle.sin())
                })
                .collect();
            painter.add(egui::Shape::line(points, Stroke::new(6.0, ACCENT_COLOR)));
        }

        let color = if view.editing {
            EDIT_COLOR
        } else if view.finished {
            FINISHED_COLOR
        } else {
            TEXT_COLOR
        };
        painter.text(
            center,
            Align2::CENTER_CENTER,
            text,
            FontId::monospace(26.0),
            color,
        );
        response
    }
}

fn map_key(key: egui::Key) -> EditKey {
    match key {
        egui::Key::Num0 => EditKey::Digit('0'),
        egui::Key::Num1 => EditKey::Digit('1'),
        egui::Key::Num2 => EditKey::Digit('2'),
        egui::Key::Num3 => EditKey::Digit('3'),
        egui::Key::Num4 => EditKey::Digit('4'),
        egui::Key::Num5 => EditKey::Digit('5'),
        egui::Key::Num6 => EditKey::Digit('6'),
        egui::Key::Num7 => EditKey::Digit('7'),
        egui::Key::Num8 => EditKey::Digit('8'),
        egui::Key::Num9 => EditKey::Digit('9'),
        egui::Key::Backspace => EditKey::Backspace,
        egui::Key::Delete => EditKey::Delete,
        egui::Key::Enter => EditKey::Enter,
        egui::Key::Escape => EditKey::Escape,
        egui::Key::ArrowLeft
        | egui::Key::ArrowRight
        | egui::Key::Home
        | egui::Key::End
        | egui::Key::Tab => EditKey::Navigation,
        _ => EditKey::Other,
    }
}

fn format_step(seconds: u32) -> String {
    if seconds >= 60 && seconds % 60 == 0 {
        format!("+{}m", seconds / 60)
    } else {
        format!("+{seconds}s")
    }
}
