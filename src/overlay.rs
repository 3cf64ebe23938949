use std::sync::mpsc;
use std::time::{Duration, Instant};

use eframe::egui::{self, pos2, vec2, Color32, Pos2, Vec2};

use crate::activation::ActivationDispatcher;
use crate::hotkey::HotkeyTrigger;
use crate::message::{MessageReceiver, MessageSender, OverlayMessage};
use crate::panel::{TimerPanel, NORMAL_HEIGHT};
use crate::settings::Settings;

/// Container width, identical in both layouts; resize messages change only
/// the height.
pub const PANEL_WIDTH: f32 = 280.0;
/// Height of the transparent drag band across the top of the container.
pub const HANDLE_HEIGHT: f32 = 12.0;

const PANEL_FILL: Color32 = Color32::from_rgb(24, 26, 34);

/// Horizontal anchoring of the container. A fresh overlay hangs off the
/// right screen edge; the first drag movement switches it permanently to an
/// absolute left coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalAnchor {
    RightOffset(f32),
    Left(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub anchor: HorizontalAnchor,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Geometry {
    pub fn at_offset(right: f32, top: f32) -> Self {
        Self {
            anchor: HorizontalAnchor::RightOffset(right),
            top,
            width: PANEL_WIDTH,
            height: NORMAL_HEIGHT as f32,
        }
    }

    /// Top-left corner on a screen of the given width.
    pub fn origin(&self, screen_width: f32) -> Pos2 {
        let x = match self.anchor {
            HorizontalAnchor::RightOffset(offset) => screen_width - self.width - offset,
            HorizontalAnchor::Left(x) => x,
        };
        pos2(x, self.top)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    /// Translate by a drag delta, switching to the absolute left anchor.
    /// The switch is one-way, and there is no bounds clamping: the container
    /// may be dragged partially or fully off-screen.
    pub fn drag_by(&mut self, delta: Vec2, screen_width: f32) {
        let origin = self.origin(screen_width);
        self.anchor = HorizontalAnchor::Left(origin.x + delta.x);
        self.top += delta.y;
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }
}

/// Pointer capture over the drag band. Move events only count between a
/// down and the matching up, and each delta is relative to the previous
/// move, so consecutive moves accumulate.
#[derive(Debug, Default)]
pub struct DragState {
    last: Option<Pos2>,
}

impl DragState {
    pub fn pointer_down(&mut self, pos: Pos2) {
        self.last = Some(pos);
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> Option<Vec2> {
        let last = self.last?;
        self.last = Some(pos);
        Some(pos - last)
    }

    pub fn pointer_up(&mut self) {
        self.last = None;
    }

    pub fn is_captured(&self) -> bool {
        self.last.is_some()
    }
}

/// The live container: geometry, drag capture and the embedded panel.
/// Dropped whole on destroy; nothing carries over to the next creation.
pub struct Overlay {
    pub geometry: Geometry,
    pub drag: DragState,
    pub panel: TimerPanel,
}

/// Presence state machine for the floating container: absent, present,
/// absent again, driven by control messages. The host owns geometry only;
/// it never inspects timer internals.
pub struct OverlayHost {
    overlay: Option<Overlay>,
    settings: Settings,
    tx: MessageSender,
    rx: MessageReceiver,
}

impl OverlayHost {
    pub fn new(settings: Settings) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            overlay: None,
            settings,
            tx,
            rx,
        }
    }

    /// Sender half of the control channel, handed to activation sources and
    /// embedded panels.
    pub fn sender(&self) -> MessageSender {
        self.tx.clone()
    }

    pub fn is_present(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlay.as_mut()
    }

    /// Drain and apply every message queued since the last frame. Messages
    /// are unordered fire-and-forget; handlers tolerate stale ones.
    pub fn pump(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle(msg);
        }
    }

    pub fn handle(&mut self, msg: OverlayMessage) {
        match msg {
            OverlayMessage::Toggle => self.toggle(),
            OverlayMessage::Close => self.destroy(),
            OverlayMessage::Resize { height } => {
                // A resize that raced a destroy is dropped.
                if let Some(overlay) = &mut self.overlay {
                    overlay.geometry.set_height(height as f32);
                }
            }
        }
    }

    pub fn toggle(&mut self) {
        if self.overlay.is_some() {
            self.destroy();
        } else {
            self.create();
        }
    }

    /// Build the container at its default offset with a fresh panel inside.
    /// Idempotent: an existing overlay is left alone.
    pub fn create(&mut self) {
        if self.overlay.is_some() {
            return;
        }
        let (right, top) = self.settings.overlay_offset;
        tracing::debug!("creating overlay container");
        self.overlay = Some(Overlay {
            geometry: Geometry::at_offset(right, top),
            drag: DragState::default(),
            panel: TimerPanel::new(self.tx.clone(), &self.settings),
        });
    }

    /// Drop the container, drag capture and panel. Idempotent; the next
    /// toggle recreates everything from scratch.
    pub fn destroy(&mut self) {
        if self.overlay.take().is_some() {
            tracing::debug!("overlay container destroyed");
        }
    }
}

/// The application shell: one frameless always-on-top viewport whose
/// visibility, position and size mirror the host's container state.
pub struct OverlayApp {
    host: OverlayHost,
    trigger: HotkeyTrigger,
    dispatcher: ActivationDispatcher,
    visible: bool,
    last_origin: Option<Pos2>,
    last_size: Option<Vec2>,
}

impl OverlayApp {
    pub fn new(settings: Settings, trigger: HotkeyTrigger) -> Self {
        let host = OverlayHost::new(settings);
        let dispatcher = ActivationDispatcher::new(host.sender(), {
            let tx = host.sender();
            move || tx.clone()
        });
        Self {
            host,
            trigger,
            dispatcher,
            visible: false,
            last_origin: None,
            last_size: None,
        }
    }

    fn show_overlay(&mut self, ctx: &egui::Context, now: Instant) {
        let screen_width = ctx
            .input(|i| i.viewport().monitor_size)
            .map(|size| size.x)
            .unwrap_or(1920.0);

        let frame = egui::Frame::none()
            .fill(PANEL_FILL)
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::symmetric(10.0, 6.0));

        let Some(overlay) = self.host.overlay_mut() else {
            return;
        };

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            overlay.panel.ui(ui, now);
        });

        // Transparent drag band layered above the panel's own input surface.
        let band = egui::Rect::from_min_size(
            pos2(0.0, 0.0),
            vec2(overlay.geometry.width, HANDLE_HEIGHT),
        );
        let response = egui::Area::new(egui::Id::new("drag-band"))
            .order(egui::Order::Foreground)
            .fixed_pos(pos2(0.0, 0.0))
            .show(ctx, |ui| ui.allocate_rect(band, egui::Sense::drag()))
            .inner
            .on_hover_cursor(egui::CursorIcon::Grab);

        let origin = overlay.geometry.origin(screen_width);
        if let Some(local) = response.interact_pointer_pos() {
            // The pointer is viewport-relative; anchor it to screen space so
            // deltas stay meaningful while the container itself moves.
            let screen_pos = origin + local.to_vec2();
            if response.drag_started() {
                overlay.drag.pointer_down(screen_pos);
            } else if response.dragged() {
                if let Some(delta) = overlay.drag.pointer_move(screen_pos) {
                    overlay.geometry.drag_by(delta, screen_width);
                }
            }
        }
        if response.drag_stopped() {
            overlay.drag.pointer_up();
        }

        // Geometry is last-write-wins; only push changes to the window.
        let origin = overlay.geometry.origin(screen_width);
        let size = overlay.geometry.size();
        if self.last_origin != Some(origin) {
            self.last_origin = Some(origin);
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(origin));
        }
        if self.last_size != Some(size) {
            self.last_size = Some(size);
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
        }
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if self.trigger.take() {
            self.dispatcher.dispatch_toggle();
        }
        self.host.pump();

        let present = self.host.is_present();
        if present != self.visible {
            self.visible = present;
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(present));
            if present {
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            } else {
                self.last_origin = None;
                self.last_size = None;
            }
        }

        if present {
            self.show_overlay(ctx, now);
        }

        // Wake for the next countdown tick when armed, otherwise poll the
        // activation flag at a relaxed rate.
        let wakeup = self
            .host
            .overlay()
            .and_then(|overlay| overlay.panel.engine().next_wakeup())
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(Duration::from_millis(150));
        ctx.request_repaint_after(wakeup);
    }
}
