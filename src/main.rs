use eframe::egui;

use overlay_timer::hotkey::{Hotkey, HotkeyTrigger};
use overlay_timer::logging;
use overlay_timer::overlay::{OverlayApp, PANEL_WIDTH};
use overlay_timer::panel::NORMAL_HEIGHT;
use overlay_timer::settings::Settings;

const SETTINGS_FILE: &str = "settings.json";

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging);

    let trigger = match settings.toggle_hotkey() {
        Some(hotkey) => {
            let trigger = HotkeyTrigger::new(hotkey);
            trigger.start_listener();
            trigger
        }
        None => {
            // Without a hotkey there is no other way in; show the overlay
            // right away.
            tracing::warn!("no toggle hotkey configured; overlay opens immediately");
            let trigger = HotkeyTrigger::new(Hotkey::default());
            trigger.fire();
            trigger
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([PANEL_WIDTH, NORMAL_HEIGHT as f32])
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_always_on_top()
            .with_visible(false),
        ..Default::default()
    };

    let app = OverlayApp::new(settings, trigger);
    eframe::run_native(
        "Overlay Timer",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("failed to run overlay: {err}"))?;
    Ok(())
}
