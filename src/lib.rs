pub mod activation;
pub mod edit;
pub mod engine;
pub mod hotkey;
pub mod logging;
pub mod message;
pub mod overlay;
pub mod panel;
pub mod settings;
pub mod sound;
pub mod time_value;
