// --- File: crates/danceflow_ui/src/lib.rs ---

pub mod button;

pub use button::{Button, ButtonType, UnknownButtonType};
