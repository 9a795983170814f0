//! egui front end: controller, UI-side state and rendering.

pub mod controller;
pub mod state;
pub mod ui;
