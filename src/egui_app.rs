//! egui front end: form, results grid and background classification jobs.

pub mod controller;
pub mod state;
pub mod ui;
