pub mod app;
pub mod board;
pub mod color;
pub mod controller;
pub mod error;
pub mod logging;
pub mod settings;
pub mod sound;
