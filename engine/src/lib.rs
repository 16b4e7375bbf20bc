pub mod app;
pub mod audio;
pub mod graphics;
pub mod pixels_renderer;
pub mod schedule;
pub mod surface;
pub mod ui;
pub mod view_tree;
