//! Terminal digital twin of a laptop: polls a metrics agent over HTTP and
//! renders a wireframe model whose indicators follow the readings.

pub mod app;
pub mod bands;
pub mod config;
pub mod error;
pub mod palette;
pub mod particles;
pub mod poller;
pub mod scene;
pub mod types;
pub mod ui;
pub mod visuals;
