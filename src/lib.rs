//! Vue icon gallery: find SVG icon components on disk and serve them to a browser preview.

pub mod cli;
pub mod config;
pub mod http;
pub mod icons;
pub mod server;
