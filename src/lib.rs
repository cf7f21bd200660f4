pub mod app;
pub mod audio;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod managers;
pub mod materials;
pub mod math;
pub mod particles;
pub mod pipeline;
pub mod render;
pub mod scene;
pub mod types;
