// Library exports for the binary and for testing
pub mod app;
pub mod async_tasks;
pub mod binding;
pub mod cli;
pub mod constants;
pub mod controller;
pub mod document;
pub mod element;
pub mod error;
pub mod intent;
pub mod persistence;
pub mod surface;
pub mod types;
pub mod ui;
