// The binary in main.rs only wires the terminal to these modules; keeping them
// in the library lets integration tests and benches drive a session directly.

pub mod app;
pub mod config;
pub mod event;
pub mod generator;
pub mod session;
pub mod ui;
