/// Animation timelines for the page entrance sequence
pub mod animation;
/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Page controllers and REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
/// Page templates and metadata
pub mod view;
