//! Strafe Services Layer
//!
//! Platform-facing collaborators specified at their boundary: input
//! snapshots, engine settings, and script files. The raw backends
//! (keyboard polling, display, filesystem layout) stay outside the core;
//! these modules translate between them and the message queue.

pub mod input;
pub mod script;
pub mod settings;
