pub mod config;
pub mod envelope;
pub mod errors;
mod finite;
pub mod media;
pub mod nullable;
pub mod recording;
pub mod relationships;
pub mod timestamp;
