//! Scene composer - places the people from uploaded photos into a described scene
//!
//! Reference photos are encoded and sent together with a text prompt to a
//! Gemini image model; the generated image is returned for preview and download.

pub mod ai;
pub mod app;
pub mod encoder;
pub mod error;
pub mod media;
pub mod models;
pub mod prompts;
pub mod session;

pub use error::{Error, Result};
