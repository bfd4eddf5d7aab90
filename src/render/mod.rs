//! Render module - Color mapping and trail compositing for display buffers.
//!
//! Nothing here talks to a window or GPU: the output is a plain RGB byte
//! buffer for a presentation layer to upload.

mod color;
mod trail;

pub use color::*;
pub use trail::*;
