//! Converts uploaded PNG, JPEG and WebP images to lossy WebP
//!
//! Inputs arrive as form-file style handles (a byte stream plus a declared
//! content type); output is an in-memory buffer rewound to offset 0.

pub mod app;
pub mod error;
pub mod image;
pub mod models;

pub use error::{Error, Result};
