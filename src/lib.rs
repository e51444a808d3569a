//! Colfind - column boundary finder for scanned documents.
//!
//! Images are run through the [`column_scan`] pipeline on ingestion and kept
//! in an [`ImageCollection`](models::ImageCollection). The [`Session`] owns
//! that collection together with the view state and renders both variants
//! of every image as annotated thumbnails into a scrollable, zoomable canvas.
//!
//! This library exposes modules for integration testing and for embedding
//! the canvas in a windowing shell.

pub mod error;
pub mod export;
pub mod models;
pub mod rendering;
pub mod services;

pub use services::Session;
