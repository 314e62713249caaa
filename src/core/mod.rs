//! Core process-view functionality: data model, diagram inspection, annotation and rendering

pub mod annotate;
pub mod diagram;
pub mod models;
pub mod process_model;
pub mod report;
