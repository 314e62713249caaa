//! Data models for the process view

pub mod annotation;
pub mod table;

pub use annotation::{Annotation, MetamodelCategory};
pub use table::AnnotationTable;
