//! # PatternKit Core
//!
//! Core data model and error types for PatternKit.
//! Provides the fundamental abstractions shared by the drafting engine,
//! the recompute pipeline, and the exporters: control points with
//! anatomical tags, the three-slider parameter set, brand styles,
//! garment classification, and the assembled pattern document.

pub mod document;
pub mod error;
pub mod geometry;
pub mod params;

pub use document::{Annotation, PatternDocument, PatternPiece};
pub use error::{DraftError, Error, ExportError, PipelineError, Result};
pub use geometry::{bounding_box, ControlPoint, Grainline, PathCommand, SemanticTag, VectorPath};
pub use params::{
    BrandStyle, DesignParameters, GarmentFamily, SynthesisMethod, NEUTRAL_FIT_TENSION,
};
