//! # PatternKit Export
//!
//! Serializers from a [`PatternDocument`] to the two interchange
//! formats external tooling consumes:
//!
//! - **DXF**: ASCII R12 group-code pairs on three fixed layers, for
//!   CAD and cutting services;
//! - **Tiled PDF**: multi-page print-at-home output with a calibration
//!   square, overlap, and registration marks.
//!
//! Both exporters read the document's authoritative `raw_points`, never
//! the derived render path, and both take the document by shared
//! reference: callers snapshot the current document (the pipeline hands
//! out `Arc`s) before exporting.
//!
//! [`PatternDocument`]: patternkit_core::PatternDocument

pub mod dxf;
pub mod pdf;
pub mod pdf_writer;

pub use dxf::{to_dxf, write_dxf, LAYER_CUT_LINE, LAYER_GRAIN_LINE, LAYER_INTERNAL};
pub use pdf::{
    tile_counts, to_tiled_pdf, write_tiled_pdf, PageFormat, CALIBRATION_SQUARE_MM,
    PAGE_MARGIN_MM, TILE_OVERLAP_MM,
};
