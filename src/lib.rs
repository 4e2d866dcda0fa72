//! # PatternKit
//!
//! A parametric sewing-pattern construction engine: a small set of
//! semantic garment parameters (silhouette family, brand aesthetic,
//! three continuous sliders) drives 2D vector pattern pieces, exported
//! as CAD-grade DXF or tiled print-at-home PDF.
//!
//! ## Architecture
//!
//! PatternKit is organized as a workspace with multiple crates:
//!
//! 1. **patternkit-core**: shared data model, parameters, errors
//! 2. **patternkit-drafting**: blocks, deformation, path synthesis,
//!    assembly (pure geometry)
//! 3. **patternkit-pipeline**: debounced, cancellable live-recompute
//!    session with ghost preview deltas
//! 4. **patternkit-export**: DXF (R12) and tiled-PDF emitters
//! 5. **patternkit**: this crate, re-exports plus the CLI binary
//!
//! ```text
//! parameters -> pipeline (debounce/cancel) -> assembler
//!     -> deform -> synthesize -> PatternDocument
//!     -> held for preview / handed to an exporter
//! ```

pub use patternkit_drafting as drafting;
pub use patternkit_export as export;
pub use patternkit_pipeline as pipeline;

pub use patternkit_core::{
    Annotation, BrandStyle, ControlPoint, DesignParameters, DraftError, Error, ExportError,
    GarmentFamily, Grainline, PathCommand, PatternDocument, PatternPiece, PipelineError, Result,
    SemanticTag, SynthesisMethod, VectorPath,
};

pub use patternkit_drafting::assemble;
pub use patternkit_export::{to_dxf, to_tiled_pdf, write_dxf, write_tiled_pdf, PageFormat};
pub use patternkit_pipeline::{spawn_session, GhostDelta, SessionConfig, SessionHandle};

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
