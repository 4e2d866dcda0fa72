//! # PatternKit Drafting
//!
//! The pure geometry pipeline: master blocks, the slider-driven
//! deformation engine, the two path-synthesis strategies, and the
//! assembler that packages drafted pieces into a [`PatternDocument`].
//!
//! Everything here is synchronous and side-effect-free (logging aside):
//! the recompute pipeline and any synchronous preview path share these
//! functions rather than carrying parallel copies of the math.
//!
//! ```rust
//! use patternkit_core::{BrandStyle, DesignParameters};
//! use patternkit_drafting::assemble;
//!
//! let doc = assemble(
//!     "Oversized Denim Jacket",
//!     BrandStyle::Atelier,
//!     &DesignParameters::new(50.0, 20.0, 0.0),
//! )
//! .unwrap();
//! assert_eq!(doc.pieces.len(), 2);
//! ```
//!
//! [`PatternDocument`]: patternkit_core::PatternDocument

pub mod assembler;
pub mod blocks;
pub mod deform;
pub mod synthesis;

pub use assembler::assemble;
pub use blocks::{blocks_for, bodice_front, pant_front, sleeve, Block};
pub use deform::{
    deform, effective_distortion, DISTORTION_DEADBAND, GRAVITY_DROP_MM, NOISE_AMPLITUDE_MM,
};
pub use synthesis::{synthesize, CURVED_EASE_SCALE_Y};
