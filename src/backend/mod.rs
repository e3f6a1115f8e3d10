//! Output backends: encode a rendered result for a concrete sink.
//!
//! Every backend rasterises the result into a pixel grid first, then
//! walks the grid tracking the current style and emitting transitions
//! only on change.

pub mod ansi;
pub mod html;
pub mod term;

use thiserror::Error;

use crate::draw::{CreatedWith, RenderResult};

/// Errors surfaced at the encode edge. The render path itself never
/// fails; a missing marker here means the result was built by hand
/// instead of through the render entry points.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("result carries no creation metadata; encode it from a render entry point")]
    MissingCreatedWith,
    #[error("terminal write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The metadata every backend needs, or the contract-violation error.
pub(crate) fn created_with(result: &RenderResult) -> Result<CreatedWith, EncodeError> {
    result.created_with.ok_or(EncodeError::MissingCreatedWith)
}
