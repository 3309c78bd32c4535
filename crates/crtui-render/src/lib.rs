#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, drawing helpers, and the presenter.
//!
//! A [`buffer::Buffer`] is both the frame surface and the unit of
//! pre-rendered content. Cached surfaces are small buffers whose unused
//! cells are transparent, so blitting them over a frame only touches the
//! cells they actually draw.

pub mod buffer;
pub mod cell;
pub mod drawing;
pub mod presenter;

pub use buffer::Buffer;
pub use cell::{Cell, PackedRgba, StyleFlags};
pub use drawing::{BorderChars, Draw};
pub use presenter::Presenter;
