pub mod core;
pub use core::{F32Im, Im, RGBAIm, RasterSource};

// Optional extras
// -----------------------------------------------------------------------------

#[cfg(feature = "im-io")]
pub mod io;
