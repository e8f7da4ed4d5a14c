//! CPU rasterization: the card surface, clip shapes, snapshots, encoding and blur.

pub(crate) mod blur;
pub(crate) mod raster;
pub(crate) mod shape;
pub(crate) mod surface;
