use crate::foundation::error::CardResult;
use crate::render::raster::Raster;

/// Post-processing pass run on the finished raster before it is encoded.
pub trait SnapHook: Send + Sync {
    /// Adjust `raster` in place.
    fn snap(&self, raster: &mut Raster) -> CardResult<()>;
}

/// Hook that leaves the raster untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSnap;

impl SnapHook for NoSnap {
    fn snap(&self, _raster: &mut Raster) -> CardResult<()> {
        Ok(())
    }
}

impl<F> SnapHook for F
where
    F: Fn(&mut Raster) -> CardResult<()> + Send + Sync,
{
    fn snap(&self, raster: &mut Raster) -> CardResult<()> {
        self(raster)
    }
}
