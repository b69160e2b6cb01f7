use std::cell::Cell;
use std::rc::Rc;

/// The DPI Windows treats as 100% scaling.
pub const USER_DEFAULT_DPI: u32 = 96;

/// Converts a raw DPI value into a scale factor.
pub fn scale_from_dpi(dpi: u32) -> f64 {
    f64::from(dpi) / f64::from(USER_DEFAULT_DPI)
}

/// The process-wide nominal scale.
///
/// Owned by whichever bar sits on the primary screen and read by every
/// bar when it opens. Clones share the same value; bars live on one
/// UI thread so a `Cell` is enough.
#[derive(Debug, Clone)]
pub struct NominalScale(Rc<Cell<f64>>);

impl NominalScale {
    pub fn new(scale: f64) -> Self {
        Self(Rc::new(Cell::new(scale)))
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn set(&self, scale: f64) {
        self.0.set(scale);
    }
}

impl Default for NominalScale {
    fn default() -> Self {
        Self::new(1.0)
    }
}
