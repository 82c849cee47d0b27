//! Board bundle handed to the controller every tick
//!
//! Groups the external collaborators behind one generic parameter so the
//! controller's entry points stay readable. The firmware crate implements
//! this once; tests use the fakes in [`crate::testing`].

use super::display::MatrixDisplay;
use super::equation::EquationSource;
use super::rtc::TimeSource;
use super::store::NvStore;

pub trait Board {
    type Display: MatrixDisplay;
    type Store: NvStore;
    type Rtc: TimeSource;
    type Equations: EquationSource;

    fn display(&mut self) -> &mut Self::Display;
    fn store(&mut self) -> &mut Self::Store;
    fn rtc(&mut self) -> &mut Self::Rtc;
    fn equations(&mut self) -> &mut Self::Equations;

    /// Busy-wait for `ms`. Only the bounded flash sequences call this;
    /// nothing else runs on the core, so blocking here is deliberate.
    fn delay_ms(&mut self, ms: u32);
}
