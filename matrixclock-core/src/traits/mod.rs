//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod board;
pub mod display;
pub mod equation;
pub mod rtc;
pub mod store;

pub use board::Board;
pub use display::{Color, DisplayExt, Half, MatrixDisplay};
pub use equation::EquationSource;
pub use rtc::{DateTime, RtcError, TimeSource};
pub use store::{NvStore, StoreError};
