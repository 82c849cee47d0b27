//! Equation generator trait
//!
//! The clock face shows the hour and minute as small arithmetic puzzles.
//! Generation is a pure utility; the core only defines the seam.

use heapless::String;

use crate::config::EQUATION_LEN;

/// Produces an arithmetic expression that evaluates to a given value.
pub trait EquationSource {
    /// Write an expression evaluating to `value` into `out` (cleared
    /// first). `difficulty` ranges 1..=5 and selects the operator mix.
    fn equation(&mut self, value: u8, difficulty: u8, out: &mut String<EQUATION_LEN>);
}
