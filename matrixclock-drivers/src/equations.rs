//! Equation generator
//!
//! Turns an hour or minute value into a small arithmetic puzzle. Pure
//! apart from the PRNG word; the clock face calls it once per displayed
//! value.
//!
//! Difficulty selects the operator mix:
//! 1 addition, 2 subtraction, 3 multiplication (factorable values),
//! 4 division, 5 multiply-add.

use core::fmt::Write as _;

use heapless::String;

use matrixclock_core::config::EQUATION_LEN;
use matrixclock_core::rng::XorShift32;
use matrixclock_core::traits::EquationSource;

pub struct Equations {
    rng: XorShift32,
}

impl Equations {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: XorShift32::new(seed),
        }
    }

    fn addition(&mut self, value: u32, out: &mut String<EQUATION_LEN>) {
        let a = self.rng.below(value + 1);
        let _ = write!(out, "{}+{}", a, value - a);
    }

    /// Random factor of `value` in 2..=9, if any.
    fn pick_factor(&mut self, value: u32) -> Option<u32> {
        let mut factors = [0u32; 8];
        let mut count = 0;
        for f in 2..=9 {
            if value % f == 0 {
                factors[count] = f;
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(factors[self.rng.below(count as u32) as usize])
        }
    }
}

impl EquationSource for Equations {
    fn equation(&mut self, value: u8, difficulty: u8, out: &mut String<EQUATION_LEN>) {
        out.clear();
        let value = value as u32;

        match difficulty.clamp(1, 5) {
            1 => self.addition(value, out),
            2 => {
                let b = self.rng.range(1, 20);
                let _ = write!(out, "{}-{}", value + b, b);
            }
            3 => match (value, self.pick_factor(value)) {
                // 0 has every factor; 1 and primes above 9 have none
                (v, Some(f)) if v > 0 => {
                    let _ = write!(out, "{}*{}", f, v / f);
                }
                _ => self.addition(value, out),
            },
            4 => {
                let d = self.rng.range(2, 4);
                let _ = write!(out, "{}/{}", value * d, d);
            }
            _ => {
                let f = self.rng.range(2, 9);
                let q = value / f;
                let c = value - f * q;
                if q == 0 {
                    self.addition(value, out);
                } else if c == 0 {
                    let _ = write!(out, "{}*{}", f, q);
                } else {
                    let _ = write!(out, "{}*{}+{}", f, q, c);
                }
            }
        }
    }
}
