/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Scalar solvers for implicit energy balances.
//!
//! Both solvers have an iteration budget. Exhausting it is reported as
//! [`Error::NonConvergence`] and never as a partial result.

use crate::error::{Error, Result};
use crate::Float;
use serde::{Deserialize, Serialize};

/// Finds roots of $`f(x) = 0`$ using the secant method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootFinder {
    /// The solution is accepted when $`|f(x)|`$ is at or below this value
    pub tolerance: Float,

    /// Maximum number of secant steps
    pub max_iterations: usize,
}

impl std::default::Default for RootFinder {
    fn default() -> Self {
        Self {
            // Same as SciPy's fsolve
            tolerance: 1.49012e-8,
            max_iterations: 100,
        }
    }
}

impl RootFinder {
    /// Solves $`f(x) = 0`$ starting from `initial_guess`.
    ///
    /// The second point needed by the secant method is a small perturbation
    /// of `initial_guess`.
    pub fn solve<F>(&self, f: F, initial_guess: Float) -> Result<Float>
    where
        F: Fn(Float) -> Float,
    {
        let mut x0 = initial_guess;
        let mut f0 = f(x0);
        if f0.is_finite() && f0.abs() <= self.tolerance {
            return Ok(x0);
        }

        let mut x1 = x0 + 1e-4 * (1. + x0.abs());
        let mut f1 = f(x1);

        for iteration in 0..self.max_iterations {
            if !f0.is_finite() || !f1.is_finite() {
                log::warn!("Secant method found a non-finite residual at x = {x1}");
                return Err(Error::NonConvergence {
                    iterations: iteration,
                    residual: f1,
                });
            }
            if f1.abs() <= self.tolerance {
                log::debug!("Secant method converged to {x1} after {iteration} iterations");
                return Ok(x1);
            }
            let df = f1 - f0;
            if df == 0.0 {
                log::warn!("Secant method stalled at x = {x1} (residual = {f1})");
                return Err(Error::NonConvergence {
                    iterations: iteration,
                    residual: f1,
                });
            }
            let x2 = x1 - f1 * (x1 - x0) / df;
            x0 = x1;
            f0 = f1;
            x1 = x2;
            f1 = f(x1);
            log::trace!("Secant iteration {iteration}: x = {x1}, residual = {f1}");
        }

        if f1.is_finite() && f1.abs() <= self.tolerance {
            return Ok(x1);
        }
        log::warn!(
            "Secant method did not converge after {} iterations (residual = {f1})",
            self.max_iterations
        );
        Err(Error::NonConvergence {
            iterations: self.max_iterations,
            residual: f1,
        })
    }
}

/// Finds fixed points of $`x = g(x)`$ by successive substitution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedPoint {
    /// The iteration stops when two successive iterates differ by less than this
    pub tolerance: Float,

    /// Maximum number of substitutions
    pub max_iterations: usize,
}

impl std::default::Default for FixedPoint {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            max_iterations: 500,
        }
    }
}

impl FixedPoint {
    /// Iterates $`x_{k+1} = g(x_k)`$ starting from `initial_guess`.
    ///
    /// `g` always receives the previous iterate.
    pub fn solve<G>(&self, mut g: G, initial_guess: Float) -> Result<Float>
    where
        G: FnMut(Float) -> Float,
    {
        let mut x = initial_guess;
        let mut change = Float::INFINITY;
        for iteration in 1..=self.max_iterations {
            let next = g(x);
            if !next.is_finite() {
                log::warn!("Fixed point iteration produced a non-finite value after {x}");
                return Err(Error::NonConvergence {
                    iterations: iteration,
                    residual: next,
                });
            }
            change = (next - x).abs();
            x = next;
            log::trace!("Fixed point iteration {iteration}: x = {x}, change = {change}");
            if change < self.tolerance {
                log::debug!("Fixed point iteration converged to {x} after {iteration} iterations");
                return Ok(x);
            }
        }
        log::warn!(
            "Fixed point iteration did not converge after {} iterations (change = {change})",
            self.max_iterations
        );
        Err(Error::NonConvergence {
            iterations: self.max_iterations,
            residual: change,
        })
    }
}

/***********/
/* TESTING */
/***********/
