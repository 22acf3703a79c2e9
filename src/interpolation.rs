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

use crate::error::{Error, Result};
use crate::Float;

/// A piecewise-linear function defined by a set of knots.
///
/// The abscissas must be non-decreasing. Repeated abscissas are allowed
/// (e.g., a no-mass layer does not advance a cumulative RC axis), in which case
/// a query that lands exactly on them returns the ordinate of the first of the
/// repeated knots, except at the upper end of the domain, where the last knot
/// is returned. This makes sure that evaluating at the ends of the domain
/// always returns the ends of the ordinates.
///
/// The interpolant never extrapolates.
#[derive(Debug, Clone)]
pub struct LinearInterpolator<'a> {
    x: &'a [Float],
    y: &'a [Float],
}

impl<'a> LinearInterpolator<'a> {
    /// Builds a new interpolator from knots `x` and values `y`.
    pub fn new(x: &'a [Float], y: &'a [Float]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::invalid_profile(format!(
                "interpolation needs the same number of abscissas and ordinates... found {} and {}",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(Error::invalid_profile(
                "interpolation needs at least two knots",
            ));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(Error::invalid_profile("interpolation knots must be finite"));
        }
        if x.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::invalid_profile(
                "interpolation abscissas must be non-decreasing",
            ));
        }
        if x[x.len() - 1] <= x[0] {
            return Err(Error::invalid_profile(
                "interpolation domain has zero width",
            ));
        }
        Ok(Self { x, y })
    }

    /// The smallest value this interpolator accepts
    pub fn min(&self) -> Float {
        self.x[0]
    }

    /// The largest value this interpolator accepts
    pub fn max(&self) -> Float {
        self.x[self.x.len() - 1]
    }

    /// Evaluates the interpolant at `value`
    pub fn eval(&self, value: Float) -> Result<Float> {
        let (min, max) = (self.min(), self.max());
        // NaN fails both comparisons, so check it like this.
        if !(value >= min && value <= max) {
            return Err(Error::InterpolationRange { value, min, max });
        }

        let last = self.x.len() - 1;
        if value == max {
            return Ok(self.y[last]);
        }

        // First knot that is not smaller than value
        let hi = self.x.partition_point(|x| *x < value);
        if self.x[hi] == value {
            return Ok(self.y[hi]);
        }
        // x[hi-1] < value < x[hi]; hi cannot be zero because value > min
        let lo = hi - 1;
        let (x0, x1) = (self.x[lo], self.x[hi]);
        let (y0, y1) = (self.y[lo], self.y[hi]);
        Ok(y0 + (y1 - y0) * (value - x0) / (x1 - x0))
    }

    /// Evaluates the interpolant at every element of `values`
    pub fn eval_all(&self, values: &[Float]) -> Result<Vec<Float>> {
        values.iter().map(|v| self.eval(*v)).collect()
    }
}

/// Cumulative sum of a slice, like numpy's `cumsum`
pub fn cumulative_sum(values: &[Float]) -> Vec<Float> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += *v;
            Some(*acc)
        })
        .collect()
}

/// `n` evenly spaced values from `start` to `end`, both included.
///
/// The ends are set exactly so that they can be safely used as
/// interpolation queries.
pub fn linspace(start: Float, end: Float, n: usize) -> Vec<Float> {
    match n {
        0 => Vec::with_capacity(0),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Float;
            let mut ret: Vec<Float> = (0..n).map(|i| start + step * i as Float).collect();
            ret[n - 1] = end;
            ret
        }
    }
}

/***********/
/* TESTING */
/***********/
