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

use crate::Float;

/// The temperature, in $`C`$, at which [`saturation_vapor_pressure`] switches
/// from the over-ice correlation to the over-water one.
pub const TRIPLE_POINT: Float = 0.01;

/// The coefficients of one branch of the Wexler-Hyland correlation,
///
/// ```math
/// \ln(P_{ws}) = \frac{c_{-1}}{T} + \sum_{i=0}^{4} c_i T^i + c_{ln} \ln(T)
/// ```
///
/// with $`T`$ in $`K`$ and $`P_{ws}`$ in $`Pa`$.
#[derive(Debug, Clone, Copy)]
struct WexlerHyland {
    inverse: Float,
    polynomial: [Float; 5],
    log: Float,
}

/// Saturation over liquid water (i.e., above the triple point)
const OVER_WATER: WexlerHyland = WexlerHyland {
    inverse: -0.58002206e4,
    polynomial: [0.13914993e1, -0.48640239e-1, 0.41764768e-4, -0.14452093e-7, 0.0],
    log: 0.65459673e1,
};

/// Saturation over ice
const OVER_ICE: WexlerHyland = WexlerHyland {
    inverse: -0.56745359e4,
    polynomial: [
        0.63925247e1,
        -0.96778430e-2,
        0.62215701e-6,
        0.20747825e-8,
        -0.94840240e-12,
    ],
    log: 0.41635019e1,
};

impl WexlerHyland {
    /// Saturation pressure, in $`Pa`$, at temperature `temp` (in $`K`$)
    fn pressure(&self, temp: Float) -> Float {
        let poly = self
            .polynomial
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * temp + c);
        (self.inverse / temp + poly + self.log * temp.ln()).exp()
    }
}

/// Calculates the saturation vapour pressure (in $`kPa`$) at temperature `t` (in $`C`$),
/// using the Wexler-Hyland correlation.
///
/// The over-water branch is used from [`TRIPLE_POINT`] upwards and the
/// over-ice branch below it. There is no blending between the two.
pub fn saturation_vapor_pressure(t: Float) -> Float {
    saturation_vapor_pressure_with_offset(t, crate::KELVIN)
}

/// Same as [`saturation_vapor_pressure`], but converting `t` into absolute
/// temperature as `t + kelvin_offset`.
///
/// Some correlations (e.g., the natural wet bulb balance) were fitted
/// with an offset of 273 instead of 273.15.
pub fn saturation_vapor_pressure_with_offset(t: Float, kelvin_offset: Float) -> Float {
    let branch = if t >= TRIPLE_POINT {
        &OVER_WATER
    } else {
        &OVER_ICE
    };
    branch.pressure(t + kelvin_offset) / 1000.
}

/// Calculates the partial vapour pressure (in $`kPa`$) of air at temperature `t`
/// (in $`C`$) and relative humidity `rh` (in $`\%`$)
pub fn vapor_pressure(t: Float, rh: Float) -> Float {
    rh * saturation_vapor_pressure(t) / 100.
}

/// Same as [`vapor_pressure`], with the Kelvin offset of
/// [`saturation_vapor_pressure_with_offset`]
pub fn vapor_pressure_with_offset(t: Float, rh: Float, kelvin_offset: Float) -> Float {
    rh * saturation_vapor_pressure_with_offset(t, kelvin_offset) / 100.
}

/***********/
/* TESTING */
/***********/
