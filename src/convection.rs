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

/// Represents the convective exchange between a surface (i.e., a clothed
/// body or a wet wick) and the air around it
#[derive(Debug, Clone, Copy)]
pub struct ConvectionParams {
    /// The dry bulb temperature of the air, in $`C`$
    pub air_temperature: Float,

    /// The air speed relative to the surface, in m/s
    pub air_speed: Float,

    /// The surface temperature in $`C`$
    pub surface_temperature: Float,
}

impl ConvectionParams {
    /// Calculates the natural convection coefficient of a clothed body,
    /// according to Fanger's model (as used in ISO 7730)
    ///
    /// ```math
    /// h_n = 2.38 |T_{cl} - T_a|^{0.25}
    /// ```
    pub fn get_natural_convection_coefficient(&self) -> Float {
        let delta_t = self.surface_temperature - self.air_temperature;
        2.38 * delta_t.abs().powf(0.25)
    }

    /// Calculates the forced convection coefficient of a clothed body
    ///
    /// ```math
    /// h_f = 12.1 \sqrt{v}
    /// ```
    pub fn get_forced_convection_coefficient(&self) -> Float {
        12.1 * self.air_speed.sqrt()
    }

    /// Calculates the convection coefficient of a clothed body, which is the
    /// largest of the natural and the forced convection coefficients.
    pub fn get_clothing_convection_coefficient(&self) -> Float {
        let natural = self.get_natural_convection_coefficient();
        let forced = self.get_forced_convection_coefficient();
        if natural > forced {
            natural
        } else {
            forced
        }
    }

    /// Calculates the convective heat flow (in $`W/m^2`$) into a natural
    /// wet bulb thermometer's wick
    ///
    /// ```math
    /// q_c = 4.18 v^{0.444} (T_a - T_{nw})
    /// ```
    pub fn get_wick_convective_gain(&self) -> Float {
        4.18 * self.air_speed.powf(0.444) * (self.air_temperature - self.surface_temperature)
    }

    /// Calculates the evaporative heat loss (in $`W/m^2`$) from a natural
    /// wet bulb thermometer's wick, given the saturation vapour pressure at the
    /// wick `p_wick` and the vapour pressure of the air `p_air` (both in $`kPa`$)
    ///
    /// ```math
    /// q_e = 77.1 v^{0.421} (P_{ws}(T_{nw}) - P_a)
    /// ```
    pub fn get_wick_evaporative_loss(&self, p_wick: Float, p_air: Float) -> Float {
        77.1 * self.air_speed.powf(0.421) * (p_wick - p_air)
    }
}

/***********/
/* TESTING */
/***********/
