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

//! The Wet Bulb Globe Temperature (WBGT) heat-stress index.
//!
//! The natural wet bulb temperature is not measured but derived from the
//! dry bulb temperature, humidity, wind speed and globe temperature by
//! solving the energy balance of a wet wick.

use crate::convection::ConvectionParams;
use crate::environment::OutdoorConditions;
use crate::error::Result;
use crate::psychrometrics::{saturation_vapor_pressure_with_offset, vapor_pressure_with_offset};
use crate::solver::RootFinder;
use crate::Float;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Offset between Celsius and Kelvin, as used by the globe and wick correlations
/// (including the saturation pressure at the wick)
const KELVIN: Float = 273.;

/// A black globe thermometer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Globe {
    /// The emissivity of the globe's surface
    pub emissivity: Float,

    /// The diameter of the globe, in $`m`$
    pub diameter: Float,
}

impl std::default::Default for Globe {
    fn default() -> Self {
        Self {
            emissivity: 0.95,
            diameter: 0.15,
        }
    }
}

/// Options for calculating the WBGT
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WbgtConfig {
    /// The globe thermometer whose readings are used
    pub globe: Globe,

    /// The natural wet bulb temperature (in $`C`$) from which the solver starts
    pub initial_guess: Float,

    /// The solver for the wick's energy balance
    pub root_finder: RootFinder,
}

impl std::default::Default for WbgtConfig {
    fn default() -> Self {
        Self {
            globe: Globe::default(),
            initial_guess: 20.0,
            root_finder: RootFinder::default(),
        }
    }
}

/// The result of a WBGT calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wbgt {
    /// The natural wet bulb temperature, in $`C`$
    pub natural_wet_bulb: Float,

    /// The WBGT index, in $`C`$
    pub wbgt: Float,
}

/// Calculates the mean radiant temperature (in $`C`$) from the readings of a
/// globe thermometer
///
/// ```math
/// T_r = \left( (T_g + 273)^4 + \frac{1.1 \times 10^8 v^{0.6}}{\epsilon D^{0.4}} (T_g - T_a) \right)^{1/4} - 273
/// ```
///
/// Returns NaN if the readings are inconsistent (i.e., the globe is so much
/// colder than the air that the term between brackets becomes negative).
pub fn mean_radiant_temperature(
    globe_temperature: Float,
    dry_bulb_temperature: Float,
    wind_speed: Float,
    globe: &Globe,
) -> Float {
    let forced = 1.1e8 * wind_speed.powf(0.6) / (globe.emissivity * globe.diameter.powf(0.4));
    ((globe_temperature + KELVIN).powi(4) + forced * (globe_temperature - dry_bulb_temperature))
        .powf(0.25)
        - KELVIN
}

/// The net heat gain (in $`W/m^2`$) of a natural wet bulb thermometer whose
/// wick is at `natural_wet_bulb`. It is zero at the natural wet bulb temperature.
///
/// ```math
/// g(T_{nw}) = 4.18 v^{0.444} (T_a - T_{nw}) + 10^{-8} \left( (T_r + 273)^4 - (T_{nw} + 273)^4 \right) - 77.1 v^{0.421} \left(P_{ws}(T_{nw}) - \frac{RH}{100} P_{ws}(T_a) \right)
/// ```
pub fn wet_bulb_residual(
    natural_wet_bulb: Float,
    dry_bulb_temperature: Float,
    relative_humidity: Float,
    wind_speed: Float,
    globe_temperature: Float,
    globe: &Globe,
) -> Float {
    let t_r = mean_radiant_temperature(globe_temperature, dry_bulb_temperature, wind_speed, globe);
    let wick = ConvectionParams {
        air_temperature: dry_bulb_temperature,
        air_speed: wind_speed,
        surface_temperature: natural_wet_bulb,
    };
    let radiation = 1e-8 * ((t_r + KELVIN).powi(4) - (natural_wet_bulb + KELVIN).powi(4));
    let evaporation = wick.get_wick_evaporative_loss(
        saturation_vapor_pressure_with_offset(natural_wet_bulb, KELVIN),
        vapor_pressure_with_offset(dry_bulb_temperature, relative_humidity, KELVIN),
    );
    wick.get_wick_convective_gain() + radiation - evaporation
}

/// Solves the natural wet bulb temperature (in $`C`$) with the default options
pub fn solve_wet_bulb(
    dry_bulb_temperature: Float,
    relative_humidity: Float,
    wind_speed: Float,
    globe_temperature: Float,
) -> Result<Float> {
    solve_wet_bulb_with(
        dry_bulb_temperature,
        relative_humidity,
        wind_speed,
        globe_temperature,
        &WbgtConfig::default(),
    )
}

/// Solves the natural wet bulb temperature (in $`C`$)
pub fn solve_wet_bulb_with(
    dry_bulb_temperature: Float,
    relative_humidity: Float,
    wind_speed: Float,
    globe_temperature: Float,
    config: &WbgtConfig,
) -> Result<Float> {
    let balance = |t_nw: Float| {
        wet_bulb_residual(
            t_nw,
            dry_bulb_temperature,
            relative_humidity,
            wind_speed,
            globe_temperature,
            &config.globe,
        )
    };
    config.root_finder.solve(balance, config.initial_guess)
}

/// Weights the natural wet bulb, globe and dry bulb temperatures into the WBGT
/// index.
///
/// * Sunlit: $`WBGT = 0.7 T_{nw} + 0.3 T_g`$
/// * Shaded: $`WBGT = 0.7 T_{nw} + 0.2 T_g + 0.1 T_a`$
pub fn wbgt_index(
    natural_wet_bulb: Float,
    globe_temperature: Float,
    dry_bulb_temperature: Float,
    sunlit: bool,
) -> Float {
    if sunlit {
        0.7 * natural_wet_bulb + 0.3 * globe_temperature
    } else {
        0.7 * natural_wet_bulb + 0.2 * globe_temperature + 0.1 * dry_bulb_temperature
    }
}

/// Calculates the natural wet bulb temperature and the WBGT index, with the
/// default options
pub fn compute_wbgt(
    dry_bulb_temperature: Float,
    relative_humidity: Float,
    wind_speed: Float,
    globe_temperature: Float,
    sunlit: bool,
) -> Result<Wbgt> {
    let conditions = OutdoorConditions {
        dry_bulb_temperature,
        relative_humidity,
        wind_speed,
        globe_temperature,
        sunlit,
    };
    compute_wbgt_with(&conditions, &WbgtConfig::default())
}

/// Calculates the natural wet bulb temperature and the WBGT index
pub fn compute_wbgt_with(conditions: &OutdoorConditions, config: &WbgtConfig) -> Result<Wbgt> {
    let natural_wet_bulb = solve_wet_bulb_with(
        conditions.dry_bulb_temperature,
        conditions.relative_humidity,
        conditions.wind_speed,
        conditions.globe_temperature,
        config,
    )?;
    let wbgt = wbgt_index(
        natural_wet_bulb,
        conditions.globe_temperature,
        conditions.dry_bulb_temperature,
        conditions.sunlit,
    );
    Ok(Wbgt {
        natural_wet_bulb,
        wbgt,
    })
}

/// Calculates the WBGT for many readings. Each reading is solved on its own,
/// so one failure does not affect the others.
///
/// Readings are processed in parallel if the `parallel` feature is enabled.
pub fn wbgt_batch(conditions: &[OutdoorConditions], config: &WbgtConfig) -> Vec<Result<Wbgt>> {
    #[cfg(feature = "parallel")]
    let iter = conditions.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = conditions.iter();

    iter.map(|c| compute_wbgt_with(c, config)).collect()
}

/***********/
/* TESTING */
/***********/
