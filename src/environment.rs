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
use serde::{Deserialize, Serialize};

/// The readings of a WBGT meter (i.e., the inputs for calculating
/// the WBGT index)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutdoorConditions {
    /// The dry bulb temperature of the air, in $`C`$
    pub dry_bulb_temperature: Float,

    /// The relative humidity, in $`\%`$
    pub relative_humidity: Float,

    /// The wind speed, in m/s
    pub wind_speed: Float,

    /// The temperature of the black globe, in $`C`$
    pub globe_temperature: Float,

    /// Whether the meter receives direct solar radiation
    pub sunlit: bool,
}

impl std::default::Default for OutdoorConditions {
    fn default() -> Self {
        const DEFAULT_AIR_TEMP: Float = 25.;
        Self {
            dry_bulb_temperature: DEFAULT_AIR_TEMP,
            relative_humidity: 50.,
            wind_speed: 0.3,
            globe_temperature: DEFAULT_AIR_TEMP,
            sunlit: false,
        }
    }
}

/// The conditions experienced by a person indoors (i.e., the inputs
/// for calculating the PMV index)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndoorConditions {
    /// Clothing insulation, in $`clo`$
    pub clothing: Float,

    /// Metabolic rate, in $`met`$
    pub metabolic_rate: Float,

    /// The air temperature, in $`C`$
    pub air_temperature: Float,

    /// The mean radiant temperature, in $`C`$
    pub mean_radiant_temperature: Float,

    /// The relative air speed, in m/s
    pub air_speed: Float,

    /// The relative humidity, in $`\%`$
    pub relative_humidity: Float,
}

impl std::default::Default for IndoorConditions {
    fn default() -> Self {
        const DEFAULT_AIR_TEMP: Float = 22.;
        Self {
            clothing: 1.0,
            metabolic_rate: 1.2,
            air_temperature: DEFAULT_AIR_TEMP,
            mean_radiant_temperature: DEFAULT_AIR_TEMP,
            air_speed: 0.1,
            relative_humidity: 50.,
        }
    }
}

/***********/
/* TESTING */
/***********/
