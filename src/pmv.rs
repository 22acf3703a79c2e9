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

//! Fanger's Predicted Mean Vote (PMV) and Predicted Percentage of
//! Dissatisfied (PPD), as in ISO 7730.
//!
//! The clothing surface temperature $`T_{cl}`$ appears on both sides of the
//! clothing's heat balance, so it is solved iteratively before the
//! PMV can be evaluated.

use crate::convection::ConvectionParams;
use crate::environment::IndoorConditions;
use crate::error::Result;
use crate::psychrometrics::vapor_pressure;
use crate::solver::{FixedPoint, RootFinder};
use crate::Float;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One $`met`$, in $`W/m^2`$
const MET: Float = 58.15;

/// One $`clo`$, in $`m^2.K/W`$
const CLO: Float = 0.155;

/// Offset between Celsius and Kelvin, as used by ISO 7730
const KELVIN: Float = 273.;

/// Radiative exchange coefficient of the clothed body, $`\epsilon \sigma f_{eff}`$
const RADIATION: Float = 3.96e-8;

/// The algorithm used for solving the clothing surface temperature
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClothingTemperatureStrategy {
    /// Successive substitution into the rearranged heat balance, starting
    /// from the air temperature
    #[default]
    FixedPoint,

    /// A secant root finder applied to the heat balance residual, starting
    /// from the air temperature
    RootFinding,
}

/// Options for calculating the PMV
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmvConfig {
    /// How to solve the clothing surface temperature
    pub strategy: ClothingTemperatureStrategy,

    /// Used when `strategy` is [`ClothingTemperatureStrategy::FixedPoint`]
    pub fixed_point: FixedPoint,

    /// Used when `strategy` is [`ClothingTemperatureStrategy::RootFinding`]
    pub root_finder: RootFinder,

    /// External work, in $`met`$
    pub external_work: Float,
}

/// The thermal comfort indices, and the intermediate values that
/// lead to them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComfortIndices {
    /// Predicted Mean Vote
    pub pmv: Float,

    /// Predicted Percentage of Dissatisfied, in $`\%`$
    pub ppd: Float,

    /// The clothing surface temperature, in $`C`$
    pub clothing_temperature: Float,

    /// The convection coefficient of the clothing surface, in $`W/m^2.K`$
    pub convection_coefficient: Float,
}

/// Calculates the clothing area factor $`f_{cl}`$ (i.e., the ratio between
/// the clothed and the nude surface of the body)
pub fn clothing_area_factor(clothing: Float) -> Float {
    if clothing < 0.5 {
        1.00 + 0.2 * clothing
    } else {
        1.05 + 0.1 * clothing
    }
}

/// The heat balance of the surface of a clothed body
struct ClothingBalance {
    /// Clothing insulation, in $`m^2.K/W`$
    insulation: Float,
    area_factor: Float,
    /// Mean skin temperature
    skin_temperature: Float,
    air_temperature: Float,
    mean_radiant_temperature: Float,
    air_speed: Float,
}

impl ClothingBalance {
    fn new(conditions: &IndoorConditions, external_work: Float) -> Self {
        let metabolism = (conditions.metabolic_rate - external_work) * MET;
        Self {
            insulation: CLO * conditions.clothing,
            area_factor: clothing_area_factor(conditions.clothing),
            skin_temperature: 35.7 - 0.028 * metabolism,
            air_temperature: conditions.air_temperature,
            mean_radiant_temperature: conditions.mean_radiant_temperature,
            air_speed: conditions.air_speed,
        }
    }

    fn convection_coefficient(&self, clothing_temperature: Float) -> Float {
        ConvectionParams {
            air_temperature: self.air_temperature,
            air_speed: self.air_speed,
            surface_temperature: clothing_temperature,
        }
        .get_clothing_convection_coefficient()
    }

    /// ```math
    /// h(T_{cl}) = T_s - I_{cl} \left( 3.96 \times 10^{-8} f_{cl} \left( (T_{cl}+273)^4 - (T_r+273)^4 \right) + f_{cl} h_c (T_{cl} - T_a) \right) - T_{cl}
    /// ```
    fn residual(&self, clothing_temperature: Float) -> Float {
        let hc = self.convection_coefficient(clothing_temperature);
        let radiation = RADIATION
            * self.area_factor
            * ((clothing_temperature + KELVIN).powi(4)
                - (self.mean_radiant_temperature + KELVIN).powi(4));
        let convection = self.area_factor * hc * (clothing_temperature - self.air_temperature);
        self.skin_temperature - self.insulation * (radiation + convection) - clothing_temperature
    }

    /// Solves the heat balance for $`T_{cl}`$ with every coefficient
    /// evaluated at the previous iterate `clothing_temperature`.
    ///
    /// The radiative exchange is written as $`h_r (T_{cl} - T_r)`$, with
    ///
    /// ```math
    /// h_r = 3.96 \times 10^{-8} (T_{cl}^2 + T_r^2)(T_{cl} + T_r)
    /// ```
    ///
    /// (absolute temperatures), which is exact, so the fixed point is the root
    /// of [`Self::residual`].
    fn substitute(&self, clothing_temperature: Float) -> Float {
        let t_cl = clothing_temperature + KELVIN;
        let t_r = self.mean_radiant_temperature + KELVIN;
        let hr = RADIATION * (t_cl * t_cl + t_r * t_r) * (t_cl + t_r);
        let hc = self.convection_coefficient(clothing_temperature);
        let operative =
            (hr * self.mean_radiant_temperature + hc * self.air_temperature) / (hr + hc);
        let k = self.insulation * self.area_factor * (hr + hc);
        (self.skin_temperature + k * operative) / (1. + k)
    }
}

/// Solves the clothing surface temperature, in $`C`$
pub fn clothing_surface_temperature(
    conditions: &IndoorConditions,
    config: &PmvConfig,
) -> Result<Float> {
    let balance = ClothingBalance::new(conditions, config.external_work);
    let initial_guess = conditions.air_temperature;
    match config.strategy {
        ClothingTemperatureStrategy::FixedPoint => config
            .fixed_point
            .solve(|t_cl| balance.substitute(t_cl), initial_guess),
        ClothingTemperatureStrategy::RootFinding => config
            .root_finder
            .solve(|t_cl| balance.residual(t_cl), initial_guess),
    }
}

/// Calculates the PMV, the PPD and the clothing surface temperature
pub fn solve_pmv_with(conditions: &IndoorConditions, config: &PmvConfig) -> Result<ComfortIndices> {
    let clothing_temperature = clothing_surface_temperature(conditions, config)?;
    let balance = ClothingBalance::new(conditions, config.external_work);
    let hc = balance.convection_coefficient(clothing_temperature);

    let m = conditions.metabolic_rate * MET;
    let mw = (conditions.metabolic_rate - config.external_work) * MET;
    let ta = conditions.air_temperature;
    let tr = conditions.mean_radiant_temperature;
    let fcl = balance.area_factor;
    // in Pa
    let pa = vapor_pressure(ta, conditions.relative_humidity) * 1000.;

    let load = mw
        - 3.05e-3 * (5733. - 6.99 * mw - pa)
        - 0.42 * (mw - MET)
        - 1.7e-5 * m * (5867. - pa)
        - 0.0014 * m * (34. - ta)
        - RADIATION * fcl * ((clothing_temperature + KELVIN).powi(4) - (tr + KELVIN).powi(4))
        - fcl * hc * (clothing_temperature - ta);

    let pmv = (0.303 * (-0.036 * m).exp() + 0.028) * load;
    Ok(ComfortIndices {
        pmv,
        ppd: compute_ppd(pmv),
        clothing_temperature,
        convection_coefficient: hc,
    })
}

/// Calculates the PMV index with the default options.
///
/// * `clothing`: clothing insulation, in $`clo`$
/// * `metabolic_rate`: in $`met`$
/// * `air_temperature` and `mean_radiant_temperature`: in $`C`$
/// * `air_speed`: relative air speed, in m/s
/// * `relative_humidity`: in $`\%`$
pub fn solve_pmv(
    clothing: Float,
    metabolic_rate: Float,
    air_temperature: Float,
    mean_radiant_temperature: Float,
    air_speed: Float,
    relative_humidity: Float,
) -> Result<Float> {
    let conditions = IndoorConditions {
        clothing,
        metabolic_rate,
        air_temperature,
        mean_radiant_temperature,
        air_speed,
        relative_humidity,
    };
    Ok(solve_pmv_with(&conditions, &PmvConfig::default())?.pmv)
}

/// Calculates the PPD (in $`\%`$) corresponding to a PMV
///
/// ```math
/// PPD = 100 - 95 e^{-0.03353 PMV^4 - 0.2179 PMV^2}
/// ```
pub fn compute_ppd(pmv: Float) -> Float {
    100. - 95. * (-0.03353 * pmv.powi(4) - 0.2179 * pmv.powi(2)).exp()
}

/// Calculates the comfort indices for many conditions. Each one is solved on its
/// own, so one failure does not affect the others.
///
/// Conditions are processed in parallel if the `parallel` feature is enabled.
pub fn pmv_batch(conditions: &[IndoorConditions], config: &PmvConfig) -> Vec<Result<ComfortIndices>> {
    #[cfg(feature = "parallel")]
    let iter = conditions.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = conditions.iter();

    iter.map(|c| solve_pmv_with(c, config)).collect()
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    fn root_finding() -> PmvConfig {
        PmvConfig {
            strategy: ClothingTemperatureStrategy::RootFinding,
            ..PmvConfig::default()
        }
    }

    #[test]
    fn test_area_factor() {
        assert_relative_eq!(clothing_area_factor(0.0), 1.0);
        assert_relative_eq!(clothing_area_factor(0.3), 1.06, max_relative = 1e-12);
        assert_relative_eq!(clothing_area_factor(0.5), 1.1, max_relative = 1e-12);
        assert_relative_eq!(clothing_area_factor(1.0), 1.15, max_relative = 1e-12);
    }

    #[test]
    fn test_ppd() {
        assert_relative_eq!(compute_ppd(0.0), 5.0, max_relative = 1e-12);
        for pmv in [0.3, 0.5, 1.0, 2.2, 3.0] {
            assert_eq!(compute_ppd(pmv), compute_ppd(-pmv));
            assert!(compute_ppd(pmv) > 5.0);
        }
        assert!(compute_ppd(1.0) < compute_ppd(2.0));
    }

    #[test]
    fn test_fixed_point_is_the_root() {
        let conditions = IndoorConditions {
            clothing: 0.5,
            metabolic_rate: 1.2,
            air_temperature: 22.,
            mean_radiant_temperature: 22.,
            air_speed: 0.1,
            relative_humidity: 60.,
        };
        let balance = ClothingBalance::new(&conditions, 0.0);
        let t_cl = RootFinder {
            tolerance: 1e-12,
            max_iterations: 100,
        }
        .solve(|t| balance.residual(t), 22.)
        .unwrap();
        // The rearranged balance leaves the root where it is
        assert_relative_eq!(balance.substitute(t_cl), t_cl, max_relative = 1e-9);
    }

    #[test]
    fn test_strategies_agree() {
        let conditions = IndoorConditions {
            clothing: 1.0,
            metabolic_rate: 1.2,
            air_temperature: 19.,
            mean_radiant_temperature: 19.,
            air_speed: 0.1,
            relative_humidity: 40.,
        };
        let a = solve_pmv_with(&conditions, &PmvConfig::default()).unwrap();
        let b = solve_pmv_with(&conditions, &root_finding()).unwrap();
        assert!((a.clothing_temperature - b.clothing_temperature).abs() < 0.01);
        assert!((a.pmv - b.pmv).abs() < 0.005, "{} vs {}", a.pmv, b.pmv);
    }

    #[test]
    fn test_reference_case() {
        // ISO 7730, Annex D, first case
        let pmv = solve_pmv(0.5, 1.2, 22., 22., 0.1, 60.).unwrap();
        assert!((pmv - -0.75).abs() < 0.05, "pmv = {pmv}");
        assert!((compute_ppd(pmv) - 17.).abs() < 1.);
    }

    #[test]
    fn test_naked() {
        let c = IndoorConditions {
            clothing: 0.0,
            metabolic_rate: 1.0,
            air_temperature: 30.,
            mean_radiant_temperature: 30.,
            air_speed: 0.0,
            relative_humidity: 50.,
        };
        // Without insulation, the clothing surface is the skin
        let r = solve_pmv_with(&c, &PmvConfig::default()).unwrap();
        assert_relative_eq!(r.clothing_temperature, 35.7 - 0.028 * MET, max_relative = 1e-9);
        let r2 = solve_pmv_with(&c, &root_finding()).unwrap();
        assert_relative_eq!(r.pmv, r2.pmv, max_relative = 1e-6);
    }

    #[test]
    fn test_warmer_is_warmer() {
        let cold = solve_pmv(1.0, 1.2, 18., 18., 0.1, 50.).unwrap();
        let warm = solve_pmv(1.0, 1.2, 26., 26., 0.1, 50.).unwrap();
        assert!(warm > cold);
        let light = solve_pmv(0.5, 1.2, 22., 22., 0.1, 50.).unwrap();
        let heavy = solve_pmv(2.0, 1.2, 22., 22., 0.1, 50.).unwrap();
        assert!(heavy > light);
    }

    #[test]
    fn test_budget_exhausted() {
        let config = PmvConfig {
            fixed_point: FixedPoint {
                tolerance: 1e-15,
                max_iterations: 1,
            },
            ..PmvConfig::default()
        };
        let r = solve_pmv_with(&IndoorConditions::default(), &config);
        assert!(matches!(r, Err(Error::NonConvergence { .. })));
    }

    #[test]
    fn test_batch() {
        let rows: Vec<IndoorConditions> = [18., 22., 26.]
            .iter()
            .map(|t| IndoorConditions {
                air_temperature: *t,
                mean_radiant_temperature: *t,
                ..IndoorConditions::default()
            })
            .collect();
        let config = PmvConfig::default();
        let results = pmv_batch(&rows, &config);
        assert_eq!(results.len(), 3);
        for (row, found) in rows.iter().zip(results.iter()) {
            let exp = solve_pmv_with(row, &config).unwrap();
            assert_eq!(found.as_ref().unwrap(), &exp);
        }
    }

    #[test]
    fn test_config_from_json() {
        let config: PmvConfig =
            serde_json::from_str(r#"{"strategy": "RootFinding", "fixed_point": {"tolerance": 0.0001}}"#)
                .unwrap();
        assert_eq!(config.strategy, ClothingTemperatureStrategy::RootFinding);
        assert_eq!(config.fixed_point.tolerance, 0.0001);
        assert_eq!(config.fixed_point.max_iterations, 500);
        assert_eq!(config.external_work, 0.0);
    }
}
