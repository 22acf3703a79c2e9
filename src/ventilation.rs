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

//! Ventilation driven by the temperature difference between the inside
//! and the outside of a building (i.e., stack effect).
//!
//! Openings are described by their discharge coefficient $`\alpha`$ and their
//! area $`A`$. Several openings are lumped together into a single effective
//! area $`\alpha A`$.

use crate::Float;

/// Gravitational acceleration, in $`m/s^2`$
const GRAVITY: Float = 9.8;

/// Offset between Celsius and Kelvin used for the air density
const KELVIN: Float = 273.;

/// Effective area ($`m^2`$) of two openings that the air crosses side by side
///
/// ```math
/// \alpha A = \alpha_1 A_1 + \alpha_2 A_2
/// ```
pub fn effective_area_parallel(
    discharge_1: Float,
    area_1: Float,
    discharge_2: Float,
    area_2: Float,
) -> Float {
    discharge_1 * area_1 + discharge_2 * area_2
}

/// Effective area ($`m^2`$) of two openings that the air crosses one after the
/// other (e.g., an inlet low on the facade and an outlet near the roof)
///
/// ```math
/// \alpha A = \frac{1}{\sqrt{\left(\frac{1}{\alpha_1 A_1}\right)^2 + \left(\frac{1}{\alpha_2 A_2}\right)^2}}
/// ```
///
/// A closed opening (i.e., zero area) closes the whole path.
pub fn effective_area_series(
    discharge_1: Float,
    area_1: Float,
    discharge_2: Float,
    area_2: Float,
) -> Float {
    let a1 = discharge_1 * area_1;
    let a2 = discharge_2 * area_2;
    if a1 == 0.0 || a2 == 0.0 {
        return 0.0;
    }
    1. / ((1. / a1).powi(2) + (1. / a2).powi(2)).sqrt()
}

/// Ventilation rate, in $`m^3/s`$, driven by the stack effect
///
/// ```math
/// Q = \alpha A \sqrt{\frac{2 g h |T_i - T_o|}{273 + T_i}}
/// ```
///
/// * `effective_area`: $`\alpha A`$, in $`m^2`$
/// * `height`: vertical distance between the inlet and the outlet, in $`m`$
/// * `inside_temperature` and `outside_temperature`: in $`C`$
///
/// The flow direction depends on which side is warmer; only its magnitude
/// is returned.
pub fn stack_ventilation_rate(
    effective_area: Float,
    height: Float,
    inside_temperature: Float,
    outside_temperature: Float,
) -> Float {
    let delta_t = (inside_temperature - outside_temperature).abs();
    effective_area * (2. * GRAVITY * height * delta_t / (KELVIN + inside_temperature)).sqrt()
}

/// Calculates the stack ventilation rate while the inside temperature rises
/// from `inside_temperature` by `step` until the temperature difference grows by
/// `max_difference`. The outside temperature stays fixed.
///
/// Returns pairs of (inside-outside temperature difference in $`C`$,
/// ventilation rate in $`m^3/h`$).
pub fn stack_ventilation_sweep(
    effective_area: Float,
    height: Float,
    inside_temperature: Float,
    outside_temperature: Float,
    step: Float,
    max_difference: Float,
) -> Vec<(Float, Float)> {
    if step.is_nan() || step <= 0.0 || !max_difference.is_finite() || max_difference < 0.0 {
        log::warn!(
            "Cannot sweep up to {max_difference} C in steps of {step} C... returning no points"
        );
        return Vec::new();
    }
    let n_points = (max_difference / step).floor() as usize + 1;
    (0..n_points)
        .map(|i| {
            let t_inside = inside_temperature + step * i as Float;
            let q = stack_ventilation_rate(effective_area, height, t_inside, outside_temperature);
            (t_inside - outside_temperature, q * 3600.)
        })
        .collect()
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parallel() {
        assert_relative_eq!(effective_area_parallel(0.6, 2., 0.7, 1.), 1.9, max_relative = 1e-12);
        assert_eq!(effective_area_parallel(0.6, 0., 0.7, 0.), 0.0);
    }

    #[test]
    fn test_series() {
        // Both openings count
        let found = effective_area_series(0.6, 2., 0.6, 1.);
        assert_relative_eq!(found, 0.5366563145999494, max_relative = 1e-12);
        assert_relative_eq!(found, effective_area_series(0.6, 1., 0.6, 2.), max_relative = 1e-12);

        // Two equal openings in series
        let found = effective_area_series(0.5, 1., 0.5, 1.);
        assert_relative_eq!(found, 0.5 / (2. as Float).sqrt(), max_relative = 1e-12);

        // Smaller than either opening
        assert!(found < 0.5);

        assert_eq!(effective_area_series(0.6, 0., 0.6, 1.), 0.0);
    }

    #[test]
    fn test_rate() {
        let q = stack_ventilation_rate(1., 1., 20., 0.);
        assert_relative_eq!(q, 1.1566693386808387, max_relative = 1e-12);

        // No difference, no flow
        assert_eq!(stack_ventilation_rate(1., 3., 20., 20.), 0.0);

        // Colder inside still drives a flow
        assert!(stack_ventilation_rate(1., 3., 10., 20.) > 0.0);

        // Proportional to the effective area
        assert_relative_eq!(
            stack_ventilation_rate(2., 3., 25., 5.),
            2. * stack_ventilation_rate(1., 3., 25., 5.),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_sweep() {
        let area = effective_area_series(0.6, 2., 0.6, 1.);
        let data = stack_ventilation_sweep(area, 3., 0., 0., 1., 30.);
        assert_eq!(data.len(), 31);
        assert_eq!(data[0], (0., 0.));
        assert_relative_eq!(data[10].0, 10.);
        assert_relative_eq!(data[10].1, 2784.8011519371335, max_relative = 1e-9);
        for pair in data.windows(2) {
            assert!(pair[1].1 > pair[0].1);
        }

        let data = stack_ventilation_sweep(area, 3., 20., 10., 5., 12.);
        let deltas: Vec<Float> = data.iter().map(|(dt, _)| *dt).collect();
        assert_eq!(deltas, vec![10., 15., 20.]);
    }

    #[test]
    fn test_sweep_bad_step() {
        assert!(stack_ventilation_sweep(1., 3., 0., 0., 0., 30.).is_empty());
        assert!(stack_ventilation_sweep(1., 3., 0., 0., -1., 30.).is_empty());
        assert!(stack_ventilation_sweep(1., 3., 0., 0., 1., -1.).is_empty());
        assert!(stack_ventilation_sweep(1., 3., 0., 0., 1., Float::NAN).is_empty());
        assert!(stack_ventilation_sweep(1., 3., 0., 0., 1., Float::INFINITY).is_empty());
        assert!(stack_ventilation_sweep(1., 3., 0., 0., Float::NAN, 30.).is_empty());
    }
}
