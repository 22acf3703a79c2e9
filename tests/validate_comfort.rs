use approx::assert_abs_diff_eq;
use building_physics::pmv::{
    pmv_batch, solve_pmv_with, ClothingTemperatureStrategy, ComfortIndices, PmvConfig,
};
use building_physics::{compute_ppd, solve_pmv, Float, IndoorConditions};

/// Air temperature, mean radiant temperature, air speed, relative humidity,
/// metabolic rate, clothing and the PMV tabulated in ISO 7730 (Annex D)
const ISO_7730: [(Float, Float, Float, Float, Float, Float, Float); 12] = [
    (22., 22., 0.1, 60., 1.2, 0.5, -0.75),
    (27., 27., 0.1, 60., 1.2, 0.5, 0.77),
    (27., 27., 0.3, 60., 1.2, 0.5, 0.44),
    (23.5, 25.5, 0.1, 60., 1.2, 0.5, -0.01),
    (23.5, 25.5, 0.3, 60., 1.2, 0.5, -0.55),
    (19., 19., 0.1, 40., 1.2, 1.0, -0.60),
    (23.5, 23.5, 0.3, 40., 1.2, 1.0, 0.12),
    (23., 21., 0.1, 40., 1.2, 1.0, 0.05),
    (23., 21., 0.3, 40., 1.2, 1.0, -0.16),
    (22., 22., 0.1, 60., 1.6, 0.5, 0.05),
    (27., 27., 0.1, 60., 1.6, 0.5, 1.17),
    (27., 27., 0.3, 60., 1.6, 0.5, 0.95),
];

const CLOTHING: [Float; 6] = [0.3, 0.5, 1.0, 1.2, 2.0, 4.0];

/// PMV of a person at 1.2 met, in still air (0.1 m/s) at 50% relative humidity,
/// for each value in `CLOTHING`. Air and mean radiant temperature are equal.
///
/// These were obtained with a fixed point iteration that linearises radiation
/// around the mean of the clothing and radiant temperatures,
/// $`h_r = 4 \cdot 3.96 \times 10^{-8} (\bar{T} + 273)^3`$. The crate solves
/// the radiative exchange exactly, which moves the PMV by up to 0.0042.
const CLOTHING_SWEEP: [(Float, [Float; 6]); 5] = [
    (-5., [-11.373, -9.0914, -5.7095, -4.8834, -2.8321, -0.7841]),
    (0., [-9.5385, -7.578, -4.654, -3.9374, -2.1548, -0.3772]),
    (10., [-5.8553, -4.5271, -2.5143, -2.0167, -0.7814, 0.4655]),
    (20., [-2.1537, -1.4347, -0.3372, -0.0649, 0.6372, 1.3725]),
    (30., [1.4283, 1.6055, 1.9002, 1.9766, 2.1731, 2.3772]),
];

/// Largest difference allowed against `CLOTHING_SWEEP`
const SWEEP_TOLERANCE: Float = 5e-3;

fn solve(conditions: &IndoorConditions, strategy: ClothingTemperatureStrategy) -> ComfortIndices {
    let config = PmvConfig {
        strategy,
        ..PmvConfig::default()
    };
    solve_pmv_with(conditions, &config).unwrap()
}

#[test]
fn test_iso_7730_table() {
    let mut expected = Vec::with_capacity(ISO_7730.len());
    let mut found = Vec::with_capacity(ISO_7730.len());
    for (ta, tr, v, rh, met, clo, exp) in ISO_7730 {
        expected.push(exp);
        found.push(solve_pmv(clo, met, ta, tr, v, rh).unwrap());
    }
    for (exp, found) in expected.iter().zip(found.iter()) {
        assert_abs_diff_eq!(exp, found, epsilon = 0.05);
    }
}

#[test]
fn test_iso_7730_ppd() {
    // 22C, 0.5 clo, 1.2 met
    let pmv = solve_pmv(0.5, 1.2, 22., 22., 0.1, 60.).unwrap();
    assert_abs_diff_eq!(compute_ppd(pmv), 17., epsilon = 0.5);

    // 27C, 0.5 clo, 1.6 met
    let pmv = solve_pmv(0.5, 1.6, 27., 27., 0.1, 60.).unwrap();
    assert_abs_diff_eq!(compute_ppd(pmv), 34., epsilon = 0.5);
}

#[test]
fn test_clothing_sweep() {
    for (temperature, expected) in CLOTHING_SWEEP {
        for (clothing, exp) in CLOTHING.iter().zip(expected.iter()) {
            let conditions = IndoorConditions {
                clothing: *clothing,
                metabolic_rate: 1.2,
                air_temperature: temperature,
                mean_radiant_temperature: temperature,
                air_speed: 0.1,
                relative_humidity: 50.,
            };
            let fixed_point = solve(&conditions, ClothingTemperatureStrategy::FixedPoint);
            assert_abs_diff_eq!(*exp, fixed_point.pmv, epsilon = SWEEP_TOLERANCE);
            let secant = solve(&conditions, ClothingTemperatureStrategy::RootFinding);
            assert_abs_diff_eq!(*exp, secant.pmv, epsilon = SWEEP_TOLERANCE);
        }
    }
}

#[test]
fn test_fixed_point_vs_root_finding() {
    for (temperature, _) in CLOTHING_SWEEP {
        for clothing in CLOTHING {
            let conditions = IndoorConditions {
                clothing,
                metabolic_rate: 1.2,
                air_temperature: temperature,
                mean_radiant_temperature: temperature,
                air_speed: 0.1,
                relative_humidity: 50.,
            };
            let fixed_point = solve(&conditions, ClothingTemperatureStrategy::FixedPoint);
            let secant = solve(&conditions, ClothingTemperatureStrategy::RootFinding);
            assert_abs_diff_eq!(fixed_point.pmv, secant.pmv, epsilon = 5e-3);
            assert_abs_diff_eq!(
                fixed_point.clothing_temperature,
                secant.clothing_temperature,
                epsilon = 1e-2
            );
        }
    }
}

#[test]
fn test_clothing_temperature_is_between_skin_and_air() {
    for (ta, tr, v, rh, met, clo, _) in ISO_7730 {
        let conditions = IndoorConditions {
            clothing: clo,
            metabolic_rate: met,
            air_temperature: ta,
            mean_radiant_temperature: tr,
            air_speed: v,
            relative_humidity: rh,
        };
        let found = solve(&conditions, ClothingTemperatureStrategy::FixedPoint);
        let skin = 35.7 - 0.028 * met * 58.15;
        assert!(found.clothing_temperature < skin);
        assert!(found.clothing_temperature > ta.min(tr));
        assert!(found.convection_coefficient >= 12.1 * v.sqrt());
    }
}

#[test]
fn test_batch() {
    let rows: Vec<IndoorConditions> = ISO_7730
        .iter()
        .map(|(ta, tr, v, rh, met, clo, _)| IndoorConditions {
            clothing: *clo,
            metabolic_rate: *met,
            air_temperature: *ta,
            mean_radiant_temperature: *tr,
            air_speed: *v,
            relative_humidity: *rh,
        })
        .collect();
    let results = pmv_batch(&rows, &PmvConfig::default());
    for (r, (.., exp)) in results.iter().zip(ISO_7730.iter()) {
        let found = r.as_ref().unwrap();
        assert_abs_diff_eq!(*exp, found.pmv, epsilon = 0.05);
        assert_abs_diff_eq!(compute_ppd(found.pmv), found.ppd, epsilon = 1e-12);
    }
}
