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
use crate::interpolation::{cumulative_sum, linspace, LinearInterpolator};
use crate::Float;

/// The layers of a wall, from the indoor-facing surface to the outdoor-facing one.
///
/// The first and last layers are the indoor and outdoor surface films. These
/// have a resistance but no thermal capacitance.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerProfile {
    /// The thermal resistance of each layer, in $`m^2.K/W`$
    resistance: Vec<Float>,

    /// The thermal capacitance of each layer, in $`J/m^2.K`$
    capacitance: Vec<Float>,
}

impl LayerProfile {
    /// Creates a new `LayerProfile`, checking that it is physically meaningful.
    pub fn new(resistance: Vec<Float>, capacitance: Vec<Float>) -> Result<Self> {
        let n = resistance.len();
        if n != capacitance.len() {
            return Err(Error::invalid_profile(format!(
                "found {} resistances but {} capacitances",
                n,
                capacitance.len()
            )));
        }
        if n < 3 {
            return Err(Error::invalid_profile(format!(
                "a wall needs an indoor film, at least one material layer and an outdoor film... found {} layers",
                n
            )));
        }
        if let Some((i, r)) = resistance
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r <= 0.0)
        {
            return Err(Error::invalid_profile(format!(
                "resistance of layer {} must be positive and finite... found {}",
                i, r
            )));
        }
        if let Some((i, c)) = capacitance
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c < 0.0)
        {
            return Err(Error::invalid_profile(format!(
                "capacitance of layer {} must be non-negative and finite... found {}",
                i, c
            )));
        }
        if capacitance[0] != 0.0 || capacitance[n - 1] != 0.0 {
            return Err(Error::invalid_profile(
                "surface films cannot have thermal capacitance",
            ));
        }
        if capacitance.iter().all(|c| *c == 0.0) {
            return Err(Error::invalid_profile(
                "the wall has no thermal mass to distribute",
            ));
        }

        Ok(Self {
            resistance,
            capacitance,
        })
    }

    /// The resistance of each layer
    pub fn resistance(&self) -> &[Float] {
        &self.resistance
    }

    /// The capacitance of each layer
    pub fn capacitance(&self) -> &[Float] {
        &self.capacitance
    }

    /// Sum of all the resistances, including surface films
    pub fn total_resistance(&self) -> Float {
        self.resistance.iter().sum()
    }

    /// Sum of all the capacitances
    pub fn total_capacitance(&self) -> Float {
        self.capacitance.iter().sum()
    }

    /// Reduces this profile into `n_layers` segments of equal RC product.
    ///
    /// # The math
    ///
    /// Positions within the wall are expressed in two ways: by the cumulative
    /// resistance $`\sum R`$ from the indoor side (ignoring surface films) and by
    /// the cumulative RC product $`\sum R C`$. The latter is divided into `n_layers`
    /// equal intervals, so that every segment of the reduced wall contributes
    /// the same time constant. The boundaries of these intervals are then mapped
    /// back into cumulative resistance, and from there into cumulative
    /// capacitance, by linear interpolation.
    ///
    /// The capacitance of node $`i`$ is half of the capacitance between its
    /// neighbours:
    ///
    /// ```math
    /// C_i = \frac{\hat{C}_{i+1} - \hat{C}_{i-1}}{2}
    /// ```
    ///
    /// where $`\hat{C}`$ is the resampled cumulative capacitance. Boundary nodes
    /// own only half of their one adjacent control volume: the first one gets
    /// $`\hat{C}_1/2`$ and the last one $`(\hat{C}_n - \hat{C}_{n-1})/2`$.
    pub fn discretize(&self, n_layers: usize) -> Result<ReducedLattice> {
        if n_layers < 1 {
            return Err(Error::invalid_profile(
                "the wall must be divided into at least one layer",
            ));
        }
        let last = self.resistance.len() - 1;

        // Resistances within the wall only
        let mut internal_r = self.resistance.clone();
        internal_r[0] = 0.0;
        internal_r[last] = 0.0;
        let accum_r = cumulative_sum(&internal_r);

        let rc: Vec<Float> = self
            .resistance
            .iter()
            .zip(self.capacitance.iter())
            .map(|(r, c)| r * c)
            .collect();
        let accum_rc = cumulative_sum(&rc);
        let accum_c = cumulative_sum(&self.capacitance);

        // Evenly spaced in RC.
        let min_rc = accum_rc.iter().cloned().fold(Float::INFINITY, Float::min);
        let max_rc = accum_rc.iter().cloned().fold(Float::NEG_INFINITY, Float::max);
        let virtual_accum_rc = linspace(min_rc, max_rc, n_layers + 1);

        let rc_to_r = LinearInterpolator::new(&accum_rc, &accum_r)?;
        let virtual_accum_r = rc_to_r.eval_all(&virtual_accum_rc)?;

        let mut node_resistance = Vec::with_capacity(n_layers + 2);
        node_resistance.push(self.resistance[0]);
        node_resistance.extend(virtual_accum_r.windows(2).map(|w| w[1] - w[0]));
        node_resistance.push(self.resistance[last]);

        let r_to_c = LinearInterpolator::new(&accum_r, &accum_c)?;
        let virtual_accum_c = r_to_c.eval_all(&virtual_accum_r)?;

        let mut node_capacitance = vec![0.0; n_layers + 1];
        for i in 1..n_layers {
            node_capacitance[i] = (virtual_accum_c[i + 1] - virtual_accum_c[i - 1]) / 2.0;
        }
        // The indoor boundary is measured from zero, not from virtual_accum_c[0].
        node_capacitance[0] = virtual_accum_c[1] / 2.0;
        node_capacitance[n_layers] =
            (virtual_accum_c[n_layers] - virtual_accum_c[n_layers - 1]) / 2.0;

        let lattice = ReducedLattice {
            node_resistance,
            node_capacitance,
        };
        log::debug!(
            "Reduced a {}-layer wall into {} layers: R = {:?}, C = {:?}",
            self.resistance.len(),
            n_layers,
            lattice.node_resistance,
            lattice.node_capacitance
        );
        Ok(lattice)
    }
}

/// The result of reducing a [`LayerProfile`] into a finite difference lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedLattice {
    /// The resistances of the lattice: the indoor film, the `n_layers`
    /// resistances between nodes, and the outdoor film.
    pub node_resistance: Vec<Float>,

    /// The capacitance lumped in each of the `n_layers + 1` nodes
    pub node_capacitance: Vec<Float>,
}

impl ReducedLattice {
    /// The number of layers the wall was divided into
    pub fn n_layers(&self) -> usize {
        self.node_capacitance.len() - 1
    }

    /// Sum of all the resistances, including surface films
    pub fn total_resistance(&self) -> Float {
        self.node_resistance.iter().sum()
    }

    /// Sum of all the node capacitances
    pub fn total_capacitance(&self) -> Float {
        self.node_capacitance.iter().sum()
    }

    /// The largest timestep with which an explicit (i.e., forward Euler)
    /// finite difference scheme remains stable on this lattice.
    ///
    /// Node $`i`$ sits between resistances $`R_i`$ and $`R_{i+1}`$, and the
    /// scheme is stable as long as
    ///
    /// ```math
    /// \Delta t \leq \frac{C_i}{1/R_i + 1/R_{i+1}}
    /// ```
    ///
    /// for all nodes. Nodes without capacitance do not restrict the timestep
    /// (they need to be solved as steady-state nodes).
    pub fn max_stable_timestep(&self) -> Float {
        self.node_capacitance
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0.0)
            .map(|(i, c)| {
                let u = 1. / self.node_resistance[i] + 1. / self.node_resistance[i + 1];
                c / u
            })
            .fold(Float::INFINITY, Float::min)
    }
}

/// Reduces a wall described by its layers' `resistance` and `capacitance`
/// into `n_layers` segments, using the Miura method.
///
/// See [`LayerProfile::discretize`].
pub fn discretize_wall(
    resistance: &[Float],
    capacitance: &[Float],
    n_layers: usize,
) -> Result<ReducedLattice> {
    LayerProfile::new(resistance.to_vec(), capacitance.to_vec())?.discretize(n_layers)
}

/***********/
/* TESTING */
/***********/
