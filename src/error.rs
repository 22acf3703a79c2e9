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

/// Result type alias for the operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The ways in which a calculation can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The wall layers given to the discretizer are malformed or non-physical
    #[error("invalid layer profile: {reason}")]
    InvalidProfile {
        /// What is wrong with the profile
        reason: String,
    },

    /// An interpolation was queried outside of its known domain
    #[error("interpolation query {value} is outside of the domain [{min}, {max}]")]
    InterpolationRange {
        /// The query
        value: Float,
        /// Lower end of the domain
        min: Float,
        /// Upper end of the domain
        max: Float,
    },

    /// An iterative solver exhausted its budget without converging
    #[error("solver did not converge after {iterations} iterations (last residual was {residual})")]
    NonConvergence {
        /// Number of iterations performed
        iterations: usize,
        /// The residual (or the change between iterates) when it gave up
        residual: Float,
    },
}

impl Error {
    pub(crate) fn invalid_profile<S: Into<String>>(reason: S) -> Self {
        Self::InvalidProfile {
            reason: reason.into(),
        }
    }
}

/***********/
/* TESTING */
/***********/
