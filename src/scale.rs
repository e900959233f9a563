//! Scale builder: joined numeric values -> color function.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{NO_DATA, Palette, Rgb};
use crate::error::Error;

/// Floor applied to the lower bound when the log transform meets a
/// non-positive domain. Clamping is policy: the scale never refuses to build.
const LOG_EPSILON: f64 = 1e-6;

/// Value-to-position transform applied before palette interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    Identity,
    Log,
    Power,
    Sqrt,
    Symlog,
    Quantile,
}

impl Transform {
    /// Forward map for the continuous transforms. Sign-preserving for the
    /// power family so negative domains stay monotone.
    fn forward(self, v: f64) -> f64 {
        match self {
            Transform::Identity => v,
            Transform::Log => v.max(LOG_EPSILON).ln(),
            Transform::Power => v.signum() * (v * v),
            Transform::Sqrt => v.signum() * v.abs().sqrt(),
            Transform::Symlog => v.signum() * (1.0 + v.abs()).ln(),
            // Quantile positions come from the sample, not a pointwise map.
            Transform::Quantile => v,
        }
    }
}

impl FromStr for Transform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "identity" => Ok(Transform::Identity),
            "log" => Ok(Transform::Log),
            "power" => Ok(Transform::Power),
            "sqrt" => Ok(Transform::Sqrt),
            "symlog" => Ok(Transform::Symlog),
            "quantile" => Ok(Transform::Quantile),
            other => Err(Error::config(format!("[scale] unsupported transform {other:?}"))),
        }
    }
}

/// Caller-facing scale parameters. Domain bounds default from the data.
#[derive(Debug, Clone, Copy)]
pub struct ScaleSpec {
    pub transform: Transform,
    pub palette: Palette,
    pub domain: (Option<f64>, Option<f64>),
}

impl ScaleSpec {
    pub fn new(transform: Transform, palette: Palette) -> Self {
        Self { transform, palette, domain: (None, None) }
    }
}

/// A built value -> color function. Total: every input, including missing,
/// yields a color; a degenerate domain yields a constant scale.
#[derive(Debug, Clone)]
pub struct ColorScale {
    transform: Transform,
    palette: Palette,
    lower: f64,
    upper: f64,
    /// Retained sorted sample, used by the quantile transform's ECDF.
    sample: Vec<f64>,
}

impl ColorScale {
    /// Build a scale from the joined values of one render cycle.
    ///
    /// Missing entries are filtered out first. An absent or non-positive
    /// data minimum falls back to a floor of 1; an empty numeric subset
    /// yields a constant scale at the palette's minimum intensity.
    pub fn build(values: &[Option<f64>], spec: &ScaleSpec) -> Self {
        let mut sample: Vec<f64> = values.iter().flatten().copied().collect();
        sample.sort_by(f64::total_cmp);

        let data_min = sample.first().copied();
        let data_max = sample.last().copied();

        let mut lower = spec.domain.0.unwrap_or(match data_min {
            Some(min) if min > 0.0 => min,
            _ => 1.0,
        });
        let upper = spec.domain.1.or(data_max).unwrap_or(lower);

        if spec.transform == Transform::Log && lower <= 0.0 {
            lower = LOG_EPSILON;
        }

        Self { transform: spec.transform, palette: spec.palette, lower, upper, sample }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Whether the numeric subset was empty (constant fallback scale).
    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }

    /// Normalized position of `v` in [0, 1].
    pub fn position(&self, v: f64) -> f64 {
        if self.sample.is_empty() {
            return 0.0;
        }
        let t = match self.transform {
            Transform::Quantile => {
                // Empirical CDF over the retained sample.
                let below = self.sample.partition_point(|s| *s <= v);
                below as f64 / self.sample.len() as f64
            }
            transform => {
                let lo = transform.forward(self.lower);
                let hi = transform.forward(self.upper);
                if hi > lo { (transform.forward(v) - lo) / (hi - lo) } else { 0.0 }
            }
        };
        t.clamp(0.0, 1.0)
    }

    /// Map a joined value to its fill color. Missing maps to the designated
    /// no-data color; this function never fails.
    ///
    /// With an empty numeric subset the scale degenerates to a constant:
    /// every input, missing included, gets the palette's minimum intensity.
    pub fn color(&self, value: Option<f64>) -> Rgb {
        if self.sample.is_empty() {
            return self.palette.min_intensity();
        }
        match value {
            None => NO_DATA,
            Some(v) => self.palette.interpolate(self.position(v)),
        }
    }

    /// Evenly spaced (value, color) samples across the domain, for legends.
    pub fn legend(&self, steps: usize) -> Vec<(f64, Rgb)> {
        if steps == 0 {
            return Vec::new();
        }
        if steps == 1 || self.upper <= self.lower {
            return vec![(self.lower, self.color(Some(self.lower)))];
        }
        (0..steps)
            .map(|i| {
                let v = self.lower + (self.upper - self.lower) * i as f64 / (steps - 1) as f64;
                (v, self.color(Some(v)))
            })
            .collect()
    }
}
