//! Key codec: the single place where granularity-dependent identifier
//! encoding is resolved.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::topology::{FeatureId, GeometryCollection};

/// Statistical granularity of the join. Carries its own key codec: state
/// geometry ids are truncated relative to the county-level FIPS space, so
/// they are scaled by 1000 to land in the same key space as the dataset.
/// The factor is a FIPS convention, not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    States,
    Counties,
}

const STATE_KEY_FACTOR: i64 = 1000;

impl Granularity {
    /// Name of the topology object holding this granularity's geometries.
    pub fn object_name(self) -> &'static str {
        match self {
            Granularity::States => "states",
            Granularity::Counties => "counties",
        }
    }

    /// Encode a feature's raw identifier into the dataset key space.
    ///
    /// Returns `None` when the identifier does not parse as an integer; the
    /// joiner treats such features as having no data.
    pub fn encode(self, id: &FeatureId) -> Option<i64> {
        let raw = match id {
            FeatureId::Num(n) => *n,
            FeatureId::Str(s) => s.trim().parse::<i64>().ok()?,
        };
        match self {
            Granularity::States => Some(raw * STATE_KEY_FACTOR),
            Granularity::Counties => Some(raw),
        }
    }

    /// Count dataset keys that match no encoded identifier in `collection`.
    ///
    /// The ×1000 state convention is inherited from the FIPS standard, with
    /// nothing guaranteeing the dataset was keyed at the same level; a high
    /// unmatched count is the symptom of a granularity mismatch. Diagnostic
    /// only, never an error.
    pub fn unmatched_keys(
        self,
        keys: impl Iterator<Item = i64>,
        collection: &GeometryCollection,
    ) -> usize {
        let encoded: ahash::AHashSet<i64> = collection
            .geometries
            .iter()
            .filter_map(|g| g.id.as_ref().and_then(|id| self.encode(id)))
            .collect();
        keys.filter(|key| !encoded.contains(key)).count()
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "states" => Ok(Granularity::States),
            "counties" => Ok(Granularity::Counties),
            other => Err(Error::config(format!(
                "[codec] unsupported granularity {other:?} (expected \"states\" or \"counties\")"
            ))),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.object_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn county_ids_pass_through() {
        assert_eq!(Granularity::Counties.encode(&FeatureId::Num(1001)), Some(1001));
        assert_eq!(
            Granularity::Counties.encode(&FeatureId::Str("01001".into())),
            Some(1001)
        );
    }

    #[test]
    fn state_ids_scale_by_1000() {
        assert_eq!(Granularity::States.encode(&FeatureId::Num(1)), Some(1000));
        assert_eq!(Granularity::States.encode(&FeatureId::Str("06".into())), Some(6000));
    }

    #[test]
    fn unparsable_id_encodes_to_none() {
        assert_eq!(Granularity::Counties.encode(&FeatureId::Str("PR".into())), None);
    }

    #[test]
    fn unknown_selector_is_a_config_error() {
        assert!("states".parse::<Granularity>().is_ok());
        assert!("counties".parse::<Granularity>().is_ok());
        assert!(matches!("tracts".parse::<Granularity>(), Err(Error::Config(_))));
        assert!(matches!("States".parse::<Granularity>(), Err(Error::Config(_))));
    }
}
