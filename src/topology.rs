//! Topology loading: structural deserialization of nested geometry
//! collections. No key interpretation happens here; the codec does that.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::fetch::fetch_text;

/// A TopoJSON-shaped boundary file: named geometry collections over a shared
/// arc pool. Loaded once per URL, immutable afterwards, cacheable across
/// joins against different datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub objects: HashMap<String, GeometryCollection>,
    #[serde(default)]
    pub arcs: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    pub transform: Option<TransformSpec>,
}

/// Quantization transform: arc positions are delta-encoded integers that
/// scale/translate back to coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformSpec {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryCollection {
    #[serde(default)]
    pub geometries: Vec<Geometry>,
}

/// One geographic feature. Boundary data (`arcs`) is opaque to the join and
/// scale pipeline; only the presenter interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub id: Option<FeatureId>,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub arcs: Value,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default, alias = "NAME")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Raw feature identifier as it appears in the file. State-level files carry
/// small integers, county-level files often zero-padded strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    Num(i64),
    Str(String),
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureId::Num(n) => write!(f, "{n}"),
            FeatureId::Str(s) => write!(f, "{s}"),
        }
    }
}

impl Topology {
    /// Parse a topology from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::load(format!("[topology] failed to parse topology: {e}")))
    }

    /// Select a granularity collection by name.
    pub fn collection(&self, name: &str) -> Result<&GeometryCollection> {
        self.objects.get(name).ok_or_else(|| {
            let mut known = self.objects.keys().cloned().collect::<Vec<_>>();
            known.sort();
            Error::config(format!(
                "[topology] no object {name:?} in topology (found: {})",
                known.join(", ")
            ))
        })
    }

    /// Decode the shared arc pool to absolute coordinates, applying the
    /// quantization transform when present.
    pub fn decode_arcs(&self) -> Vec<Vec<[f64; 2]>> {
        match &self.transform {
            None => self.arcs.clone(),
            Some(t) => self
                .arcs
                .iter()
                .map(|arc| {
                    let mut x = 0.0;
                    let mut y = 0.0;
                    arc.iter()
                        .map(|[dx, dy]| {
                            x += dx;
                            y += dy;
                            [
                                x * t.scale[0] + t.translate[0],
                                y * t.scale[1] + t.translate[1],
                            ]
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

/// Fetch and parse the topology resource at `url`.
pub fn load_topology(url: &str) -> Result<Topology> {
    let text = fetch_text(url)?;
    Topology::from_json(&text)
}
