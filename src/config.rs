use serde::{Deserialize, Serialize};

use crate::codec::Granularity;
use crate::color::Palette;
use crate::scale::Transform;

/// The full configuration surface for one map render.
///
/// The caller owns this value and its lifecycle: mutate it, then pass it to
/// [`crate::Renderer::render`]. The core never re-triggers itself on a
/// configuration change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map title, drawn by the presenter.
    pub title: String,
    /// URL or file path of the delimited tabular dataset.
    pub dataset_url: String,
    /// Name of the column holding the FIPS regional code.
    pub key_column: String,
    /// Name of the column holding the numeric value to shade by.
    pub value_column: String,
    /// URL or file path of the topology file.
    pub topology_url: String,
    /// Statistical level to join and draw at.
    pub granularity: Granularity,
    /// Value-to-position transform for the color scale.
    pub transform: Transform,
    /// Named color palette.
    pub palette: Palette,
    /// Number of legend entries the presenter should draw.
    pub legend_steps: usize,
    /// CSS stroke color for feature outlines (presenter only).
    pub stroke_color: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            dataset_url: String::new(),
            key_column: "FIPS".into(),
            value_column: "value".into(),
            topology_url: String::new(),
            granularity: Granularity::Counties,
            transform: Transform::Identity,
            palette: Palette::Blues,
            legend_steps: 5,
            stroke_color: "#ffffff".into(),
        }
    }
}
