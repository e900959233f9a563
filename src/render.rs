//! Render mapping: joined values + scale -> per-feature fill and label.

use crate::color::Rgb;
use crate::join::JoinedValue;
use crate::scale::ColorScale;

/// The core's final per-feature output: boundary data passes through on
/// `feature`, the presenter draws `color` and shows `label` as the tooltip.
#[derive(Debug, Clone)]
pub struct RenderableFeature<'a> {
    pub feature: &'a crate::topology::Geometry,
    pub color: Rgb,
    pub label: String,
}

/// Pair each joined value with its color and formatted label. Pure and
/// order-preserving, like the join it consumes.
pub fn map_to_renderable<'a>(
    joined: &[JoinedValue<'a>],
    scale: &ColorScale,
) -> Vec<RenderableFeature<'a>> {
    joined
        .iter()
        .map(|j| RenderableFeature {
            feature: j.feature,
            color: scale.color(j.value),
            label: format!("{}, {}", display_name(j.feature), format_value(j.value)),
        })
        .collect()
}

/// Display name from properties, falling back to the raw identifier.
fn display_name(feature: &crate::topology::Geometry) -> String {
    if let Some(name) = &feature.properties.name {
        return name.clone();
    }
    match &feature.id {
        Some(id) => id.to_string(),
        None => String::from("(unnamed)"),
    }
}

pub(crate) fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => String::from("no data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Granularity;
    use crate::color::NO_DATA;
    use crate::dataset::parse_dataset;
    use crate::scale::{ColorScale, ScaleSpec, Transform};
    use crate::topology::Topology;

    #[test]
    fn labels_and_colors_follow_join_order() {
        let dataset =
            parse_dataset("FIPS,value\n01001,5.1\n01003,4.9\n", "FIPS", "value").unwrap();
        let topology = Topology::from_json(
            r#"{
                "objects": {"counties": {"geometries": [
                    {"type": "Polygon", "id": "1001", "arcs": [[0]], "properties": {"name": "Autauga"}},
                    {"type": "Polygon", "id": "1003", "arcs": [[1]], "properties": {"name": "Baldwin"}},
                    {"type": "Polygon", "id": "1005", "arcs": [[2]], "properties": {}}
                ]}},
                "arcs": []
            }"#,
        )
        .unwrap();
        let collection = topology.collection("counties").unwrap();

        let joined = crate::join::join(&dataset, collection, Granularity::Counties);
        let values: Vec<Option<f64>> = joined.iter().map(|j| j.value).collect();
        let scale = ColorScale::build(
            &values,
            &ScaleSpec::new(Transform::Identity, crate::color::Palette::Blues),
        );

        let renderable = map_to_renderable(&joined, &scale);
        assert_eq!(renderable.len(), collection.geometries.len());

        assert_eq!(renderable[0].label, "Autauga, 5.1");
        assert_eq!(renderable[1].label, "Baldwin, 4.9");
        // No name and no data: identifier fallback plus the no-data marker.
        assert_eq!(renderable[2].label, "1005, no data");
        assert_eq!(renderable[2].color, NO_DATA);

        // 5.1 is the domain maximum, 4.9 the minimum.
        assert_eq!(renderable[0].color, crate::color::Palette::Blues.interpolate(1.0));
        assert_eq!(renderable[1].color, crate::color::Palette::Blues.interpolate(0.0));
    }
}
