//! The joiner: pair every geometry feature with its dataset value.

use crate::codec::Granularity;
use crate::dataset::Dataset;
use crate::topology::{Geometry, GeometryCollection};

/// One feature and its joined numeric value. `None` means no data: the
/// feature's identifier was unparsable or its encoded key is absent from the
/// dataset. Ephemeral; recomputed on every render cycle.
#[derive(Debug, Clone, Copy)]
pub struct JoinedValue<'a> {
    pub feature: &'a Geometry,
    pub value: Option<f64>,
}

/// Join a dataset against a geometry collection through the granularity's
/// key codec.
///
/// Pure and order-preserving: the output has exactly one entry per feature,
/// in the collection's original order. Neither input is mutated.
pub fn join<'a>(
    dataset: &Dataset,
    collection: &'a GeometryCollection,
    granularity: Granularity,
) -> Vec<JoinedValue<'a>> {
    collection
        .geometries
        .iter()
        .map(|feature| JoinedValue {
            feature,
            value: feature
                .id
                .as_ref()
                .and_then(|id| granularity.encode(id))
                .and_then(|key| dataset.get(key)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_dataset;
    use crate::topology::Topology;

    fn fixture() -> (Dataset, Topology) {
        let dataset = parse_dataset(
            "FIPS,value\n01001,5.1\n01003,4.9\n",
            "FIPS",
            "value",
        )
        .unwrap();
        let topology = Topology::from_json(
            r#"{
                "objects": {
                    "counties": {"geometries": [
                        {"type": "Polygon", "id": "1001", "arcs": [[0]], "properties": {"name": "Autauga"}},
                        {"type": "Polygon", "id": "1003", "arcs": [[1]], "properties": {"name": "Baldwin"}},
                        {"type": "Polygon", "id": "1005", "arcs": [[2]], "properties": {"name": "Barbour"}}
                    ]},
                    "states": {"geometries": [
                        {"type": "MultiPolygon", "id": 1, "arcs": [[[0]]], "properties": {"name": "Alabama"}}
                    ]}
                },
                "arcs": []
            }"#,
        )
        .unwrap();
        (dataset, topology)
    }

    #[test]
    fn output_length_equals_collection_length() {
        let (dataset, topology) = fixture();
        let counties = topology.collection("counties").unwrap();

        let joined = join(&dataset, counties, Granularity::Counties);
        assert_eq!(joined.len(), counties.geometries.len());

        // Holds for the empty dataset too.
        let joined = join(&Dataset::default(), counties, Granularity::Counties);
        assert_eq!(joined.len(), counties.geometries.len());
    }

    #[test]
    fn county_join_preserves_order_and_values() {
        let (dataset, topology) = fixture();
        let counties = topology.collection("counties").unwrap();

        let joined = join(&dataset, counties, Granularity::Counties);
        let values: Vec<Option<f64>> = joined.iter().map(|j| j.value).collect();
        assert_eq!(values, vec![Some(5.1), Some(4.9), None]);
    }

    #[test]
    fn joined_value_round_trips_through_codec() {
        let (dataset, topology) = fixture();
        let counties = topology.collection("counties").unwrap();

        for j in join(&dataset, counties, Granularity::Counties) {
            let key = j
                .feature
                .id
                .as_ref()
                .and_then(|id| Granularity::Counties.encode(id))
                .unwrap();
            assert_eq!(j.value, dataset.get(key));
        }
    }

    #[test]
    fn state_granularity_scales_into_a_different_key_space() {
        let (dataset, topology) = fixture();
        let states = topology.collection("states").unwrap();

        // State id 1 encodes to 1000, which this county-keyed dataset lacks.
        let joined = join(&dataset, states, Granularity::States);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].value, None);
    }

    #[test]
    fn unmatched_key_diagnostic_flags_granularity_mismatch() {
        let (dataset, topology) = fixture();

        let counties = topology.collection("counties").unwrap();
        assert_eq!(
            Granularity::Counties.unmatched_keys(dataset.keys(), counties),
            0
        );

        let states = topology.collection("states").unwrap();
        assert_eq!(Granularity::States.unmatched_keys(dataset.keys(), states), 2);
    }
}
