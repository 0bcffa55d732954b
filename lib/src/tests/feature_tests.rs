use geo::Coord;
use geo::Geometry;
use geo::LineString;
use geo::MultiLineString;
use geo::MultiPolygon;
use geo::Polygon;
use pretty_assertions::assert_eq;
use topojson::NamedGeometry;
use topojson::Topology;
use topojson::TransformParams;
use topojson::Value;

use crate::error::Error;
use crate::feature::layer_from_topology;
use crate::feature::object_names;
use crate::invert::invert;
use crate::kind::GeometryKind;
use crate::layer::FeatureId;
use crate::layer::Scope;
use crate::layer::VectorLayer;

fn simple_topology(object: topojson::Geometry) -> Topology {
    Topology {
        arcs: vec![
            vec![
                vec![0_f64, 0_f64],
                vec![1_f64, 0_f64],
                vec![0_f64, 1_f64],
                vec![-1_f64, 0_f64],
                vec![0_f64, -1_f64],
            ],
            vec![vec![0_f64, 0_f64], vec![1_f64, 0_f64], vec![0_f64, 1_f64]],
            vec![vec![1_f64, 1_f64], vec![-1_f64, 0_f64], vec![0_f64, -1_f64]],
            vec![vec![1_f64, 1_f64]],
            vec![vec![0_f64, 0_f64]],
        ],
        objects: vec![NamedGeometry {
            name: "foo".to_string(),
            geometry: object,
        }],
        bbox: None,
        transform: Some(TransformParams {
            scale: [1_f64, 1_f64],
            translate: [0_f64, 0_f64],
        }),
        foreign_members: None,
    }
}

/// The single geometry of object "foo".
fn only_geometry(t: &Topology) -> Option<Geometry<f64>> {
    let layer = layer_from_topology(t, "foo").unwrap();
    assert_eq!(layer.feature_count(Scope::All), 1);
    layer.geometry(FeatureId(0)).unwrap()
}

fn unit_square() -> LineString<f64> {
    LineString(vec![
        Coord { x: 0_f64, y: 0_f64 },
        Coord { x: 1_f64, y: 0_f64 },
        Coord { x: 1_f64, y: 1_f64 },
        Coord { x: 0_f64, y: 1_f64 },
        Coord { x: 0_f64, y: 0_f64 },
    ])
}

#[test]
fn linestring() {
    println!("LineString arcs decode to a line");
    let t = simple_topology(topojson::Geometry::new(Value::LineString(vec![0])));

    assert_eq!(only_geometry(&t), Some(Geometry::LineString(unit_square())));
}

#[test]
fn line_strings_have_at_least_two_coordinates() {
    let t = simple_topology(topojson::Geometry::new(Value::MultiLineString(vec![
        vec![3],
        vec![4],
    ])));

    assert_eq!(
        only_geometry(&t),
        Some(Geometry::MultiLineString(MultiLineString(vec![
            LineString(vec![
                Coord { x: 1_f64, y: 1_f64 },
                Coord { x: 1_f64, y: 1_f64 },
            ]),
            LineString(vec![
                Coord { x: 0_f64, y: 0_f64 },
                Coord { x: 0_f64, y: 0_f64 },
            ]),
        ])))
    );
}

#[test]
fn polygon() {
    let t = simple_topology(topojson::Geometry::new(Value::Polygon(vec![vec![0]])));

    assert_eq!(
        only_geometry(&t),
        Some(Geometry::Polygon(Polygon::new(unit_square(), vec![])))
    );
}

#[test]
fn multipolygon() {
    let t = simple_topology(topojson::Geometry::new(Value::MultiPolygon(vec![vec![
        vec![0],
    ]])));

    assert_eq!(
        only_geometry(&t),
        Some(Geometry::MultiPolygon(MultiPolygon(vec![Polygon::new(
            unit_square(),
            vec![]
        )])))
    );
}

#[test]
fn negative_arc_indexes_are_reversed() {
    println!("arc ~0 is arc 0 read backwards, which is what invert produces");
    let forward = simple_topology(topojson::Geometry::new(Value::Polygon(vec![vec![0]])));
    let backward = simple_topology(topojson::Geometry::new(Value::Polygon(vec![vec![!0]])));

    let forward = only_geometry(&forward).unwrap();
    assert_eq!(
        invert(&forward, GeometryKind::Polygon),
        only_geometry(&backward)
    );
}

#[test]
fn consecutive_arcs_share_a_point() {
    let t = simple_topology(topojson::Geometry::new(Value::LineString(vec![1, 2])));

    assert_eq!(
        only_geometry(&t),
        Some(Geometry::LineString(LineString(vec![
            Coord { x: 0_f64, y: 0_f64 },
            Coord { x: 1_f64, y: 0_f64 },
            Coord { x: 1_f64, y: 1_f64 },
            Coord { x: 0_f64, y: 1_f64 },
            Coord { x: 0_f64, y: 0_f64 },
        ])))
    );
}

#[test]
fn unquantized_topology() {
    let mut t = simple_topology(topojson::Geometry::new(Value::LineString(vec![1])));
    t.transform = None;

    assert_eq!(
        only_geometry(&t),
        Some(Geometry::LineString(LineString(vec![
            Coord { x: 0_f64, y: 0_f64 },
            Coord { x: 1_f64, y: 0_f64 },
            Coord { x: 0_f64, y: 1_f64 },
        ])))
    );
}

#[test]
fn collection_members_become_features() {
    let t = simple_topology(topojson::Geometry::new(Value::GeometryCollection(vec![
        topojson::Geometry::new(Value::LineString(vec![0])),
        topojson::Geometry::new(Value::LineString(vec![1])),
        topojson::Geometry::new(Value::LineString(vec![3])),
    ])));

    let layer = layer_from_topology(&t, "foo").unwrap();
    assert_eq!(layer.name(), "foo");
    assert_eq!(layer.kind(), GeometryKind::LineString);
    assert_eq!(
        layer.feature_ids(Scope::All),
        vec![FeatureId(0), FeatureId(1), FeatureId(2)]
    );
    assert_eq!(
        layer.geometry(FeatureId(0)).unwrap(),
        Some(Geometry::LineString(unit_square()))
    );
}

#[test]
fn empty_collection_is_unsupported() {
    let t = simple_topology(topojson::Geometry::new(Value::GeometryCollection(vec![])));

    let layer = layer_from_topology(&t, "foo").unwrap();
    assert_eq!(layer.kind(), GeometryKind::Unsupported);
    assert_eq!(layer.feature_count(Scope::All), 0);
}

#[test]
fn point_object_is_unsupported() {
    let t = simple_topology(topojson::Geometry::new(Value::Point(vec![3_f64, 4_f64])));

    let layer = layer_from_topology(&t, "foo").unwrap();
    assert_eq!(layer.kind(), GeometryKind::Unsupported);
}

#[test]
fn mixed_kinds_are_rejected() {
    let t = simple_topology(topojson::Geometry::new(Value::GeometryCollection(vec![
        topojson::Geometry::new(Value::LineString(vec![0])),
        topojson::Geometry::new(Value::Polygon(vec![vec![0]])),
    ])));

    match layer_from_topology(&t, "foo") {
        Err(Error::MixedKinds {
            object,
            first,
            second,
        }) => {
            assert_eq!(object, "foo");
            assert_eq!(first, GeometryKind::LineString);
            assert_eq!(second, GeometryKind::Polygon);
        }
        other => panic!("expected mixed kinds, got {other:?}"),
    }
}

#[test]
fn unknown_object() {
    let t = simple_topology(topojson::Geometry::new(Value::LineString(vec![0])));
    assert!(matches!(
        layer_from_topology(&t, "bar"),
        Err(Error::ObjectNotFound(name)) if name == "bar"
    ));
}

#[test]
fn arc_out_of_range() {
    let t = simple_topology(topojson::Geometry::new(Value::LineString(vec![42])));
    assert!(matches!(
        layer_from_topology(&t, "foo"),
        Err(Error::ArcOutOfRange(42))
    ));

    let t = simple_topology(topojson::Geometry::new(Value::LineString(vec![-43])));
    assert!(matches!(
        layer_from_topology(&t, "foo"),
        Err(Error::ArcOutOfRange(-43))
    ));
}

#[test]
fn names() {
    let t = simple_topology(topojson::Geometry::new(Value::LineString(vec![0])));
    assert_eq!(object_names(&t).collect::<Vec<_>>(), vec!["foo"]);
}
