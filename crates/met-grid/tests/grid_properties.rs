//! Integration tests for grid construction, box slicing and point lookup.

use approx::assert_relative_eq;
use ndarray::{arr1, Axis};

use met_grid::{
    normalize_lon_lat, GridDescriptor, GridError, GridFactory, GridIndex, LonLatBox, RawAxisValues,
};
use test_utils::fixtures::{bbox, griddes, stations};
use test_utils::{flat_index_field, index_field, write_griddes};

fn lonlatbox(b: (f64, f64, f64, f64)) -> LonLatBox {
    LonLatBox::new(b.0, b.1, b.2, b.3).unwrap()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_regular_lat_lon_deterministic() {
    let grid = GridFactory::build(griddes::REGULAR_3X3).unwrap();
    let first = grid.lat_lon().clone();
    let second = grid.lat_lon().clone();

    assert_eq!(first, second);
    assert_eq!(first.shape(), &[3, 3]);
    assert_eq!(
        first.lat.index_axis(Axis(1), 0).iter().copied().collect::<Vec<_>>(),
        vec![50.0, 51.0, 52.0]
    );
    assert_eq!(
        first.lon.index_axis(Axis(0), 0).iter().copied().collect::<Vec<_>>(),
        vec![10.0, 10.5, 11.0]
    );
}

#[test]
fn test_build_from_file_matches_inline() {
    let file = write_griddes(griddes::CURVILINEAR_2X3).unwrap();
    let from_file = GridFactory::build(file.path()).unwrap();
    let inline = GridFactory::build(griddes::CURVILINEAR_2X3).unwrap();

    assert_eq!(from_file, inline);
    assert_eq!(from_file.grid_type(), "curvilinear");
    assert_eq!(from_file.coordinate_shape(), vec![2, 3]);
}

#[test]
fn test_descriptor_attribute_roundtrip() {
    for text in [griddes::REGULAR_3X3, griddes::STATIONS, griddes::CURVILINEAR_2X3] {
        let grid = GridFactory::build(text).unwrap();

        let mut attrs = grid.descriptor().to_attributes();
        attrs.insert("title".into(), "unrelated".into());

        let restored = GridDescriptor::from_attributes(&attrs).unwrap();
        assert_eq!(&restored, grid.descriptor());
        assert_eq!(GridFactory::build(restored).unwrap(), grid);
    }
}

#[test]
fn test_descriptor_json_roundtrip() {
    let grid = GridFactory::build(griddes::REGULAR_3X3).unwrap();
    let json = serde_json::to_string(grid.descriptor()).unwrap();
    assert!(json.contains("\"gridtype\":\"regular\""));

    let restored: GridDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, grid.descriptor());
}

#[test]
fn test_unknown_grid_type() {
    assert!(matches!(
        GridFactory::build(griddes::PROJECTION),
        Err(GridError::UnknownGridType(t)) if t == "projection"
    ));
}

#[test]
fn test_huge_curvilinear_size_is_error() {
    let result = GridFactory::build(
        "gridtype = curvilinear\nxsize = 1e19\nysize = 4\nxvals = 0 1 2 3\nyvals = 0 1 2 3\n",
    );
    assert!(matches!(result, Err(GridError::InvalidField { .. })));
}

#[test]
fn test_raw_axis_values() {
    let grid = GridFactory::build(griddes::STATIONS).unwrap();
    assert_eq!(
        grid.raw_axis_values(),
        RawAxisValues::Points {
            y: stations::lats(),
            x: stations::lons()
        }
    );
}

// =============================================================================
// Box slicing
// =============================================================================

#[test]
fn test_box_retains_all_points() {
    let grid = GridFactory::build(griddes::REGULAR_3X3).unwrap();
    let data = index_field(&[3, 3]);

    let (sliced, sliced_grid) = grid
        .lonlatbox(&data, &LonLatBox::new(10.0, 52.0, 11.0, 50.0).unwrap())
        .unwrap();

    assert_eq!(sliced, data);
    assert_eq!(sliced_grid.num_points(), 9);
    assert_eq!(sliced_grid, grid);
}

#[test]
fn test_box_retains_corner() {
    let grid = GridFactory::build(griddes::REGULAR_3X3).unwrap();
    let data = index_field(&[2, 3, 3]);

    let (sliced, sliced_grid) = grid
        .lonlatbox(&data, &LonLatBox::new(10.0, 51.0, 10.5, 50.0).unwrap())
        .unwrap();

    assert_eq!(sliced.shape(), &[2, 2, 2]);
    assert_eq!(sliced[[1, 1, 1]], 10101.0);
    assert_eq!(
        sliced_grid.raw_axis_values(),
        RawAxisValues::Axes {
            y: vec![50.0, 51.0],
            x: vec![10.0, 10.5]
        }
    );
}

#[test]
fn test_box_slice_rebuild_matches_subset() {
    let grid = GridFactory::build(griddes::CURVILINEAR_2X3).unwrap();
    let data = index_field(&[2, 3]);
    let b = LonLatBox::new(10.5, 52.0, 12.5, 50.1).unwrap();

    let (_, sliced_grid) = grid.lonlatbox(&data, &b).unwrap();
    let rebuilt = GridFactory::build(sliced_grid.descriptor().clone()).unwrap();

    let expected: Vec<(f64, f64)> = grid
        .lat_lon()
        .points()
        .filter(|&(lat, lon)| b.contains(lat, lon))
        .collect();
    let actual: Vec<(f64, f64)> = rebuilt.lat_lon().points().collect();
    assert_eq!(actual, expected);
    assert_eq!(rebuilt.grid_type(), "unstructured");
}

#[test]
fn test_box_outside_every_point() {
    for text in [griddes::REGULAR_3X3, griddes::STATIONS, griddes::CURVILINEAR_2X3] {
        let grid = GridFactory::build(text).unwrap();
        let data = index_field(&grid.coordinate_shape());
        assert!(matches!(
            grid.lonlatbox(&data, &lonlatbox(bbox::NOWHERE)),
            Err(GridError::EmptySliceResult(_))
        ));
    }
}

#[test]
fn test_box_full_extent_equals_original() {
    for text in [griddes::REGULAR_3X3, griddes::STATIONS] {
        let grid = GridFactory::build(text).unwrap();
        let data = index_field(&grid.coordinate_shape());
        let (sliced, sliced_grid) = grid.lonlatbox(&data, &lonlatbox(bbox::GLOBAL)).unwrap();
        assert_eq!(sliced_grid, grid);
        assert_eq!(sliced, data);
    }
}

#[test]
fn test_box_across_dateline() {
    let grid = GridFactory::build(griddes::GLOBAL_1DEG).unwrap();
    let data = flat_index_field(&grid.coordinate_shape());

    // Longitudes are 0..359, so 160E..140W is the column range 160..=220
    let b = LonLatBox::new(160.0, 10.0, -140.0, -10.0).unwrap();
    let (sliced, sliced_grid) = grid.lonlatbox(&data, &b).unwrap();

    assert_eq!(sliced_grid.coordinate_shape(), vec![21, 61]);
    assert_eq!(sliced.shape(), &[21, 61]);
    match sliced_grid.raw_axis_values() {
        RawAxisValues::Axes { x, .. } => {
            assert_eq!(x.first(), Some(&160.0));
            assert_eq!(x.last(), Some(&220.0));
        }
        other => panic!("expected axes, got {:?}", other),
    }
    assert_eq!(sliced[[0, 0]], data[[80, 160]]);
}

#[test]
fn test_pacific_box_same_on_both_longitude_conventions() {
    let b = lonlatbox(bbox::PACIFIC);
    let east = GridFactory::build(griddes::GLOBAL_1DEG).unwrap();
    let west = GridFactory::build(
        "gridtype = lonlat\nxsize = 360\nysize = 181\nxfirst = -180\nxinc = 1\nyfirst = -90\nyinc = 1\n",
    )
    .unwrap();

    let (_, a) = east.lonlatbox(&index_field(&east.coordinate_shape()), &b).unwrap();
    let (_, c) = west.lonlatbox(&index_field(&west.coordinate_shape()), &b).unwrap();
    assert_eq!(a.coordinate_shape(), c.coordinate_shape());
    assert_eq!(a.coordinate_shape(), vec![101, 61]);
}

#[test]
fn test_box_shape_mismatch() {
    let grid = GridFactory::build(griddes::REGULAR_3X3).unwrap();
    let data = index_field(&[3, 4]);
    assert!(matches!(
        grid.lonlatbox(&data, &lonlatbox(bbox::GLOBAL)),
        Err(GridError::ShapeMismatch { .. })
    ));
}

// =============================================================================
// Point lookup and normalization
// =============================================================================

#[test]
fn test_nearest_value_exact_station() {
    let grid = GridFactory::build(griddes::STATIONS).unwrap();
    let data = index_field(&[4, 5]);

    let (_, lat, lon) = stations::GERMANY[3];
    let value = grid.nearest_value(&data, (lat, lon)).unwrap();

    assert_eq!(value, data.index_axis(Axis(1), 3).to_owned());
    assert_eq!(grid.nearest_index((lat, lon)).unwrap(), GridIndex::Point(3));
}

#[test]
fn test_nearest_value_scalar_result() {
    let grid = GridFactory::build(griddes::STATIONS).unwrap();
    let data = arr1(&[1.0, 2.0, 3.0, 4.0, 5.0]).into_dyn();
    let value = grid.nearest_value(&data, (48.0, 11.5)).unwrap();
    assert_eq!(value, arr1(&[3.0]).into_dyn());
}

#[test]
fn test_normalize_idempotent_on_global_grid() {
    let grid = GridFactory::build(griddes::GLOBAL_1DEG).unwrap();
    let field = grid.lat_lon();
    let data = flat_index_field(&[2, 181, 360]);

    let once = normalize_lon_lat(&field.lat, &field.lon, Some(&data)).unwrap();
    let twice = normalize_lon_lat(&once.lat, &once.lon, once.data.as_ref()).unwrap();

    assert_eq!(once.lat, twice.lat);
    assert_eq!(once.lon, twice.lon);
    assert_eq!(once.data, twice.data);
    assert!(once.lon.iter().all(|&lon| lon <= 180.0));
    assert_relative_eq!(once.lon[[0, 0]], -179.0);
    // Column 181 (lon 181) moved to the front
    let normalized = once.data.as_ref().unwrap();
    assert_eq!(normalized[[0, 0, 0]], data[[0, 0, 181]]);
    assert_eq!(normalized[[1, 90, 179]], data[[1, 90, 0]]);
}
