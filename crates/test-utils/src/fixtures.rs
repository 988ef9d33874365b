//! Common test fixtures for grid tests.
//!
//! This module provides pre-defined grid descriptions and boxes that
//! represent common scenarios in meteorological data processing.

/// Common lon/lat boxes as `(west, north, east, south)` in degrees.
pub mod bbox {
    /// Whole globe.
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, 90.0, 180.0, -90.0);

    /// Germany and surroundings.
    pub const GERMANY: (f64, f64, f64, f64) = (5.0, 55.5, 15.5, 47.0);

    /// Crosses the antimeridian (Pacific-centric).
    pub const PACIFIC: (f64, f64, f64, f64) = (160.0, 50.0, -140.0, -50.0);

    /// Far away from every fixture grid.
    pub const NOWHERE: (f64, f64, f64, f64) = (-60.0, -60.0, -50.0, -70.0);
}

/// Grid description texts in CDO `griddes` format.
pub mod griddes {
    /// 3 latitudes (50, 51, 52) × 3 longitudes (10, 10.5, 11).
    pub const REGULAR_3X3: &str = "\
# small regular test grid
gridtype  = lonlat
gridsize  = 9
xsize     = 3
ysize     = 3
xname     = lon
xlongname = \"longitude\"
xunits    = \"degrees_east\"
yname     = lat
ylongname = \"latitude\"
yunits    = \"degrees_north\"
xfirst    = 10
xinc      = 0.5
yfirst    = 50
yinc      = 1
";

    /// Global 1° grid on 0..359 longitudes.
    pub const GLOBAL_1DEG: &str = "\
gridtype = lonlat
xsize    = 360
ysize    = 181
xfirst   = 0
xinc     = 1
yfirst   = -90
yinc     = 1
";

    /// Five German stations with wrapped value lists.
    pub const STATIONS: &str = "\
gridtype = unstructured
gridsize = 5
xvals    = 10.0 13.4 11.6
           6.9 10.1
yvals    = 53.5 52.5 48.1
           50.9 54.3
";

    /// 2 × 3 rotated mesh.
    pub const CURVILINEAR_2X3: &str = "\
gridtype = curvilinear
gridsize = 6
xsize    = 3
ysize    = 2
xvals    = 10.0 11.0 12.0 10.3 11.3 12.3
yvals    = 50.0 50.2 50.4 51.0 51.2 51.4
";

    /// A projection grid, which has no constructor.
    pub const PROJECTION: &str = "\
gridtype = projection
xsize    = 2
ysize    = 2
";
}

/// Station sets as `(name, lat, lon)`.
pub mod stations {
    pub const GERMANY: [(&str, f64, f64); 5] = [
        ("hamburg", 53.5, 10.0),
        ("berlin", 52.5, 13.4),
        ("munich", 48.1, 11.6),
        ("cologne", 50.9, 6.9),
        ("kiel", 54.3, 10.1),
    ];

    /// Latitudes of `GERMANY`.
    pub fn lats() -> Vec<f64> {
        GERMANY.iter().map(|s| s.1).collect()
    }

    /// Longitudes of `GERMANY`.
    pub fn lons() -> Vec<f64> {
        GERMANY.iter().map(|s| s.2).collect()
    }
}
