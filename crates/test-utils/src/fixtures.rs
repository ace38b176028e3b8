//! Common test fixtures for footprint collection tests.

/// Approximate extents of real model domains, useful for realistic grids.
pub mod domains {
    /// Model domain described by its corner and resolution.
    #[derive(Debug, Clone, Copy)]
    pub struct Domain {
        pub rows: usize,
        pub cols: usize,
        pub lat0: f64,
        pub lon0: f64,
        pub dlat: f64,
        pub dlon: f64,
    }

    impl Domain {
        /// Number of cells on the walked perimeter, corners counted twice.
        pub fn perimeter_len(&self) -> usize {
            2 * (self.rows + self.cols)
        }
    }

    /// Square 1000 x 1000 grid, 4000 perimeter points.
    pub const SQUARE_1000: Domain = Domain {
        rows: 1000,
        cols: 1000,
        lat0: 50.0,
        lon0: -10.0,
        dlat: 0.02,
        dlon: 0.04,
    };

    /// Nordic seas wave hindcast style domain.
    pub const NORDIC_WAVE: Domain = Domain {
        rows: 1229,
        cols: 889,
        lat0: 44.0,
        lon0: -30.0,
        dlat: 0.03,
        dlon: 0.07,
    };

    /// Small coastal domain.
    pub const COASTAL_SMALL: Domain = Domain {
        rows: 12,
        cols: 20,
        lat0: 58.0,
        lon0: 4.0,
        dlat: 0.1,
        dlon: 0.2,
    };
}

/// Product configuration documents.
pub mod products {
    /// Product with default coordinate names and an end date.
    pub const WAVE_SUB_YAML: &str = r#"
id: NORA3_wave_sub
url: https://thredds.met.no/thredds/catalog/nora3_subset_wave/wave_tser/catalog.html
dataset: https://thredds.met.no/thredds/dodsC/nora3_subset_wave/wave_tser/{date:%Y%m}_NORA3wave_sub_time_unlimited.nc
fromDate: "1976-01-01"
toDate: "2024-05-31"
"#;

    /// Product with coordinate name overrides and no end date.
    pub const NORKYST_YAML: &str = r#"
id: NORKYST800
url: https://thredds.met.no/thredds/fou-hi/norkyst800v2.html
dataset: https://thredds.met.no/thredds/dodsC/fou-hi/norkyst800m-1h/NorKyst-800m_ZDEPTHS_his.an.{date:%Y%m%d}00.nc
fromDate: "2016-09-14"
latitude: lat
longitude: lon
"#;

    /// Product whose boundary extraction is disabled.
    pub const WAVE_SPEC_YAML: &str = r#"
id: NORA3_wave_spec
url: https://thredds.met.no/thredds/catalog/windsurfer/mywavewam3km_spectra/catalog.html
dataset: https://thredds.met.no/thredds/dodsC/windsurfer/mywavewam3km_spectra/{date:%Y}/{date:%m}/SPC{date:%Y%m%d}00.nc
fromDate: "1975-01-01"
toDate: "2024-05-31"
dropCoordinates: true
"#;
}
