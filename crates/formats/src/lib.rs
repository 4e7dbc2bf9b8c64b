pub mod geojson;
pub mod package;
pub mod region_set;

pub use geojson::{AreaGeometry, Feature, FeatureCollection, GeoJsonError, GeoPoint};
pub use package::{RegionPackage, RegionPackageError, load_region_collection};
pub use region_set::{GeoFeature, JEJU_REGION_CODE, RegionCollection};
