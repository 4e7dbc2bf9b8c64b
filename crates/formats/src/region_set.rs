use serde_json::{Map, Value};

use crate::geojson::{AreaGeometry, FeatureCollection, GeoPoint};

/// Province code of Jeju Special Self-Governing Province.
pub const JEJU_REGION_CODE: &str = "50";

const CODE_KEYS: [&str; 2] = ["code", "CTPRVN_CD"];
const NAME_KEYS: [&str; 2] = ["name", "CTP_KOR_NM"];

/// One region landmass, flattened to a list of polygons (each a ring list).
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub code: String,
    pub name: Option<String>,
    pub polygons: Vec<Vec<Vec<GeoPoint>>>,
}

/// Region features partitioned at load time by province code.
///
/// The partition is fixed for the lifetime of the collection; the two sets
/// feed the two independent projections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionCollection {
    pub mainland: Vec<GeoFeature>,
    pub jeju: Vec<GeoFeature>,
}

impl RegionCollection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_features(collection: &FeatureCollection) -> Self {
        let mut out = Self::empty();
        out.ingest(collection);
        out
    }

    /// Adds every area feature of `collection` to the partition.
    ///
    /// Non-area features are skipped; features with no region code are
    /// treated as mainland.
    pub fn ingest(&mut self, collection: &FeatureCollection) {
        for feature in &collection.features {
            let polygons = match &feature.geometry {
                Some(AreaGeometry::Polygon(rings)) => vec![rings.clone()],
                Some(AreaGeometry::MultiPolygon(polys)) => polys.clone(),
                None => continue,
            };

            let code = property_string(&feature.properties, &CODE_KEYS).unwrap_or_default();
            let name = property_string(&feature.properties, &NAME_KEYS);
            let target = if code == JEJU_REGION_CODE {
                &mut self.jeju
            } else {
                &mut self.mainland
            };
            target.push(GeoFeature {
                code,
                name,
                polygons,
            });
        }
    }

    pub fn feature_count(&self) -> usize {
        self.mainland.len() + self.jeju.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature_count() == 0
    }
}

fn property_string(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    for key in keys {
        match props.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}
