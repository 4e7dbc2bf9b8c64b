use earcutr::earcut;
use foundation::bounds::Aabb2;
use foundation::math::{Mercator, Vec2};
use formats::geojson::GeoPoint;
use formats::region_set::GeoFeature;

use crate::symbology::RegionStyle;

/// One region outline, ready for a path-based render target.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPath {
    pub code: String,
    /// SVG path data; empty when the feature could not be projected.
    pub path: String,
}

/// Snapshot of the backdrop layer for one projection build.
///
/// `bounds` is the rendered extent of every projectable vertex and is what
/// the inset projection docks against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSnapshot {
    pub paths: Vec<RegionPath>,
    /// Flat triangle list (3 vertices per triangle) for mesh targets.
    pub fill_triangles: Vec<Vec2>,
    pub bounds: Option<Aabb2>,
}

/// Non-interactive landmass backdrop.
///
/// `build` is pure: each projection rebuild produces a fresh snapshot and
/// the caller replaces the previous one wholesale, so redrawing is
/// idempotent by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionLayer {
    pub style: RegionStyle,
}

impl RegionLayer {
    pub fn new(style: RegionStyle) -> Self {
        Self { style }
    }

    pub fn build(&self, features: &[GeoFeature], projection: &Mercator) -> RegionSnapshot {
        let mut snapshot = RegionSnapshot::default();

        for feature in features {
            let Some(projected) = project_feature(feature, projection) else {
                // Malformed geometry degrades to an invisible path.
                snapshot.paths.push(RegionPath {
                    code: feature.code.clone(),
                    path: String::new(),
                });
                continue;
            };

            for polygon in &projected {
                for ring in polygon {
                    for p in ring {
                        match &mut snapshot.bounds {
                            Some(b) => b.extend(*p),
                            None => snapshot.bounds = Some(Aabb2::new(*p, *p)),
                        }
                    }
                }
                snapshot
                    .fill_triangles
                    .extend(triangulate_polygon(polygon));
            }

            snapshot.paths.push(RegionPath {
                code: feature.code.clone(),
                path: path_data(&projected),
            });
        }

        snapshot
    }
}

/// Projects every ring of a feature; `None` when any vertex fails.
fn project_feature(feature: &GeoFeature, projection: &Mercator) -> Option<Vec<Vec<Vec<Vec2>>>> {
    let mut polygons = Vec::with_capacity(feature.polygons.len());
    for polygon in &feature.polygons {
        let mut rings = Vec::with_capacity(polygon.len());
        for ring in polygon {
            let mut projected = Vec::with_capacity(ring.len());
            for GeoPoint { lon_deg, lat_deg } in ring {
                projected.push(projection.project(*lon_deg, *lat_deg)?);
            }
            rings.push(projected);
        }
        polygons.push(rings);
    }
    Some(polygons)
}

fn path_data(polygons: &[Vec<Vec<Vec2>>]) -> String {
    let mut d = String::new();
    for polygon in polygons {
        for ring in polygon {
            let mut points = ring.iter();
            let Some(first) = points.next() else {
                continue;
            };
            d.push_str(&format!("M{:.2},{:.2}", first.x, first.y));
            for p in points {
                d.push_str(&format!("L{:.2},{:.2}", p.x, p.y));
            }
            d.push('Z');
        }
    }
    d
}

fn triangulate_polygon(rings: &[Vec<Vec2>]) -> Vec<Vec2> {
    let Some(outer) = rings.first() else {
        return Vec::new();
    };
    if outer.len() < 3 {
        return Vec::new();
    }

    // Flatten rings into 2D coordinates + a parallel vertex list.
    // Also remove a closing duplicate point if present.
    let mut vertices: Vec<Vec2> = Vec::new();
    let mut coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();

    for (ring_i, ring) in rings.iter().enumerate() {
        let mut ring_pts = ring.clone();
        drop_closing_duplicate(&mut ring_pts);
        if ring_pts.len() < 3 {
            continue;
        }

        if ring_i > 0 {
            hole_indices.push(vertices.len());
        }

        for p in ring_pts {
            coords.push(p.x);
            coords.push(p.y);
            vertices.push(p);
        }
    }

    if vertices.len() < 3 {
        return Vec::new();
    }

    let indices = match earcut(&coords, &hole_indices, 2) {
        Ok(ix) => ix,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::with_capacity(indices.len());
    for idx in indices {
        if let Some(v) = vertices.get(idx) {
            out.push(*v);
        }
    }
    out
}

fn drop_closing_duplicate(points: &mut Vec<Vec2>) {
    if points.len() >= 2 {
        let first = points[0];
        let last = *points.last().unwrap();
        if (first.x - last.x).abs() < 1e-9 && (first.y - last.y).abs() < 1e-9 {
            points.pop();
        }
    }
}
