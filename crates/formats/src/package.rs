use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geojson::{FeatureCollection, GeoJsonError};
use crate::region_set::RegionCollection;

pub const MANIFEST_FILE_NAME: &str = "regions.manifest.json";
pub const MANIFEST_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionManifest {
    pub version: String,
    pub package_id: String,
    pub name: Option<String>,
    pub chunks: Vec<ChunkEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkEntry {
    pub id: String,
    pub path: String,
    /// blake3 hex digest of the chunk payload; verified when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl RegionManifest {
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            package_id: package_id.into(),
            name: None,
            chunks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegionPackage {
    root: PathBuf,
    manifest: RegionManifest,
}

#[derive(Debug)]
pub enum RegionPackageError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    UnsupportedVersion {
        found: String,
    },
    ChunkIo {
        path: PathBuf,
        source: std::io::Error,
    },
    ChecksumMismatch {
        chunk_id: String,
    },
    ChunkParse {
        chunk_id: String,
        source: GeoJsonError,
    },
}

impl fmt::Display for RegionPackageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionPackageError::Io(err) => write!(f, "I/O error: {err}"),
            RegionPackageError::Parse(err) => write!(f, "Manifest parse error: {err}"),
            RegionPackageError::UnsupportedVersion { found } => {
                write!(f, "Unsupported manifest version: {found}")
            }
            RegionPackageError::ChunkIo { path, source } => {
                write!(f, "failed to read chunk {}: {source}", path.display())
            }
            RegionPackageError::ChecksumMismatch { chunk_id } => {
                write!(f, "content hash mismatch for chunk {chunk_id}")
            }
            RegionPackageError::ChunkParse { chunk_id, source } => {
                write!(f, "failed to parse chunk {chunk_id}: {source}")
            }
        }
    }
}

impl std::error::Error for RegionPackageError {}

impl RegionPackage {
    pub fn load(root: impl AsRef<Path>) -> Result<Self, RegionPackageError> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join(MANIFEST_FILE_NAME);
        let payload = fs::read_to_string(&manifest_path).map_err(RegionPackageError::Io)?;
        let manifest: RegionManifest =
            serde_json::from_str(&payload).map_err(RegionPackageError::Parse)?;

        if manifest.version != MANIFEST_VERSION {
            return Err(RegionPackageError::UnsupportedVersion {
                found: manifest.version,
            });
        }

        Ok(Self { root, manifest })
    }

    pub fn manifest(&self) -> &RegionManifest {
        &self.manifest
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Loads and partitions every region chunk of the package at `root`.
///
/// Load failure is terminal for the whole collection: the caller renders an
/// empty map and does not retry.
pub fn load_region_collection(
    root: impl AsRef<Path>,
) -> Result<RegionCollection, RegionPackageError> {
    let package = RegionPackage::load(root)?;
    let mut regions = RegionCollection::empty();

    for entry in &package.manifest().chunks {
        let path = package.root().join(&entry.path);
        let payload = fs::read_to_string(&path).map_err(|e| RegionPackageError::ChunkIo {
            path: path.clone(),
            source: e,
        })?;

        if let Some(expected) = &entry.content_hash {
            let actual = blake3::hash(payload.as_bytes()).to_hex().to_string();
            if &actual != expected {
                return Err(RegionPackageError::ChecksumMismatch {
                    chunk_id: entry.id.clone(),
                });
            }
        }

        let collection = FeatureCollection::from_geojson_str(&payload).map_err(|e| {
            RegionPackageError::ChunkParse {
                chunk_id: entry.id.clone(),
                source: e,
            }
        })?;
        regions.ingest(&collection);
    }

    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::{MANIFEST_FILE_NAME, RegionPackage, RegionPackageError, load_region_collection};
    use super::{ChunkEntry, RegionManifest};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;

    const CHUNK: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"code": "11"},
                "geometry": {"type": "Polygon", "coordinates": [[[126.8, 37.4], [127.2, 37.4], [127.2, 37.7], [126.8, 37.4]]]}
            },
            {
                "type": "Feature",
                "properties": {"code": "50"},
                "geometry": {"type": "Polygon", "coordinates": [[[126.1, 33.2], [126.9, 33.2], [126.9, 33.6], [126.1, 33.2]]]}
            }
        ]
    }"#;

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        let id = format!("region_package_{label}_{}", std::process::id());
        dir.push(id);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("chunks")).expect("create temp dir");
        dir
    }

    fn write_package(root: &PathBuf, content_hash: Option<String>) {
        fs::write(root.join("chunks/regions.json"), CHUNK).expect("write chunk");
        let mut manifest = RegionManifest::new("korea-regions");
        manifest.name = Some("Korea provinces".to_string());
        manifest.chunks.push(ChunkEntry {
            id: "provinces".to_string(),
            path: "chunks/regions.json".to_string(),
            content_hash,
        });
        let payload = serde_json::to_string_pretty(&manifest).expect("serialize manifest");
        fs::write(root.join(MANIFEST_FILE_NAME), payload).expect("write manifest");
    }

    #[test]
    fn loads_and_partitions_a_checked_package() {
        let root = temp_dir("load");
        let hash = blake3::hash(CHUNK.as_bytes()).to_hex().to_string();
        write_package(&root, Some(hash));

        let regions = load_region_collection(&root).expect("load regions");
        assert_eq!(regions.mainland.len(), 1);
        assert_eq!(regions.jeju.len(), 1);
    }

    #[test]
    fn rejects_checksum_mismatch() {
        let root = temp_dir("checksum");
        write_package(&root, Some("deadbeef".to_string()));

        let err = load_region_collection(&root).expect_err("expect checksum error");
        match err {
            RegionPackageError::ChecksumMismatch { chunk_id } => {
                assert_eq!(chunk_id, "provinces");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unsupported_manifest_version() {
        let root = temp_dir("version");
        let mut manifest = RegionManifest::new("korea-regions");
        manifest.version = "2.0".to_string();
        let payload = serde_json::to_string_pretty(&manifest).expect("serialize manifest");
        fs::write(root.join(MANIFEST_FILE_NAME), payload).expect("write manifest");

        let err = RegionPackage::load(&root).expect_err("expect version error");
        match err {
            RegionPackageError::UnsupportedVersion { found } => assert_eq!(found, "2.0"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_manifest_is_an_io_error() {
        let root = temp_dir("missing");
        let err = load_region_collection(&root).expect_err("expect io error");
        assert!(matches!(err, RegionPackageError::Io(_)));
    }
}
