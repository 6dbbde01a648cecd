use crate::model::{Destination, Tour};
use crate::schema::CatalogError;
use crate::Catalog;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_tours: u32,
    pub num_destinations: u32,
    pub created_at: String,
    pub version: u32,
}

/// Normalized catalog contents as written to `catalog.bin`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub tours: Vec<Tour>,
    pub destinations: Vec<Destination>,
}

pub struct CatalogPaths {
    pub root: PathBuf,
}

impl CatalogPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn snapshot(&self) -> PathBuf { self.root.join("catalog.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }

    pub fn exists(&self) -> bool {
        self.snapshot().is_file() && self.meta().is_file()
    }
}

pub fn save_snapshot(paths: &CatalogPaths, snapshot: &Snapshot) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.snapshot())?;
    let bytes = bincode::serialize(snapshot)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_snapshot(paths: &CatalogPaths) -> Result<Snapshot> {
    let mut f = File::open(paths.snapshot())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let snapshot = bincode::deserialize(&buf)?;
    Ok(snapshot)
}

pub fn save_meta(paths: &CatalogPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &CatalogPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Write both the snapshot and its meta file for `catalog`.
pub fn save_catalog(paths: &CatalogPaths, catalog: &Catalog, created_at: String) -> Result<MetaFile> {
    let snapshot = Snapshot { tours: catalog.tours().to_vec(), destinations: catalog.destinations().to_vec() };
    save_snapshot(paths, &snapshot)?;
    let meta = MetaFile {
        num_tours: snapshot.tours.len() as u32,
        num_destinations: snapshot.destinations.len() as u32,
        created_at,
        version: SNAPSHOT_VERSION,
    };
    save_meta(paths, &meta)?;
    Ok(meta)
}

/// Load a catalog written by [`save_catalog`].
pub fn load_catalog(paths: &CatalogPaths) -> Result<Catalog> {
    let meta = load_meta(paths)?;
    if meta.version != SNAPSHOT_VERSION {
        return Err(CatalogError::UnsupportedVersion { found: meta.version, expected: SNAPSHOT_VERSION }.into());
    }
    let snapshot = load_snapshot(paths)?;
    if snapshot.tours.len() != meta.num_tours as usize {
        tracing::warn!(meta = meta.num_tours, snapshot = snapshot.tours.len(), "tour count differs from meta.json");
    }
    Ok(Catalog::new(snapshot.tours, snapshot.destinations)?)
}

/// Load the snapshot under `dir`, or the bundled catalog when no directory is given.
pub fn open_catalog(dir: Option<&Path>) -> Result<Catalog> {
    match dir {
        Some(dir) => {
            let catalog = load_catalog(&CatalogPaths::new(dir))?;
            tracing::info!(dir = %dir.display(), tours = catalog.tours().len(), "loaded catalog snapshot");
            Ok(catalog)
        }
        None => {
            let catalog = Catalog::builtin()?;
            tracing::info!(tours = catalog.tours().len(), "using bundled catalog");
            Ok(catalog)
        }
    }
}
