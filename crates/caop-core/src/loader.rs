// crates/caop-core/src/loader.rs

//! # Data loader
//!
//! Handles the physical layer (file I/O, optional gzip) and runs the
//! reconciliation in its fixed order: parse the 2018 sources, merge the
//! 2021 sources, load every region's decoded geometry, build the
//! hierarchy, finalize.
//!
//! Archive extraction and shapefile decoding live outside this crate;
//! the loader consumes the decoder's output materialized as one GeoJSON
//! document (`<stem>.json`) plus the raw projection text (`<stem>.prj`)
//! per region. Everything here is synchronous; callers that fetch or
//! decode concurrently must fully join before invoking [`prepare`].

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{CaopError, Result};
use crate::hierarchy;
use crate::merge;
use crate::model::Administrations;
use crate::region::{FeatureCollection, Region};
use crate::source;

/// Source dataset filenames, resolved against the data directory.
pub const PARISHES_2018_FILE: &str = "detalhesFreguesias2018.json";
pub const PARISHES_2021_FILE: &str = "detalhesFreguesias2021.json";
pub const MUNICIPALITIES_2018_FILE: &str = "detalhesMunicipios2018.json";
pub const MUNICIPALITIES_2021_FILE: &str = "detalhesMunicipios2021.json";

const CACHE_FILE: &str = "administrations.bin";

/// The loader's complete output: the populated regions and the
/// reconciled aggregate.
#[derive(Clone, Debug)]
pub struct Prepared {
    pub regions: Vec<Region>,
    pub administrations: Administrations,
}

/// Opens a file and buffers it. With the `compact` feature, a `.gz`
/// path is transparently gunzipped so sources may ship compressed.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = fs::File::open(path).map_err(|e| {
        CaopError::NotFound(format!("dataset not found at {}: {e}", path.display()))
    })?;

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    if path.extension().is_some_and(|ext| ext == "gz") {
        use flate2::read::GzDecoder;
        return Ok(Box::new(GzDecoder::new(reader)));
    }

    Ok(Box::new(reader))
}

/// Resolve a source file inside the data directory, falling back to a
/// `.gz` sibling when gzip support is compiled in.
fn source_path(dir: &Path, name: &str) -> PathBuf {
    let plain = dir.join(name);
    #[cfg(feature = "compact")]
    if !plain.exists() {
        let gz = dir.join(format!("{name}.gz"));
        if gz.exists() {
            return gz;
        }
    }
    plain
}

fn read_json(path: &Path) -> Result<Value> {
    let reader = open_stream(path)?;
    serde_json::from_reader(reader).map_err(CaopError::Json)
}

/// The decoded GeoJSON feature collection for one region.
pub fn read_features(dir: &Path, region: &Region) -> Result<FeatureCollection> {
    let path = source_path(dir, &format!("{}.json", region.file_stem));
    let reader = open_stream(&path)?;
    serde_json::from_reader(reader).map_err(CaopError::Json)
}

/// The raw `.prj` projection text for one region.
pub fn read_projection(dir: &Path, region: &Region) -> Result<String> {
    let path = dir.join(format!("{}.prj", region.file_stem));
    let mut text = String::new();
    open_stream(&path)?.read_to_string(&mut text)?;
    Ok(text)
}

/// Run the whole reconciliation against a data directory.
///
/// This is the single top-level orchestration step: it owns the
/// construction of the aggregate and threads it through the fixed
/// sequence load → merge municipalities → merge parishes → build →
/// finalize. The returned [`Prepared`] value is the only copy.
pub fn prepare(data_dir: &Path) -> Result<Prepared> {
    let doc = read_json(&source_path(data_dir, PARISHES_2018_FILE))?;
    let mut parishes = source::parse_parishes_2018(&doc)?;
    tracing::info!(records = parishes.len(), "{PARISHES_2018_FILE} read");

    let doc = read_json(&source_path(data_dir, MUNICIPALITIES_2018_FILE))?;
    let mut municipalities = source::parse_municipalities_2018(&doc)?;
    tracing::info!(records = municipalities.len(), "{MUNICIPALITIES_2018_FILE} read");

    let doc = read_json(&source_path(data_dir, MUNICIPALITIES_2021_FILE))?;
    let contacts = source::parse_municipalities_2021(&doc)?;
    merge::enrich_municipalities(&mut municipalities, &contacts);
    tracing::info!(records = contacts.len(), "{MUNICIPALITIES_2021_FILE} merged");

    let doc = read_json(&source_path(data_dir, PARISHES_2021_FILE))?;
    let contacts = source::parse_parishes_2021(&doc)?;
    merge::enrich_parishes(&mut parishes, &contacts);
    tracing::info!(records = contacts.len(), "{PARISHES_2021_FILE} merged");

    let mut regions = Region::portugal();
    for region in &mut regions {
        let collection = read_features(data_dir, region)?;
        region.features = collection.features;
        region.projection = Some(read_projection(data_dir, region)?);
        tracing::info!(
            region = %region.key,
            features = region.features.len(),
            "geometry read"
        );
    }

    let mut administrations =
        hierarchy::build_administrations(&regions, parishes, municipalities)?;
    hierarchy::finalize(&mut administrations);
    tracing::info!(
        municipalities = administrations.stats().municipalities,
        parishes = administrations.stats().parishes,
        "administrations built"
    );

    Ok(Prepared {
        regions,
        administrations,
    })
}

/// Load the reconciled aggregate, going through a binary snapshot when
/// one is fresh.
///
/// The snapshot is a loader convenience for repeat runs, not a format
/// the engine defines: a stale or unreadable snapshot falls back to a
/// full [`prepare`] and is rewritten. Callers that also need the
/// geometry use [`prepare`] directly.
pub fn load_administrations(data_dir: &Path) -> Result<Administrations> {
    let cache_path = data_dir.join(CACHE_FILE);

    if cache_is_fresh(data_dir, &cache_path) {
        if let Ok(admin) = read_cache(&cache_path) {
            tracing::debug!(cache = %cache_path.display(), "snapshot loaded");
            return Ok(admin);
        }
    }

    let prepared = prepare(data_dir)?;
    if let Err(e) = write_cache(&cache_path, &prepared.administrations) {
        tracing::warn!(error = %e, "could not write snapshot");
    }
    Ok(prepared.administrations)
}

fn read_cache(path: &Path) -> Result<Administrations> {
    let reader = BufReader::new(fs::File::open(path)?);
    bincode::deserialize_from(reader).map_err(CaopError::Cache)
}

fn write_cache(path: &Path, admin: &Administrations) -> Result<()> {
    let writer = std::io::BufWriter::new(fs::File::create(path)?);
    bincode::serialize_into(writer, admin).map_err(CaopError::Cache)
}

/// A snapshot is fresh when it is newer than every input file.
fn cache_is_fresh(data_dir: &Path, cache_path: &Path) -> bool {
    let cache_time = match fs::metadata(cache_path).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };

    let mut inputs = vec![
        source_path(data_dir, PARISHES_2018_FILE),
        source_path(data_dir, PARISHES_2021_FILE),
        source_path(data_dir, MUNICIPALITIES_2018_FILE),
        source_path(data_dir, MUNICIPALITIES_2021_FILE),
    ];
    for region in Region::portugal() {
        inputs.push(source_path(data_dir, &format!("{}.json", region.file_stem)));
        inputs.push(data_dir.join(format!("{}.prj", region.file_stem)));
    }

    for input in inputs {
        match fs::metadata(&input).and_then(|m| m.modified()) {
            Ok(t) if t <= cache_time => {}
            _ => return false,
        }
    }
    true
}
