//! Loads the bundled country boundary dataset.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use geojson::{FeatureCollection, GeoJson};
use thiserror::Error;
use tracing::info;

use crate::domain::CountryIndex;

/// Errors returned while loading the country dataset.
#[derive(Debug, Error)]
pub enum StaticRegionsError {
    /// Dataset file could not be read.
    #[error("failed to read country dataset at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Dataset is not a GeoJSON feature collection.
    #[error("country dataset at {path} is not a GeoJSON FeatureCollection: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<geojson::Error>,
    },
}

fn read_error(path: &Path, source: std::io::Error) -> StaticRegionsError {
    StaticRegionsError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn read_dataset(path: &Path) -> Result<String, StaticRegionsError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "dataset path must be a file"),
        )
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|source| read_error(path, source))?;
    dir.read_to_string(Path::new(file_name))
        .map_err(|source| read_error(path, source))
}

/// Parse a GeoJSON `FeatureCollection` into a [`CountryIndex`].
pub fn parse_country_index(
    contents: &str,
    path: &Path,
) -> Result<CountryIndex, StaticRegionsError> {
    let parse_error = |source: geojson::Error| StaticRegionsError::Parse {
        path: path.to_path_buf(),
        source: Box::new(source),
    };
    let geojson: GeoJson = contents.parse().map_err(parse_error)?;
    let collection = FeatureCollection::try_from(geojson).map_err(parse_error)?;
    Ok(CountryIndex::from_features(collection.features))
}

/// Read and index the country dataset at `path`. Called once at startup.
pub fn load_country_index(path: &Path) -> Result<CountryIndex, StaticRegionsError> {
    let contents = read_dataset(path)?;
    let index = parse_country_index(&contents, path)?;
    info!(path = %path.display(), countries = index.len(), "country dataset loaded");
    Ok(index)
}
