//! Input file discovery and location label parsing

use crate::app::models::{Location, LocationKind};
use crate::constants::{LOCATION_LABEL_PREFIXES, LOCATION_LABEL_SEPARATOR, REGENCY_MARKER};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Files directly inside `data_dir` whose name contains `tag` and ends with
/// `.<extension>`, sorted by file name
///
/// Subdirectories are not descended into.
pub fn discover_input_files(data_dir: &Path, tag: &str, extension: &str) -> Result<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        return Err(Error::configuration(format!(
            "Data directory does not exist: {}",
            data_dir.display()
        )));
    }

    let suffix = format!(".{}", extension);
    let mut files = Vec::new();

    for entry in WalkDir::new(data_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if file_name.contains(tag) && file_name.ends_with(&suffix) {
            files.push(entry.into_path());
        } else {
            debug!("Ignoring {}", file_name);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    info!(
        "Found {} input files in {}",
        files.len(),
        data_dir.display()
    );
    Ok(files)
}

/// Derive the location a file belongs to from its name
///
/// The label is the text after the last `-`, trimmed, without the extension.
/// A label containing `Kab` is a regency, anything else a city; the `Kab. `
/// and `Kota ` prefixes are dropped from the name.
///
/// ```rust
/// use bmkg_etl::app::services::ingestion::parse_location_label;
/// use bmkg_etl::LocationKind;
///
/// let location = parse_location_label("Data BMKG 2023 - Kab. Bogor.csv", "csv").unwrap();
/// assert_eq!(location.name, "Bogor");
/// assert_eq!(location.kind, LocationKind::Regency);
/// ```
pub fn parse_location_label(file_name: &str, extension: &str) -> Result<Location> {
    let label = file_name
        .rsplit_once(LOCATION_LABEL_SEPARATOR)
        .map_or(file_name, |(_, label)| label)
        .trim();
    let label = label.replace(&format!(".{}", extension), "");

    let kind = if label.contains(REGENCY_MARKER) {
        LocationKind::Regency
    } else {
        LocationKind::City
    };

    let name = LOCATION_LABEL_PREFIXES
        .iter()
        .fold(label, |name, prefix| name.replace(prefix, ""));
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::invalid_file_name(file_name));
    }

    Ok(Location::new(name, kind))
}
