//! Shared fixtures for ingestion tests

use super::IngestionOptions;
use std::fs;
use std::path::Path;

mod driver_tests;

/// Header row of a complete BMKG daily export
pub const HEADER: &str = "TANGGAL,TN,TX,TAVG,RH_AVG,RR,SS,FF_X,DDD_X,FF_AVG,DDD_CAR";

/// Write `content` to `dir/name`
pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Options scanning `dir` with the default tag, extension and delimiter
pub fn options_for(dir: &Path) -> IngestionOptions {
    IngestionOptions {
        data_dir: dir.to_path_buf(),
        ingest_tag: "BMKG".to_string(),
        file_extension: "csv".to_string(),
        delimiter: b',',
        show_progress: false,
    }
}
