//! Test utilities for BMKG CSV handling
//!
//! Shared helpers for writing sample export files to disk.

use std::io::Write;
use tempfile::NamedTempFile;


/// Header row of a complete BMKG daily export
pub const FULL_HEADER: &str = "TANGGAL,TN,TX,TAVG,RH_AVG,RR,SS,FF_X,DDD_X,FF_AVG,DDD_CAR";

/// Helper to create a complete export with three rows
pub fn create_test_bmkg_csv() -> String {
    format!(
        "{}\n\
         01-01-2023,20,30,25,80,\"10,5\",5,3,N,2,NE\n\
         02-01-2023,21,\"31,2\",\"26,1\",85,-,\"4,5\",4,270,2,W\n\
         2023-01-03,,29,24,90,8888,0,5,S,3,C\n",
        FULL_HEADER
    )
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
