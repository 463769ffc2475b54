//! Column mapping between BMKG headers and fact-table fields
//!
//! [`ColumnMapping`] is the fixed `{target field: source header}` table,
//! validated once at startup. [`HeaderIndex`] resolves that table against the
//! header row of one particular file.

use crate::app::models::TargetField;
use crate::constants::columns;
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::{HashMap, HashSet};

/// Ordered mapping of fact-table fields to source headers
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    entries: Vec<(TargetField, &'static str)>,
}

impl ColumnMapping {
    /// Mapping used by BMKG daily exports
    pub fn bmkg() -> Self {
        Self {
            entries: TargetField::ALL
                .iter()
                .map(|field| (*field, field.default_source_header()))
                .collect(),
        }
    }

    /// Build a mapping from explicit entries; call [`validate`](Self::validate) before use
    pub fn from_entries(entries: Vec<(TargetField, &'static str)>) -> Self {
        Self { entries }
    }

    /// Check that every target field is mapped exactly once to a distinct header
    pub fn validate(&self) -> Result<()> {
        let mut seen_fields = HashSet::new();
        let mut seen_headers = HashSet::new();

        for (field, header) in &self.entries {
            if header.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "Empty source header for field '{}'",
                    field.column_name()
                )));
            }
            if columns::DATE_VARIANTS.contains(header) {
                return Err(Error::configuration(format!(
                    "Field '{}' cannot be read from the date column '{}'",
                    field.column_name(),
                    header
                )));
            }
            if !seen_fields.insert(*field) {
                return Err(Error::configuration(format!(
                    "Field '{}' is mapped more than once",
                    field.column_name()
                )));
            }
            if !seen_headers.insert(*header) {
                return Err(Error::configuration(format!(
                    "Source header '{}' is mapped to more than one field",
                    header
                )));
            }
        }

        let missing: Vec<&str> = TargetField::ALL
            .iter()
            .filter(|field| !seen_fields.contains(*field))
            .map(|field| field.column_name())
            .collect();
        if !missing.is_empty() {
            return Err(Error::configuration(format!(
                "Column mapping has no source for: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }

    /// Mapping entries in deterministic order
    pub fn entries(&self) -> &[(TargetField, &'static str)] {
        &self.entries
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::bmkg()
    }
}

/// Column positions of one file's header row
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    /// Header name to position
    pub name_to_index: HashMap<String, usize>,

    /// Position of the date column
    pub date_index: usize,

    /// Date header spelling found in the file
    pub date_header: &'static str,

    /// Position of each target field's source column, `None` when absent
    pub field_indices: Vec<(TargetField, Option<usize>)>,
}

impl HeaderIndex {
    /// Resolve `mapping` against a header row
    ///
    /// Fails when neither accepted spelling of the date column is present.
    pub fn analyze(headers: &StringRecord, mapping: &ColumnMapping, file: &str) -> Result<Self> {
        let mut name_to_index = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            let name = header.trim_start_matches('\u{feff}').trim().to_string();
            name_to_index.entry(name).or_insert(index);
        }

        let (date_header, date_index) = columns::DATE_VARIANTS
            .iter()
            .find_map(|variant| name_to_index.get(*variant).map(|index| (*variant, *index)))
            .ok_or_else(|| Error::missing_date_column(file))?;

        let field_indices = mapping
            .entries()
            .iter()
            .map(|(field, header)| (*field, name_to_index.get(*header).copied()))
            .collect();

        Ok(Self {
            name_to_index,
            date_index,
            date_header,
            field_indices,
        })
    }

    /// Target fields whose source column is absent from the file
    pub fn missing_fields(&self) -> Vec<TargetField> {
        self.field_indices
            .iter()
            .filter(|(_, index)| index.is_none())
            .map(|(field, _)| *field)
            .collect()
    }
}
