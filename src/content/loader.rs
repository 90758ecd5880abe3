//! Content table parsing and invariant checks.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::case_study::CaseStudy;
use crate::{AppError, Result};

/// Shipped content table, compiled into the binary.
pub const EMBEDDED_TABLE: &str = include_str!("../../content/case_studies.json");

/// Parse a JSON content table without checking repository invariants.
///
/// # Errors
///
/// Returns `AppError::Content` if the document is not a JSON array of
/// well-formed case studies.
pub fn parse_table(raw: &str) -> Result<Vec<CaseStudy>> {
    Ok(serde_json::from_str(raw)?)
}

/// Read and parse a JSON content table from disk.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be read and
/// `AppError::Content` if it cannot be parsed.
pub fn read_table(path: &Path) -> Result<Vec<CaseStudy>> {
    let raw = fs::read_to_string(path).map_err(|err| {
        AppError::Io(format!("failed to read content {}: {err}", path.display()))
    })?;
    parse_table(&raw)
}

/// Check the invariants every repository relies on.
///
/// The table must be non-empty; ids and slugs must be non-empty and
/// unique; slugs may only contain ASCII letters, digits, `-` and `_`.
///
/// # Errors
///
/// Returns `AppError::Content` naming the first offending record.
pub fn validate(studies: &[CaseStudy]) -> Result<()> {
    if studies.is_empty() {
        return Err(AppError::Content("content table is empty".into()));
    }

    let mut ids = HashSet::with_capacity(studies.len());
    let mut slugs = HashSet::with_capacity(studies.len());

    for (index, study) in studies.iter().enumerate() {
        if study.id.is_empty() {
            return Err(AppError::Content(format!("record {index} has an empty id")));
        }
        if !is_url_safe(&study.slug) {
            return Err(AppError::Content(format!(
                "record {} has a missing or non url-safe slug {:?}",
                study.id, study.slug
            )));
        }
        if !ids.insert(study.id.as_str()) {
            return Err(AppError::Content(format!("duplicate id {}", study.id)));
        }
        if !slugs.insert(study.slug.as_str()) {
            return Err(AppError::Content(format!("duplicate slug {}", study.slug)));
        }
    }

    Ok(())
}

fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
