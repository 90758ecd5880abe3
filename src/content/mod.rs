//! Read-only case study repository.
//!
//! A [`ContentRepository`] is built once at startup from a validated
//! table and never mutated afterwards, so it can be shared behind an
//! `Arc` and read from any number of request handlers without locking.
//! "No match" is an ordinary value (`None` or an empty list), never an
//! error.

pub mod loader;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::case_study::CaseStudy;
use crate::Result;

/// Immutable, ordered table of case studies with a slug index.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    studies: Vec<CaseStudy>,
    by_slug: HashMap<String, usize>,
}

impl ContentRepository {
    /// Build a repository from records in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Content` if the table is empty or ids/slugs are
    /// missing, duplicated, or (for slugs) not URL-safe.
    pub fn new(studies: Vec<CaseStudy>) -> Result<Self> {
        loader::validate(&studies)?;
        let by_slug = studies
            .iter()
            .enumerate()
            .map(|(index, study)| (study.slug.clone(), index))
            .collect();
        Ok(Self { studies, by_slug })
    }

    /// Build a repository from the table compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Content` if the embedded table is malformed.
    pub fn embedded() -> Result<Self> {
        Self::from_json(loader::EMBEDDED_TABLE)
    }

    /// Build a repository from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Content` on parse or invariant failure.
    pub fn from_json(raw: &str) -> Result<Self> {
        Self::new(loader::parse_table(raw)?)
    }

    /// Build a repository from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file is unreadable and
    /// `AppError::Content` on parse or invariant failure.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(loader::read_table(path.as_ref())?)
    }

    /// Exact, case-sensitive slug lookup.
    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<&CaseStudy> {
        self.by_slug.get(slug).map(|&index| &self.studies[index])
    }

    /// Every record in declaration order.
    #[must_use]
    pub fn list_all(&self) -> &[CaseStudy] {
        &self.studies
    }

    /// Records not marked as coming soon, in declaration order.
    #[must_use]
    pub fn list_published(&self) -> Vec<&CaseStudy> {
        self.studies.iter().filter(|s| s.is_published()).collect()
    }

    /// Records carrying `tag`, compared case-insensitively and exactly.
    #[must_use]
    pub fn list_by_tag(&self, tag: &str) -> Vec<&CaseStudy> {
        self.studies.iter().filter(|s| s.has_tag(tag)).collect()
    }

    /// Every slug in declaration order.
    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        self.studies.iter().map(|s| s.slug.as_str()).collect()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.studies.len()
    }

    /// Always `false`: construction rejects an empty table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }
}

/// Card projection of a case study used by listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudySummary {
    /// Stable unique identifier.
    pub id: String,
    /// Detail lookup key.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Card description.
    pub description: String,
    /// Hero image URI.
    pub image: String,
    /// Ordered labels.
    pub tags: Vec<String>,
    /// Short outcome summary.
    pub outcome: String,
    /// `true` when the entry is not yet published.
    pub coming_soon: bool,
    /// First tag, or the default category.
    pub category: String,
}

impl From<&CaseStudy> for CaseStudySummary {
    fn from(study: &CaseStudy) -> Self {
        Self {
            id: study.id.clone(),
            slug: study.slug.clone(),
            title: study.title.clone(),
            description: study.description.clone(),
            image: study.image.clone(),
            tags: study.tags.clone(),
            outcome: study.outcome.clone(),
            coming_soon: !study.is_published(),
            category: study.category().to_owned(),
        }
    }
}
