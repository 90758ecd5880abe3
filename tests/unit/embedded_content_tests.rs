//! Smoke tests for the content table compiled into the binary.

use std::collections::HashSet;

use portfolio_site::content::ContentRepository;

#[test]
fn embedded_table_loads() {
    let repo = ContentRepository::embedded().expect("embedded table is valid");
    assert!(!repo.is_empty());
}

#[test]
fn embedded_slugs_are_unique() {
    let repo = ContentRepository::embedded().unwrap();
    let slugs = repo.slugs();
    let unique: HashSet<&str> = slugs.iter().copied().collect();
    assert_eq!(unique.len(), slugs.len());
}

#[test]
fn embedded_table_has_published_and_coming_soon_entries() {
    let repo = ContentRepository::embedded().unwrap();
    let published = repo.list_published().len();
    assert!(published > 0);
    assert!(published < repo.len());
}

#[test]
fn embedded_coming_soon_entries_may_have_empty_detail_lists() {
    let repo = ContentRepository::embedded().unwrap();
    let unpublished: Vec<_> = repo
        .list_all()
        .iter()
        .filter(|s| !s.is_published())
        .collect();
    assert!(!unpublished.is_empty());
    assert!(unpublished.iter().any(|s| s.detail.personas.is_empty()));
}
