use serde::{Deserialize, Serialize};

use crate::dom::Element;
use crate::error::SiteError;

const EMBEDDED_CATALOG: &str = include_str!("../../assets/gallery.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    /// Stable slug referenced by `data-entry` on view triggers.
    pub id: String,
    #[serde(rename = "image")]
    pub image_path: String,
    pub title: String,
    pub description: String,
    pub category: String,
}

/// How a view trigger names the entry it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryRef {
    Id(String),
    Index(usize),
}

impl EntryRef {
    /// Reads `data-entry`, falling back to `data-index`.
    pub fn from_trigger(trigger: &dyn Element) -> Option<Self> {
        if let Some(id) = trigger.attribute("data-entry").filter(|id| !id.trim().is_empty()) {
            return Some(EntryRef::Id(id.trim().to_string()));
        }
        trigger
            .attribute("data-index")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .map(EntryRef::Index)
    }
}

/// Ordered, read-only list of gallery entries. Order is the lightbox navigation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<GalleryEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<GalleryEntry>) -> Self {
        Self { entries }
    }

    /// The catalog compiled into the module from `assets/gallery.json`.
    pub fn embedded() -> Result<Self, SiteError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let entries: Vec<GalleryEntry> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(SiteError::EmptyCatalog);
        }
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GalleryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn resolve(&self, entry: &EntryRef) -> Option<usize> {
        match entry {
            EntryRef::Id(id) => self.position(id),
            EntryRef::Index(index) if *index < self.len() => Some(*index),
            EntryRef::Index(_) => None,
        }
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.category.as_str()) {
                seen.push(&entry.category);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.get(0).unwrap().title, "Healing Crystals");
        assert_eq!(catalog.get(0).unwrap().image_path, "images/m3.jpg");
        assert_eq!(
            catalog.categories(),
            vec!["Healing Tools", "Rituals", "Herbs & Remedies", "Sacred Spaces"]
        );
    }

    #[test]
    fn embedded_ids_are_unique() {
        let catalog = Catalog::embedded().unwrap();
        for (index, entry) in catalog.entries().iter().enumerate() {
            assert_eq!(catalog.position(&entry.id), Some(index));
        }
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::from_json("[]"), Err(SiteError::EmptyCatalog)));
        assert!(matches!(Catalog::from_json("{"), Err(SiteError::Catalog(_))));
    }

    #[test]
    fn resolve_checks_bounds_and_ids() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.resolve(&EntryRef::Index(11)), Some(11));
        assert_eq!(catalog.resolve(&EntryRef::Index(12)), None);
        assert_eq!(catalog.resolve(&EntryRef::Id("smoke-cleansing".into())), Some(2));
        assert_eq!(catalog.resolve(&EntryRef::Id("missing".into())), None);
    }
}
