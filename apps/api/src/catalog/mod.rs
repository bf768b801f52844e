//! Profile Store: the catalog of candidate profiles a session draws from
//! when the user has not imported their own connections.

use anyhow::{Context, Result};

use crate::models::profile::{Profile, ProfileCategory};

const CATALOG_JSON: &str = include_str!("../../data/catalog.json");

pub trait ProfileStore: Send + Sync {
    /// Profiles in `category`, in catalog order. May be empty.
    fn profiles_by_category(&self, category: ProfileCategory) -> Vec<Profile>;
}

/// Read-only catalog bundled into the binary.
pub struct StaticCatalog {
    profiles: Vec<Profile>,
}

impl StaticCatalog {
    pub fn bundled() -> Result<Self> {
        let profiles: Vec<Profile> =
            serde_json::from_str(CATALOG_JSON).context("Bundled profile catalog is malformed")?;
        Ok(Self { profiles })
    }

    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}

impl ProfileStore for StaticCatalog {
    fn profiles_by_category(&self, category: ProfileCategory) -> Vec<Profile> {
        self.profiles
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = StaticCatalog::bundled().unwrap();
        assert!(catalog.len() > 0);
    }

    #[test]
    fn test_every_category_is_stocked() {
        let catalog = StaticCatalog::bundled().unwrap();
        for category in ProfileCategory::ALL {
            let profiles = catalog.profiles_by_category(category);
            assert!(!profiles.is_empty(), "no profiles for {category:?}");
            assert!(profiles.iter().all(|p| p.category == category));
        }
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = StaticCatalog::bundled().unwrap();
        let mut ids: Vec<&str> = catalog.profiles.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_empty_category_yields_empty_queue() {
        let catalog = StaticCatalog::from_profiles(vec![]);
        assert!(catalog
            .profiles_by_category(ProfileCategory::Founders)
            .is_empty());
    }
}
