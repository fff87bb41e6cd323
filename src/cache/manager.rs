use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::MenuItem;

/// The menu slot expires 24 hours after the last write.
/// Expired data is treated as absent and the list is refetched.
pub const MENU_TTL_SECS: i64 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_seconds(&self) -> i64 {
        let now = Utc::now();
        (now - self.cached_at).num_seconds()
    }

    pub fn age_display(&self) -> String {
        let seconds = self.age_seconds();
        if seconds < 60 {
            // Covers clock skew (negative ages) as well
            "just now".to_string()
        } else if seconds < 3600 {
            format!("{}m ago", seconds / 60)
        } else if seconds < 86_400 {
            let hours = seconds / 3600;
            let remaining_mins = (seconds % 3600) / 60;
            if remaining_mins >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            format!("{}d ago", seconds / 86_400)
        }
    }

    pub fn is_expired(&self) -> bool {
        self.age_seconds() > MENU_TTL_SECS
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.cache_path(name);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    // ===== Menu =====

    pub fn load_menu(&self) -> Result<Option<CachedData<Vec<MenuItem>>>> {
        self.load("menu")
    }

    pub fn save_menu(&self, items: &[MenuItem]) -> Result<()> {
        self.save("menu", &items)
    }

    /// Age of the menu slot for the status bar. Load errors are logged and
    /// reported as if the slot were empty.
    pub fn menu_age(&self) -> Option<String> {
        match self.load_menu() {
            Ok(Some(cached)) => Some(cached.age_display()),
            Ok(None) => None,
            Err(e) => {
                debug!(error = %e, "Failed to load menu cache for age display");
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_item(id: i64) -> MenuItem {
        MenuItem {
            id,
            name: "Burger".to_string(),
            category: "Fast Food".to_string(),
            price: 150.0,
            details: "Beef burger".to_string(),
            image: "a.jpg".to_string(),
        }
    }

    #[test]
    fn test_cached_data_age_display_just_now() {
        let cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_cached_data_is_expired() {
        let fresh = CachedData::new(vec![1]);
        assert!(!fresh.is_expired());

        // 24 hours and one minute old
        let mut old = CachedData::new(vec![1]);
        old.cached_at = Utc::now() - Duration::seconds(MENU_TTL_SECS + 60);
        assert!(old.is_expired());
    }

    #[test]
    fn test_cached_data_age_display_hours() {
        let mut cached = CachedData::new(vec![1]);
        cached.cached_at = Utc::now() - Duration::minutes(90);
        assert_eq!(cached.age_display(), "2h ago");
    }

    #[test]
    fn test_save_and_load_menu_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

        let items = vec![sample_item(1), sample_item(2)];
        cache.save_menu(&items).unwrap();

        let loaded = cache.load_menu().unwrap().unwrap();
        assert_eq!(loaded.data, items);
        assert!(!loaded.is_expired());
    }

    #[test]
    fn test_load_menu_empty_slot() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();
        assert!(cache.load_menu().unwrap().is_none());
        assert!(cache.menu_age().is_none());
    }

    #[test]
    fn test_load_menu_undecodable_slot_errors() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();
        std::fs::write(dir.path().join("menu.json"), "not json").unwrap();
        assert!(cache.load_menu().is_err());
    }
}
