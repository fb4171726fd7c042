//! Timed action profile loader.
//!
//! Loads action profiles from RON data files.

use std::collections::HashMap;
use std::path::Path;

use game_core::{ActionProfile, TimedActionKind};

use crate::loaders::{LoadResult, read_file};

/// Registry for timed action profiles.
///
/// Loads [`ActionProfile`] data from RON and provides lookup by
/// [`TimedActionKind`].
#[derive(Debug, Clone)]
pub struct ActionProfileRegistry {
    profiles: HashMap<TimedActionKind, ActionProfile>,
}

impl ActionProfileRegistry {
    /// Loads the profiles embedded in the crate.
    pub fn load() -> LoadResult<Self> {
        let timed_ron = include_str!("../../data/actions/timed.ron");
        Self::from_ron_str(timed_ron, "timed.ron")
    }

    /// Loads profiles from a RON file on disk.
    pub fn load_from(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::from_ron_str(&content, &path.display().to_string())
    }

    fn from_ron_str(source: &str, origin: &str) -> LoadResult<Self> {
        let list: Vec<ActionProfile> = ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", origin, e))?;

        let mut profiles = HashMap::with_capacity(list.len());
        for profile in list {
            if profile.duration().is_none() {
                anyhow::bail!(
                    "{}: profile {} has unusable duration {}",
                    origin,
                    profile.kind,
                    profile.duration_secs
                );
            }
            if let Some(previous) = profiles.insert(profile.kind, profile) {
                anyhow::bail!("{}: duplicate profile for {}", origin, previous.kind);
            }
        }

        Ok(Self { profiles })
    }

    /// Gets an action profile by kind.
    pub fn get(&self, kind: TimedActionKind) -> Option<&ActionProfile> {
        self.profiles.get(&kind)
    }

    /// Returns an iterator over all registered action kinds.
    pub fn kinds(&self) -> impl Iterator<Item = TimedActionKind> + '_ {
        self.profiles.keys().copied()
    }

    /// Returns the number of registered action profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if no action profiles are registered.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
