//! # Launch catalog
//!
//! Maps a human batch name, the "group-launch" pair Starlink watchers use,
//! to the international launch designator that ties TLEs back to a launch.
//!
//! The catalog is a small JSON document maintained by hand:
//!
//! ```json
//! {
//!   "launches": [
//!     { "group": 4, "launch": 7, "designator": 22021 }
//!   ]
//! }
//! ```
//!
//! `designator` is the five-digit YYNNN number carried in TLE line 1 (launch
//! year and sequence number), the same value [`crate::tle::Tle`] exposes as
//! `launch_designator`.

use camino::Utf8Path;
use serde::Deserialize;

use crate::sattrain_errors::SattrainError;

/// One cataloged launch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LaunchEntry {
    pub group: u32,
    pub launch: u32,
    /// International designator, YYNNN.
    pub designator: u32,
}

/// The full launch list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LaunchCatalog {
    pub launches: Vec<LaunchEntry>,
}

impl LaunchCatalog {
    /// Load a catalog from a JSON file.
    ///
    /// Arguments
    /// ---------
    /// * `path`: path to the catalog document.
    ///
    /// Return
    /// ------
    /// * The parsed catalog, or an I/O / format error.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, SattrainError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Resolve the batch name `group`-`launch` to its launch designator.
    ///
    /// Unknown names come back as [`SattrainError::UnknownLaunch`] carrying
    /// the offending "group-launch" token.
    pub fn designator_for(&self, group: u32, launch: u32) -> Result<u32, SattrainError> {
        self.launches
            .iter()
            .find(|e| e.group == group && e.launch == launch)
            .map(|e| e.designator)
            .ok_or_else(|| SattrainError::UnknownLaunch(format!("{group}-{launch}")))
    }

    pub fn len(&self) -> usize {
        self.launches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.launches.is_empty()
    }
}
