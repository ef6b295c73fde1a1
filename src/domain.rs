use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetaError;

/// BDRC work id, e.g. `W22083`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkId(String);

impl WorkId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkId {
    type Err = MetaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        let is_valid = normalized.len() > 1
            && normalized.starts_with('W')
            && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(MetaError::InvalidWorkId(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// OpenPecha item id, e.g. `P000003`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PechaId(String);

impl PechaId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PechaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PechaId {
    type Err = MetaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        let is_valid = normalized.len() > 1
            && normalized.starts_with('P')
            && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(MetaError::InvalidPechaId(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// Short code of the scanned-page collection for one physical volume,
/// taken from the trailing segment of the volume node's URI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageGroupId(String);

impl ImageGroupId {
    pub fn from_uri(uri: &str) -> Self {
        let segment = uri.rsplit('/').next().unwrap_or(uri);
        Self(segment.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-volume facts extracted from a work's relation graph. Field order
/// here is the emit order in meta.yml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub image_group_id: String,
    pub title: String,
    pub volume_number: u32,
    pub total_pages: u32,
}
