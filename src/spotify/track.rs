use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A track as far as deduplication cares: its identity and its address.
///
/// Equality and hashing go by `id` only.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: String,
    pub uri: Option<String>,
}

impl Track {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uri: None,
        }
    }

    pub fn uri(&self) -> String {
        match &self.uri {
            Some(uri) => uri.clone(),
            None => format!("spotify:track:{}", self.id),
        }
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// The `track` object of a playlist item. Unavailable and local items come
/// back without an id, or with no track at all.
#[derive(Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub uri: Option<String>,
}

#[derive(Deserialize)]
pub struct TrackData {
    pub track: Option<TrackObject>,
}

#[derive(Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

/// Body of the conditional delete: every removal is applied against `snapshot_id`
/// or none is.
#[derive(Debug, Serialize)]
pub struct RemoveTracksRequest {
    pub snapshot_id: String,
    pub tracks: Vec<TrackRemoval>,
}

#[derive(Debug, Serialize)]
pub struct TrackRemoval {
    pub uri: String,
    pub positions: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_falls_back_to_track_id() {
        assert_eq!(Track::new("abc").uri(), "spotify:track:abc");

        let track = Track {
            id: "abc".to_string(),
            uri: Some("spotify:track:other".to_string()),
        };
        assert_eq!(track.uri(), "spotify:track:other");
    }

    #[test]
    fn identity_ignores_uri() {
        let a = Track::new("abc");
        let b = Track {
            id: "abc".to_string(),
            uri: Some("spotify:track:abc".to_string()),
        };
        assert_eq!(a, b);
    }
}
