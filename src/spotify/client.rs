use std::{collections::HashMap, sync::Arc};

use crate::{
    duplicates::find_duplicates_in_slots,
    error::Result,
    spotify::{
        fetch_all, headers_for, Playlist, PlaylistData, Playlists, RemoveTracksRequest,
        ReqwestTransport, RequestDescriptor, SnapshotResponse, Token, Track, TrackData,
        TrackRemoval, Transport, UserResponse,
    },
};

pub const API_URL: &str = "https://api.spotify.com/v1";

const PLAYLIST_PAGE_SIZE: u32 = 50;
const TRACK_PAGE_SIZE: u32 = 100;

/// A playlist's full track listing together with the snapshot it was read at.
///
/// `items` has one slot per playlist position. Slots for the same track id hold
/// the same `Arc`; unavailable or local items are `None`.
#[derive(Debug)]
pub struct TrackListing {
    pub snapshot_id: String,
    pub items: Vec<Option<Arc<Track>>>,
}

pub struct Spotify<C = ReqwestTransport> {
    transport: C,
    api_url: String,
}

impl Spotify<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new(), API_URL)
    }
}

impl Default for Spotify<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Transport> Spotify<C> {
    pub fn with_transport(transport: C, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    pub async fn load_user_id(&self, credential: Option<&Token>) -> Result<String> {
        let request = RequestDescriptor::get(
            format!("{}/me", self.api_url),
            headers_for(credential),
        )
        .query("fields", "id");

        let body = self.transport.request(&request).await?;
        let user: UserResponse = serde_json::from_value(body)?;
        Ok(user.id)
    }

    /// Every playlist owned by `user_id`, in server order.
    ///
    /// The endpoint also lists playlists the user merely follows; those are dropped.
    pub async fn load_playlists(
        &self,
        user_id: &str,
        credential: Option<&Token>,
    ) -> Result<Playlists> {
        let request = RequestDescriptor::get(
            format!("{}/users/{}/playlists", self.api_url, user_id),
            headers_for(credential),
        )
        .query("fields", "next,items.id,items.name,items.owner.id,items.uri")
        .query("limit", PLAYLIST_PAGE_SIZE);

        let playlists: Vec<PlaylistData> = fetch_all(&self.transport, request).await?;
        let items: Vec<Playlist> = playlists
            .into_iter()
            .filter(|playlist| playlist.owner.id == user_id)
            .map(Playlist::from)
            .collect();

        log::debug!("{} playlists owned by {}", items.len(), user_id);
        Ok(Playlists { items })
    }

    /// Reads the playlist's snapshot id and its full track listing.
    ///
    /// Both requests are in flight at the same time and the first failure
    /// aborts the other. They are not atomic: an edit landing between them
    /// goes unnoticed here and is only caught when the snapshot is used for a
    /// write.
    pub async fn load_tracks_in_playlist(
        &self,
        user_id: &str,
        playlist_id: &str,
        credential: Option<&Token>,
    ) -> Result<TrackListing> {
        let playlist_url = format!(
            "{}/users/{}/playlists/{}",
            self.api_url, user_id, playlist_id
        );
        let headers = headers_for(credential);

        let snapshot_request = RequestDescriptor::get(playlist_url.clone(), headers.clone())
            .query("fields", "snapshot_id");
        let tracks_request = RequestDescriptor::get(format!("{playlist_url}/tracks"), headers)
            .query("fields", "next,items.track.id,items.track.uri")
            .query("limit", TRACK_PAGE_SIZE);

        let (snapshot, entries) = tokio::try_join!(
            async {
                let body = self.transport.request(&snapshot_request).await?;
                Ok::<SnapshotResponse, crate::Error>(serde_json::from_value(body)?)
            },
            fetch_all::<TrackData, C>(&self.transport, tracks_request),
        )?;

        let mut canonical: HashMap<String, Arc<Track>> = HashMap::new();
        let items: Vec<Option<Arc<Track>>> = entries
            .into_iter()
            .map(|entry| {
                let track = entry.track?;
                let id = track.id?;
                let shared = canonical.entry(id.clone()).or_insert_with(|| {
                    Arc::new(Track {
                        id,
                        uri: track.uri,
                    })
                });
                Some(Arc::clone(shared))
            })
            .collect();

        let missing = items.iter().filter(|item| item.is_none()).count();
        if missing > 0 {
            log::debug!("{missing} items in {playlist_id} have no track id and are left alone");
        }

        Ok(TrackListing {
            snapshot_id: snapshot.snapshot_id,
            items,
        })
    }

    /// Deletes every repeated occurrence of a track, keeping its first one.
    ///
    /// Returns `false` without writing anything when there is nothing to remove.
    /// The delete carries the snapshot id read alongside the listing, so the
    /// server rejects it as a whole if the playlist changed in the meantime.
    pub async fn remove_duplicate_tracks(
        &self,
        user_id: &str,
        playlist_id: &str,
        credential: Option<&Token>,
    ) -> Result<bool> {
        let listing = self
            .load_tracks_in_playlist(user_id, playlist_id, credential)
            .await?;
        let duplicates = find_duplicates_in_slots(&listing.items);

        if duplicates.is_empty() {
            log::debug!("no duplicates in {playlist_id}");
            return Ok(false);
        }

        let body = RemoveTracksRequest {
            snapshot_id: listing.snapshot_id,
            tracks: duplicates
                .iter()
                .map(|duplicate| TrackRemoval {
                    uri: duplicate.item.uri(),
                    positions: duplicate.removable_positions().to_vec(),
                })
                .collect(),
        };
        let removed: usize = body.tracks.iter().map(|t| t.positions.len()).sum();

        let request = RequestDescriptor::delete(
            format!(
                "{}/users/{}/playlists/{}/tracks",
                self.api_url, user_id, playlist_id
            ),
            headers_for(credential),
            serde_json::to_value(&body)?,
        );
        self.transport.request(&request).await?;

        log::info!(
            "removed {} duplicate entries of {} tracks from {}",
            removed,
            body.tracks.len(),
            playlist_id
        );
        Ok(true)
    }
}
