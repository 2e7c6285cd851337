pub mod client;
pub mod pagination;
pub mod playlist;
pub mod token;
pub mod track;
pub mod transport;

pub use client::{Spotify, TrackListing, API_URL};
pub use pagination::{fetch_all, Page};
pub use playlist::{Playlist, PlaylistData, Playlists, UserResponse};
pub use token::Token;
pub use track::{
    RemoveTracksRequest, SnapshotResponse, Track, TrackData, TrackObject, TrackRemoval,
};
pub use transport::{headers_for, RequestDescriptor, ReqwestTransport, Transport};
