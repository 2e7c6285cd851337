pub mod config;
pub mod duplicates;
pub mod error;
pub mod spotify;

pub use config::Config;
pub use duplicates::{find_duplicates, find_duplicates_in_slots, DuplicateGroup};
pub use error::{Error, Result};
pub use spotify::{Playlist, Spotify, Token, Track, TrackListing, Transport};
