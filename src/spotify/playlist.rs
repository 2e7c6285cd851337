use serde::Deserialize;

/// A playlist owned by the user, as shown to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner_id: String,
}

#[derive(Deserialize)]
pub struct Owner {
    pub id: String,
}

#[derive(Deserialize)]
pub struct PlaylistData {
    pub id: String,
    pub name: String,
    pub owner: Owner,
}

impl From<PlaylistData> for Playlist {
    fn from(data: PlaylistData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            owner_id: data.owner.id,
        }
    }
}

/// The owned playlists of one user, in server order.
#[derive(Debug, Default)]
pub struct Playlists {
    pub items: Vec<Playlist>,
}

#[derive(Deserialize)]
pub struct UserResponse {
    pub id: String,
}
