use serde::Serialize;

/// One catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub year: i64,
    pub description: String,
    /// Stored cover file name, when one was uploaded.
    pub cover: Option<String>,
    /// Hours to finish, when known.
    pub playtime: Option<i64>,
}

/// Field set for inserting or updating a game.
#[derive(Debug, Clone, Default)]
pub struct GameDraft {
    pub title: String,
    pub genre: String,
    pub year: i64,
    pub description: String,
    pub cover: Option<String>,
    pub playtime: Option<i64>,
}

/// An audio track attached to a game.
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    pub id: i64,
    pub game_id: i64,
    pub name: String,
    /// Stored audio file name.
    pub file: String,
    /// Length in seconds, when the file could be probed.
    pub duration: Option<i64>,
}

/// A rated review, optionally with an attached image.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: i64,
    pub game_id: i64,
    pub rating: i64,
    pub text: String,
    /// Stored image file name, when one was attached.
    pub image: Option<String>,
    pub created_at: String,
}
