//! SQLite-backed catalog of games, their audio tracks and their reviews.

use std::path::PathBuf;

use anyhow::{ensure, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

mod models;

pub use models::{Game, GameDraft, Review, Track};

pub struct CatalogManager {
    conn: Connection,
}

impl CatalogManager {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        // The schema declares ON DELETE CASCADE; SQLite only honors it with
        // the pragma switched on per connection.
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let manager = Self { conn };
        manager.initialize_schema()?;
        Ok(manager)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                genre TEXT NOT NULL,
                year INTEGER NOT NULL,
                description TEXT NOT NULL,
                cover TEXT,
                playtime INTEGER
            )",
            [],
        )?;
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tracks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                file TEXT NOT NULL,
                duration INTEGER,
                FOREIGN KEY(game_id) REFERENCES games(id) ON DELETE CASCADE
            )",
            [],
        )?;
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id INTEGER NOT NULL,
                rating INTEGER CHECK(rating >= 1 AND rating <= 5),
                text TEXT NOT NULL,
                image TEXT,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY(game_id) REFERENCES games(id) ON DELETE CASCADE
            )",
            [],
        )?;
        Ok(())
    }

    pub fn add_game(&self, draft: &GameDraft) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO games (title, genre, year, description, cover, playtime)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draft.title,
                draft.genre,
                draft.year,
                draft.description,
                draft.cover,
                draft.playtime
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_game(&self, id: i64, draft: &GameDraft) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE games
             SET title = ?1, genre = ?2, year = ?3, description = ?4, cover = ?5, playtime = ?6
             WHERE id = ?7",
            params![
                draft.title,
                draft.genre,
                draft.year,
                draft.description,
                draft.cover,
                draft.playtime,
                id
            ],
        )?;
        ensure!(changed == 1, "no game with id {id}");
        Ok(())
    }

    /// Delete a game; its tracks and reviews cascade with it.
    pub fn delete_game(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM games WHERE id = ?1", params![id])?;
        ensure!(changed == 1, "no game with id {id}");
        Ok(())
    }

    pub fn game(&self, id: i64) -> Result<Option<Game>> {
        let game = self
            .conn
            .query_row(
                "SELECT id, title, genre, year, description, cover, playtime
                 FROM games WHERE id = ?1",
                params![id],
                map_game,
            )
            .optional()?;
        Ok(game)
    }

    pub fn all_games(&self) -> Result<Vec<Game>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, genre, year, description, cover, playtime
             FROM games ORDER BY id",
        )?;
        let games = stmt
            .query_map([], map_game)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(games)
    }

    /// Title substring search, case-insensitive for ASCII like SQL LIKE.
    pub fn search_games(&self, query: &str) -> Result<Vec<Game>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, genre, year, description, cover, playtime
             FROM games WHERE title LIKE ?1 ORDER BY id",
        )?;
        let games = stmt
            .query_map(params![format!("%{query}%")], map_game)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(games)
    }

    pub fn add_track(
        &self,
        game_id: i64,
        name: &str,
        file: &str,
        duration: Option<i64>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tracks (game_id, name, file, duration) VALUES (?1, ?2, ?3, ?4)",
            params![game_id, name, file, duration],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn tracks_for_game(&self, game_id: i64) -> Result<Vec<Track>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, game_id, name, file, duration FROM tracks
             WHERE game_id = ?1 ORDER BY id",
        )?;
        let tracks = stmt
            .query_map(params![game_id], map_track)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(tracks)
    }

    pub fn track(&self, id: i64) -> Result<Option<Track>> {
        let track = self
            .conn
            .query_row(
                "SELECT id, game_id, name, file, duration FROM tracks WHERE id = ?1",
                params![id],
                map_track,
            )
            .optional()?;
        Ok(track)
    }

    pub fn delete_track(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tracks WHERE id = ?1", params![id])?;
        ensure!(changed == 1, "no track with id {id}");
        Ok(())
    }

    pub fn add_review(
        &self,
        game_id: i64,
        rating: i64,
        text: &str,
        image: Option<&str>,
    ) -> Result<i64> {
        ensure!(
            (1..=5).contains(&rating),
            "rating must be between 1 and 5, got {rating}"
        );
        self.conn.execute(
            "INSERT INTO reviews (game_id, rating, text, image) VALUES (?1, ?2, ?3, ?4)",
            params![game_id, rating, text, image],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Reviews for a game, newest first. Ties within one second fall back to
    /// insertion order.
    pub fn reviews_for_game(&self, game_id: i64) -> Result<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, game_id, rating, text, image, created_at FROM reviews
             WHERE game_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let reviews = stmt
            .query_map(params![game_id], map_review)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(reviews)
    }

    pub fn review(&self, id: i64) -> Result<Option<Review>> {
        let review = self
            .conn
            .query_row(
                "SELECT id, game_id, rating, text, image, created_at
                 FROM reviews WHERE id = ?1",
                params![id],
                map_review,
            )
            .optional()?;
        Ok(review)
    }

    pub fn delete_review(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1", params![id])?;
        ensure!(changed == 1, "no review with id {id}");
        Ok(())
    }

    /// Mean rating across a game's reviews; `None` when it has none.
    pub fn average_rating(&self, game_id: i64) -> Result<Option<f64>> {
        let avg = self.conn.query_row(
            "SELECT AVG(rating) FROM reviews WHERE game_id = ?1",
            params![game_id],
            |row| row.get(0),
        )?;
        Ok(avg)
    }

    /// Insert the small demo data set: one game, one track, two reviews.
    pub fn seed_demo_data(&self) -> Result<()> {
        let game_id = self.add_game(&GameDraft {
            title: "Undertale".into(),
            genre: "RPG".into(),
            year: 2015,
            description: "Indie RPG with a strong story".into(),
            cover: None,
            playtime: Some(8),
        })?;
        self.add_track(game_id, "Megalovania", "megalovania.mp3", None)?;
        self.add_review(
            game_id,
            5,
            "Incredible game, and the soundtrack is outstanding.",
            None,
        )?;
        self.add_review(
            game_id,
            4,
            "Very atmospheric. The OST carries so much of the mood.",
            None,
        )?;
        Ok(())
    }
}

fn map_game(row: &Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        title: row.get(1)?,
        genre: row.get(2)?,
        year: row.get(3)?,
        description: row.get(4)?,
        cover: row.get(5)?,
        playtime: row.get(6)?,
    })
}

fn map_track(row: &Row<'_>) -> rusqlite::Result<Track> {
    Ok(Track {
        id: row.get(0)?,
        game_id: row.get(1)?,
        name: row.get(2)?,
        file: row.get(3)?,
        duration: row.get(4)?,
    })
}

fn map_review(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        game_id: row.get(1)?,
        rating: row.get(2)?,
        text: row.get(3)?,
        image: row.get(4)?,
        created_at: row.get(5)?,
    })
}
