use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "arcadia", version)]
#[command(about = "Game catalog with soundtracks, reviews and cover-art themes")]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Catalog database file
    #[arg(global = true, long, default_value = "arcadia.db")]
    pub db: PathBuf,

    /// Folder holding covers, audio and review images
    #[arg(global = true, long, default_value = "static")]
    pub media_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a fresh database, discarding any existing one
    Init {
        /// Also insert a demo game with a track and two reviews
        #[arg(long)]
        seed: bool,
    },

    /// Add a game to the catalog
    AddGame {
        #[arg(long)]
        title: String,
        #[arg(long)]
        genre: String,
        #[arg(long)]
        year: i64,
        #[arg(long)]
        description: String,
        /// Hours on record
        #[arg(long)]
        playtime: Option<i64>,
        /// Cover image to copy into the media store
        #[arg(long)]
        cover: Option<PathBuf>,
    },

    /// Change fields of an existing game
    EditGame {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        year: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        playtime: Option<i64>,
        /// Replacement cover; the old file is removed
        #[arg(long)]
        cover: Option<PathBuf>,
    },

    /// Remove a game along with its tracks, reviews and stored files
    DeleteGame { id: i64 },

    /// Attach a soundtrack file to a game
    AddTrack {
        game_id: i64,
        /// Audio file to copy into the media store
        #[arg(long)]
        file: PathBuf,
        /// Track name; defaults to the tag title or the file name
        #[arg(long)]
        name: Option<String>,
    },

    /// Remove a track and its audio file
    DeleteTrack { id: i64 },

    /// Leave a review on a game
    AddReview {
        game_id: i64,
        /// Rating from 1 to 5
        #[arg(long)]
        rating: i64,
        #[arg(long)]
        text: String,
        /// Screenshot to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Remove a review and its screenshot
    DeleteReview { id: i64 },

    /// List every game in the catalog
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one game with its tracks, reviews and theme
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },

    /// Find games whose title contains the query
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_game() {
        let cli = Cli::parse_from([
            "arcadia",
            "add-game",
            "--title",
            "Celeste",
            "--genre",
            "Platformer",
            "--year",
            "2018",
            "--description",
            "Climb the mountain",
            "--playtime",
            "12",
        ]);
        match cli.command {
            Command::AddGame {
                title,
                year,
                playtime,
                cover,
                ..
            } => {
                assert_eq!(title, "Celeste");
                assert_eq!(year, 2018);
                assert_eq!(playtime, Some(12));
                assert_eq!(cover, None);
            }
            other => panic!("parsed into {other:?}"),
        }
    }

    #[test]
    fn global_args_work_after_the_subcommand() {
        let cli = Cli::parse_from(["arcadia", "list", "--db", "other.db"]);
        assert_eq!(cli.global.db, PathBuf::from("other.db"));
        assert_eq!(cli.global.media_dir, PathBuf::from("static"));
    }
}
