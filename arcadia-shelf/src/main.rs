mod cli;
mod view;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arcadia_core::{CatalogManager, GameDraft};
use arcadia_media::MediaStore;
use clap::Parser;

use cli::{Cli, Command};
use view::{
    game_card, render_card, render_page, rounded_rating, theme_for_cover, GameCard, GamePage,
};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // init starts the catalog over from nothing
    if matches!(cli.command, Command::Init { .. }) && cli.global.db.exists() {
        fs::remove_file(&cli.global.db)
            .with_context(|| format!("removing old database {}", cli.global.db.display()))?;
        log::info!("removed old database {}", cli.global.db.display());
    }

    let catalog = CatalogManager::new(cli.global.db.clone())?;
    let media = MediaStore::open(cli.global.media_dir.clone())?;

    match cli.command {
        Command::Init { seed } => {
            if seed {
                catalog.seed_demo_data()?;
            }
            println!("catalog ready at {}", cli.global.db.display());
        }

        Command::AddGame {
            title,
            genre,
            year,
            description,
            playtime,
            cover,
        } => {
            let cover = cover.and_then(|src| match media.store_cover(&src) {
                Ok(name) => Some(name),
                Err(err) => {
                    log::warn!("cover not stored: {err}");
                    None
                }
            });
            let id = catalog.add_game(&GameDraft {
                title,
                genre,
                year,
                description,
                cover,
                playtime,
            })?;
            println!("added game {id}");
        }

        Command::EditGame {
            id,
            title,
            genre,
            year,
            description,
            playtime,
            cover,
        } => {
            let Some(game) = catalog.game(id)? else {
                bail!("no game with id {id}");
            };
            let old_cover = game.cover.clone();
            let mut draft = GameDraft {
                title: title.unwrap_or(game.title),
                genre: genre.unwrap_or(game.genre),
                year: year.unwrap_or(game.year),
                description: description.unwrap_or(game.description),
                cover: game.cover,
                playtime: playtime.or(game.playtime),
            };
            if let Some(src) = cover {
                match media.store_cover(&src) {
                    Ok(name) => {
                        // replacing a cover with itself must not delete the file
                        if let Some(old) = &old_cover {
                            if *old != name {
                                media.remove_cover(old);
                            }
                        }
                        draft.cover = Some(name);
                    }
                    Err(err) => log::warn!("cover not replaced: {err}"),
                }
            }
            catalog.update_game(id, &draft)?;
            println!("updated game {id}");
        }

        Command::DeleteGame { id } => {
            let Some(game) = catalog.game(id)? else {
                bail!("no game with id {id}");
            };
            for track in catalog.tracks_for_game(id)? {
                media.remove_track(&track.file);
            }
            for review in catalog.reviews_for_game(id)? {
                if let Some(image) = &review.image {
                    media.remove_review_image(image);
                }
            }
            if let Some(cover) = &game.cover {
                media.remove_cover(cover);
            }
            catalog.delete_game(id)?;
            println!("deleted game {id}");
        }

        Command::AddTrack {
            game_id,
            file,
            name,
        } => {
            if catalog.game(game_id)?.is_none() {
                bail!("no game with id {game_id}");
            }
            let (id, name) = attach_track(&catalog, &media, game_id, &file, name)?;
            println!("added track {id} ({name})");
        }

        Command::DeleteTrack { id } => {
            let Some(track) = catalog.track(id)? else {
                bail!("no track with id {id}");
            };
            media.remove_track(&track.file);
            catalog.delete_track(id)?;
            println!("deleted track {id}");
        }

        Command::AddReview {
            game_id,
            rating,
            text,
            image,
        } => {
            if catalog.game(game_id)?.is_none() {
                bail!("no game with id {game_id}");
            }
            let id = attach_review(&catalog, &media, game_id, rating, &text, image)?;
            println!("added review {id}");
        }

        Command::DeleteReview { id } => {
            let Some(review) = catalog.review(id)? else {
                bail!("no review with id {id}");
            };
            if let Some(image) = &review.image {
                media.remove_review_image(image);
            }
            catalog.delete_review(id)?;
            println!("deleted review {id}");
        }

        Command::List { json } => {
            let cards: Vec<GameCard> = catalog
                .all_games()?
                .into_iter()
                .map(|game| game_card(&media, game))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else if cards.is_empty() {
                println!("no games in the catalog");
            } else {
                for card in &cards {
                    println!("{}", render_card(card));
                }
            }
        }

        Command::Show { id, json } => {
            let Some(game) = catalog.game(id)? else {
                bail!("no game with id {id}");
            };
            let page = GamePage {
                tracks: catalog.tracks_for_game(id)?,
                reviews: catalog.reviews_for_game(id)?,
                avg_rating: rounded_rating(catalog.average_rating(id)?),
                color_scheme: theme_for_cover(&media, game.cover.as_deref()),
                game,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print!("{}", render_page(&page));
            }
        }

        Command::Search { query, json } => {
            let games = catalog.search_games(&query)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&games)?);
            } else if games.is_empty() {
                println!("no games match \"{query}\"");
            } else {
                // search results skip cover sampling, the list stays fast
                for game in games {
                    println!(
                        "{}",
                        render_card(&GameCard {
                            game,
                            color_scheme: None,
                        })
                    );
                }
            }
        }
    }

    Ok(())
}

/// Copies the audio file into the store, probes it, and inserts the track
/// row. A failed insert removes the freshly stored file again so the media
/// folder holds no file the database does not reference.
fn attach_track(
    catalog: &CatalogManager,
    media: &MediaStore,
    game_id: i64,
    file: &Path,
    name: Option<String>,
) -> Result<(i64, String)> {
    let stored = media.store_track(file)?;
    let probe = arcadia_media::probe_track(&media.track_path(&stored));
    let duration = probe.as_ref().map(|p| p.duration.as_secs() as i64);
    let name = name
        .or_else(|| probe.as_ref().and_then(|p| p.title.clone()))
        .or_else(|| file.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| stored.clone());
    match catalog.add_track(game_id, &name, &stored, duration) {
        Ok(id) => Ok((id, name)),
        Err(err) => {
            media.remove_track(&stored);
            Err(err)
        }
    }
}

/// Stores the optional screenshot and inserts the review row. An unusable
/// image degrades to a review without one; a failed insert removes the
/// stored image again.
fn attach_review(
    catalog: &CatalogManager,
    media: &MediaStore,
    game_id: i64,
    rating: i64,
    text: &str,
    image: Option<PathBuf>,
) -> Result<i64> {
    let image = image.and_then(|src| match media.store_review_image(game_id, &src) {
        Ok(name) => Some(name),
        Err(err) => {
            log::warn!("review image not stored: {err}");
            None
        }
    });
    match catalog.add_review(game_id, rating, text, image.as_deref()) {
        Ok(id) => Ok(id),
        Err(err) => {
            if let Some(name) = &image {
                media.remove_review_image(name);
            }
            Err(err)
        }
    }
}
