//! Assembles catalog rows into the shapes the commands print: list cards and
//! the single-game page, each carrying the theme sampled from its cover.

use arcadia_core::{Game, Review, Track};
use arcadia_media::MediaStore;
use arcadia_theme::{derive_scheme, sample_dominant_color, ColorScheme};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GameCard {
    #[serde(flatten)]
    pub game: Game,
    pub color_scheme: Option<ColorScheme>,
}

#[derive(Debug, Serialize)]
pub struct GamePage {
    #[serde(flatten)]
    pub game: Game,
    pub tracks: Vec<Track>,
    pub reviews: Vec<Review>,
    pub avg_rating: f64,
    pub color_scheme: Option<ColorScheme>,
}

/// Theme for a stored cover. Games without a cover, or whose cover file has
/// gone missing, get no theme rather than an error.
pub fn theme_for_cover(media: &MediaStore, cover: Option<&str>) -> Option<ColorScheme> {
    let name = cover?;
    let path = media.cover_path(name);
    if !path.exists() {
        return None;
    }
    Some(derive_scheme(sample_dominant_color(path)))
}

pub fn game_card(media: &MediaStore, game: Game) -> GameCard {
    let color_scheme = theme_for_cover(media, game.cover.as_deref());
    GameCard { game, color_scheme }
}

/// Average rating shown with one decimal; an unreviewed game shows 0.
pub fn rounded_rating(avg: Option<f64>) -> f64 {
    match avg {
        Some(value) => (value * 10.0).round() / 10.0,
        None => 0.0,
    }
}

pub fn render_card(card: &GameCard) -> String {
    let mut out = format!(
        "[{}] {} ({}, {})",
        card.game.id, card.game.title, card.game.year, card.game.genre
    );
    if let Some(hours) = card.game.playtime {
        out.push_str(&format!("  ~{hours}h"));
    }
    if let Some(scheme) = &card.color_scheme {
        out.push_str(&format!("\n    {}", render_scheme(scheme)));
    }
    out
}

pub fn render_page(page: &GamePage) -> String {
    let mut out = format!(
        "{} ({}, {})\n",
        page.game.title, page.game.year, page.game.genre
    );
    if let Some(hours) = page.game.playtime {
        out.push_str(&format!("playtime: {hours}h\n"));
    }
    out.push_str(&page.game.description);
    out.push('\n');
    if let Some(scheme) = &page.color_scheme {
        out.push_str(&render_scheme(scheme));
        out.push('\n');
    }
    if page.reviews.is_empty() {
        out.push_str("no reviews yet\n");
    } else {
        out.push_str(&format!(
            "rating: {:.1} from {} review(s)\n",
            page.avg_rating,
            page.reviews.len()
        ));
    }
    if !page.tracks.is_empty() {
        out.push_str("soundtrack:\n");
        for track in &page.tracks {
            out.push_str(&format!("  [{}] {}", track.id, track.name));
            if let Some(secs) = track.duration {
                out.push_str(&format!("  {}:{:02}", secs / 60, secs % 60));
            }
            out.push('\n');
        }
    }
    if !page.reviews.is_empty() {
        out.push_str("reviews:\n");
        for review in &page.reviews {
            out.push_str(&format!(
                "  [{}] {} {}",
                review.id,
                "*".repeat(review.rating as usize),
                review.text
            ));
            if review.image.is_some() {
                out.push_str("  [image]");
            }
            out.push('\n');
        }
    }
    out
}

pub fn render_scheme(scheme: &ColorScheme) -> String {
    format!(
        "theme: primary {}  dark {}  light {}  accent {}",
        scheme.primary.hex, scheme.dark.hex, scheme.light.hex, scheme.accent.hex
    )
}
