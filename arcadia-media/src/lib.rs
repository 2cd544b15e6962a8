//! File storage for the catalog: cover art, soundtrack audio, and review
//! screenshots live in fixed folders under one media root. Uploaded files are
//! renamed to a sanitized form before they touch the filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use lofty::prelude::*;
use lofty::probe::Probe;

pub const COVER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
pub const TRACK_EXTENSIONS: &[&str] = &["mp3"];
pub const REVIEW_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

const COVER_DIR: &str = "covers";
const AUDIO_DIR: &str = "audio";
const REVIEW_IMAGE_DIR: &str = "review_images";

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("{path} has no usable file name")]
    BadName { path: PathBuf },
    #[error("{name} is not an accepted {kind} file")]
    UnsupportedExtension { kind: &'static str, name: String },
    #[error("copying {path} into the media store failed")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Opens the store rooted at `root`, creating the media folders if they
    /// are missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for dir in [COVER_DIR, AUDIO_DIR, REVIEW_IMAGE_DIR] {
            let path = root.join(dir);
            fs::create_dir_all(&path)
                .with_context(|| format!("creating media folder {}", path.display()))?;
        }
        Ok(Self { root })
    }

    pub fn cover_dir(&self) -> PathBuf {
        self.root.join(COVER_DIR)
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.root.join(AUDIO_DIR)
    }

    pub fn review_image_dir(&self) -> PathBuf {
        self.root.join(REVIEW_IMAGE_DIR)
    }

    pub fn cover_path(&self, name: &str) -> PathBuf {
        self.cover_dir().join(name)
    }

    pub fn track_path(&self, name: &str) -> PathBuf {
        self.audio_dir().join(name)
    }

    pub fn review_image_path(&self, name: &str) -> PathBuf {
        self.review_image_dir().join(name)
    }

    /// Copies a cover image into the store and returns the stored file name.
    pub fn store_cover(&self, src: &Path) -> Result<String, MediaError> {
        self.store_into(src, "cover", COVER_EXTENSIONS, self.cover_dir(), "")
    }

    /// Copies an audio file into the store and returns the stored file name.
    pub fn store_track(&self, src: &Path) -> Result<String, MediaError> {
        self.store_into(src, "track", TRACK_EXTENSIONS, self.audio_dir(), "")
    }

    /// Copies a review screenshot into the store. The stored name gets a
    /// `game_{id}_{timestamp}_` prefix so screenshots from different reviews
    /// never collide.
    pub fn store_review_image(&self, game_id: i64, src: &Path) -> Result<String, MediaError> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let prefix = format!("game_{game_id}_{stamp}_");
        self.store_into(
            src,
            "review image",
            REVIEW_IMAGE_EXTENSIONS,
            self.review_image_dir(),
            &prefix,
        )
    }

    fn store_into(
        &self,
        src: &Path,
        kind: &'static str,
        allowed: &[&str],
        dir: PathBuf,
        prefix: &str,
    ) -> Result<String, MediaError> {
        let name = src
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(sanitize_file_name)
            .ok_or_else(|| MediaError::BadName {
                path: src.to_path_buf(),
            })?;
        if !has_allowed_extension(&name, allowed) {
            return Err(MediaError::UnsupportedExtension { kind, name });
        }
        let stored = format!("{prefix}{name}");
        let dest = dir.join(&stored);
        fs::copy(src, &dest).map_err(|source| MediaError::Copy {
            path: src.to_path_buf(),
            source,
        })?;
        log::debug!("stored {kind} {}", dest.display());
        Ok(stored)
    }

    pub fn remove_cover(&self, name: &str) {
        remove_quietly(&self.cover_path(name));
    }

    pub fn remove_track(&self, name: &str) {
        remove_quietly(&self.track_path(name));
    }

    pub fn remove_review_image(&self, name: &str) {
        remove_quietly(&self.review_image_path(name));
    }
}

// Stored file names are referenced from the database, so a failed removal is
// only worth a warning: the row is already gone or about to be.
fn remove_quietly(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(err) = fs::remove_file(path) {
        log::warn!("could not remove {}: {err}", path.display());
    }
}

/// Reduces an untrusted file name to something safe to store: the base name
/// with anything outside ASCII alphanumerics, `.`, `-` and `_` replaced by an
/// underscore. Dots and underscores are trimmed from both ends, so hidden
/// files lose their leading dot and `"shot_"` stores as `"shot"`. Returns
/// `None` when nothing usable is left.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches(['.', '_']);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

fn has_allowed_extension(name: &str, allowed: &[&str]) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    allowed.iter().any(|candidate| ext.eq_ignore_ascii_case(candidate))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackProbe {
    pub duration: Duration,
    pub title: Option<String>,
}

/// Reads duration and tag metadata from an audio file. Unreadable or untagged
/// files are not an error, the caller just gets nothing to prefill with.
pub fn probe_track(path: &Path) -> Option<TrackProbe> {
    let tagged = match Probe::open(path).and_then(|probe| probe.read()) {
        Ok(tagged) => tagged,
        Err(err) => {
            log::debug!("no audio metadata in {}: {err}", path.display());
            return None;
        }
    };
    let title = tagged
        .primary_tag()
        .and_then(|tag| tag.title())
        .map(|title| title.to_string());
    Some(TrackProbe {
        duration: tagged.properties().duration(),
        title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_odd_characters() {
        assert_eq!(
            sanitize_file_name("my song (live).mp3").as_deref(),
            Some("my_song__live_.mp3")
        );
    }

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(
            sanitize_file_name("cover-01.png").as_deref(),
            Some("cover-01.png")
        );
    }

    #[test]
    fn sanitize_drops_directory_components() {
        assert_eq!(
            sanitize_file_name("../../etc/passwd").as_deref(),
            Some("passwd")
        );
        assert_eq!(
            sanitize_file_name(r"C:\uploads\shot.png").as_deref(),
            Some("shot.png")
        );
    }

    #[test]
    fn sanitize_rejects_names_with_nothing_left() {
        assert_eq!(sanitize_file_name("...."), None);
        assert_eq!(sanitize_file_name("///"), None);
        assert_eq!(sanitize_file_name(""), None);
    }

    #[test]
    fn sanitize_trims_leading_dots() {
        assert_eq!(sanitize_file_name(".hidden.png").as_deref(), Some("hidden.png"));
    }

    #[test]
    fn sanitize_trims_trailing_dots_and_underscores() {
        assert_eq!(sanitize_file_name("shot_").as_deref(), Some("shot"));
        assert_eq!(sanitize_file_name("shot.").as_deref(), Some("shot"));
        // interior separators stay put
        assert_eq!(sanitize_file_name("shot_.png").as_deref(), Some("shot_.png"));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_allowed_extension("cover.PNG", COVER_EXTENSIONS));
        assert!(has_allowed_extension("track.Mp3", TRACK_EXTENSIONS));
        assert!(!has_allowed_extension("cover.bmp", COVER_EXTENSIONS));
        assert!(!has_allowed_extension("mp3", TRACK_EXTENSIONS));
        assert!(!has_allowed_extension("song.", TRACK_EXTENSIONS));
    }
}
