use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::LibraryEntry;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read title, artist and duration from the file's tags, falling back to the
/// file stem and "unknown" values when the file has no readable tags.
fn read_entry(path: &Path) -> LibraryEntry {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist = String::new();
    let mut duration = Duration::ZERO;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            duration = tagged.properties().duration();

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    if !v.trim().is_empty() {
                        title = v.trim().to_string();
                    }
                }
                if let Some(v) = tag.artist() {
                    artist = v.trim().to_string();
                }
            }
        }
        Err(e) => debug!("no tags for {}: {e}", path.display()),
    }

    LibraryEntry {
        path: path.to_path_buf(),
        title,
        artist,
        duration,
    }
}

/// Walk `dir` and collect every audio file, ordered by artist and title.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<LibraryEntry> {
    let mut entries: Vec<LibraryEntry> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            entries.push(read_entry(path));
        }
    }

    entries.sort_by_key(LibraryEntry::sort_key);
    debug!("scanned {}: {} audio files", dir.display(), entries.len());
    entries
}
