use std::{
    collections::HashSet,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde::{Deserialize, Serialize};
use trackline_state::TrackList;

/// Aggregates over the current playlist (not the whole library).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaylistStats {
    /// Distinct artist strings, a blank artist counting as one.
    pub artists: u32,
    /// Distinct album strings, a blank album counting as one.
    pub albums: u32,
    pub songs: u32,
    /// Total duration in seconds.
    pub time: u32,
}
impl PlaylistStats {
    /// Computes the stats for `list` in a single pass.
    ///
    /// The empty-playlist sentinel yields all zeroes without scanning.
    pub fn compute(list: &TrackList) -> Self {
        if list.is_empty_sentinel() {
            return PlaylistStats::default();
        }

        let mut artists = HashSet::new();
        let mut albums = HashSet::new();
        let mut time = 0u32;
        for track in list {
            artists.insert(track.artist.as_str());
            albums.insert(track.album.as_str());
            time = time.saturating_add(track.time);
        }

        PlaylistStats {
            artists: saturating_count(artists.len()),
            albums: saturating_count(albums.len()),
            songs: saturating_count(list.len()),
            time,
        }
    }
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// A handle to the playlist stats shared between the model that recomputes
/// them and anything displaying them.
///
/// All four fields are written under one exclusive lock, so a reader never
/// sees a half-updated set.
#[derive(Debug, Clone, Default)]
pub struct SharedStats(Arc<RwLock<PlaylistStats>>);
impl SharedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current stats.
    pub fn snapshot(&self) -> PlaylistStats {
        *self.read()
    }

    /// Holds the read lock for as long as the guard lives.
    pub fn read(&self) -> RwLockReadGuard<'_, PlaylistStats> {
        // The stats are plain counters; a writer that panicked can't leave
        // them in a state worth refusing to read.
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Holds the write lock for as long as the guard lives. Set all the fields
    /// you mean to change before dropping it.
    pub fn write(&self) -> RwLockWriteGuard<'_, PlaylistStats> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update(&self, stats: PlaylistStats) {
        *self.write() = stats;
    }

    /// Computes the stats for `list`, publishes them, and returns them once the
    /// lock has been released.
    pub fn recompute(&self, list: &TrackList) -> PlaylistStats {
        let stats = PlaylistStats::compute(list);
        self.update(stats);
        tracing::debug!(
            "Playlist stats: {} artists, {} albums, {} songs, {}s",
            stats.artists,
            stats.albums,
            stats.songs,
            stats.time
        );
        stats
    }
}
