use std::collections::HashSet;

use crate::{Track, TrackId};

/// The ordered tracks of a playlist. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackList {
    tracks: Vec<Track>,
}
impl TrackList {
    /// Builds a list from tracks in display order.
    ///
    /// Ids are unique within a list: when an id repeats, the first record
    /// carrying it is kept and later ones are dropped.
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut seen = HashSet::with_capacity(tracks.len());
        let incoming = tracks.len();
        let tracks: Vec<Track> = tracks.into_iter().filter(|t| seen.insert(t.id)).collect();
        if tracks.len() != incoming {
            tracing::warn!(
                "Dropped {} track(s) with duplicate ids",
                incoming - tracks.len()
            );
        }
        TrackList { tracks }
    }

    /// The number of records, counting the empty-playlist sentinel as one.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the list holds no records at all.
    ///
    /// The empty-playlist sentinel is a record, so this is `false` for it;
    /// see [`Self::is_empty_sentinel`].
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether this list is the single blank record a transport uses to say
    /// "no playlist".
    pub fn is_empty_sentinel(&self) -> bool {
        matches!(self.tracks.as_slice(), [only] if only.is_blank())
    }

    /// The track at `row`.
    pub fn get(&self, row: usize) -> Option<&Track> {
        self.tracks.get(row)
    }

    /// The tracks, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// The tracks as a slice.
    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }

    /// Gives the tracks back, in order.
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    /// The id of the track at `row`.
    pub fn id_by_row(&self, row: usize) -> Option<TrackId> {
        self.get(row).map(|t| t.id)
    }

    /// The reported position of the track at `row`.
    pub fn pos_by_row(&self, row: usize) -> Option<u32> {
        self.get(row).map(|t| t.pos)
    }

    /// Finds the row currently holding `id`.
    ///
    /// This is a linear scan; ids are neither dense nor sorted, and the list is
    /// replaced wholesale often enough that an index would not pay for itself.
    pub fn row_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }
}
impl<'a> IntoIterator for &'a TrackList {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
