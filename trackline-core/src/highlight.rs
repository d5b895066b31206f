use std::ops::RangeInclusive;

use smallvec::SmallVec;
use trackline_state::{Track, TrackId, TrackList};

/// Columns repainted when a row gains or loses the now-playing highlight:
/// title, artist and album.
pub const HIGHLIGHT_COLUMNS: RangeInclusive<usize> = 0..=2;

/// A run of cells on one row that needs repainting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpan {
    pub row: usize,
    pub columns: RangeInclusive<usize>,
}

/// The rows to repaint after the now-playing track changes: at most the row
/// losing the highlight and the row gaining it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invalidation(SmallVec<[RowSpan; 2]>);
impl Invalidation {
    pub fn spans(&self) -> &[RowSpan] {
        &self.0
    }

    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().map(|span| span.row)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, row: usize) {
        if self.0.iter().all(|span| span.row != row) {
            self.0.push(RowSpan {
                row,
                columns: HIGHLIGHT_COLUMNS,
            });
        }
    }
}

/// Tracks which track is playing so its row can be highlighted.
#[derive(Debug, Clone, Default)]
pub struct NowPlaying {
    current: Option<TrackId>,
}
impl NowPlaying {
    pub fn current(&self) -> Option<TrackId> {
        self.current
    }

    pub fn is_current(&self, track: &Track) -> bool {
        self.current == Some(track.id)
    }

    /// Records `id` as playing and reports which rows of `list` changed.
    ///
    /// Ids that aren't in the list contribute no row.
    pub fn update(&mut self, list: &TrackList, id: TrackId) -> Invalidation {
        let previous = self.current.replace(id);

        let mut invalidation = Invalidation::default();
        if let Some(row) = previous.and_then(|previous| list.row_of(previous)) {
            invalidation.push(row);
        }
        match list.row_of(id) {
            Some(row) => invalidation.push(row),
            None => tracing::debug!("Now playing {id}, which is not in the playlist"),
        }
        invalidation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> TrackList {
        TrackList::new(
            [7, 3, 11, 4, 9, 20]
                .into_iter()
                .enumerate()
                .map(|(row, id)| Track {
                    id: TrackId(id),
                    pos: row as u32,
                    title: format!("Track {id}"),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn switching_tracks_invalidates_both_rows() {
        let list = list();
        let mut now_playing = NowPlaying::default();
        now_playing.update(&list, TrackId(11));

        let invalidation = now_playing.update(&list, TrackId(20));
        assert_eq!(invalidation.rows().collect::<Vec<_>>(), vec![2, 5]);
        assert!(invalidation.spans().iter().all(|s| s.columns == HIGHLIGHT_COLUMNS));
        assert_eq!(now_playing.current(), Some(TrackId(20)));
    }

    #[test]
    fn first_track_invalidates_one_row() {
        let mut now_playing = NowPlaying::default();
        let invalidation = now_playing.update(&list(), TrackId(3));
        assert_eq!(invalidation.rows().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn same_track_invalidates_one_row() {
        let list = list();
        let mut now_playing = NowPlaying::default();
        now_playing.update(&list, TrackId(4));
        let invalidation = now_playing.update(&list, TrackId(4));
        assert_eq!(invalidation.rows().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn unknown_ids_contribute_nothing() {
        let list = list();
        let mut now_playing = NowPlaying::default();
        now_playing.update(&list, TrackId(7));

        let invalidation = now_playing.update(&list, TrackId(999));
        assert_eq!(invalidation.rows().collect::<Vec<_>>(), vec![0]);

        let invalidation = now_playing.update(&list, TrackId(9));
        assert_eq!(invalidation.rows().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn is_current_matches_by_id() {
        let list = list();
        let mut now_playing = NowPlaying::default();
        now_playing.update(&list, TrackId(9));
        assert!(now_playing.is_current(list.get(4).unwrap()));
        assert!(!now_playing.is_current(list.get(0).unwrap()));
    }
}
