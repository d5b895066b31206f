use std::{collections::HashSet, path::Path};

use trackline_state::{Track, TrackId};

use crate::{Direction, InsertRequest, MoveInstruction};

#[derive(Debug, Clone, PartialEq, Eq)]
/// An error raised by a transport while applying a playlist change.
pub enum TransportError {
    /// The instruction names a track the store no longer holds.
    UnknownTrack(TrackId),
    /// The request was made against a playlist of a different length.
    StaleRequest {
        /// The length the request was made against.
        expected: usize,
        /// The length of the store when the request arrived.
        actual: usize,
    },
}
impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::UnknownTrack(id) => write!(f, "Track {id} is not in the playlist"),
            TransportError::StaleRequest { expected, actual } => write!(
                f,
                "Playlist changed: expected {expected} tracks, found {actual}"
            ),
        }
    }
}
impl std::error::Error for TransportError {}
/// A result type for transports.
pub type TransportResult<T> = Result<T, TransportError>;

/// The owner of the authoritative playlist. Each change hands back the full
/// new sequence, which the caller feeds to [`crate::PlaylistModel::replace`].
pub trait Transport {
    fn move_tracks(&mut self, instruction: &MoveInstruction) -> TransportResult<Vec<Track>>;
    fn add_files(&mut self, request: &InsertRequest) -> TransportResult<Vec<Track>>;
}

/// A transport that keeps the playlist in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    tracks: Vec<Track>,
}
impl MemoryTransport {
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut transport = MemoryTransport { tracks };
        transport.renumber();
        transport
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    fn row_of(&self, id: TrackId) -> TransportResult<usize> {
        self.tracks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| {
                tracing::warn!("Track {id} is not in the playlist");
                TransportError::UnknownTrack(id)
            })
    }

    fn is_sentinel(&self) -> bool {
        matches!(self.tracks.as_slice(), [only] if only.is_blank())
    }

    fn renumber(&mut self) {
        for (pos, track) in self.tracks.iter_mut().enumerate() {
            track.pos = pos as u32;
        }
    }

    fn next_id(&self) -> u32 {
        self.tracks
            .iter()
            .map(|t| t.id.0)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }
}
impl Transport for MemoryTransport {
    /// Pins the held-back block to the bound, then applies each shift in
    /// order, clamped to the rows outside the block.
    fn move_tracks(&mut self, instruction: &MoveInstruction) -> TransportResult<Vec<Track>> {
        // Check every id before touching anything so a bad instruction leaves
        // the store as it was.
        for id in instruction.ids() {
            self.row_of(id)?;
        }

        if !instruction.held_back.is_empty() {
            let held: HashSet<TrackId> = instruction.held_back.iter().copied().collect();
            let (block, rest): (Vec<Track>, Vec<Track>) = std::mem::take(&mut self.tracks)
                .into_iter()
                .partition(|t| held.contains(&t.id));
            self.tracks = match instruction.direction {
                Direction::Down => rest.into_iter().chain(block).collect(),
                Direction::Up => block.into_iter().chain(rest).collect(),
            };
        }

        let held = instruction.held_back.len();
        let (first, last) = match instruction.direction {
            Direction::Down => (0, self.tracks.len().saturating_sub(held + 1)),
            Direction::Up => (held, self.tracks.len().saturating_sub(1)),
        };
        for &id in &instruction.items {
            let from = self.row_of(id)?;
            let to = (from as i64)
                .saturating_add(instruction.shift)
                .clamp(first as i64, last.max(first) as i64) as usize;
            let track = self.tracks.remove(from);
            self.tracks.insert(to, track);
        }

        self.renumber();
        tracing::debug!(
            "Applied move of {} track(s)",
            instruction.items.len() + instruction.held_back.len()
        );
        Ok(self.tracks.clone())
    }

    /// Adds one track per path, titled after the file name. A request made
    /// against the empty sentinel replaces it.
    fn add_files(&mut self, request: &InsertRequest) -> TransportResult<Vec<Track>> {
        let replacing = request.len == 0 && (self.tracks.is_empty() || self.is_sentinel());
        if !replacing && request.len != self.tracks.len() {
            return Err(TransportError::StaleRequest {
                expected: request.len,
                actual: self.tracks.len(),
            });
        }

        let first_id = if replacing { 0 } else { self.next_id() };
        let new_tracks = request.paths.iter().zip(first_id..).map(|(path, id)| Track {
            id: TrackId(id),
            title: Path::new(path)
                .file_stem()
                .map_or_else(|| path.clone(), |stem| stem.to_string_lossy().into_owned()),
            ..Default::default()
        });

        if replacing {
            self.tracks = new_tracks.collect();
        } else {
            let row = request.row.min(self.tracks.len());
            self.tracks.splice(row..row, new_tracks);
        }

        self.renumber();
        tracing::info!("Added {} file(s) to the playlist", request.paths.len());
        Ok(self.tracks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveRequest, Resolution, resolve_insert, resolve_move};
    use trackline_state::TrackList;

    fn tracks(len: u32) -> Vec<Track> {
        (0..len)
            .map(|i| Track {
                id: TrackId(i + 100),
                pos: i,
                title: format!("Track {i}"),
                artist: "Artist".to_string(),
                album: "Album".to_string(),
                ..Default::default()
            })
            .collect()
    }

    /// Resolves the drag against `len` tracks, replays it, and returns the
    /// resulting order as original rows.
    fn drag(len: u32, rows: &[usize], from: i64, to: i64) -> Vec<u32> {
        let list = TrackList::new(tracks(len));
        let Resolution::Move(instruction) = resolve_move(
            &list,
            &MoveRequest {
                rows: rows.to_vec(),
                target_row: to,
                last_clicked_row: from,
            },
        ) else {
            panic!("expected a move");
        };
        let mut transport = MemoryTransport::new(tracks(len));
        let result = transport.move_tracks(&instruction).unwrap();
        for (pos, track) in result.iter().enumerate() {
            assert_eq!(track.pos, pos as u32);
        }
        result.iter().map(|t| t.id.0 - 100).collect()
    }

    #[test]
    fn single_track_down_lands_above_the_target() {
        assert_eq!(drag(5, &[1], 1, 4), vec![0, 2, 3, 1, 4]);
    }

    #[test]
    fn single_track_to_the_end() {
        assert_eq!(drag(5, &[1], 1, 5), vec![0, 2, 3, 4, 1]);
    }

    #[test]
    fn single_track_up() {
        assert_eq!(drag(5, &[3], 3, 1), vec![0, 3, 1, 2, 4]);
    }

    #[test]
    fn single_track_to_the_top() {
        assert_eq!(drag(5, &[3], 3, 0), vec![3, 0, 1, 2, 4]);
    }

    #[test]
    fn overflowing_tail_stays_in_order_at_the_end() {
        let order = drag(10, &[7, 8, 9], 7, 10);
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn underflowing_head_stays_in_order_at_the_top() {
        let order = drag(10, &[0, 1, 2], 3, 0);
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn tail_overflow_keeps_the_selection_in_order() {
        assert_eq!(drag(10, &[3, 6, 7, 8], 3, 6), vec![0, 1, 2, 4, 5, 3, 9, 6, 7, 8]);
    }

    #[test]
    fn head_underflow_keeps_the_selection_in_order() {
        assert_eq!(drag(10, &[0, 1, 4], 4, 1), vec![0, 1, 4, 2, 3, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn selection_order_survives_boundary_moves() {
        let cases: Vec<(Vec<usize>, i64, i64)> = vec![
            (vec![3, 6, 7, 8], 3, 6),
            (vec![0, 1, 4], 4, 1),
            (vec![2, 6, 7], 2, 5),
            (vec![1, 4, 5], 4, 2),
            (vec![0, 4, 9, 10], 4, 8),
            (vec![2, 5, 6, 7], 6, 1),
            (vec![1, 2, 9, 10, 11], 2, 10),
            (vec![0, 3, 4, 8], 8, 2),
        ];
        for (rows, from, to) in cases {
            let order = drag(12, &rows, from, to);
            let selected: Vec<u32> = order
                .into_iter()
                .filter(|t| rows.contains(&(*t as usize)))
                .collect();
            let mut sorted = selected.clone();
            sorted.sort_unstable();
            assert_eq!(selected, sorted, "{rows:?} {from}->{to}");
        }
    }

    #[test]
    fn huge_target_row_moves_to_the_end() {
        assert_eq!(drag(5, &[1], 0, i64::MAX), vec![0, 2, 3, 4, 1]);
    }

    #[test]
    fn non_contiguous_selection_keeps_its_spacing() {
        assert_eq!(drag(10, &[1, 3], 1, 3), vec![0, 2, 1, 4, 3, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn unknown_id_leaves_the_store_untouched() {
        let mut transport = MemoryTransport::new(tracks(3));
        let err = transport
            .move_tracks(&MoveInstruction {
                items: vec![TrackId(101), TrackId(7)],
                held_back: vec![],
                shift: 1,
                bound: 2,
                direction: Direction::Down,
            })
            .unwrap_err();
        assert_eq!(err, TransportError::UnknownTrack(TrackId(7)));
        assert_eq!(transport.tracks(), tracks(3).as_slice());
    }

    #[test]
    fn files_replace_the_sentinel() {
        let sentinel = vec![Track::empty_sentinel()];
        let request = resolve_insert(
            &TrackList::new(sentinel.clone()),
            vec!["/music/One.flac".to_string(), "/music/Two.mp3".to_string()],
            4,
        )
        .unwrap();

        let mut transport = MemoryTransport::new(sentinel);
        let result = transport.add_files(&request).unwrap();
        let titles: Vec<&str> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
        assert_eq!(result[1].pos, 1);
    }

    #[test]
    fn files_insert_at_row_with_fresh_ids() {
        let request = resolve_insert(
            &TrackList::new(tracks(3)),
            vec!["/music/New.ogg".to_string()],
            1,
        )
        .unwrap();

        let mut transport = MemoryTransport::new(tracks(3));
        let result = transport.add_files(&request).unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(result[1].title, "New");
        assert_eq!(result[1].id, TrackId(103));
        assert_eq!(result[2].id, TrackId(101));
    }

    #[test]
    fn stale_insert_is_rejected() {
        let mut transport = MemoryTransport::new(tracks(2));
        let err = transport
            .add_files(&InsertRequest {
                paths: vec!["a.flac".to_string()],
                row: 0,
                len: 5,
            })
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::StaleRequest {
                expected: 5,
                actual: 2
            }
        );
    }
}
