use trackline_state::{Track, TrackId, TrackList};

use crate::{
    DragPayload, DragPayloadResult, DropAction, InsertRequest, Invalidation, MoveInstruction,
    MoveRequest, NowPlaying, PlaylistStats, Resolution, SharedStats, Transport, TransportResult,
    columns::Column, resolve_insert, resolve_move,
};

pub type PlaylistEventRx = tokio::sync::broadcast::Receiver<PlaylistEvent>;

/// Notifications from the playlist model.
#[derive(Debug, Clone)]
pub enum PlaylistEvent {
    /// The sequence was replaced; the new one is already visible.
    Reset,
    /// The shared stats were recomputed.
    StatsUpdated(PlaylistStats),
    /// A drag resolved to a move for the transport to carry out.
    MoveRequested(MoveInstruction),
    /// Files were dropped for the transport to add.
    FilesAdded(InsertRequest),
    /// Rows whose now-playing highlight changed.
    RowsChanged(Invalidation),
}

/// The playlist as the UI sees it.
///
/// The model owns the sequence and only ever changes it by wholesale
/// replacement. Drags resolve to instructions that a [`Transport`] applies,
/// with the result coming back through [`Self::replace`].
pub struct PlaylistModel {
    tracks: TrackList,
    stats: SharedStats,
    now_playing: NowPlaying,
    last_clicked_row: Option<usize>,
    event_tx: tokio::sync::broadcast::Sender<PlaylistEvent>,
}
impl PlaylistModel {
    const EVENT_CAPACITY: usize = 100;

    pub fn new(stats: SharedStats) -> Self {
        let (event_tx, _) = tokio::sync::broadcast::channel(Self::EVENT_CAPACITY);
        PlaylistModel {
            tracks: TrackList::default(),
            stats,
            now_playing: NowPlaying::default(),
            last_clicked_row: None,
            event_tx,
        }
    }

    pub fn subscribe(&self) -> PlaylistEventRx {
        self.event_tx.subscribe()
    }

    /// Swaps in a new sequence, then signals the reset and refreshes the stats.
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = TrackList::new(tracks);
        tracing::info!("Playlist replaced ({} tracks)", self.tracks.len());
        self.emit(PlaylistEvent::Reset);
        self.on_reset();
    }

    fn on_reset(&self) {
        let stats = self.stats.recompute(&self.tracks);
        self.emit(PlaylistEvent::StatsUpdated(stats));
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn stats(&self) -> &SharedStats {
        &self.stats
    }

    pub fn row_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    pub fn id_by_row(&self, row: usize) -> Option<TrackId> {
        self.tracks.id_by_row(row)
    }

    pub fn pos_by_row(&self, row: usize) -> Option<u32> {
        self.tracks.pos_by_row(row)
    }

    pub fn row_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.row_of(id)
    }

    /// Whether `row` holds the track that is playing.
    pub fn is_playing_row(&self, row: usize) -> bool {
        self.tracks
            .get(row)
            .is_some_and(|track| self.now_playing.is_current(track))
    }

    /// Remembers where a drag may start from.
    pub fn clicked(&mut self, row: usize) {
        self.last_clicked_row = Some(row);
    }

    pub fn update_current(&mut self, id: TrackId) -> Invalidation {
        let invalidation = self.now_playing.update(&self.tracks, id);
        if !invalidation.is_empty() {
            self.emit(PlaylistEvent::RowsChanged(invalidation.clone()));
        }
        invalidation
    }

    pub fn drag_payload(&self, rows: impl IntoIterator<Item = usize>) -> DragPayload {
        DragPayload::for_rows(&self.tracks, rows)
    }

    /// Resolves a drop of `rows` on `target_row`, measured from the last
    /// clicked row. A drop with no preceding click is ignored.
    pub fn drop_rows(&self, rows: Vec<usize>, target_row: i64) -> Resolution {
        let Some(last_clicked_row) = self.last_clicked_row else {
            tracing::debug!("Ignoring row drop with no drag origin");
            return Resolution::Ignored;
        };

        let resolution = resolve_move(
            &self.tracks,
            &MoveRequest {
                rows,
                target_row,
                last_clicked_row: last_clicked_row as i64,
            },
        );
        if let Resolution::Move(instruction) = &resolution {
            self.emit(PlaylistEvent::MoveRequested(instruction.clone()));
        }
        resolution
    }

    pub fn drop_files(&self, paths: Vec<String>, target_row: i64) -> Option<InsertRequest> {
        let request = resolve_insert(&self.tracks, paths, target_row)?;
        self.emit(PlaylistEvent::FilesAdded(request.clone()));
        Some(request)
    }

    /// Handles a decoded drop. Always accepts: every payload kind is one the
    /// playlist understands, and bad rows degrade to doing nothing.
    pub fn drop_payload(&self, payload: DragPayload, action: DropAction, target_row: i64) -> bool {
        if action == DropAction::Ignore {
            return true;
        }

        match payload {
            DragPayload::Move { positions } => {
                let rows = positions.into_iter().map(|pos| pos as usize).collect();
                self.drop_rows(rows, target_row);
            }
            DragPayload::Files { paths } => {
                self.drop_files(paths, target_row);
            }
        }
        true
    }

    /// Decodes and handles a raw drop.
    ///
    /// # Errors
    ///
    /// Fails when `mime` isn't one of the playlist's types or the body doesn't
    /// decode; nothing is resolved in that case.
    pub fn drop_mime(
        &self,
        mime: &str,
        bytes: &[u8],
        action: DropAction,
        target_row: i64,
    ) -> DragPayloadResult<bool> {
        if action == DropAction::Ignore {
            return Ok(true);
        }
        let payload = DragPayload::from_bytes(mime, bytes)?;
        Ok(self.drop_payload(payload, action, target_row))
    }

    /// Has `transport` carry out a move and takes back the sequence it reports.
    pub fn apply_move(
        &mut self,
        transport: &mut impl Transport,
        instruction: &MoveInstruction,
    ) -> TransportResult<()> {
        let tracks = transport.move_tracks(instruction)?;
        self.replace(tracks);
        Ok(())
    }

    /// Has `transport` add dropped files and takes back the sequence it reports.
    pub fn apply_insert(
        &mut self,
        transport: &mut impl Transport,
        request: &InsertRequest,
    ) -> TransportResult<()> {
        let tracks = transport.add_files(request)?;
        self.replace(tracks);
        Ok(())
    }

    fn emit(&self, event: PlaylistEvent) {
        // Sending only fails when nobody is subscribed.
        let _ = self.event_tx.send(event);
    }
}
