use serde::{Deserialize, Serialize};
use trackline_state::TrackList;

/// Files dropped into the playlist from outside, for the transport to add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertRequest {
    pub paths: Vec<String>,
    /// The row the first file should land on.
    pub row: usize,
    /// The playlist length the request was made against. Zero when the
    /// playlist was the empty sentinel, which the new files replace.
    pub len: usize,
}

/// Works out where dropped files go. Returns `None` when the drop isn't on a
/// row or carries no files.
pub fn resolve_insert(
    list: &TrackList,
    paths: Vec<String>,
    target_row: i64,
) -> Option<InsertRequest> {
    if target_row < 0 || paths.is_empty() {
        return None;
    }

    let request = if list.is_empty_sentinel() {
        InsertRequest {
            paths,
            row: 0,
            len: 0,
        }
    } else {
        let len = list.len();
        InsertRequest {
            paths,
            row: usize::try_from(target_row).map_or(len, |row| row.min(len)),
            len,
        }
    };
    tracing::debug!(
        "Inserting {} file(s) at row {} of {}",
        request.paths.len(),
        request.row,
        request.len
    );
    Some(request)
}
