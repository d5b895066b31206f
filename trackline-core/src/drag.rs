use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use trackline_state::TrackList;

/// MIME type for rows dragged within the playlist.
pub const MOVE_MIME: &str = "application/x-trackline-move";
/// MIME type for files dragged in from the library.
pub const FILES_MIME: &str = "application/x-trackline-files";

#[derive(Debug)]
/// An error that can occur when packing or unpacking a drag payload.
pub enum DragPayloadError {
    /// The drop carried a MIME type the playlist doesn't accept.
    UnknownMime(String),
    /// The payload body couldn't be decoded.
    Decode(serde_json::Error),
    /// The payload body couldn't be encoded.
    Encode(serde_json::Error),
}
impl From<serde_json::Error> for DragPayloadError {
    fn from(e: serde_json::Error) -> Self {
        DragPayloadError::Decode(e)
    }
}
impl std::fmt::Display for DragPayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DragPayloadError::UnknownMime(mime) => write!(f, "Unsupported drop type: {mime}"),
            DragPayloadError::Decode(e) => write!(f, "Failed to decode drop payload: {e}"),
            DragPayloadError::Encode(e) => write!(f, "Failed to encode drag payload: {e}"),
        }
    }
}
impl std::error::Error for DragPayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DragPayloadError::UnknownMime(_) => None,
            DragPayloadError::Decode(e) | DragPayloadError::Encode(e) => Some(e),
        }
    }
}
/// A result type for drag payloads.
pub type DragPayloadResult<T> = Result<T, DragPayloadError>;

/// What the UI asked to do with a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    Ignore,
    Copy,
    Move,
}

/// The logical content of a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPayload {
    /// Playlist rows, identified by their reported positions.
    Move { positions: Vec<u32> },
    /// Library files to add.
    Files { paths: Vec<String> },
}
impl DragPayload {
    /// Packs the selected rows, each row once, skipping rows past the end.
    ///
    /// Selections from a table arrive once per cell, so the same row
    /// usually shows up several times.
    pub fn for_rows(list: &TrackList, rows: impl IntoIterator<Item = usize>) -> Self {
        let mut seen = HashSet::new();
        let positions = rows
            .into_iter()
            .filter(|row| seen.insert(*row))
            .filter_map(|row| list.pos_by_row(row))
            .collect();
        DragPayload::Move { positions }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DragPayload::Move { .. } => MOVE_MIME,
            DragPayload::Files { .. } => FILES_MIME,
        }
    }

    /// The payload body; the kind travels separately as [`Self::mime_type`].
    pub fn to_bytes(&self) -> DragPayloadResult<Vec<u8>> {
        let bytes = match self {
            DragPayload::Move { positions } => serde_json::to_vec(positions),
            DragPayload::Files { paths } => serde_json::to_vec(paths),
        };
        bytes.map_err(DragPayloadError::Encode)
    }

    pub fn from_bytes(mime: &str, bytes: &[u8]) -> DragPayloadResult<Self> {
        match mime {
            MOVE_MIME => Ok(DragPayload::Move {
                positions: serde_json::from_slice(bytes)?,
            }),
            FILES_MIME => Ok(DragPayload::Files {
                paths: serde_json::from_slice(bytes)?,
            }),
            other => Err(DragPayloadError::UnknownMime(other.to_string())),
        }
    }
}
