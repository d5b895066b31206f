//! Representations of a playlist's contents: track records and the ordered
//! sequence that holds them.
//!
//! Separated out so that the playlist logic and any transport can share the
//! same data types.
#![deny(missing_docs)]

mod track;
pub use track::{Track, TrackId};

mod track_list;
pub use track_list::TrackList;
