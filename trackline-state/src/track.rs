use serde::{Deserialize, Serialize};

/// A track ID
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TrackId(pub u32);
impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A track, as it sits in a playlist
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// The track ID
    pub id: TrackId,
    /// The position of the track in the playlist, as last reported by the transport
    pub pos: u32,
    /// The track title
    pub title: String,
    /// The track artist
    pub artist: String,
    /// The album name
    pub album: String,
    /// The track number; zero or negative when unset
    pub track: i32,
    /// The disc number; zero or negative when unset
    pub disc: i32,
    /// The duration in seconds
    pub time: u32,
}
impl Track {
    /// The record a transport reports for a playlist with nothing in it.
    pub fn empty_sentinel() -> Self {
        Track::default()
    }

    /// Whether every descriptive field (title, artist, album) is blank.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.artist.is_empty() && self.album.is_empty()
    }

    /// The track number, if one is set.
    pub fn track_number(&self) -> Option<u32> {
        u32::try_from(self.track).ok().filter(|n| *n > 0)
    }

    /// The disc number, if one is set.
    pub fn disc_number(&self) -> Option<u32> {
        u32::try_from(self.disc).ok().filter(|n| *n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_numbers_are_none() {
        let track = Track {
            track: 0,
            disc: -1,
            ..Default::default()
        };
        assert_eq!(track.track_number(), None);
        assert_eq!(track.disc_number(), None);

        let track = Track {
            track: 4,
            disc: 2,
            ..Default::default()
        };
        assert_eq!(track.track_number(), Some(4));
        assert_eq!(track.disc_number(), Some(2));
    }

    #[test]
    fn sentinel_is_blank() {
        assert!(Track::empty_sentinel().is_blank());
        assert!(
            !Track {
                album: "X".to_string(),
                ..Default::default()
            }
            .is_blank()
        );
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let track: Track = serde_json::from_str(r#"{"id": 7, "title": "Song"}"#).unwrap();
        assert_eq!(track.id, TrackId(7));
        assert_eq!(track.title, "Song");
        assert_eq!(track.artist, "");
        assert_eq!(track.time, 0);
    }
}
