//! How a playlist row is split into columns for display.

use trackline_state::Track;

use crate::util::seconds_to_hms_string;

/// A playlist column, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Title,
    Artist,
    Album,
    Track,
    Time,
    Disc,
}
impl Column {
    /// Every column, in display order.
    pub const ALL: [Column; 6] = [
        Column::Title,
        Column::Artist,
        Column::Album,
        Column::Track,
        Column::Time,
        Column::Disc,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Artist => "Artist",
            Column::Album => "Album",
            Column::Track => "Track",
            Column::Time => "Time",
            Column::Disc => "Disc",
        }
    }

    /// The text for this column of `track`. Unset track and disc numbers
    /// display as nothing.
    pub fn cell(&self, track: &Track) -> Option<String> {
        match self {
            Column::Title => Some(track.title.clone()),
            Column::Artist => Some(track.artist.clone()),
            Column::Album => Some(track.album.clone()),
            Column::Track => track.track_number().map(|n| n.to_string()),
            Column::Time => Some(seconds_to_hms_string(track.time)),
            Column::Disc => track.disc_number().map(|n| n.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackline_state::TrackId;

    #[test]
    fn cells() {
        let track = Track {
            id: TrackId(1),
            title: "Song".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            track: 3,
            disc: 0,
            time: 245,
            ..Default::default()
        };
        assert_eq!(Column::Title.cell(&track).as_deref(), Some("Song"));
        assert_eq!(Column::Track.cell(&track).as_deref(), Some("3"));
        assert_eq!(Column::Time.cell(&track).as_deref(), Some("4:05"));
        assert_eq!(Column::Disc.cell(&track), None);
    }

    #[test]
    fn indices_follow_display_order() {
        assert_eq!(Column::from_index(0), Some(Column::Title));
        assert_eq!(Column::from_index(5), Some(Column::Disc));
        assert_eq!(Column::from_index(6), None);
        assert_eq!(Column::from_index(4).map(|c| c.header()), Some("Time"));
    }
}
