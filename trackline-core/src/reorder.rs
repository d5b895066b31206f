use serde::{Deserialize, Serialize};
use trackline_state::{TrackId, TrackList};

/// A "drop these rows at this row" gesture, in rows as they were before the drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// The selected rows being dragged. Order and duplicates don't matter.
    pub rows: Vec<usize>,
    /// The row the selection was dropped on. Negative when dropped outside any row.
    pub target_row: i64,
    /// The row the drag started from.
    pub last_clicked_row: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the end of the playlist.
    Down,
}

/// What the transport has to do to carry out a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstruction {
    /// Tracks to shift by `shift`, in the order the shifts must be applied.
    pub items: Vec<TrackId>,
    /// Tracks whose destination would reach `bound` or the block already
    /// pinned there. They are pinned to `bound` as a block, in their original
    /// order, before `items` shift.
    pub held_back: Vec<TrackId>,
    /// Signed row displacement for every id in `items`.
    pub shift: i64,
    /// The last row the move may reach: the final row moving down, row 0 moving up.
    pub bound: usize,
    pub direction: Direction,
}
impl MoveInstruction {
    /// Every id the instruction touches, held-back tracks first.
    pub fn ids(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.held_back.iter().chain(&self.items).copied()
    }
}

/// The outcome of resolving a [`MoveRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The drop was not on a row; nothing to do.
    Ignored,
    /// The drop is valid but leaves the playlist as it is.
    Unchanged,
    Move(MoveInstruction),
}

/// Turns a drag gesture into a [`MoveInstruction`] without touching `list`.
///
/// Moving down, rows are taken highest first and the shift is one less than the
/// raw row difference: a drop lands above the target row. Moving up, rows are
/// taken lowest first. Target rows past the end count as a drop after the last
/// row.
///
/// A row whose destination reaches the far end of the playlist (`N - 1` down,
/// `0` up), or the block already held there, is reported in `held_back`
/// instead of being shifted. Those rows are always a prefix of the scan.
pub fn resolve_move(list: &TrackList, request: &MoveRequest) -> Resolution {
    if request.target_row < 0 {
        tracing::debug!("Ignoring drop outside the playlist (row {})", request.target_row);
        return Resolution::Ignored;
    }

    if list.is_empty() || list.is_empty_sentinel() {
        tracing::debug!("Ignoring move in an empty playlist");
        return Resolution::Unchanged;
    }

    let len = list.len();
    let target_row = request.target_row.min(len as i64);
    let mut diff = target_row.saturating_sub(request.last_clicked_row);
    if diff == 0 {
        return Resolution::Unchanged;
    }

    let mut rows: Vec<usize> = request.rows.iter().copied().filter(|r| *r < len).collect();
    rows.sort_unstable();
    rows.dedup();
    if rows.is_empty() {
        return Resolution::Unchanged;
    }

    let direction = if diff > 0 {
        Direction::Down
    } else {
        Direction::Up
    };
    let bound = match direction {
        Direction::Down => {
            rows.reverse();
            diff -= 1;
            len - 1
        }
        Direction::Up => 0,
    };
    if diff == 0 {
        // Dropped directly below itself.
        return Resolution::Unchanged;
    }

    // Each held row takes one slot at the bound, so the next row crosses one
    // slot earlier. Once a row stays clear of the held block, so does every row
    // after it.
    let cutoff = rows
        .iter()
        .enumerate()
        .take_while(|&(held, &row)| {
            let destination = (row as i64).saturating_add(diff);
            match direction {
                Direction::Down => destination >= (bound - held) as i64,
                Direction::Up => destination <= held as i64,
            }
        })
        .count();

    let (crossing, shifted) = rows.split_at(cutoff);
    let mut held_back = crossing.to_vec();
    held_back.sort_unstable();

    let to_ids = |rows: &[usize]| -> Vec<TrackId> {
        rows.iter().filter_map(|&row| list.id_by_row(row)).collect()
    };
    let instruction = MoveInstruction {
        items: to_ids(shifted),
        held_back: to_ids(&held_back),
        shift: diff,
        bound,
        direction,
    };
    tracing::debug!(
        "Resolved {:?} move: shift={} bound={} items={} held_back={}",
        direction,
        instruction.shift,
        instruction.bound,
        instruction.items.len(),
        instruction.held_back.len()
    );
    Resolution::Move(instruction)
}
