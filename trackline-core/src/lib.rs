pub use trackline_state;

pub mod columns;
pub mod util;

mod drag;
pub use drag::{
    DragPayload, DragPayloadError, DragPayloadResult, DropAction, FILES_MIME, MOVE_MIME,
};

mod highlight;
pub use highlight::{Invalidation, NowPlaying, RowSpan};

mod insert;
pub use insert::{InsertRequest, resolve_insert};

mod model;
pub use model::{PlaylistEvent, PlaylistEventRx, PlaylistModel};

mod reorder;
pub use reorder::{Direction, MoveInstruction, MoveRequest, Resolution, resolve_move};

mod stats;
pub use stats::{PlaylistStats, SharedStats};

mod transport;
pub use transport::{MemoryTransport, Transport, TransportError, TransportResult};
