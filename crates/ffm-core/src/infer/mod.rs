// Field inference: fields derived from more than one cell or from a cell's
// free text.

pub mod split;
pub mod status;

pub use split::{split_player_info, FirstMatchSplitter, InfoSplitter, PlayerInfo};
pub use status::{infer_roster_status, StatusInput};
