use serde::{Deserialize, Serialize};

use crate::{Board, Point};

/// One newline-delimited JSON record on a bot's stdin.
///
/// The same record shape covers both the setup message (which carries only
/// `number`, the receiver's own player id) and the per-turn state message
/// (which carries the board, all four inventories, the id of the player to
/// move, and `move: 1` when the receiver must answer with a move line).
/// Fields that are absent from a given message stay `None`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateMsg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardMsg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Vec<BlockMsg>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<i8>,
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub move_required: Option<u8>,
}

impl StateMsg {
    /// The game-start message assigning a player id.
    pub fn setup(number: i8) -> Self {
        StateMsg {
            number: Some(number),
            ..StateMsg::default()
        }
    }

    /// The turn message demanding a move from the player to move.
    pub fn turn_request(board: &Board) -> Self {
        StateMsg {
            board: Some(board.to_snapshot()),
            blocks: Some(board.blocks_msg()),
            turn: Some(board.to_move()),
            move_required: Some(1),
            ..StateMsg::default()
        }
    }
}

/// The board portion of a state record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardMsg {
    pub dimension: i8,
    /// `grid[x][y]` is −1 for an empty cell, else the owning player id.
    pub grid: Vec<Vec<i8>>,
    pub bonus_squares: Vec<[i8; 2]>,
}

/// A block shape on the wire: the list of its cell offsets.
pub type BlockMsg = Vec<OffsetMsg>;

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct OffsetMsg {
    pub x: i8,
    pub y: i8,
}

impl From<OffsetMsg> for Point {
    fn from(o: OffsetMsg) -> Point {
        Point::new(o.x, o.y)
    }
}

impl From<Point> for OffsetMsg {
    fn from(p: Point) -> OffsetMsg {
        OffsetMsg { x: p.x, y: p.y }
    }
}
