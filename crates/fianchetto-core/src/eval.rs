//! Static evaluation: material balance plus terminal outcomes.

use shakmaty::{Chess, Color, Position, Role};

/// Scores are expressed in hundredths of a pawn.
pub type CentiPawns = i64;

pub const PAWN_VALUE: CentiPawns = 100;
pub const KNIGHT_VALUE: CentiPawns = 300;
pub const BISHOP_VALUE: CentiPawns = 300;
pub const ROOK_VALUE: CentiPawns = 500;
pub const QUEEN_VALUE: CentiPawns = 900;
pub const KING_VALUE: CentiPawns = 1_000_000;

/// King plus the full starting complement of one side. No reachable
/// material score exceeds this, so it doubles as the mate score.
pub const MAX_SCORE: CentiPawns = 1_003_900;

fn piece_value(role: Role) -> CentiPawns {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

fn material(pos: &Chess, color: Color) -> CentiPawns {
    let board = pos.board();
    Role::ALL
        .iter()
        .map(|&role| {
            let count = (board.by_color(color) & board.by_role(role)).count() as CentiPawns;
            count * piece_value(role)
        })
        .sum()
}

/// Material advantage of `color` over the opponent.
pub fn material_advantage(pos: &Chess, color: Color) -> CentiPawns {
    material(pos, color) - material(pos, color.other())
}

/// Score a position from the perspective of `color`.
///
/// Checkmate is worth the full `MAX_SCORE` for the winning side and
/// `-MAX_SCORE` for the loser; any drawn outcome scores zero. Non-terminal
/// positions score their material advantage.
pub fn score_position(pos: &Chess, color: Color) -> CentiPawns {
    if let Some(outcome) = pos.outcome() {
        return match outcome.winner() {
            Some(winner) if winner == color => MAX_SCORE,
            Some(_) => -MAX_SCORE,
            None => 0,
        };
    }
    material_advantage(pos, color)
}
