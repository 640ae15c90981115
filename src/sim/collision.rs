//! Player vs blast contact
//!
//! Blast cells and resting player positions both come from
//! `GridSpec::world_of`, so contact is exact position equality: a player
//! between two tiles is never hit.

use glam::Vec2;

use super::bomb::Bomb;

/// Whether `pos` sits exactly on one of `cells`
#[inline]
pub fn blast_hits(pos: Vec2, cells: &[Vec2]) -> bool {
    cells.iter().any(|&cell| cell == pos)
}

/// Index of the first exploded bomb whose blast covers `pos`
pub fn first_lethal_bomb(pos: Vec2, bombs: &[Bomb]) -> Option<usize> {
    bombs
        .iter()
        .position(|bomb| bomb.is_exploded() && blast_hits(pos, bomb.blast_cells()))
}
