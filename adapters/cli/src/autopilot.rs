//! Scripted input source used when no human is at the keyboard.

use maze_chase_system_session::Input;
use maze_chase_world::{query, World};

/// Picks the move that follows the current shortest route to the exit.
///
/// Returns `None` when the player is already on the exit or cut off from it.
pub(crate) fn next_input(world: &World) -> Option<Input> {
    let player = query::player(world);
    let route = query::shortest_path(world, player, query::exit(world));
    let next = route.first_step()?;
    player.direction_to(next).map(Input::Move)
}
