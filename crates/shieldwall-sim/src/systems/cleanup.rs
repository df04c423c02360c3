//! Cleanup system: removes projectiles destroyed or landed this tick.

use hecs::{Entity, World};

/// Despawn everything collected in the buffer. An entity queued twice is
/// only despawned once.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.sort_unstable_by_key(|entity| entity.to_bits());
    despawn_buffer.dedup();

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
