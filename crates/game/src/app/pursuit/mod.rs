use std::collections::HashMap;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::{debug, info, warn};
use world::{
    coarse_distance, distance_sq, Direction, DirectorEventListener, Door, Rect, RoomId,
    RoomMap, SpawnPoint, Vec2, ALL_ROOMS, CARDINAL_DIRECTIONS,
};

const ROOM_WIDTH_UNITS: f32 = 640.0;
const ROOM_HEIGHT_UNITS: f32 = 480.0;
const GRID_CELL_SIZE_UNITS: f32 = 16.0;
const MAX_SEARCH_ITERATIONS: usize = 100;
const ORTHOGONAL_STEP_COST: u32 = 100;
const DIAGONAL_STEP_COST: u32 = 141;
const MAX_ROOM_DISTANCE: i32 = 3;
const ENEMY_MOVE_COOLDOWN_MIN_SECONDS: f32 = 6.0;
const ENEMY_MOVE_COOLDOWN_MAX_SECONDS: f32 = 10.0;
const ENTRY_GRACE_MIN_SECONDS: f32 = 3.0;
const ENTRY_GRACE_MAX_SECONDS: f32 = 5.0;
const DOOR_ENTRY_DELAY_SECONDS: f32 = 1.5;
const TRANSITION_BUFFER_DURATION_SECONDS: f32 = 2.0;
const RETREAT_COOLDOWN_MULTIPLIER: f32 = 2.0;
const CAMERA_SHAKE_INTENSITY: f32 = 6.0;
const DOOR_SPAWN_MARGIN_UNITS: f32 = 40.0;
const ROOM_ENTRY_DELAY_SECONDS: f32 = 2.5;
const SPAWN_COOLDOWN_MIN_SECONDS: f32 = 15.0;
const SPAWN_COOLDOWN_MAX_SECONDS: f32 = 30.0;
const HIGH_TRAFFIC_COOLDOWN_FACTOR: f32 = 0.7;
const SPAWN_CHANCE_BASE: f32 = 0.35;
const SPAWN_CHANCE_PER_ENTRY: f32 = 0.08;
const SPAWN_CHANCE_HIGH_TRAFFIC_BONUS: f32 = 0.20;
const SPAWN_CHANCE_MAX: f32 = 0.70;
const MIN_SPAWN_DISTANCE_UNITS: f32 = 150.0;
const DETECTION_RADIUS_UNITS: f32 = 220.0;
const VISION_RADIUS_UNITS: f32 = 350.0;
const WANDER_REDIRECT_SECONDS: f32 = 3.0;
const STUN_DURATION_SECONDS: f32 = 1.5;
const DESPAWN_DELAY_SECONDS: f32 = 3.0;
const RESPAWN_CHECK_INTERVAL_SECONDS: f32 = 2.0;
const RESPAWN_SCATTER_RADIUS_UNITS: f32 = 100.0;
const RESPAWN_PLACEMENT_ATTEMPTS: usize = 8;
const PATH_REFRESH_DRIFT_UNITS: f32 = 50.0;
const WAYPOINT_ARRIVAL_RADIUS_UNITS: f32 = 8.0;
const CATCH_RADIUS_UNITS: f32 = 24.0;
const JOSH_SPAWN_TAG: &str = "josh";

include!("types.rs");
include!("pathfinding.rs");
include!("enemy.rs");
include!("room_director.rs");
include!("spawn.rs");
include!("session.rs");
include!("util.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
