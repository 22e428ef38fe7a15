pub mod events;
pub mod geometry;
pub mod map;
pub mod rooms;

pub use events::{DirectorEventListener, NullListener};
pub use geometry::{distance, distance_sq, Rect, Vec2};
pub use map::{Door, RoomMap, RoomMapError, SpawnPoint};
pub use rooms::{coarse_distance, room_at, Direction, RoomId, ALL_ROOMS, CARDINAL_DIRECTIONS};
