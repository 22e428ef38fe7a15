use thiserror::Error;
use tracing::warn;

use crate::geometry::{Rect, Vec2};
use crate::rooms::{Direction, RoomId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Door {
    pub bounds: Rect,
    pub target_room: RoomId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec2,
    pub facing: Option<Direction>,
    pub priority: Option<i32>,
    pub near_door: Option<RoomId>,
    pub tag: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RoomMapError {
    #[error("room extent must be positive and finite, got {width}x{height}")]
    InvalidExtent { width: f32, height: f32 },
    #[error("furniture[{index}] is not a well-formed rectangle")]
    MalformedFurniture { index: usize },
    #[error("furniture[{index}] extends outside the room")]
    FurnitureOutOfBounds { index: usize },
    #[error("door[{index}] is not a well-formed rectangle")]
    MalformedDoor { index: usize },
    #[error("spawn point[{index}] lies outside the room")]
    SpawnPointOutOfBounds { index: usize },
}

/// Physical data for one room: walkable extent, furniture obstacles, door
/// bounds with the room each door leads to, and tagged spawn points.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomMap {
    room: RoomId,
    width: f32,
    height: f32,
    furniture: Vec<Rect>,
    doors: Vec<Door>,
    spawn_points: Vec<SpawnPoint>,
}

impl RoomMap {
    pub fn new(
        room: RoomId,
        width: f32,
        height: f32,
        furniture: Vec<Rect>,
        doors: Vec<Door>,
        spawn_points: Vec<SpawnPoint>,
    ) -> Result<Self, RoomMapError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(RoomMapError::InvalidExtent { width, height });
        }
        let bounds = Rect {
            x: 0.0,
            y: 0.0,
            width,
            height,
        };
        for (index, rect) in furniture.iter().enumerate() {
            if !rect.is_well_formed() {
                return Err(RoomMapError::MalformedFurniture { index });
            }
            if rect.x < 0.0
                || rect.y < 0.0
                || rect.x + rect.width > width
                || rect.y + rect.height > height
            {
                return Err(RoomMapError::FurnitureOutOfBounds { index });
            }
        }
        for (index, door) in doors.iter().enumerate() {
            if !door.bounds.is_well_formed() {
                return Err(RoomMapError::MalformedDoor { index });
            }
        }
        for (index, point) in spawn_points.iter().enumerate() {
            if !bounds.contains(point.position) {
                return Err(RoomMapError::SpawnPointOutOfBounds { index });
            }
            if furniture.iter().any(|rect| rect.contains(point.position)) {
                warn!(
                    room = room.as_token(),
                    index,
                    x = point.position.x,
                    y = point.position.y,
                    "spawn_point_inside_furniture"
                );
            }
        }
        Ok(Self {
            room,
            width,
            height,
            furniture,
            doors,
            spawn_points,
        })
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn is_walkable(&self, point: Vec2) -> bool {
        if point.x < 0.0 || point.y < 0.0 || point.x >= self.width || point.y >= self.height {
            return false;
        }
        !self.furniture.iter().any(|rect| rect.contains(point))
    }

    pub fn furniture(&self) -> &[Rect] {
        &self.furniture
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door_to(&self, target_room: RoomId) -> Option<&Door> {
        self.doors.iter().find(|door| door.target_room == target_room)
    }

    pub fn spawn_points(&self, tag: &str) -> Vec<&SpawnPoint> {
        self.spawn_points
            .iter()
            .filter(|point| point.tag == tag)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_map() -> RoomMap {
        RoomMap::new(RoomId::Foyer, 640.0, 480.0, Vec::new(), Vec::new(), Vec::new())
            .expect("empty map is valid")
    }

    #[test]
    fn walkable_respects_bounds_and_furniture() {
        let map = RoomMap::new(
            RoomId::Foyer,
            640.0,
            480.0,
            vec![Rect {
                x: 100.0,
                y: 100.0,
                width: 50.0,
                height: 50.0,
            }],
            Vec::new(),
            Vec::new(),
        )
        .expect("map");
        assert!(map.is_walkable(Vec2 { x: 10.0, y: 10.0 }));
        assert!(!map.is_walkable(Vec2 { x: 120.0, y: 120.0 }));
        assert!(!map.is_walkable(Vec2 { x: -1.0, y: 10.0 }));
        assert!(!map.is_walkable(Vec2 { x: 640.0, y: 10.0 }));
    }

    #[test]
    fn furniture_outside_room_is_rejected() {
        let result = RoomMap::new(
            RoomId::Foyer,
            640.0,
            480.0,
            vec![Rect {
                x: 620.0,
                y: 0.0,
                width: 40.0,
                height: 40.0,
            }],
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(result, Err(RoomMapError::FurnitureOutOfBounds { index: 0 }));
    }

    #[test]
    fn non_positive_extent_is_rejected() {
        let result = RoomMap::new(RoomId::Foyer, 0.0, 480.0, Vec::new(), Vec::new(), Vec::new());
        assert!(matches!(result, Err(RoomMapError::InvalidExtent { .. })));
    }

    #[test]
    fn spawn_point_outside_room_is_rejected() {
        let result = RoomMap::new(
            RoomId::Foyer,
            640.0,
            480.0,
            Vec::new(),
            Vec::new(),
            vec![SpawnPoint {
                position: Vec2 { x: 700.0, y: 10.0 },
                facing: None,
                priority: None,
                near_door: None,
                tag: "josh",
            }],
        );
        assert_eq!(result, Err(RoomMapError::SpawnPointOutOfBounds { index: 0 }));
    }

    #[test]
    fn door_lookup_by_target_room() {
        let map = RoomMap::new(
            RoomId::Foyer,
            640.0,
            480.0,
            Vec::new(),
            vec![Door {
                bounds: Rect {
                    x: 608.0,
                    y: 208.0,
                    width: 32.0,
                    height: 64.0,
                },
                target_room: RoomId::Parlor,
            }],
            Vec::new(),
        )
        .expect("map");
        assert!(map.door_to(RoomId::Parlor).is_some());
        assert!(map.door_to(RoomId::Kitchen).is_none());
    }

    #[test]
    fn spawn_points_filter_by_tag() {
        let map = RoomMap::new(
            RoomId::Foyer,
            640.0,
            480.0,
            Vec::new(),
            Vec::new(),
            vec![
                SpawnPoint {
                    position: Vec2 { x: 80.0, y: 80.0 },
                    facing: Some(Direction::Right),
                    priority: None,
                    near_door: None,
                    tag: "josh",
                },
                SpawnPoint {
                    position: Vec2 { x: 320.0, y: 240.0 },
                    facing: None,
                    priority: None,
                    near_door: None,
                    tag: "prop",
                },
            ],
        )
        .expect("map");
        assert_eq!(map.spawn_points("josh").len(), 1);
        assert_eq!(map.spawn_points("prop").len(), 1);
        assert!(map.spawn_points("missing").is_empty());
        assert!(empty_map().spawn_points("josh").is_empty());
    }
}
