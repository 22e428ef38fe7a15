use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

pub const CARDINAL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// House layout: ground floor on row 0, basement on row 1, five rooms per
/// row. Each room's (row, col) is an explicit table entry; adjacency is
/// derived from the table, so it is symmetric and exhaustive by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomId {
    Foyer,
    Parlor,
    Hallway,
    Kitchen,
    Sunroom,
    Cellar,
    BoilerRoom,
    Archive,
    Pantry,
    Workshop,
}

pub const ALL_ROOMS: [RoomId; 10] = [
    RoomId::Foyer,
    RoomId::Parlor,
    RoomId::Hallway,
    RoomId::Kitchen,
    RoomId::Sunroom,
    RoomId::Cellar,
    RoomId::BoilerRoom,
    RoomId::Archive,
    RoomId::Pantry,
    RoomId::Workshop,
];

impl RoomId {
    pub fn grid_position(self) -> (i32, i32) {
        match self {
            Self::Foyer => (0, 0),
            Self::Parlor => (0, 1),
            Self::Hallway => (0, 2),
            Self::Kitchen => (0, 3),
            Self::Sunroom => (0, 4),
            Self::Cellar => (1, 0),
            Self::BoilerRoom => (1, 1),
            Self::Archive => (1, 2),
            Self::Pantry => (1, 3),
            Self::Workshop => (1, 4),
        }
    }

    pub fn neighbor(self, direction: Direction) -> Option<RoomId> {
        let (row, col) = self.grid_position();
        let (neighbor_row, neighbor_col) = match direction {
            Direction::Up => (row - 1, col),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col - 1),
            Direction::Right => (row, col + 1),
        };
        room_at(neighbor_row, neighbor_col)
    }

    pub fn neighbors(self) -> [Option<RoomId>; 4] {
        [
            self.neighbor(Direction::Up),
            self.neighbor(Direction::Down),
            self.neighbor(Direction::Left),
            self.neighbor(Direction::Right),
        ]
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Foyer => "foyer",
            Self::Parlor => "parlor",
            Self::Hallway => "hallway",
            Self::Kitchen => "kitchen",
            Self::Sunroom => "sunroom",
            Self::Cellar => "cellar",
            Self::BoilerRoom => "boiler_room",
            Self::Archive => "archive",
            Self::Pantry => "pantry",
            Self::Workshop => "workshop",
        }
    }
}

pub fn room_at(row: i32, col: i32) -> Option<RoomId> {
    ALL_ROOMS
        .iter()
        .copied()
        .find(|room| room.grid_position() == (row, col))
}

pub fn coarse_distance(a: RoomId, b: RoomId) -> i32 {
    let (a_row, a_col) = a.grid_position();
    let (b_row, b_col) = b.grid_position();
    (a_row - b_row).abs() + (a_col - b_col).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_positions_are_unique() {
        for (index, room) in ALL_ROOMS.iter().enumerate() {
            for other in ALL_ROOMS.iter().skip(index + 1) {
                assert_ne!(
                    room.grid_position(),
                    other.grid_position(),
                    "{:?} and {:?} share a grid cell",
                    room,
                    other
                );
            }
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        for room in ALL_ROOMS {
            for direction in CARDINAL_DIRECTIONS {
                let Some(neighbor) = room.neighbor(direction) else {
                    continue;
                };
                assert_eq!(
                    neighbor.neighbor(direction.opposite()),
                    Some(room),
                    "{:?} -> {:?} is not mirrored",
                    room,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn adjacency_matches_coarse_distance_one() {
        for a in ALL_ROOMS {
            for b in ALL_ROOMS {
                let adjacent = a.neighbors().iter().any(|slot| *slot == Some(b));
                assert_eq!(
                    adjacent,
                    coarse_distance(a, b) == 1,
                    "adjacency/distance disagree for {:?} {:?}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn room_at_round_trips_every_room() {
        for room in ALL_ROOMS {
            let (row, col) = room.grid_position();
            assert_eq!(room_at(row, col), Some(room));
        }
        assert_eq!(room_at(-1, 0), None);
        assert_eq!(room_at(0, 5), None);
        assert_eq!(room_at(2, 0), None);
    }

    #[test]
    fn coarse_distance_spans_the_house() {
        assert_eq!(coarse_distance(RoomId::Foyer, RoomId::Foyer), 0);
        assert_eq!(coarse_distance(RoomId::Foyer, RoomId::Parlor), 1);
        assert_eq!(coarse_distance(RoomId::Foyer, RoomId::Workshop), 5);
        assert_eq!(coarse_distance(RoomId::Cellar, RoomId::Sunroom), 5);
    }
}
