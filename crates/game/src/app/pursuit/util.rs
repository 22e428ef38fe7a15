/// Combined-axis move against furniture; on collision retry X-only then
/// Y-only and keep whichever axis succeeds, so diagonal approaches slide
/// along walls instead of halting.
fn move_with_slide(map: &RoomMap, position: &mut Vec2, dx: f32, dy: f32) {
    let combined = Vec2 {
        x: position.x + dx,
        y: position.y + dy,
    };
    if map.is_walkable(combined) {
        *position = combined;
        return;
    }
    let x_only = Vec2 {
        x: position.x + dx,
        y: position.y,
    };
    if map.is_walkable(x_only) {
        *position = x_only;
    }
    let y_only = Vec2 {
        x: position.x,
        y: position.y + dy,
    };
    if map.is_walkable(y_only) {
        *position = y_only;
    }
}

fn cell_center_point(cell_x: i32, cell_y: i32) -> Vec2 {
    Vec2 {
        x: (cell_x as f32 + 0.5) * GRID_CELL_SIZE_UNITS,
        y: (cell_y as f32 + 0.5) * GRID_CELL_SIZE_UNITS,
    }
}

fn door_bounds_for_side(side: Direction) -> Rect {
    match side {
        Direction::Up => Rect {
            x: ROOM_WIDTH_UNITS / 2.0 - 32.0,
            y: 0.0,
            width: 64.0,
            height: 16.0,
        },
        Direction::Down => Rect {
            x: ROOM_WIDTH_UNITS / 2.0 - 32.0,
            y: ROOM_HEIGHT_UNITS - 16.0,
            width: 64.0,
            height: 16.0,
        },
        Direction::Left => Rect {
            x: 0.0,
            y: ROOM_HEIGHT_UNITS / 2.0 - 32.0,
            width: 16.0,
            height: 64.0,
        },
        Direction::Right => Rect {
            x: ROOM_WIDTH_UNITS - 16.0,
            y: ROOM_HEIGHT_UNITS / 2.0 - 32.0,
            width: 16.0,
            height: 64.0,
        },
    }
}

fn near_door_point(side: Direction) -> Vec2 {
    match side {
        Direction::Up => Vec2 {
            x: ROOM_WIDTH_UNITS / 2.0,
            y: 56.0,
        },
        Direction::Down => Vec2 {
            x: ROOM_WIDTH_UNITS / 2.0,
            y: ROOM_HEIGHT_UNITS - 56.0,
        },
        Direction::Left => Vec2 {
            x: 56.0,
            y: ROOM_HEIGHT_UNITS / 2.0,
        },
        Direction::Right => Vec2 {
            x: ROOM_WIDTH_UNITS - 56.0,
            y: ROOM_HEIGHT_UNITS / 2.0,
        },
    }
}

fn room_furniture(room: RoomId) -> Vec<Rect> {
    let rect = |x: f32, y: f32, width: f32, height: f32| Rect {
        x,
        y,
        width,
        height,
    };
    match room {
        RoomId::Foyer => vec![rect(280.0, 200.0, 80.0, 80.0)],
        RoomId::Parlor => vec![rect(180.0, 140.0, 160.0, 60.0), rect(430.0, 300.0, 60.0, 60.0)],
        RoomId::Hallway => vec![rect(150.0, 80.0, 90.0, 50.0), rect(400.0, 330.0, 110.0, 60.0)],
        RoomId::Kitchen => vec![rect(260.0, 180.0, 120.0, 100.0)],
        RoomId::Sunroom => vec![rect(120.0, 120.0, 64.0, 64.0), rect(450.0, 290.0, 70.0, 70.0)],
        RoomId::Cellar => vec![rect(200.0, 200.0, 96.0, 96.0), rect(410.0, 120.0, 64.0, 64.0)],
        RoomId::BoilerRoom => vec![rect(360.0, 150.0, 120.0, 100.0)],
        RoomId::Archive => vec![rect(140.0, 100.0, 48.0, 200.0), rect(420.0, 140.0, 48.0, 200.0)],
        RoomId::Pantry => vec![rect(180.0, 90.0, 70.0, 70.0), rect(390.0, 300.0, 100.0, 60.0)],
        RoomId::Workshop => vec![rect(240.0, 190.0, 160.0, 90.0)],
    }
}

fn build_room_map(room: RoomId) -> RoomMap {
    let mut doors = Vec::new();
    let mut spawn_points = Vec::new();

    for corner in [
        Vec2 { x: 80.0, y: 80.0 },
        Vec2 {
            x: ROOM_WIDTH_UNITS - 80.0,
            y: 80.0,
        },
        Vec2 {
            x: 80.0,
            y: ROOM_HEIGHT_UNITS - 80.0,
        },
        Vec2 {
            x: ROOM_WIDTH_UNITS - 80.0,
            y: ROOM_HEIGHT_UNITS - 80.0,
        },
    ] {
        spawn_points.push(SpawnPoint {
            position: corner,
            facing: None,
            priority: None,
            near_door: None,
            tag: JOSH_SPAWN_TAG,
        });
    }

    for side in CARDINAL_DIRECTIONS {
        let Some(target_room) = room.neighbor(side) else {
            continue;
        };
        doors.push(Door {
            bounds: door_bounds_for_side(side),
            target_room,
        });
        spawn_points.push(SpawnPoint {
            position: near_door_point(side),
            facing: Some(side.opposite()),
            priority: Some(1),
            near_door: Some(target_room),
            tag: JOSH_SPAWN_TAG,
        });
    }

    RoomMap::new(
        room,
        ROOM_WIDTH_UNITS,
        ROOM_HEIGHT_UNITS,
        room_furniture(room),
        doors,
        spawn_points,
    )
    .expect("static room layouts are valid")
}

pub(crate) fn build_house_maps() -> HashMap<RoomId, RoomMap> {
    ALL_ROOMS
        .into_iter()
        .map(|room| (room, build_room_map(room)))
        .collect()
}
