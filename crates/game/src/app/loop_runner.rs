use std::process::ExitCode;

use tracing::info;
use world::{Direction, DirectorEventListener, RoomId, Vec2};

use super::bootstrap::AppWiring;
use super::pursuit::{build_house_maps, HuntSession};

const FIXED_DT_SECONDS: f32 = 1.0 / 60.0;
const DEMO_TICKS: u64 = 5400;
const PLAYER_WALK_SPEED: f32 = 140.0;

/// Scripted route for the headless demo: room, then where the player walks
/// inside it before moving on.
const DEMO_ROUTE: [(RoomId, f32, f32); 6] = [
    (RoomId::Foyer, 320.0, 240.0),
    (RoomId::Parlor, 480.0, 200.0),
    (RoomId::Hallway, 320.0, 300.0),
    (RoomId::Kitchen, 200.0, 240.0),
    (RoomId::Hallway, 320.0, 160.0),
    (RoomId::Archive, 320.0, 240.0),
];
const DEMO_LEG_TICKS: u64 = 900;
const STUN_AT_TICK: u64 = 2100;
const RETREAT_AT_TICK: u64 = 3900;
const QUIET_FINALE_AT_TICK: u64 = 4500;

struct TracingListener;

impl DirectorEventListener for TracingListener {
    fn on_camera_shake(&mut self, duration_seconds: f32, intensity: f32) {
        info!(duration = duration_seconds, intensity, "camera_shake");
    }

    fn on_door_entry(&mut self, side: Direction) {
        info!(side = side.as_token(), "door_entry");
    }
}

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let maps = build_house_maps();
    let (start_room, start_x, start_y) = DEMO_ROUTE[0];
    let mut player_position = Vec2 {
        x: start_x,
        y: start_y,
    };
    let mut session = HuntSession::new(
        start_room,
        RoomId::Workshop,
        player_position,
        maps,
        Box::new(TracingListener),
        app.seed,
        app.tuning,
    );

    let mut leg_index = 0usize;
    for tick in 0..DEMO_TICKS {
        let route_index = ((tick / DEMO_LEG_TICKS) as usize).min(DEMO_ROUTE.len() - 1);
        if route_index != leg_index {
            leg_index = route_index;
            let (room, x, y) = DEMO_ROUTE[leg_index];
            session.player_enters_room(room);
            player_position = Vec2 { x, y };
            info!(
                room = room.as_token(),
                enemy_room = session.enemy_room().as_token(),
                present = session.is_enemy_physically_present(),
                "demo_leg_started"
            );
        }

        // Scripted player reactions: a stun partway through, then a forced
        // retreat near the end, with ambient spawning off for the finale.
        if tick == STUN_AT_TICK && session.is_enemy_physically_present() {
            session.stun_enemy();
        }
        if tick == RETREAT_AT_TICK && session.is_enemy_physically_present() {
            info!(
                x = session.enemy_position().x,
                y = session.enemy_position().y,
                "demo_forced_retreat"
            );
            session.force_retreat();
        }
        if tick == QUIET_FINALE_AT_TICK {
            session.set_spawning_allowed(false);
        }

        let (_, target_x, target_y) = DEMO_ROUTE[leg_index];
        player_position = step_player(
            player_position,
            Vec2 {
                x: target_x,
                y: target_y,
            },
        );
        session.update(FIXED_DT_SECONDS, player_position);
    }

    for line in session.debug_lines() {
        info!("{line}");
    }
    info!(
        caught = session.times_caught(),
        room = session.player_room().as_token(),
        "demo_finished"
    );

    ExitCode::SUCCESS
}

fn step_player(current: Vec2, target: Vec2) -> Vec2 {
    let dx = target.x - current.x;
    let dy = target.y - current.y;
    let span_sq = dx * dx + dy * dy;
    let max_step = PLAYER_WALK_SPEED * FIXED_DT_SECONDS;
    if span_sq <= max_step * max_step {
        return target;
    }
    let span = span_sq.sqrt();
    Vec2 {
        x: current.x + dx / span * max_step,
        y: current.y + dy / span * max_step,
    }
}
