/// The physically-present antagonist. Lives for the whole session and is
/// retargeted on every materialization instead of being rebuilt; while
/// `despawned` it only runs respawn bookkeeping.
pub(crate) struct Enemy {
    position: Vec2,
    state: EnemyState,
    wander_direction: Vec2,
    wander_remaining: f32,
    stun_remaining: f32,
    path: Vec<Vec2>,
    path_cursor: usize,
    path_goal: Vec2,
    despawn_timer: f32,
    respawn_check_timer: f32,
    despawned: bool,
    auto_respawn: bool,
    last_seen_position: Vec2,
    last_seen_room: RoomId,
}

impl Enemy {
    pub(crate) fn new_withdrawn(last_seen_room: RoomId) -> Self {
        Self {
            position: Vec2::default(),
            state: EnemyState::Searching,
            wander_direction: Vec2 { x: 1.0, y: 0.0 },
            wander_remaining: 0.0,
            stun_remaining: 0.0,
            path: Vec::new(),
            path_cursor: 0,
            path_goal: Vec2::default(),
            despawn_timer: 0.0,
            respawn_check_timer: 0.0,
            despawned: true,
            auto_respawn: false,
            last_seen_position: Vec2::default(),
            last_seen_room,
        }
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    pub(crate) fn state(&self) -> EnemyState {
        self.state
    }

    pub(crate) fn is_despawned(&self) -> bool {
        self.despawned
    }

    pub(crate) fn last_seen_room(&self) -> RoomId {
        self.last_seen_room
    }

    /// Re-embodies the agent at a position inside `room` and restarts the
    /// search behavior. Used for every materialization: director door
    /// entries, controller spawns, and transition-buffer reappearances.
    pub(crate) fn retarget(&mut self, position: Vec2, room: RoomId) {
        self.position = position;
        self.state = EnemyState::Searching;
        self.wander_remaining = 0.0;
        self.stun_remaining = 0.0;
        self.path.clear();
        self.path_cursor = 0;
        self.despawn_timer = 0.0;
        self.respawn_check_timer = 0.0;
        self.despawned = false;
        self.auto_respawn = false;
        self.last_seen_position = position;
        self.last_seen_room = room;
    }

    /// Removes the agent from play without scheduling a respawn. The caller
    /// decides when it comes back.
    pub(crate) fn withdraw(&mut self) {
        self.despawned = true;
        self.auto_respawn = false;
        self.path.clear();
        self.path_cursor = 0;
    }

    pub(crate) fn stun(&mut self) {
        if self.despawned {
            return;
        }
        self.state = EnemyState::Stunned;
        self.stun_remaining = STUN_DURATION_SECONDS;
        self.path.clear();
        self.path_cursor = 0;
    }

    pub(crate) fn update(
        &mut self,
        dt_seconds: f32,
        player_position: Vec2,
        player_room: RoomId,
        map: &RoomMap,
        pathfinder: &PathfindingSystem,
        context: &mut SessionContext,
    ) -> EnemyTick {
        let mut tick = EnemyTick::default();

        if self.despawned {
            if self.auto_respawn {
                self.run_respawn_check(dt_seconds, player_position, player_room, map, context, &mut tick);
            }
            return tick;
        }

        match self.state {
            EnemyState::Searching => {
                self.despawn_timer += dt_seconds;
                if self.despawn_timer >= DESPAWN_DELAY_SECONDS {
                    self.despawned = true;
                    self.auto_respawn = true;
                    self.respawn_check_timer = 0.0;
                    self.path.clear();
                    self.path_cursor = 0;
                    tick.despawned = true;
                    debug!(room = self.last_seen_room.as_token(), "enemy_despawned");
                    return tick;
                }

                self.wander_remaining -= dt_seconds;
                if self.wander_remaining <= 0.0 {
                    self.wander_direction = context.rng.unit_direction();
                    self.wander_remaining = WANDER_REDIRECT_SECONDS;
                }
                let speed = context.tuning.search_speed;
                move_with_slide(
                    map,
                    &mut self.position,
                    self.wander_direction.x * speed * dt_seconds,
                    self.wander_direction.y * speed * dt_seconds,
                );

                if distance_sq(self.position, player_position)
                    <= DETECTION_RADIUS_UNITS * DETECTION_RADIUS_UNITS
                {
                    self.enter_chasing(player_position, player_room);
                    tick.started_chasing = true;
                }
            }

            EnemyState::Chasing => {
                self.last_seen_position = player_position;
                self.last_seen_room = player_room;

                if distance_sq(self.position, player_position)
                    > VISION_RADIUS_UNITS * VISION_RADIUS_UNITS
                {
                    self.state = EnemyState::Searching;
                    self.despawn_timer = 0.0;
                    self.wander_remaining = 0.0;
                    self.path.clear();
                    self.path_cursor = 0;
                    debug!("enemy_lost_sight");
                    return tick;
                }

                self.refresh_path_if_stale(player_position, map, pathfinder);
                self.follow_path_or_close_in(dt_seconds, player_position, map, context);
            }

            EnemyState::Stunned => {
                self.stun_remaining -= dt_seconds;
                if self.stun_remaining <= 0.0 {
                    // Stun always releases into a chase, whatever the
                    // distance to the player.
                    self.enter_chasing(player_position, player_room);
                    tick.started_chasing = true;
                }
            }
        }

        tick
    }

    fn enter_chasing(&mut self, player_position: Vec2, player_room: RoomId) {
        self.state = EnemyState::Chasing;
        self.despawn_timer = 0.0;
        self.last_seen_position = player_position;
        self.last_seen_room = player_room;
        self.path.clear();
        self.path_cursor = 0;
    }

    fn refresh_path_if_stale(
        &mut self,
        player_position: Vec2,
        map: &RoomMap,
        pathfinder: &PathfindingSystem,
    ) {
        let exhausted = self.path_cursor >= self.path.len();
        let goal_drifted = !exhausted
            && distance_sq(self.path_goal, player_position)
                > PATH_REFRESH_DRIFT_UNITS * PATH_REFRESH_DRIFT_UNITS;
        if !exhausted && !goal_drifted {
            return;
        }

        let raw = pathfinder.find_path(
            |cell_x, cell_y| !map.is_walkable(cell_center_point(cell_x, cell_y)),
            self.position,
            player_position,
        );
        self.path = simplify_path(&raw);
        self.path_cursor = 0;
        self.path_goal = player_position;
    }

    fn follow_path_or_close_in(
        &mut self,
        dt_seconds: f32,
        player_position: Vec2,
        map: &RoomMap,
        context: &mut SessionContext,
    ) {
        let speed = context.tuning.chase_speed;
        let target = match self.path.get(self.path_cursor) {
            Some(waypoint) => *waypoint,
            // Empty path: the pathfinder found nothing, close in directly.
            None => player_position,
        };

        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        let span = (dx * dx + dy * dy).sqrt();
        if span > 0.0 {
            let step = (speed * dt_seconds).min(span);
            move_with_slide(
                map,
                &mut self.position,
                dx / span * step,
                dy / span * step,
            );
        }

        if self.path_cursor < self.path.len()
            && distance_sq(self.position, target)
                <= WAYPOINT_ARRIVAL_RADIUS_UNITS * WAYPOINT_ARRIVAL_RADIUS_UNITS
        {
            self.path_cursor += 1;
        }
    }

    fn run_respawn_check(
        &mut self,
        dt_seconds: f32,
        player_position: Vec2,
        player_room: RoomId,
        map: &RoomMap,
        context: &mut SessionContext,
        tick: &mut EnemyTick,
    ) {
        self.respawn_check_timer += dt_seconds;
        if self.respawn_check_timer < RESPAWN_CHECK_INTERVAL_SECONDS {
            return;
        }
        self.respawn_check_timer = 0.0;

        let near_last_seen = player_room == self.last_seen_room
            || coarse_distance(player_room, self.last_seen_room) == 1;
        if !near_last_seen {
            return;
        }

        let mut placement = None;
        let mut first_attempt = None;
        for _ in 0..RESPAWN_PLACEMENT_ATTEMPTS {
            let direction = context.rng.unit_direction();
            let radius = context.rng.range_f32(0.0, RESPAWN_SCATTER_RADIUS_UNITS);
            let candidate = Vec2 {
                x: player_position.x + direction.x * radius,
                y: player_position.y + direction.y * radius,
            };
            if first_attempt.is_none() {
                first_attempt = Some(candidate);
            }
            if map.is_walkable(candidate) {
                placement = Some(candidate);
                break;
            }
        }
        let Some(position) = placement.or(first_attempt) else {
            return;
        };

        self.retarget(position, player_room);
        tick.respawned = true;
        debug!(
            room = player_room.as_token(),
            x = position.x,
            y = position.y,
            "enemy_respawned"
        );
    }

    pub(crate) fn debug_line(&self) -> String {
        format!(
            "josh: st:{} pos:({:.0},{:.0}) gone:{} idle:{:.1} seen:({:.0},{:.0})@{}",
            self.state.as_token(),
            self.position.x,
            self.position.y,
            if self.despawned { 1 } else { 0 },
            self.despawn_timer,
            self.last_seen_position.x,
            self.last_seen_position.y,
            self.last_seen_room.as_token()
        )
    }
}
