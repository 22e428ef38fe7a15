/// One play session of the hunt. Owns the director, the spawn controller,
/// the agent, the pathfinder, and the per-room maps, and wires their
/// callbacks together; the host loop only feeds it frame deltas, the
/// player's position, and room-change events.
pub(crate) struct HuntSession {
    context: SessionContext,
    director: RoomDirector,
    spawn_controller: JoshSpawnController,
    enemy: Enemy,
    pathfinder: PathfindingSystem,
    maps: HashMap<RoomId, RoomMap>,
    player_position: Vec2,
    spawning_allowed: bool,
    entry_decision_pending: bool,
    tick_count: u64,
    times_caught: u32,
}

impl HuntSession {
    pub(crate) fn new(
        player_room: RoomId,
        enemy_room: RoomId,
        player_position: Vec2,
        maps: HashMap<RoomId, RoomMap>,
        listener: Box<dyn DirectorEventListener>,
        seed: u64,
        tuning: TuningConfig,
    ) -> Self {
        let mut context = SessionContext::new(seed, tuning);
        let director = RoomDirector::new(player_room, enemy_room, &mut context, listener);
        let spawn_controller = JoshSpawnController::new(player_room, &mut context);
        let enemy = Enemy::new_withdrawn(enemy_room);
        info!(
            seed = context.rng.seed(),
            player_room = player_room.as_token(),
            enemy_room = enemy_room.as_token(),
            "session_started"
        );
        Self {
            context,
            director,
            spawn_controller,
            enemy,
            pathfinder: PathfindingSystem::new(ROOM_WIDTH_UNITS, ROOM_HEIGHT_UNITS),
            maps,
            player_position,
            spawning_allowed: true,
            entry_decision_pending: true,
            tick_count: 0,
            times_caught: 0,
        }
    }

    pub(crate) fn set_spawning_allowed(&mut self, allowed: bool) {
        self.spawning_allowed = allowed;
    }

    pub(crate) fn player_room(&self) -> RoomId {
        self.director.player_room()
    }

    pub(crate) fn enemy_room(&self) -> RoomId {
        self.director.enemy_room()
    }

    pub(crate) fn is_enemy_physically_present(&self) -> bool {
        self.director.is_enemy_physically_present()
    }

    pub(crate) fn enemy_position(&self) -> Vec2 {
        self.enemy.position()
    }

    pub(crate) fn times_caught(&self) -> u32 {
        self.times_caught
    }

    pub(crate) fn update(&mut self, dt_seconds: f32, player_position: Vec2) {
        self.tick_count += 1;
        self.player_position = player_position;

        let director_tick = self.director.update(dt_seconds, &mut self.context);
        self.spawn_controller.update(dt_seconds);

        if director_tick.enemy_materialized {
            let position = self
                .director
                .enemy_spawn_position(ROOM_WIDTH_UNITS, ROOM_HEIGHT_UNITS);
            self.enemy.retarget(position, self.director.player_room());
            self.spawn_controller
                .on_josh_materialized(self.director.player_room());
            debug!(
                side = self
                    .director
                    .entry_side()
                    .map(Direction::as_token)
                    .unwrap_or("none"),
                "enemy_materialized"
            );
        }
        if director_tick.buffer_expired && !self.director.is_enemy_physically_present() {
            self.enemy.withdraw();
            self.spawn_controller.on_josh_despawned();
        }

        self.evaluate_pending_entry_decision();
        self.advance_enemy_agent(dt_seconds);
    }

    fn evaluate_pending_entry_decision(&mut self) {
        if !self.entry_decision_pending
            || self.spawn_controller.seconds_in_room() < ROOM_ENTRY_DELAY_SECONDS
        {
            return;
        }
        self.entry_decision_pending = false;

        let player_room = self.director.player_room();
        let map = self.maps.get(&player_room);
        let decision = self.spawn_controller.should_spawn_josh(
            self.spawning_allowed,
            map,
            self.player_position,
            &mut self.context,
        );
        debug!(
            room = player_room.as_token(),
            context = decision.context.as_token(),
            spawn = decision.should_spawn,
            reason = %decision.reason,
            "spawn_decision"
        );
        if decision.should_spawn {
            self.enemy.retarget(decision.position, player_room);
            self.director.on_enemy_spawned();
            info!(
                room = player_room.as_token(),
                context = decision.context.as_token(),
                x = decision.position.x,
                y = decision.position.y,
                "josh_spawned"
            );
        }
    }

    fn advance_enemy_agent(&mut self, dt_seconds: f32) {
        if self.director.is_transition_buffer_active() {
            return;
        }
        let player_room = self.director.player_room();
        let Some(map) = self.maps.get(&player_room) else {
            return;
        };
        if !self.director.is_enemy_physically_present() && !self.enemy.is_despawned() {
            return;
        }

        let tick = self.enemy.update(
            dt_seconds,
            self.player_position,
            player_room,
            map,
            &self.pathfinder,
            &mut self.context,
        );

        if tick.started_chasing {
            self.spawn_controller.record_chase();
        }
        if tick.despawned {
            self.director.on_enemy_despawn(&mut self.context);
            self.spawn_controller.on_josh_despawned();
            debug!(
                last_seen = self.enemy.last_seen_room().as_token(),
                "search_went_cold"
            );
        }
        if tick.respawned {
            self.director.on_enemy_spawned();
            self.spawn_controller.on_josh_materialized(player_room);
        }

        if self.director.is_enemy_physically_present()
            && !self.enemy.is_despawned()
            && distance_sq(self.enemy.position(), self.player_position)
                <= CATCH_RADIUS_UNITS * CATCH_RADIUS_UNITS
        {
            self.handle_player_caught();
        }
    }

    fn handle_player_caught(&mut self) {
        self.times_caught += 1;
        info!(
            room = self.director.player_room().as_token(),
            count = self.times_caught,
            "player_caught"
        );
        self.spawn_controller.record_caught();
        self.director.force_enemy_retreat(&mut self.context);
        self.enemy.withdraw();
    }

    pub(crate) fn player_enters_room(&mut self, new_room: RoomId) {
        if new_room == self.director.player_room() {
            return;
        }
        let reappeared_instantly = self
            .director
            .on_player_enter_room(new_room, &mut self.context);
        self.spawn_controller.on_player_enter_room(new_room);
        self.entry_decision_pending = true;

        if reappeared_instantly {
            let position = self
                .director
                .enemy_spawn_position(ROOM_WIDTH_UNITS, ROOM_HEIGHT_UNITS);
            self.enemy.retarget(position, new_room);
            self.spawn_controller.on_josh_materialized(new_room);
        }
    }

    pub(crate) fn stun_enemy(&mut self) {
        if self.enemy.is_despawned() {
            return;
        }
        let prior = self.enemy.state();
        self.enemy.stun();
        info!(prior = prior.as_token(), "enemy_stunned");
    }

    pub(crate) fn force_retreat(&mut self) {
        self.director.force_enemy_retreat(&mut self.context);
        self.spawn_controller.on_josh_retreated(&mut self.context);
        self.enemy.withdraw();
    }

    pub(crate) fn debug_lines(&self) -> Vec<String> {
        vec![
            format!(
                "tick: {} adj:{} pend:{}",
                self.tick_count,
                if self.director.is_enemy_adjacent_to_player() {
                    1
                } else {
                    0
                },
                if self.director.is_entry_pending() { 1 } else { 0 }
            ),
            self.director.debug_info(),
            self.spawn_controller.debug_line(),
            self.enemy.debug_line(),
        ]
    }
}
