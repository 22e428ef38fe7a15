/// Decides whether Josh materializes in the room the player just entered,
/// and where. Every gate short-circuits into a no-spawn decision with a
/// reason; passing all gates picks a spawn point by interaction history.
pub(crate) struct JoshSpawnController {
    current_room: RoomId,
    last_room: Option<RoomId>,
    josh_present: bool,
    last_josh_room: Option<RoomId>,
    last_interaction: LastInteraction,
    room_entry_counter: u32,
    spawn_cooldown_remaining: f32,
    seconds_in_room: f32,
    session_clock: f32,
    last_spawn_room: Option<RoomId>,
    last_spawn_at: Option<f32>,
}

impl JoshSpawnController {
    pub(crate) fn new(starting_room: RoomId, context: &mut SessionContext) -> Self {
        let mut controller = Self {
            current_room: starting_room,
            last_room: None,
            josh_present: false,
            last_josh_room: None,
            last_interaction: LastInteraction::None,
            room_entry_counter: 0,
            spawn_cooldown_remaining: 0.0,
            seconds_in_room: 0.0,
            session_clock: 0.0,
            last_spawn_room: None,
            last_spawn_at: None,
        };
        controller.spawn_cooldown_remaining = controller.roll_cooldown(context);
        controller
    }

    pub(crate) fn update(&mut self, dt_seconds: f32) {
        self.session_clock += dt_seconds;
        self.seconds_in_room += dt_seconds;
        if self.spawn_cooldown_remaining > 0.0 {
            self.spawn_cooldown_remaining = (self.spawn_cooldown_remaining - dt_seconds).max(0.0);
        }
    }

    pub(crate) fn seconds_in_room(&self) -> f32 {
        self.seconds_in_room
    }

    pub(crate) fn on_player_enter_room(&mut self, new_room: RoomId) {
        let previous = self.current_room;
        self.last_room = Some(previous);
        self.current_room = new_room;
        self.seconds_in_room = 0.0;
        self.room_entry_counter = self.room_entry_counter.saturating_add(1);

        let mid_chase_follow = self.last_interaction == LastInteraction::Chased
            && self.last_josh_room == Some(previous);
        if self.josh_present && !mid_chase_follow {
            self.josh_present = false;
        }
    }

    /// Probability of a spawn for the current room-entry count. Base 0.35,
    /// +0.08 per entry, +0.20 in the high-traffic room, capped at 0.70.
    pub(crate) fn spawn_chance(&self, tuning: &TuningConfig) -> f32 {
        let mut chance =
            SPAWN_CHANCE_BASE + SPAWN_CHANCE_PER_ENTRY * self.room_entry_counter as f32;
        if self.current_room == tuning.high_traffic_room {
            chance += SPAWN_CHANCE_HIGH_TRAFFIC_BONUS;
        }
        chance.min(SPAWN_CHANCE_MAX)
    }

    pub(crate) fn should_spawn_josh(
        &mut self,
        allowed_by_caller: bool,
        map: Option<&RoomMap>,
        player_position: Vec2,
        context: &mut SessionContext,
    ) -> SpawnDecision {
        if !allowed_by_caller {
            return SpawnDecision::no_spawn(SpawnContext::Blocked, "spawning disabled by caller");
        }
        if self.josh_present {
            return SpawnDecision::no_spawn(SpawnContext::Blocked, "josh already present");
        }
        if self.seconds_in_room < ROOM_ENTRY_DELAY_SECONDS {
            return SpawnDecision::no_spawn(
                SpawnContext::Waiting,
                format!(
                    "room entry delay: {:.1}s of {:.1}s",
                    self.seconds_in_room, ROOM_ENTRY_DELAY_SECONDS
                ),
            );
        }
        if self.spawn_cooldown_remaining > 0.0 {
            return SpawnDecision::no_spawn(
                SpawnContext::Waiting,
                format!("cooldown: {:.1}s remaining", self.spawn_cooldown_remaining),
            );
        }

        let chance = self.spawn_chance(&context.tuning);
        let roll = context.rng.roll();
        if roll >= chance {
            return SpawnDecision::no_spawn(
                SpawnContext::Waiting,
                format!("roll failed: {:.2} vs chance {:.2}", roll, chance),
            );
        }

        let Some(map) = map else {
            return SpawnDecision::no_spawn(SpawnContext::Blocked, "no current map");
        };
        let points = map.spawn_points(JOSH_SPAWN_TAG);
        if points.is_empty() {
            return SpawnDecision::no_spawn(
                SpawnContext::Blocked,
                format!("no spawn points declared in {}", map.room().as_token()),
            );
        }

        let decision = self.pick_spawn_point(map, &points, player_position, context);
        if decision.should_spawn {
            self.commit_spawn(context);
        }
        decision
    }

    fn pick_spawn_point(
        &self,
        map: &RoomMap,
        points: &[&SpawnPoint],
        player_position: Vec2,
        context: &mut SessionContext,
    ) -> SpawnDecision {
        let from_chase = self.last_interaction == LastInteraction::Chased
            && self.last_josh_room.is_some()
            && self.last_josh_room == self.last_room;
        if from_chase {
            if let Some(position) = pick_chase_entry_point(map, points, self.last_room, player_position)
            {
                return SpawnDecision::spawn_at(
                    position,
                    SpawnContext::FromChase,
                    "continuing chase through the connecting door",
                );
            }
            return self.pick_ambush_point(points, player_position, context);
        }

        let fresh = self.last_interaction == LastInteraction::None
            || self.last_interaction == LastInteraction::Retreated
            || self.last_josh_room != self.last_room;
        if fresh {
            let distant: Vec<&&SpawnPoint> = points
                .iter()
                .filter(|point| {
                    distance_sq(point.position, player_position)
                        >= MIN_SPAWN_DISTANCE_UNITS * MIN_SPAWN_DISTANCE_UNITS
                })
                .collect();
            if !distant.is_empty() {
                let picked = distant[context.rng.pick_index(distant.len())];
                return SpawnDecision::spawn_at(
                    picked.position,
                    SpawnContext::FreshEncounter,
                    "fresh encounter at a distant point",
                );
            }
        }

        self.pick_ambush_point(points, player_position, context)
    }

    fn pick_ambush_point(
        &self,
        points: &[&SpawnPoint],
        player_position: Vec2,
        context: &mut SessionContext,
    ) -> SpawnDecision {
        let distant: Vec<&&SpawnPoint> = points
            .iter()
            .filter(|point| {
                distance_sq(point.position, player_position)
                    >= MIN_SPAWN_DISTANCE_UNITS * MIN_SPAWN_DISTANCE_UNITS
            })
            .collect();
        if !distant.is_empty() {
            let picked = distant[context.rng.pick_index(distant.len())];
            return SpawnDecision::spawn_at(
                picked.position,
                SpawnContext::Ambush,
                "ambush at a distant point",
            );
        }
        warn!(
            room = self.current_room.as_token(),
            "spawn_fallback_first_point"
        );
        SpawnDecision::spawn_at(
            points[0].position,
            SpawnContext::Ambush,
            "last resort: first declared point ignores distance",
        )
    }

    fn commit_spawn(&mut self, context: &mut SessionContext) {
        self.josh_present = true;
        self.room_entry_counter = 0;
        self.spawn_cooldown_remaining = self.roll_cooldown(context);
        self.last_josh_room = Some(self.current_room);
        self.last_spawn_room = Some(self.current_room);
        self.last_spawn_at = Some(self.session_clock);
    }

    fn roll_cooldown(&self, context: &mut SessionContext) -> f32 {
        let mut cooldown = context
            .rng
            .range_f32(SPAWN_COOLDOWN_MIN_SECONDS, SPAWN_COOLDOWN_MAX_SECONDS);
        if self.current_room == context.tuning.high_traffic_room {
            cooldown *= HIGH_TRAFFIC_COOLDOWN_FACTOR;
        }
        cooldown
    }

    /// Director- or respawn-driven materialization: keep the presence
    /// bookkeeping in step without running the gate sequence.
    pub(crate) fn on_josh_materialized(&mut self, room: RoomId) {
        self.josh_present = true;
        self.last_josh_room = Some(room);
    }

    /// Clears presence only; `last_josh_room` keeps pointing at the room
    /// Josh actually occupied so a follow-up entry can read it.
    pub(crate) fn on_josh_despawned(&mut self) {
        self.josh_present = false;
    }

    pub(crate) fn record_chase(&mut self) {
        self.last_interaction = LastInteraction::Chased;
        self.last_josh_room = Some(self.current_room);
    }

    pub(crate) fn record_caught(&mut self) {
        self.last_interaction = LastInteraction::Caught;
        self.last_josh_room = Some(self.current_room);
        self.josh_present = false;
    }

    pub(crate) fn on_josh_retreated(&mut self, context: &mut SessionContext) {
        self.josh_present = false;
        self.last_interaction = LastInteraction::Retreated;
        self.last_josh_room = Some(self.current_room);
        self.spawn_cooldown_remaining += self.roll_cooldown(context);
    }

    pub(crate) fn debug_line(&self) -> String {
        format!(
            "spawn: here:{} entries:{} cd:{:.1} room:{} last:{} at:{} t:{}",
            if self.josh_present { 1 } else { 0 },
            self.room_entry_counter,
            self.spawn_cooldown_remaining,
            self.current_room.as_token(),
            self.last_interaction.as_token(),
            self.last_spawn_room
                .map(RoomId::as_token)
                .unwrap_or("none"),
            self.last_spawn_at
                .map(|at| format!("{at:.0}"))
                .unwrap_or_else(|| "never".to_string())
        )
    }
}

/// Nearest declared point to the door leading back to the room the player
/// came from, skipping points uncomfortably close to the player.
fn pick_chase_entry_point(
    map: &RoomMap,
    points: &[&SpawnPoint],
    came_from: Option<RoomId>,
    player_position: Vec2,
) -> Option<Vec2> {
    let door = came_from.and_then(|room| map.door_to(room))?;
    let door_center = door.bounds.center();
    let min_gap_sq =
        (MIN_SPAWN_DISTANCE_UNITS / 2.0) * (MIN_SPAWN_DISTANCE_UNITS / 2.0);
    points
        .iter()
        .filter(|point| distance_sq(point.position, player_position) >= min_gap_sq)
        .min_by(|a, b| {
            distance_sq(a.position, door_center)
                .total_cmp(&distance_sq(b.position, door_center))
        })
        .map(|point| point.position)
}
