#[derive(Debug, Clone, Copy, Default)]
struct TransitionBuffer {
    active: bool,
    remaining: f32,
    frozen_at: Option<RoomId>,
    target: Option<RoomId>,
    departed_toward: Option<Direction>,
}

/// Tracks the antagonist across the room graph. While the enemy and player
/// are in different rooms the enemy exists only as a room id (abstract
/// pursuit); co-location goes through the grace/door-entry choreography
/// before the enemy becomes physically present; leaving a room with a
/// physically-present enemy freezes it at the vacated door for a short
/// window instead of dragging it along.
pub(crate) struct RoomDirector {
    player_room: RoomId,
    enemy_room: RoomId,
    last_enemy_room: RoomId,
    enemy_move_cooldown: f32,
    grace_remaining: f32,
    enemy_physically_present: bool,
    enemy_ready_to_enter: bool,
    door_entry_triggered: bool,
    door_entry_remaining: f32,
    entry_side: Option<Direction>,
    buffer: TransitionBuffer,
    listener: Box<dyn DirectorEventListener>,
}

impl RoomDirector {
    pub(crate) fn new(
        player_room: RoomId,
        enemy_room: RoomId,
        context: &mut SessionContext,
        listener: Box<dyn DirectorEventListener>,
    ) -> Self {
        let mut director = Self {
            player_room,
            enemy_room,
            last_enemy_room: enemy_room,
            enemy_move_cooldown: 0.0,
            grace_remaining: 0.0,
            enemy_physically_present: false,
            enemy_ready_to_enter: false,
            door_entry_triggered: false,
            door_entry_remaining: 0.0,
            entry_side: None,
            buffer: TransitionBuffer::default(),
            listener,
        };
        director.enemy_move_cooldown = roll_move_cooldown(context);
        director.grace_remaining = roll_entry_grace(context);
        director
    }

    pub(crate) fn player_room(&self) -> RoomId {
        self.player_room
    }

    pub(crate) fn enemy_room(&self) -> RoomId {
        self.enemy_room
    }

    pub(crate) fn is_enemy_physically_present(&self) -> bool {
        self.enemy_physically_present
    }

    pub(crate) fn is_entry_pending(&self) -> bool {
        self.enemy_ready_to_enter
    }

    pub(crate) fn is_transition_buffer_active(&self) -> bool {
        self.buffer.active
    }

    pub(crate) fn entry_side(&self) -> Option<Direction> {
        self.entry_side
    }

    pub(crate) fn is_enemy_adjacent_to_player(&self) -> bool {
        coarse_distance(self.enemy_room, self.player_room) == 1
    }

    pub(crate) fn update(&mut self, dt_seconds: f32, context: &mut SessionContext) -> DirectorTick {
        let mut tick = DirectorTick::default();

        if self.buffer.active {
            self.buffer.remaining -= dt_seconds;
            if self.buffer.remaining <= 0.0 {
                let frozen_at = self.buffer.frozen_at;
                let target = self.buffer.target.unwrap_or(self.player_room);
                self.buffer = TransitionBuffer::default();
                if let Some(frozen) = frozen_at {
                    self.last_enemy_room = frozen;
                }
                self.enemy_room = target;
                self.enemy_move_cooldown = roll_move_cooldown(context);
                tick.buffer_expired = true;
                if self.enemy_room == self.player_room {
                    // The enemy catches up through the door the player used.
                    self.enemy_ready_to_enter = true;
                    self.entry_side = frozen_at.and_then(|frozen| {
                        CARDINAL_DIRECTIONS
                            .into_iter()
                            .find(|direction| self.player_room.neighbor(*direction) == Some(frozen))
                    });
                }
                debug!(
                    enemy_room = self.enemy_room.as_token(),
                    "transition_buffer_expired"
                );
            }
            return tick;
        }

        if self.grace_remaining > 0.0 {
            self.grace_remaining = (self.grace_remaining - dt_seconds).max(0.0);
        }

        if self.enemy_physically_present {
            return tick;
        }

        if self.enemy_ready_to_enter {
            if self.grace_remaining > 0.0 {
                return tick;
            }
            if !self.door_entry_triggered {
                self.door_entry_triggered = true;
                self.door_entry_remaining = DOOR_ENTRY_DELAY_SECONDS;
                self.listener
                    .on_camera_shake(DOOR_ENTRY_DELAY_SECONDS, CAMERA_SHAKE_INTENSITY);
                if let Some(side) = self.entry_side {
                    self.listener.on_door_entry(side);
                }
                info!(
                    room = self.player_room.as_token(),
                    side = self
                        .entry_side
                        .map(Direction::as_token)
                        .unwrap_or("none"),
                    "door_entry_started"
                );
                return tick;
            }
            self.door_entry_remaining -= dt_seconds;
            if self.door_entry_remaining <= 0.0 {
                self.enemy_physically_present = true;
                self.enemy_ready_to_enter = false;
                self.door_entry_triggered = false;
                tick.enemy_materialized = true;
                info!(room = self.player_room.as_token(), "enemy_entered_room");
            }
            return tick;
        }

        self.enemy_move_cooldown -= dt_seconds;
        if self.enemy_move_cooldown > 0.0 {
            return tick;
        }
        self.enemy_move_cooldown = roll_move_cooldown(context);
        self.advance_abstract_pursuit(context);
        tick
    }

    fn advance_abstract_pursuit(&mut self, context: &mut SessionContext) {
        if self.enemy_room == self.player_room {
            return;
        }

        if coarse_distance(self.enemy_room, self.player_room) > MAX_ROOM_DISTANCE {
            // Tension teleport: the enemy never drifts out of reach.
            let neighbors: Vec<RoomId> =
                self.player_room.neighbors().into_iter().flatten().collect();
            if neighbors.is_empty() {
                return;
            }
            let destination = neighbors[context.rng.pick_index(neighbors.len())];
            self.last_enemy_room = self.enemy_room;
            self.enemy_room = destination;
            info!(
                from = self.last_enemy_room.as_token(),
                to = destination.as_token(),
                "tension_teleport"
            );
            return;
        }

        let Some(stepped) = step_toward_room(self.enemy_room, self.player_room) else {
            return;
        };
        self.last_enemy_room = self.enemy_room;
        self.enemy_room = stepped;
        debug!(
            from = self.last_enemy_room.as_token(),
            to = stepped.as_token(),
            "enemy_room_step"
        );

        if self.enemy_room == self.player_room {
            self.enemy_ready_to_enter = true;
            self.entry_side = CARDINAL_DIRECTIONS.into_iter().find(|direction| {
                self.player_room.neighbor(*direction) == Some(self.last_enemy_room)
            });
        }
    }

    /// Returns true when the enemy reappears instantly (the player walked
    /// back into the room it was frozen at).
    pub(crate) fn on_player_enter_room(
        &mut self,
        new_room: RoomId,
        context: &mut SessionContext,
    ) -> bool {
        if self.enemy_physically_present {
            let vacated = self.player_room;
            self.buffer.active = true;
            self.buffer.remaining = TRANSITION_BUFFER_DURATION_SECONDS;
            self.buffer.frozen_at = Some(vacated);
            self.buffer.target = Some(new_room);
            self.buffer.departed_toward = CARDINAL_DIRECTIONS
                .into_iter()
                .find(|direction| vacated.neighbor(*direction) == Some(new_room));
            self.enemy_physically_present = false;
            self.enemy_ready_to_enter = false;
            self.door_entry_triggered = false;
            self.player_room = new_room;
            self.grace_remaining = roll_entry_grace(context);
            info!(
                frozen_at = vacated.as_token(),
                player_room = new_room.as_token(),
                "transition_buffer_started"
            );
            return false;
        }

        if self.buffer.active && self.buffer.frozen_at == Some(new_room) {
            // The jump scare: it was waiting at the door.
            let side = self.buffer.departed_toward;
            self.buffer = TransitionBuffer::default();
            self.player_room = new_room;
            self.enemy_room = new_room;
            self.enemy_physically_present = true;
            self.enemy_ready_to_enter = false;
            self.door_entry_triggered = false;
            self.entry_side = side;
            info!(room = new_room.as_token(), "transition_buffer_ambush");
            return true;
        }

        if self.buffer.active {
            self.buffer.target = Some(new_room);
        }

        self.player_room = new_room;
        self.grace_remaining = roll_entry_grace(context);
        self.enemy_ready_to_enter = false;
        self.door_entry_triggered = false;
        self.entry_side = None;

        if !self.buffer.active && self.enemy_room == new_room {
            // Walked into the room the enemy was already haunting.
            self.enemy_ready_to_enter = true;
        }
        false
    }

    pub(crate) fn on_enemy_despawn(&mut self, context: &mut SessionContext) {
        self.enemy_physically_present = false;
        self.enemy_ready_to_enter = false;
        self.door_entry_triggered = false;
        self.entry_side = None;
        self.enemy_room = self.player_room;
        self.enemy_move_cooldown = roll_move_cooldown(context);
    }

    /// Caller-driven materialization (ambient spawns and agent respawns):
    /// the enemy is placed in the player's room without the door-entry
    /// choreography.
    pub(crate) fn on_enemy_spawned(&mut self) {
        self.enemy_room = self.player_room;
        self.last_enemy_room = self.player_room;
        self.enemy_physically_present = true;
        self.enemy_ready_to_enter = false;
        self.door_entry_triggered = false;
        self.buffer = TransitionBuffer::default();
    }

    pub(crate) fn force_enemy_retreat(&mut self, context: &mut SessionContext) {
        let neighbors: Vec<RoomId> = self.enemy_room.neighbors().into_iter().flatten().collect();
        let destination = if neighbors.is_empty() {
            let others: Vec<RoomId> = ALL_ROOMS
                .into_iter()
                .filter(|room| *room != self.enemy_room)
                .collect();
            others[context.rng.pick_index(others.len())]
        } else {
            neighbors[context.rng.pick_index(neighbors.len())]
        };
        self.last_enemy_room = self.enemy_room;
        self.enemy_room = destination;
        self.enemy_physically_present = false;
        self.enemy_ready_to_enter = false;
        self.door_entry_triggered = false;
        self.entry_side = None;
        self.buffer = TransitionBuffer::default();
        self.enemy_move_cooldown = roll_move_cooldown(context) * RETREAT_COOLDOWN_MULTIPLIER;
        info!(to = destination.as_token(), "enemy_retreated");
    }

    /// World position for the materializing enemy, relative to the door it
    /// is entering through.
    pub(crate) fn enemy_spawn_position(&self, room_width: f32, room_height: f32) -> Vec2 {
        match self.entry_side {
            Some(Direction::Up) => Vec2 {
                x: room_width / 2.0,
                y: DOOR_SPAWN_MARGIN_UNITS,
            },
            Some(Direction::Down) => Vec2 {
                x: room_width / 2.0,
                y: room_height - DOOR_SPAWN_MARGIN_UNITS,
            },
            Some(Direction::Left) => Vec2 {
                x: DOOR_SPAWN_MARGIN_UNITS,
                y: room_height / 2.0,
            },
            Some(Direction::Right) => Vec2 {
                x: room_width - DOOR_SPAWN_MARGIN_UNITS,
                y: room_height / 2.0,
            },
            None => Vec2 {
                x: room_width / 2.0,
                y: room_height / 2.0,
            },
        }
    }

    pub(crate) fn debug_info(&self) -> String {
        let mode = if self.buffer.active {
            "buffer"
        } else if self.enemy_physically_present {
            "physical"
        } else {
            "abstract"
        };
        format!(
            "dir: mode:{} er:{} pr:{} cd:{:.1} grace:{:.1} ready:{} side:{}",
            mode,
            self.enemy_room.as_token(),
            self.player_room.as_token(),
            self.enemy_move_cooldown.max(0.0),
            self.grace_remaining,
            if self.enemy_ready_to_enter { 1 } else { 0 },
            self.entry_side.map(Direction::as_token).unwrap_or("none")
        )
    }
}

fn roll_move_cooldown(context: &mut SessionContext) -> f32 {
    context
        .rng
        .range_f32(ENEMY_MOVE_COOLDOWN_MIN_SECONDS, ENEMY_MOVE_COOLDOWN_MAX_SECONDS)
}

fn roll_entry_grace(context: &mut SessionContext) -> f32 {
    if context.tuning.skip_entry_grace {
        return 0.0;
    }
    context
        .rng
        .range_f32(ENTRY_GRACE_MIN_SECONDS, ENTRY_GRACE_MAX_SECONDS)
}

/// One abstract step toward the player's room, resolving the row axis
/// before the column axis and only along edges that exist in the topology.
fn step_toward_room(from: RoomId, toward: RoomId) -> Option<RoomId> {
    let (from_row, from_col) = from.grid_position();
    let (toward_row, toward_col) = toward.grid_position();

    let row_step = if toward_row < from_row {
        Some(Direction::Up)
    } else if toward_row > from_row {
        Some(Direction::Down)
    } else {
        None
    };
    let col_step = if toward_col < from_col {
        Some(Direction::Left)
    } else if toward_col > from_col {
        Some(Direction::Right)
    } else {
        None
    };

    if let Some(stepped) = row_step.and_then(|direction| from.neighbor(direction)) {
        return Some(stepped);
    }
    col_step.and_then(|direction| from.neighbor(direction))
}
