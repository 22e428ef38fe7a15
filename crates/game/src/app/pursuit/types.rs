#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TuningConfig {
    pub(crate) search_speed: f32,
    pub(crate) chase_speed: f32,
    pub(crate) skip_entry_grace: bool,
    pub(crate) high_traffic_room: RoomId,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            search_speed: 60.0,
            chase_speed: 110.0,
            skip_entry_grace: false,
            high_traffic_room: RoomId::Hallway,
        }
    }
}

impl TuningConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if !self.search_speed.is_finite() || self.search_speed <= 0.0 {
            return Err(format!(
                "search_speed must be positive and finite, got {}",
                self.search_speed
            ));
        }
        if !self.chase_speed.is_finite() || self.chase_speed <= 0.0 {
            return Err(format!(
                "chase_speed must be positive and finite, got {}",
                self.chase_speed
            ));
        }
        Ok(())
    }
}

/// Seedable random source for every roll the pursuit core makes. Owned by
/// the session context so tests can pin a seed and replay a run exactly.
pub(crate) struct SessionRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SessionRng {
    pub(crate) fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    pub(crate) fn roll(&mut self) -> f32 {
        self.rng.gen_range(0.0..1.0)
    }

    pub(crate) fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    pub(crate) fn unit_direction(&mut self) -> Vec2 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        Vec2 {
            x: angle.cos(),
            y: angle.sin(),
        }
    }
}

pub(crate) struct SessionContext {
    pub(crate) rng: SessionRng,
    pub(crate) tuning: TuningConfig,
}

impl SessionContext {
    pub(crate) fn new(seed: u64, tuning: TuningConfig) -> Self {
        Self {
            rng: SessionRng::from_seed(seed),
            tuning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpawnContext {
    Blocked,
    FromChase,
    FreshEncounter,
    Ambush,
    Waiting,
}

impl SpawnContext {
    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::FromChase => "from_chase",
            Self::FreshEncounter => "fresh_encounter",
            Self::Ambush => "ambush",
            Self::Waiting => "waiting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LastInteraction {
    None,
    Chased,
    Caught,
    Retreated,
}

impl LastInteraction {
    fn as_token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Chased => "chased",
            Self::Caught => "caught",
            Self::Retreated => "retreated",
        }
    }
}

/// Outcome of one spawn evaluation. Built once per decision call; the
/// `reason` is diagnostic text, never parsed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpawnDecision {
    pub(crate) should_spawn: bool,
    pub(crate) position: Vec2,
    pub(crate) context: SpawnContext,
    pub(crate) reason: String,
}

impl SpawnDecision {
    fn no_spawn(context: SpawnContext, reason: impl Into<String>) -> Self {
        Self {
            should_spawn: false,
            position: Vec2::default(),
            context,
            reason: reason.into(),
        }
    }

    fn spawn_at(position: Vec2, context: SpawnContext, reason: impl Into<String>) -> Self {
        Self {
            should_spawn: true,
            position,
            context,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnemyState {
    Searching,
    Chasing,
    Stunned,
}

impl EnemyState {
    fn as_token(self) -> &'static str {
        match self {
            Self::Searching => "searching",
            Self::Chasing => "chasing",
            Self::Stunned => "stunned",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct EnemyTick {
    pub(crate) started_chasing: bool,
    pub(crate) despawned: bool,
    pub(crate) respawned: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DirectorTick {
    pub(crate) enemy_materialized: bool,
    pub(crate) buffer_expired: bool,
}
