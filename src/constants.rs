//! Shared constants for the simulation core

/// Octree layout constants
pub mod octree {
    /// Children per node; one mask bit each
    pub const OCTANTS_PER_NODE: usize = 8;

    /// Largest supported tree depth (a 1024³ level)
    pub const MAX_DEPTH: u32 = 10;

    static_assertions::const_assert_eq!(OCTANTS_PER_NODE, u8::BITS as usize);
}

/// Level limits
pub mod level {
    /// Largest extent allowed on any axis
    pub const MAX_DIMENSION: i32 = 1 << super::octree::MAX_DEPTH;

    /// Extent used when no config is supplied
    pub const DEFAULT_DIMENSION: i32 = 64;
}

/// Swept-collision and step tuning
pub mod physics {
    /// Gap left between boxes after an axis clamp
    pub const CLIP_EPSILON: f32 = 0.0;

    /// Displacements with every component below this are ignored
    pub const NEGLIGIBLE_DISPLACEMENT: f32 = 1.0e-7;

    /// Slide offset added when a step-up is accepted
    pub const STEP_SLIDE_INCREMENT: f32 = 0.5;

    /// Per-move multiplicative decay of the slide offset
    pub const SLIDE_OFFSET_DECAY: f32 = 0.4;

    /// A new step-up is only attempted while the slide offset is below this
    pub const STEP_SLIDE_THRESHOLD: f32 = 0.05;

    /// Horizontal displacement to walk-distance factor
    pub const WALK_DISTANCE_SCALE: f32 = 0.6;

    /// How far below the feet the step-sound material is sampled
    pub const STEP_PROBE_DEPTH: f32 = 0.2;

    /// Step sounds play quieter than the block's nominal volume
    pub const STEP_VOLUME_SCALE: f32 = 0.75;

    /// Inset used by the water and lava containment probes
    pub const LIQUID_PROBE_INSET: f32 = 0.4;
}

/// Entity defaults
pub mod entity {
    pub const DEFAULT_WIDTH: f32 = 0.6;
    pub const DEFAULT_HEIGHT: f32 = 1.8;

    /// Mouse-look scale applied by `turn`
    pub const TURN_SCALE: f32 = 0.15;

    /// Pitch clamp (degrees)
    pub const PITCH_LIMIT_DEGREES: f32 = 90.0;

    /// Render distance in multiples of the entity's average extent
    pub const RENDER_DISTANCE_FACTOR: f32 = 64.0;
}
