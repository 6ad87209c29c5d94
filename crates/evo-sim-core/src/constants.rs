/// Scale applied to `size³·speed² + sense` to obtain the per-move energy cost.
pub const ENERGY_COST_SCALE_FACTOR: f64 = 1.0 / 10_000.0;

/// Number of eaten items after which a creature stops foraging and heads home.
pub const SATIETY_LIMIT: usize = 2;

/// Half-width of the heading perturbation used by wandering and fleeing.
pub const HEADING_NOISE: f64 = std::f64::consts::FRAC_PI_4;

/// Heading used when a creature has neither an objective nor a previous move.
pub const DEFAULT_HEADING: [f64; 2] = [1.0, 0.0];

/// Predator must satisfy `predator.size * ratio >= prey.size`.
pub const DEFAULT_PREDATION_SIZE_RATIO: f64 = 0.8;

/// Standard deviation of the per-generation lifetime draw.
pub const DEFAULT_AGE_LIMIT_VARIANCE: f64 = 1.0;

/// Hard cap on steps inside one generation; active creatures die when reached.
pub const DEFAULT_MAX_STEPS_PER_GENERATION: usize = 10_000;

/// Homesick slack above which a creature does not care about going home.
pub const HOMESICK_CALM_THRESHOLD: f64 = 10.0;

/// Homesick slack above which the urge to return stays minor.
pub const HOMESICK_MINOR_THRESHOLD: f64 = 5.0;
