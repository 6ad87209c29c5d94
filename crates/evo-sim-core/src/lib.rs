pub mod config;
pub mod constants;
pub mod creature;
pub mod food;
pub mod generation;
pub mod geometry;
pub mod kernels;
pub mod metrics;
pub mod objective;
pub mod reproduction;
pub mod rng;
pub mod simulation;
pub mod stage;

pub use config::{SimConfig, SimConfigError};
pub use creature::{Creature, CreatureTraits, LifeState, MutableTrait};
pub use food::{Food, FoodKind, FoodLayout, FoodRecord};
pub use generation::{Generation, PipelineParams};
pub use metrics::{GenerationMetrics, RunSummary};
pub use objective::{Intensity, Objective, Reason};
pub use reproduction::ReproductionMode;
pub use simulation::{Simulation, SimulationError};
pub use stage::Stage;
