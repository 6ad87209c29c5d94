use crate::geometry::{self, Vec2};
use serde::{Deserialize, Serialize};

/// Ordinal urgency of an objective.
///
/// Craving and aversion levels are interleaved so that a single `Ord`
/// comparison arbitrates between them: a vital craving outranks a major
/// aversion, and a vital aversion outranks everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    MinorCraving,
    MinorAversion,
    ModerateCraving,
    ModerateAversion,
    MajorCraving,
    MajorAversion,
    VitalCraving,
    VitalAversion,
}

impl Intensity {
    /// Aversions steer away from the target instead of toward it.
    pub fn is_aversion(self) -> bool {
        matches!(
            self,
            Self::MinorAversion | Self::ModerateAversion | Self::MajorAversion | Self::VitalAversion
        )
    }

    /// Craving level for a hungry creature given how many items it has eaten.
    pub fn for_satiety(foods_eaten: usize) -> Self {
        match foods_eaten {
            0 => Self::VitalCraving,
            1 => Self::ModerateCraving,
            _ => Self::MinorCraving,
        }
    }
}

/// Why an objective was raised. Diagnostic only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Wandering,
    RunningAway,
    SeePrey,
    SeeFood,
    Satisfied,
    LowEnergy,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Objective {
    pub target: Vec2,
    pub intensity: Intensity,
    pub reason: Reason,
}

impl Objective {
    pub fn new(target: Vec2, intensity: Intensity, reason: Reason) -> Self {
        Self {
            target,
            intensity,
            reason,
        }
    }

    /// Whether `self` should replace `current` for a creature standing at `from`.
    ///
    /// Strictly higher intensity wins; on equal intensity the strictly closer
    /// target wins. Exact ties keep `current`.
    pub fn supersedes(&self, current: &Objective, from: Vec2) -> bool {
        match self.intensity.cmp(&current.intensity) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => {
                geometry::distance_sq(from, self.target)
                    < geometry::distance_sq(from, current.target)
            }
        }
    }
}

/// Fold `candidate` into `current` using the arbitration rule.
pub fn arbitrate(current: Option<Objective>, candidate: Objective, from: Vec2) -> Objective {
    match current {
        Some(cur) if !candidate.supersedes(&cur, from) => cur,
        _ => candidate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensities_interleave_by_severity() {
        use Intensity::*;
        let ordered = [
            MinorCraving,
            MinorAversion,
            ModerateCraving,
            ModerateAversion,
            MajorCraving,
            MajorAversion,
            VitalCraving,
            VitalAversion,
        ];
        assert!(ordered.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            ordered.iter().filter(|i| i.is_aversion()).count(),
            4,
            "exactly four aversion levels"
        );
    }

    #[test]
    fn satiety_tiers() {
        assert_eq!(Intensity::for_satiety(0), Intensity::VitalCraving);
        assert_eq!(Intensity::for_satiety(1), Intensity::ModerateCraving);
        assert_eq!(Intensity::for_satiety(2), Intensity::MinorCraving);
        assert_eq!(Intensity::for_satiety(7), Intensity::MinorCraving);
    }

    #[test]
    fn fold_keeps_earlier_on_exact_tie() {
        let first = Objective::new([1.0, 0.0], Intensity::MajorCraving, Reason::SeeFood);
        let second = Objective::new([-1.0, 0.0], Intensity::MajorCraving, Reason::SeePrey);
        let kept = [first, second]
            .into_iter()
            .fold(None, |acc, c| Some(arbitrate(acc, c, [0.0, 0.0])))
            .expect("non-empty fold");
        assert_eq!(kept.reason, Reason::SeeFood);
    }

    #[test]
    fn lower_intensity_never_supersedes() {
        let cur = Objective::new([100.0, 0.0], Intensity::ModerateCraving, Reason::SeeFood);
        let cand = Objective::new([0.0, 0.0], Intensity::MinorAversion, Reason::RunningAway);
        assert!(!cand.supersedes(&cur, [0.0, 0.0]));
    }
}
