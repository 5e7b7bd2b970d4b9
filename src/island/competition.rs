//! Distance-aware competition rule.
//!
//! A starting point for [`Problem::does_a_beat_b`](super::Problem::does_a_beat_b)
//! on landscapes with several peaks. Pairs that are far apart usually do not
//! compete at all, so a fit gene cannot wipe out a distant niche in one
//! step.

use crate::random::RandomSource;

/// Competition between two scored genes that protects distant niches.
///
/// Scores at or below zero mark failed genes.
///
/// # Examples
///
/// ```
/// use ga_island::island::DiversityRule;
/// use ga_island::random::create_rng;
///
/// let rule = DiversityRule::new(3.25);
/// let mut rng = create_rng(1);
/// // Close genes compete on score alone.
/// assert!(rule.does_a_beat_b(10.0, 5.0, 0.5, &mut rng));
/// // A failed gene never wins.
/// assert!(!rule.does_a_beat_b(0.0, 5.0, 0.5, &mut rng));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiversityRule {
    /// Distance at or above which a pair may be exempt from competing.
    pub min_distance: f64,
}

impl DiversityRule {
    pub fn new(min_distance: f64) -> Self {
        Self { min_distance }
    }

    /// Decides whether `a` (scored `a_score`) beats `b` (scored `b_score`)
    /// given their `distance`.
    ///
    /// 1. `a_score <= 0`: `a` failed and never wins.
    /// 2. `b_score <= 0`: `b` failed and always loses.
    /// 3. `distance >= min_distance`: the pair is exempt, unless a draw lands
    ///    at or below `0.1 / distance`.
    /// 4. Otherwise the strictly higher score wins.
    pub fn does_a_beat_b<R: RandomSource + ?Sized>(
        &self,
        a_score: f64,
        b_score: f64,
        distance: f64,
        rng: &mut R,
    ) -> bool {
        if a_score <= 0.0 {
            return false;
        }
        if b_score <= 0.0 {
            return true;
        }
        if distance >= self.min_distance && rng.uniform() > 0.1 / distance {
            return false;
        }
        a_score > b_score
    }
}
