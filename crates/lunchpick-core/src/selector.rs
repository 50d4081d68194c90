//! Choosing the next place to suggest.
//!
//! Candidates are drawn uniformly from the places that survive the strictest
//! set of exclusions that still leaves something to pick. Each tier filters
//! the full place list again, so every tier is a superset of the one before:
//!
//! | tier | excludes |
//! |------|----------|
//! | [`Tier::Fresh`] | suggested today, skipped today, current |
//! | [`Tier::RotationReset`] | skipped today, current (clears "suggested today") |
//! | [`Tier::SkipsIgnored`] | current |
//! | [`Tier::OnlyCurrent`] | nothing; every place is the current one |

use rand::Rng;

use crate::day_memory::DayMemory;
use crate::error::CoreError;
use crate::place::Place;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Fresh,
    RotationReset,
    SkipsIgnored,
    OnlyCurrent,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Fresh => write!(f, "fresh"),
            Tier::RotationReset => write!(f, "rotation_reset"),
            Tier::SkipsIgnored => write!(f, "skips_ignored"),
            Tier::OnlyCurrent => write!(f, "only_current"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pick<'a> {
    pub place: &'a Place,
    pub tier: Tier,
}

/// Pick the next place from `places`.
///
/// Falling past [`Tier::Fresh`] clears today's "suggested" set in
/// `memory`; later picks the same day draw from the wider pool. The caller
/// is responsible for marking the returned place as suggested.
///
/// # Errors
///
/// Returns [`CoreError::EmptyPlaceSet`] if `places` is empty.
pub fn pick<'a, R>(
    places: &'a [Place],
    memory: &mut DayMemory,
    current: Option<&Place>,
    rng: &mut R,
) -> Result<Pick<'a>, CoreError>
where
    R: Rng + ?Sized,
{
    if places.is_empty() {
        return Err(CoreError::EmptyPlaceSet);
    }

    let is_current = |place: &Place| current.is_some_and(|c| c.name == place.name);

    let fresh: Vec<&Place> = places
        .iter()
        .filter(|p| !memory.is_suggested(&p.name) && !memory.is_skipped(&p.name) && !is_current(*p))
        .collect();
    if let Some(place) = choose(&fresh, rng) {
        return Ok(Pick {
            place,
            tier: Tier::Fresh,
        });
    }

    tracing::debug!(
        suggested = memory.suggested_count(),
        "every eligible place suggested today; starting the rotation over"
    );
    memory.clear_suggested();

    let unskipped: Vec<&Place> = places
        .iter()
        .filter(|p| !memory.is_skipped(&p.name) && !is_current(*p))
        .collect();
    if let Some(place) = choose(&unskipped, rng) {
        return Ok(Pick {
            place,
            tier: Tier::RotationReset,
        });
    }

    let not_current: Vec<&Place> = places.iter().filter(|p| !is_current(*p)).collect();
    if let Some(place) = choose(&not_current, rng) {
        tracing::debug!(
            candidates = not_current.len(),
            "every other place skipped today; ignoring skips"
        );
        return Ok(Pick {
            place,
            tier: Tier::SkipsIgnored,
        });
    }

    // Every entry carries the current name, so any of them is "current".
    Ok(Pick {
        place: &places[0],
        tier: Tier::OnlyCurrent,
    })
}

fn choose<'a, R>(candidates: &[&'a Place], rng: &mut R) -> Option<&'a Place>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
