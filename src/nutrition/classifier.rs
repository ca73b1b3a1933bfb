// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Workout intensity classification from free-text workout metadata

use super::{IntensityCategory, WorkoutIntensity};
use crate::models::WorkoutEvent;

/// Classify a workout from its name and type
///
/// Rules are checked in order and the first match wins. The
/// "strength endurance" / "low cadence" rule must stay ahead of the plain
/// strength rule: those sessions are fuelled like intervals.
pub fn classify_workout(workout: &WorkoutEvent) -> IntensityCategory {
    classify_text(workout.name.as_deref(), workout.workout_type.as_deref())
}

/// Classify from raw name and type strings
pub fn classify_text(name: Option<&str>, workout_type: Option<&str>) -> IntensityCategory {
    let name = name.unwrap_or_default().to_lowercase();
    let workout_type = workout_type.unwrap_or_default().to_lowercase();
    let name_has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

    if name_has(&["recovery", "easy"]) {
        IntensityCategory::Easy
    } else if name_has(&["tempo", "zone 3"]) {
        IntensityCategory::Tempo
    } else if name_has(&["threshold", "zone 4"]) {
        IntensityCategory::Threshold
    } else if name_has(&["interval", "zone 5"]) {
        IntensityCategory::Intervals
    } else if name_has(&["strength endurance", "low cadence"]) {
        IntensityCategory::Intervals
    } else if name.contains("strength") || workout_type.contains("strength") {
        IntensityCategory::Strength
    } else {
        IntensityCategory::Endurance
    }
}

/// Which ranking to use when several workouts share a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTable {
    /// Calendar-day aggregation; strength ranks below endurance
    Calendar,
    /// Race and multi-workout session combination; strength does not rank
    Session,
}

impl RankTable {
    /// Rank of an intensity in this table, `None` when it does not participate
    pub fn rank(&self, intensity: &WorkoutIntensity) -> Option<u8> {
        match self {
            RankTable::Calendar => calendar_rank(intensity),
            RankTable::Session => intensity.category().and_then(session_rank),
        }
    }
}

fn calendar_rank(intensity: &WorkoutIntensity) -> Option<u8> {
    match intensity {
        WorkoutIntensity::None => Some(0),
        WorkoutIntensity::Easy => Some(1),
        WorkoutIntensity::Strength => Some(2),
        WorkoutIntensity::Endurance => Some(3),
        WorkoutIntensity::Tempo => Some(4),
        WorkoutIntensity::Threshold => Some(5),
        WorkoutIntensity::Intervals => Some(6),
        WorkoutIntensity::Unrecognized(_) => None,
    }
}

fn session_rank(category: IntensityCategory) -> Option<u8> {
    match category {
        IntensityCategory::Easy => Some(1),
        IntensityCategory::Endurance => Some(2),
        IntensityCategory::Tempo => Some(3),
        IntensityCategory::Threshold => Some(4),
        IntensityCategory::Intervals => Some(5),
        IntensityCategory::Strength => None,
    }
}

/// Pick the intensity that drives a day's nutrition
///
/// The highest-ranked category wins; the first one seen wins a tie. With no
/// workouts the day is a rest day. Under [`RankTable::Session`] a day with
/// only strength work still reports strength.
pub fn dominant_intensity(categories: &[IntensityCategory], table: RankTable) -> WorkoutIntensity {
    let mut best: Option<(u8, IntensityCategory)> = None;

    for category in categories {
        let Some(rank) = table.rank(&WorkoutIntensity::from(*category)) else {
            continue;
        };
        if best.map_or(true, |(best_rank, _)| rank > best_rank) {
            best = Some((rank, *category));
        }
    }

    match best {
        Some((_, category)) => category.into(),
        None if categories.contains(&IntensityCategory::Strength) => WorkoutIntensity::Strength,
        None => WorkoutIntensity::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(name: &str, workout_type: &str) -> WorkoutEvent {
        WorkoutEvent {
            name: Some(name.to_string()),
            workout_type: Some(workout_type.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let cases = [
            ("Recovery Spin", "Ride", IntensityCategory::Easy),
            ("Easy tempo finish", "Run", IntensityCategory::Easy),
            ("Zone 3 blocks", "Ride", IntensityCategory::Tempo),
            ("2x20 Threshold", "Ride", IntensityCategory::Threshold),
            ("VO2 Intervals", "Ride", IntensityCategory::Intervals),
            ("ZONE 5 repeats", "Run", IntensityCategory::Intervals),
        ];
        for (name, kind, expected) in cases {
            assert_eq!(classify_workout(&workout(name, kind)), expected, "{}", name);
        }
    }

    #[test]
    fn test_strength_endurance_is_intervals() {
        assert_eq!(
            classify_workout(&workout("Strength Endurance Intervals", "Ride")),
            IntensityCategory::Intervals
        );
        assert_eq!(
            classify_workout(&workout("Low Cadence Strength", "Ride")),
            IntensityCategory::Intervals
        );
    }

    #[test]
    fn test_strength_matches_name_or_type() {
        let gym = workout("Gym Session", "Strength");
        let core = workout("Core strength", "Workout");
        assert_eq!(classify_workout(&gym), IntensityCategory::Strength);
        assert_eq!(classify_workout(&core), IntensityCategory::Strength);
    }

    #[test]
    fn test_default_is_endurance() {
        assert_eq!(classify_workout(&workout("Long Ride", "Ride")), IntensityCategory::Endurance);
        assert_eq!(classify_workout(&WorkoutEvent::default()), IntensityCategory::Endurance);
    }

    #[test]
    fn test_type_only_matters_for_strength() {
        assert_eq!(classify_text(Some("Ride"), Some("tempo")), IntensityCategory::Endurance);
    }

    #[test]
    fn test_rank_tables_differ_on_strength() {
        assert_eq!(RankTable::Calendar.rank(&WorkoutIntensity::Strength), Some(2));
        assert_eq!(RankTable::Session.rank(&WorkoutIntensity::Strength), None);
        assert_eq!(RankTable::Calendar.rank(&WorkoutIntensity::Endurance), Some(3));
        assert_eq!(RankTable::Session.rank(&WorkoutIntensity::Endurance), Some(2));
        assert_eq!(RankTable::Calendar.rank(&WorkoutIntensity::None), Some(0));
        assert_eq!(RankTable::Session.rank(&WorkoutIntensity::None), None);
    }

    #[test]
    fn test_dominant_calendar_intensity() {
        use IntensityCategory::*;

        assert_eq!(dominant_intensity(&[], RankTable::Calendar), WorkoutIntensity::None);
        assert_eq!(
            dominant_intensity(&[Easy, Strength], RankTable::Calendar),
            WorkoutIntensity::Strength
        );
        assert_eq!(
            dominant_intensity(&[Strength, Endurance, Tempo], RankTable::Calendar),
            WorkoutIntensity::Tempo
        );
    }

    #[test]
    fn test_dominant_session_intensity_skips_strength() {
        use IntensityCategory::*;

        assert_eq!(
            dominant_intensity(&[Easy, Strength], RankTable::Session),
            WorkoutIntensity::Easy
        );
        assert_eq!(
            dominant_intensity(&[Strength], RankTable::Session),
            WorkoutIntensity::Strength
        );
    }
}
