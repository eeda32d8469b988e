//! Screening schedule overlap detection

use chrono::{DateTime, Duration, Utc};

/// A scheduled screening interval in a hall, half-open: [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Showing {
    pub seance_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Showing {
    pub fn new(seance_id: i64, start: DateTime<Utc>, duration_min: i64) -> Self {
        Self {
            seance_id,
            start,
            end: start + Duration::minutes(duration_min),
        }
    }

    fn overlaps(&self, other: &Showing) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Find the first existing showing in the hall that overlaps the candidate.
/// A showing never conflicts with itself, which lets updates re-validate
/// against the full hall schedule.
pub fn find_conflict(candidate: &Showing, existing: &[Showing]) -> Option<Showing> {
    existing
        .iter()
        .find(|s| s.seance_id != candidate.seance_id && s.overlaps(candidate))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, hour, min, 0).unwrap()
    }

    #[test]
    fn test_back_to_back_showings_do_not_conflict() {
        let first = Showing::new(1, at(18, 0), 120);
        let second = Showing::new(2, at(20, 0), 90);

        assert!(find_conflict(&second, &[first]).is_none());
    }

    #[test]
    fn test_overlapping_start_conflicts() {
        let first = Showing::new(1, at(18, 0), 120);
        let second = Showing::new(2, at(19, 30), 90);

        let conflict = find_conflict(&second, &[first]).unwrap();
        assert_eq!(conflict.seance_id, 1);
    }

    #[test]
    fn test_contained_showing_conflicts() {
        let long = Showing::new(1, at(18, 0), 180);
        let short = Showing::new(2, at(19, 0), 30);

        assert!(find_conflict(&short, &[long]).is_some());
        assert!(find_conflict(&long, &[short]).is_some());
    }

    #[test]
    fn test_update_skips_itself() {
        let current = Showing::new(7, at(18, 0), 120);
        // Same seance moved 15 minutes later still overlaps its old slot
        let moved = Showing::new(7, at(18, 15), 120);

        assert!(find_conflict(&moved, &[current]).is_none());
    }

    #[test]
    fn test_earlier_showing_running_into_candidate() {
        let earlier = Showing::new(1, at(17, 0), 90);
        let candidate = Showing::new(2, at(18, 0), 120);

        assert!(find_conflict(&candidate, &[earlier]).is_some());
    }
}
