use crate::model::Interval;

/// Decide whether a candidate window may be granted alongside the confirmed
/// intervals already held on the same court. Pure and ownership-free: the
/// caller is responsible for scoping `existing` to one court and filtering
/// out cancelled reservations.
///
/// Back-to-back windows (`end == start`) never conflict.
pub fn may_accept(candidate: &Interval, existing: &[Interval]) -> bool {
    existing.iter().all(|e| !candidate.overlaps(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
    }

    fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> Interval {
        Interval::new(at(sh, sm), at(eh, em)).unwrap()
    }

    #[test]
    fn empty_court_accepts_anything() {
        assert!(may_accept(&iv(10, 0, 11, 0), &[]));
    }

    #[test]
    fn adjacency_is_permitted() {
        let existing = [iv(10, 0, 11, 0)];
        assert!(may_accept(&iv(11, 0, 12, 0), &existing));
        assert!(may_accept(&iv(9, 0, 10, 0), &existing));
    }

    #[test]
    fn partial_overlap_rejected() {
        let existing = [iv(10, 0, 11, 0)];
        assert!(!may_accept(&iv(10, 30, 11, 30), &existing));
        assert!(!may_accept(&iv(9, 30, 10, 30), &existing));
    }

    #[test]
    fn containment_rejected_both_ways() {
        let existing = [iv(10, 0, 12, 0)];
        assert!(!may_accept(&iv(10, 30, 11, 30), &existing));

        let existing = [iv(10, 30, 11, 30)];
        assert!(!may_accept(&iv(10, 0, 12, 0), &existing));
    }

    #[test]
    fn one_overlap_among_many_rejects() {
        let existing = [iv(8, 0, 9, 0), iv(12, 0, 13, 0), iv(15, 0, 16, 0)];
        assert!(may_accept(&iv(10, 0, 11, 0), &existing));
        assert!(!may_accept(&iv(12, 30, 14, 0), &existing));
    }
}
