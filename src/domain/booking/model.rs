//! Booking domain entity

use chrono::NaiveDate;

/// Half-open interval `[start, end)` of nights.
///
/// Only constructible with `start < end`, so an empty or inverted range
/// never reaches the overlap rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `[a, b)` and `[c, d)` overlap iff `a < d && c < b`; touching ends
    /// do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Persisted booking of one room by one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: i32,
    pub room_id: i32,
    pub client_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Booking {
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    pub fn overlaps(&self, range: &DateRange) -> bool {
        self.range().overlaps(range)
    }

    /// Still occupying the room on or after `today`
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.end_date > today
    }

    pub fn reschedule(&mut self, range: DateRange) {
        self.start_date = range.start;
        self.end_date = range.end;
    }
}

/// Booking ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub room_id: i32,
    pub client_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewBooking {
    pub fn new(room_id: i32, client_id: i32, range: DateRange) -> Self {
        Self {
            room_id,
            client_id,
            start_date: range.start,
            end_date: range.end,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, day).unwrap()
    }

    fn range(a: u32, b: u32) -> DateRange {
        DateRange::new(d(a), d(b)).unwrap()
    }

    #[test]
    fn empty_and_inverted_ranges_are_rejected() {
        assert!(DateRange::new(d(5), d(5)).is_none());
        assert!(DateRange::new(d(10), d(5)).is_none());
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        assert!(!range(1, 5).overlaps(&range(5, 10)));
        assert!(!range(5, 10).overlaps(&range(1, 5)));
    }

    #[test]
    fn nested_and_partial_ranges_overlap() {
        assert!(range(1, 10).overlaps(&range(5, 7)));
        assert!(range(5, 7).overlaps(&range(1, 10)));
        assert!(range(1, 6).overlaps(&range(5, 10)));
        assert!(range(1, 10).overlaps(&range(1, 10)));
    }

    #[test]
    fn nights_counts_excluded_end() {
        assert_eq!(range(1, 5).nights(), 4);
    }

    #[test]
    fn active_until_checkout_day() {
        let booking = Booking {
            id: 1,
            room_id: 1,
            client_id: 1,
            start_date: d(1),
            end_date: d(5),
        };
        assert!(booking.is_active(d(4)));
        assert!(!booking.is_active(d(5)));
    }
}
