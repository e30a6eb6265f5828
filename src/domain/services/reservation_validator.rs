//! Reservation eligibility rules.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Reservation, Table};

/// Static business rules a reservation must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRules {
    pub min_party_size: i32,
    pub max_party_size: i32,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
}

impl Default for ReservationRules {
    fn default() -> Self {
        Self {
            min_party_size: 1,
            max_party_size: 20,
            opening_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
            closing_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Outcome of validating a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationVerdict {
    pub is_valid: bool,
    /// Why the first failing rule failed; `None` when valid
    pub reason: Option<String>,
}

impl ReservationVerdict {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Domain service checking a reservation against [`ReservationRules`].
///
/// Stateless apart from its rules; every method is a pure function of its
/// arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationValidator {
    rules: ReservationRules,
}

impl ReservationValidator {
    pub fn new(rules: ReservationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ReservationRules {
        &self.rules
    }

    pub fn validate_party_size(&self, size: i32) -> bool {
        (self.rules.min_party_size..=self.rules.max_party_size).contains(&size)
    }

    /// Same-day reservations are allowed.
    pub fn validate_future_date(&self, reservation_date: NaiveDate, reference_date: NaiveDate) -> bool {
        reservation_date >= reference_date
    }

    /// `start < end`, both inside business hours (boundaries included).
    pub fn validate_time_range(&self, start: NaiveTime, end: NaiveTime) -> bool {
        let hours = self.rules.opening_time..=self.rules.closing_time;
        start < end && hours.contains(&start) && hours.contains(&end)
    }

    pub fn validate_table_capacity(&self, table: &Table, party_size: i32) -> bool {
        table.seats(party_size)
    }

    /// Validate against today's local date.
    pub fn validate_reservation(
        &self,
        reservation: &Reservation,
        table: Option<&Table>,
    ) -> ReservationVerdict {
        self.validate_reservation_on(reservation, table, Local::now().date_naive())
    }

    /// Run every rule in order (party size, date, business hours, table
    /// capacity) and report the first failure. The capacity rule is skipped
    /// when no table is given.
    pub fn validate_reservation_on(
        &self,
        reservation: &Reservation,
        table: Option<&Table>,
        reference_date: NaiveDate,
    ) -> ReservationVerdict {
        if !self.validate_party_size(reservation.party_size) {
            return ReservationVerdict::invalid(format!(
                "Party size must be between {} and {}",
                self.rules.min_party_size, self.rules.max_party_size
            ));
        }

        if !self.validate_future_date(reservation.reservation_date, reference_date) {
            return ReservationVerdict::invalid("Reservation date cannot be in the past");
        }

        if !self.validate_time_range(reservation.start_time, reservation.end_time) {
            return ReservationVerdict::invalid(format!(
                "Reservation must start before it ends and fall within business hours ({} - {})",
                self.rules.opening_time.format("%H:%M"),
                self.rules.closing_time.format("%H:%M")
            ));
        }

        if let Some(table) = table {
            if !self.validate_table_capacity(table, reservation.party_size) {
                return ReservationVerdict::invalid(format!(
                    "Table {} seats {} but the party has {}",
                    table.label, table.seating_capacity, reservation.party_size
                ));
            }
        }

        ReservationVerdict::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn reservation(party_size: i32, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Reservation {
        Reservation::new(1, date, start, end, party_size)
    }

    // ==========================================================================
    // Individual rules
    // ==========================================================================

    #[test_case(0, false ; "zero is too small")]
    #[test_case(1, true ; "one is the minimum")]
    #[test_case(20, true ; "twenty is the maximum")]
    #[test_case(21, false ; "twenty one is too large")]
    #[test_case(100, false ; "one hundred is too large")]
    #[test_case(-3, false ; "negative is invalid")]
    fn test_validate_party_size(size: i32, expected: bool) {
        assert_eq!(ReservationValidator::default().validate_party_size(size), expected);
    }

    #[test]
    fn test_validate_future_date_allows_same_day() {
        let validator = ReservationValidator::default();
        let day = today();

        assert!(validator.validate_future_date(day, day));
        assert!(validator.validate_future_date(day.succ_opt().unwrap(), day));
        assert!(!validator.validate_future_date(day.pred_opt().unwrap(), day));
    }

    #[test_case(time(8, 0), time(10, 0), false ; "starts before opening")]
    #[test_case(time(10, 0), time(12, 0), true ; "starts exactly at opening")]
    #[test_case(time(20, 0), time(22, 0), true ; "ends exactly at closing")]
    #[test_case(time(21, 0), time(22, 30), false ; "ends after closing")]
    #[test_case(time(15, 0), time(15, 0), false ; "start equals end")]
    #[test_case(time(18, 0), time(16, 0), false ; "end before start")]
    #[test_case(time(22, 0), time(22, 0), false ; "zero length at closing")]
    fn test_validate_time_range(start: NaiveTime, end: NaiveTime, expected: bool) {
        assert_eq!(ReservationValidator::default().validate_time_range(start, end), expected);
    }

    #[test]
    fn test_validate_table_capacity() {
        let validator = ReservationValidator::default();
        let table = Table::new(1, "T1", 4);

        assert!(validator.validate_table_capacity(&table, 4));
        assert!(validator.validate_table_capacity(&table, 2));
        assert!(!validator.validate_table_capacity(&table, 5));
    }

    // ==========================================================================
    // Composite validation
    // ==========================================================================

    #[test]
    fn test_valid_reservation_has_no_reason() {
        let verdict = ReservationValidator::default().validate_reservation_on(
            &reservation(4, today(), time(18, 0), time(20, 0)),
            Some(&Table::new(1, "T1", 4)),
            today(),
        );

        assert_eq!(verdict, ReservationVerdict::valid());
    }

    #[test]
    fn test_party_size_is_reported_first() {
        let past = today().pred_opt().unwrap();
        let verdict = ReservationValidator::default().validate_reservation_on(
            &reservation(0, past, time(8, 0), time(7, 0)),
            Some(&Table::new(1, "T1", 2)),
            today(),
        );

        assert!(!verdict.is_valid);
        assert_eq!(verdict.reason.as_deref(), Some("Party size must be between 1 and 20"));
    }

    #[test]
    fn test_past_date_is_reported_before_hours() {
        let past = today().pred_opt().unwrap();
        let verdict = ReservationValidator::default().validate_reservation_on(
            &reservation(2, past, time(8, 0), time(9, 0)),
            None,
            today(),
        );

        assert_eq!(
            verdict.reason.as_deref(),
            Some("Reservation date cannot be in the past")
        );
    }

    #[test]
    fn test_business_hours_failure_reason() {
        let verdict = ReservationValidator::default().validate_reservation_on(
            &reservation(2, today(), time(8, 0), time(10, 0)),
            None,
            today(),
        );

        assert_eq!(
            verdict.reason.as_deref(),
            Some("Reservation must start before it ends and fall within business hours (10:00 - 22:00)")
        );
    }

    #[test]
    fn test_table_capacity_checked_last() {
        let verdict = ReservationValidator::default().validate_reservation_on(
            &reservation(6, today(), time(12, 0), time(14, 0)),
            Some(&Table::new(3, "Window 2", 4)),
            today(),
        );

        assert!(!verdict.is_valid);
        assert_eq!(
            verdict.reason.as_deref(),
            Some("Table Window 2 seats 4 but the party has 6")
        );
    }

    #[test]
    fn test_missing_table_skips_capacity_rule() {
        let verdict = ReservationValidator::default().validate_reservation_on(
            &reservation(20, today(), time(12, 0), time(14, 0)),
            None,
            today(),
        );

        assert!(verdict.is_valid);
    }

    #[test]
    fn test_custom_rules() {
        let validator = ReservationValidator::new(ReservationRules {
            min_party_size: 2,
            max_party_size: 8,
            opening_time: time(12, 0),
            closing_time: time(23, 30),
        });

        assert!(!validator.validate_party_size(1));
        assert!(validator.validate_party_size(8));
        assert!(validator.validate_time_range(time(21, 0), time(23, 30)));
        assert!(!validator.validate_time_range(time(11, 0), time(13, 0)));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let validator = ReservationValidator::default();
        let r = reservation(25, today(), time(12, 0), time(14, 0));

        let first = validator.validate_reservation_on(&r, None, today());
        let second = validator.validate_reservation_on(&r, None, today());
        assert_eq!(first, second);
    }
}
