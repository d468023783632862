use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Check-ins strictly after this time-of-day are Late.
pub fn late_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 30, 0).unwrap()
}

/// Check-ins strictly after this time-of-day are rejected.
pub fn close_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap()
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Status {
    Present,
    Late,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::Late => "Late",
        }
    }
}

/// Classify a check-in attempt by its local time-of-day. `None` means the
/// window has closed for the day. Both comparisons are strict: exactly
/// 07:30:00 is Present and exactly 08:00:00 is Late.
pub fn classify_check_in(t: NaiveTime) -> Option<Status> {
    if t > close_cutoff() {
        return None;
    }

    if t > late_cutoff() {
        Some(Status::Late)
    } else {
        Some(Status::Present)
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attendance {
    pub id: u64,
    pub user_id: u64,
    pub date: NaiveDate,
    pub check_in: NaiveDateTime,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn before_late_cutoff_is_present() {
        assert_eq!(classify_check_in(at(0, 0, 0)), Some(Status::Present));
        assert_eq!(classify_check_in(at(7, 29, 59)), Some(Status::Present));
    }

    #[test]
    fn exact_late_cutoff_is_still_present() {
        assert_eq!(classify_check_in(at(7, 30, 0)), Some(Status::Present));
    }

    #[test]
    fn after_late_cutoff_is_late() {
        assert_eq!(classify_check_in(at(7, 30, 1)), Some(Status::Late));
        assert_eq!(classify_check_in(at(7, 59, 59)), Some(Status::Late));
    }

    #[test]
    fn exact_close_cutoff_is_still_late() {
        assert_eq!(classify_check_in(at(8, 0, 0)), Some(Status::Late));
    }

    #[test]
    fn after_close_cutoff_is_rejected() {
        assert_eq!(classify_check_in(at(8, 0, 1)), None);
        assert_eq!(classify_check_in(at(12, 0, 0)), None);
        assert_eq!(classify_check_in(at(23, 59, 59)), None);
    }
}
