//! Месяц + год для подписи страниц («MARCH 2016»).

use chrono::{DateTime, Datelike, Month, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthYear {
    month: Month,
    year: i32,
}

impl MonthYear {
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    /// `None` для меток времени вне диапазона chrono.
    pub fn of_timestamp(millis: i64) -> Option<Self> {
        let dt = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(Self::from_date(dt.month(), dt.year()))
    }

    fn from_date(month1: u32, year: i32) -> Self {
        // month1 всегда в 1..=12, поэтому fallback недостижим
        let month = Month::try_from(month1 as u8).unwrap_or(Month::January);
        Self { month, year }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn previous(&self) -> Self {
        let year = if self.month == Month::January { self.year - 1 } else { self.year };
        Self { month: self.month.pred(), year }
    }

    pub fn next(&self) -> Self {
        let year = if self.month == Month::December { self.year + 1 } else { self.year };
        Self { month: self.month.succ(), year }
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month.name().to_uppercase(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_over_year_boundaries() {
        let jan = MonthYear::new(Month::January, 2016);
        assert_eq!(jan.previous(), MonthYear::new(Month::December, 2015));
        assert_eq!(jan.previous().next(), jan);

        let dec = MonthYear::new(Month::December, 2016);
        assert_eq!(dec.next(), MonthYear::new(Month::January, 2017));
    }

    #[test]
    fn display_and_timestamp() {
        // 2016-03-04T10:00:00Z
        let my = MonthYear::of_timestamp(1_457_085_600_000).unwrap();
        assert_eq!(my.to_string(), "MARCH 2016");
        assert_eq!(my.year(), 2016);
        assert_eq!(my.month(), Month::March);
    }
}
