//! Time-based trigger primitives
//!
//! A trigger fires at most once per satisfied period: once per calendar day
//! for [`Trigger::Daily`], once per elapsed period for [`Trigger::Every`].
//! Evaluation is a pure function of the supplied clock value, so the firing
//! rules are testable with synthetic ticks.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};

#[derive(Debug, Clone)]
pub enum Trigger {
    /// Fires once per calendar day when the clock first reaches `at`
    Daily {
        at: NaiveTime,
        last_fired: Option<NaiveDate>,
    },

    /// Fires once every elapsed `period` since the previous fire
    Every {
        period: Duration,
        last_fired: DateTime<Local>,
    },
}

impl Trigger {
    /// Daily trigger anchored to `now`
    ///
    /// Constructed after today's instant has already passed, it arms for
    /// tomorrow instead of firing late.
    pub fn daily(at: NaiveTime, now: DateTime<Local>) -> Self {
        let last_fired = (now.time() >= at).then(|| now.date_naive());
        Self::Daily { at, last_fired }
    }

    /// Interval trigger anchored to `now`; the first fire comes one full
    /// period later
    pub fn every(period: Duration, now: DateTime<Local>) -> Self {
        Self::Every {
            period,
            last_fired: now,
        }
    }

    /// Evaluate against the clock, consuming the period on a fire
    ///
    /// Re-polling the same or a later tick within the same period returns
    /// `false` until the condition is freshly satisfied again (day
    /// rollover, or another full interval elapsed).
    pub fn poll(&mut self, now: DateTime<Local>) -> bool {
        match self {
            Self::Daily { at, last_fired } => {
                let today = now.date_naive();
                if now.time() >= *at && *last_fired != Some(today) {
                    *last_fired = Some(today);
                    true
                } else {
                    false
                }
            }
            Self::Every { period, last_fired } => {
                if now.signed_duration_since(*last_fired) >= *period {
                    *last_fired = now;
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 20, h, m, s).single().unwrap()
    }

    #[test]
    fn test_daily_fires_exactly_once_over_second_ticks() {
        let at = NaiveTime::from_hms_opt(13, 10, 0).unwrap();
        let mut trigger = Trigger::daily(at, clock(13, 0, 0));

        // 130 one-second ticks spanning 13:09:55 .. 13:12:05
        let start = clock(13, 9, 55);
        let mut fired_at = Vec::new();
        for i in 0..130 {
            let now = start + Duration::seconds(i);
            if trigger.poll(now) {
                fired_at.push(now);
            }
        }

        assert_eq!(fired_at.len(), 1);
        assert_eq!(fired_at[0], clock(13, 10, 0));
    }

    #[test]
    fn test_daily_refires_after_day_rollover() {
        let at = NaiveTime::from_hms_opt(13, 10, 0).unwrap();
        let mut trigger = Trigger::daily(at, clock(13, 0, 0));

        assert!(trigger.poll(clock(13, 10, 30)));
        assert!(!trigger.poll(clock(20, 0, 0)));

        let next_day = Local
            .with_ymd_and_hms(2024, 5, 21, 13, 10, 0)
            .single()
            .unwrap();
        assert!(trigger.poll(next_day));
        assert!(!trigger.poll(next_day + Duration::seconds(1)));
    }

    #[test]
    fn test_daily_created_past_instant_waits_for_tomorrow() {
        let at = NaiveTime::from_hms_opt(13, 10, 0).unwrap();
        let mut trigger = Trigger::daily(at, clock(15, 0, 0));

        assert!(!trigger.poll(clock(15, 0, 1)));
        assert!(!trigger.poll(clock(23, 59, 59)));

        let next_day = Local
            .with_ymd_and_hms(2024, 5, 21, 13, 10, 0)
            .single()
            .unwrap();
        assert!(trigger.poll(next_day));
    }

    #[test]
    fn test_every_fires_once_per_period() {
        let mut trigger = Trigger::every(Duration::hours(2), clock(10, 0, 0));

        assert!(!trigger.poll(clock(10, 0, 1)));
        assert!(!trigger.poll(clock(11, 59, 59)));
        assert!(trigger.poll(clock(12, 0, 0)));
        // consumed until another two hours pass
        assert!(!trigger.poll(clock(12, 0, 1)));
        assert!(!trigger.poll(clock(13, 59, 59)));
        assert!(trigger.poll(clock(14, 0, 0)));
    }
}
