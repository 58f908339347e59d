//! Daily sweep schedule in a fixed IANA timezone.

use std::future::Future;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::info;

/// Fires once a day at `at` local time in `tz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSchedule {
    pub at: NaiveTime,
    pub tz: Tz,
}

impl SweepSchedule {
    pub fn new(at: NaiveTime, tz: Tz) -> Self {
        Self { at, tz }
    }

    /// Parses `HH:MM` and an IANA zone name.
    pub fn parse(at: &str, tz: &str) -> Result<Self, String> {
        let at = NaiveTime::parse_from_str(at.trim(), "%H:%M")
            .map_err(|e| format!("invalid sweep time '{}': {}", at, e))?;
        let tz: Tz = tz
            .trim()
            .parse()
            .map_err(|e| format!("invalid timezone '{}': {}", tz, e))?;
        Ok(Self { at, tz })
    }

    /// Fire instant on local day `date`. A time skipped by a DST jump fires an hour later.
    fn fire_on(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        let local = date.and_time(self.at);
        let resolved = match self.tz.from_local_datetime(&local) {
            LocalResult::Single(t) => Some(t),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => self
                .tz
                .from_local_datetime(&(local + Duration::hours(1)))
                .earliest(),
        };
        resolved.map(|t| t.with_timezone(&Utc))
    }

    /// First fire instant strictly after `now`.
    pub fn next_fire_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.with_timezone(&self.tz).date_naive();
        let mut date = today;
        for _ in 0..3 {
            if let Some(fire) = self.fire_on(date) {
                if fire > now {
                    return fire;
                }
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        now + Duration::days(1)
    }
}

/// Sleeps until each fire instant and awaits `job()`; never returns.
pub async fn run_daily<F, Fut>(schedule: SweepSchedule, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let now = Utc::now();
        let next = schedule.next_fire_after(now);
        let wait = (next - now).to_std().unwrap_or_default();
        info!(
            next = %next.with_timezone(&schedule.tz),
            wait_secs = wait.as_secs(),
            "step: next sweep scheduled"
        );
        tokio::time::sleep(wait).await;
        job().await;
    }
}
