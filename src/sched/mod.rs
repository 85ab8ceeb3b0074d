//! Reminder scheduling - per-user daily triggers and the clock loop
//!
//! The job table is a pure projection of users + settings: it is rebuilt
//! from the database at startup and can be recomputed at any time. Fires
//! missed while the process was down are skipped on purpose - a breakfast
//! reminder delivered at noon is worse than none.

pub mod dispatch;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Local, Timelike};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::content::TimeOfDay;
use crate::db::{User, UserSettings};
use crate::sleep::parse_hhmm;

pub use dispatch::{Dispatcher, Notify};

/// Evening sleep reminder fires one hour before bedtime.
pub const SLEEP_EVENING_OFFSET_MIN: i32 = -60;
/// Morning sleep check-in fires five minutes after wake time.
pub const SLEEP_MORNING_OFFSET_MIN: i32 = 5;

/// One recurring daily reminder per (user, kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Workout,
    SleepEvening,
    SleepMorning,
    Breakfast,
    Lunch,
    Dinner,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Workout => "workout",
            JobKind::SleepEvening => "sleep_evening",
            JobKind::SleepMorning => "sleep_morning",
            JobKind::Breakfast => "breakfast",
            JobKind::Lunch => "lunch",
            JobKind::Dinner => "dinner",
        }
    }

}

/// Fixed hour for the workout reminder by preferred slot.
pub fn workout_hour(pref: TimeOfDay) -> u32 {
    match pref {
        TimeOfDay::Morning => 8,
        TimeOfDay::Day => 13,
        TimeOfDay::Evening => 19,
    }
}

/// Convert a "HH:MM" base time plus a minute offset into the (hour, minute)
/// of a daily trigger, wrapping across midnight in both directions.
/// `None` only for malformed input, which validation upstream prevents.
pub fn compute_trigger(base_time: &str, offset_minutes: i32) -> Option<(u32, u32)> {
    let (hour, minute) = parse_hhmm(base_time)?;
    let total = (hour * 60 + minute) as i32 + offset_minutes;
    let total = total.rem_euclid(24 * 60) as u32;
    Some((total / 60, total % 60))
}

/// In-memory table of active daily triggers plus the background clock
/// that fires them. All mutation goes through one lock, so an insert or
/// replace is atomic with respect to the firing check.
pub struct Registry<N: Notify> {
    jobs: Mutex<HashMap<(i64, JobKind), (u32, u32)>>,
    dispatcher: Dispatcher<N>,
    runner: tokio::sync::Mutex<Option<(watch::Sender<bool>, JoinHandle<()>)>>,
}

impl<N: Notify> Registry<N> {
    pub fn new(dispatcher: Dispatcher<N>) -> Arc<Self> {
        Arc::new(Self {
            jobs: Mutex::new(HashMap::new()),
            dispatcher,
            runner: tokio::sync::Mutex::new(None),
        })
    }

    /// Create or replace the job for (user, kind). At most one job exists
    /// per key, so re-registering never produces duplicate fires.
    pub fn register(&self, tg_id: i64, kind: JobKind, hour: u32, minute: u32) {
        let mut jobs = self.jobs.lock().expect("job table lock poisoned");
        jobs.insert((tg_id, kind), (hour, minute));
        info!(
            "scheduled {} for user={} at {:02}:{:02}",
            kind.as_str(),
            tg_id,
            hour,
            minute
        );
    }

    /// Remove the job if present; absent keys are a no-op.
    pub fn cancel(&self, tg_id: i64, kind: JobKind) {
        let mut jobs = self.jobs.lock().expect("job table lock poisoned");
        if jobs.remove(&(tg_id, kind)).is_some() {
            info!("cancelled {} for user={}", kind.as_str(), tg_id);
        }
    }

    /// Drop every job of one user (user reset or reminders switched off).
    pub fn cancel_all(&self, tg_id: i64) {
        let mut jobs = self.jobs.lock().expect("job table lock poisoned");
        jobs.retain(|(user, _), _| *user != tg_id);
    }

    pub fn job(&self, tg_id: i64, kind: JobKind) -> Option<(u32, u32)> {
        let jobs = self.jobs.lock().expect("job table lock poisoned");
        jobs.get(&(tg_id, kind)).copied()
    }

    pub fn job_count(&self) -> usize {
        self.jobs.lock().expect("job table lock poisoned").len()
    }

    /// Jobs due at a wall-clock minute. Pure lookup, used by the clock loop.
    pub fn due_at(&self, hour: u32, minute: u32) -> Vec<(i64, JobKind)> {
        let jobs = self.jobs.lock().expect("job table lock poisoned");
        jobs.iter()
            .filter(|(_, time)| **time == (hour, minute))
            .map(|(key, _)| *key)
            .collect()
    }

    /// Recompute every job of one user from the current profile/settings.
    /// Kinds without a configured time are cancelled, the rest replaced.
    pub fn schedule_user(&self, user: &User, settings: Option<&UserSettings>) {
        if !user.reminders_enabled {
            self.cancel_all(user.tg_id);
            return;
        }

        match user.workout_pref {
            Some(pref) => self.register(user.tg_id, JobKind::Workout, workout_hour(pref), 0),
            None => self.cancel(user.tg_id, JobKind::Workout),
        }

        let times = [
            (
                JobKind::SleepEvening,
                settings.and_then(|s| s.sleep_time.as_deref()),
                SLEEP_EVENING_OFFSET_MIN,
            ),
            (
                JobKind::SleepMorning,
                settings.and_then(|s| s.wake_time.as_deref()),
                SLEEP_MORNING_OFFSET_MIN,
            ),
            (
                JobKind::Breakfast,
                settings.and_then(|s| s.breakfast_time.as_deref()),
                0,
            ),
            (
                JobKind::Lunch,
                settings.and_then(|s| s.lunch_time.as_deref()),
                0,
            ),
            (
                JobKind::Dinner,
                settings.and_then(|s| s.dinner_time.as_deref()),
                0,
            ),
        ];
        for (kind, base, offset) in times {
            match base.and_then(|b| compute_trigger(b, offset)) {
                Some((hour, minute)) => self.register(user.tg_id, kind, hour, minute),
                None => {
                    if base.is_some() {
                        warn!(
                            "unparseable {} time for user={}, job dropped",
                            kind.as_str(),
                            user.tg_id
                        );
                    }
                    self.cancel(user.tg_id, kind);
                }
            }
        }
    }

    /// Rebuild the whole table from the database. Called once at startup.
    pub async fn reload(&self) -> anyhow::Result<()> {
        let db = self.dispatcher.db();
        let db = db.lock().await;
        let users = db.all_users()?;
        let mut settings: HashMap<i64, UserSettings> = db
            .all_settings()?
            .into_iter()
            .map(|s| (s.tg_id, s))
            .collect();
        drop(db);

        self.jobs.lock().expect("job table lock poisoned").clear();
        for user in &users {
            self.schedule_user(user, settings.remove(&user.tg_id).as_ref());
        }
        info!("reminder registry rebuilt: {} jobs", self.job_count());
        Ok(())
    }

    /// Start the background clock. Idempotent - a second call is a no-op.
    pub async fn start(self: &Arc<Self>) {
        let mut runner = self.runner.lock().await;
        if runner.is_some() {
            return;
        }
        let (tx, rx) = watch::channel(false);
        let registry = Arc::clone(self);
        let handle = tokio::spawn(async move { registry.run_clock(rx).await });
        *runner = Some((tx, handle));
        info!("reminder clock started");
    }

    /// Stop the clock. After this returns no further fires happen; a
    /// dispatch already in flight completes first.
    pub async fn stop(&self) {
        let taken = self.runner.lock().await.take();
        if let Some((tx, handle)) = taken {
            let _ = tx.send(true);
            let _ = handle.await;
            info!("reminder clock stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.runner.lock().await.is_some()
    }

    async fn run_clock(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = tokio::time::sleep(until_next_minute()) => {
                    let now = Local::now();
                    for (tg_id, kind) in self.due_at(now.hour(), now.minute()) {
                        self.dispatcher.dispatch(tg_id, kind).await;
                    }
                }
                _ = shutdown.changed() => break,
            }
        }
    }
}

/// Time left until the next minute boundary of the local clock.
fn until_next_minute() -> Duration {
    let now = Local::now();
    let into_minute = now.second() as u64 * 1000 + now.timestamp_subsec_millis() as u64;
    let remaining = 60_000u64.saturating_sub(into_minute);
    Duration::from_millis(if remaining == 0 { 60_000 } else { remaining })
}

#[cfg(test)]
mod tests {
    use super::dispatch::tests::{MockNotifier, mock_dispatcher};
    use super::*;
    use crate::content::Budget;
    use crate::i18n::Lang;
    use chrono::Utc;

    fn test_registry() -> Arc<Registry<MockNotifier>> {
        Registry::new(mock_dispatcher().0)
    }

    fn test_user(tg_id: i64) -> User {
        User {
            id: 1,
            tg_id,
            name: Some("Азиз".to_string()),
            language: Lang::Ru,
            age: Some(17),
            height: Some(180),
            weight: Some(70),
            budget: Some(Budget::Mid),
            workout_pref: Some(TimeOfDay::Morning),
            reminders_enabled: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_compute_trigger_identity_at_zero_offset() {
        assert_eq!(compute_trigger("08:30", 0), Some((8, 30)));
        assert_eq!(compute_trigger("00:00", 0), Some((0, 0)));
        assert_eq!(compute_trigger("23:59", 0), Some((23, 59)));
    }

    #[test]
    fn test_compute_trigger_wraps_backward() {
        assert_eq!(compute_trigger("00:30", -60), Some((23, 30)));
        assert_eq!(compute_trigger("00:00", -1), Some((23, 59)));
    }

    #[test]
    fn test_compute_trigger_wraps_forward() {
        assert_eq!(compute_trigger("23:58", 5), Some((0, 3)));
        assert_eq!(compute_trigger("23:00", 120), Some((1, 0)));
    }

    #[test]
    fn test_compute_trigger_full_day_offsets_are_identity() {
        assert_eq!(compute_trigger("13:45", 1440), Some((13, 45)));
        assert_eq!(compute_trigger("13:45", -1440), Some((13, 45)));
    }

    #[test]
    fn test_compute_trigger_range_over_offset_sweep() {
        for offset in -1440..=1440 {
            let (hour, minute) = compute_trigger("21:17", offset).unwrap();
            assert!(hour <= 23, "hour out of range for offset {}", offset);
            assert!(minute <= 59, "minute out of range for offset {}", offset);
        }
    }

    #[test]
    fn test_compute_trigger_rejects_malformed_input() {
        assert_eq!(compute_trigger("25:00", 0), None);
        assert_eq!(compute_trigger("banana", 0), None);
    }

    #[test]
    fn test_register_replaces_existing_job() {
        let registry = test_registry();
        registry.register(100, JobKind::Breakfast, 8, 0);
        registry.register(100, JobKind::Breakfast, 9, 30);

        assert_eq!(registry.job_count(), 1);
        assert_eq!(registry.job(100, JobKind::Breakfast), Some((9, 30)));
        assert!(registry.due_at(8, 0).is_empty());
        assert_eq!(registry.due_at(9, 30), vec![(100, JobKind::Breakfast)]);
    }

    #[test]
    fn test_no_duplicate_fires_over_simulated_days() {
        let registry = test_registry();
        registry.register(100, JobKind::Breakfast, 8, 0);
        registry.register(100, JobKind::Breakfast, 9, 30);
        registry.register(200, JobKind::Dinner, 19, 45);

        // one simulated day, minute by minute
        let mut fires = 0;
        for hour in 0..24 {
            for minute in 0..60 {
                fires += registry.due_at(hour, minute).len();
            }
        }
        assert_eq!(fires, 2);
    }

    #[test]
    fn test_cancel_unknown_job_is_noop() {
        let registry = test_registry();
        registry.cancel(100, JobKind::Lunch);
        assert_eq!(registry.job_count(), 0);
    }

    #[test]
    fn test_cancel_all_clears_only_that_user() {
        let registry = test_registry();
        registry.register(100, JobKind::Breakfast, 8, 0);
        registry.register(100, JobKind::Workout, 19, 0);
        registry.register(200, JobKind::Breakfast, 8, 0);

        registry.cancel_all(100);
        assert_eq!(registry.job_count(), 1);
        assert_eq!(registry.job(200, JobKind::Breakfast), Some((8, 0)));
    }

    #[test]
    fn test_schedule_user_derives_all_kinds() {
        let registry = test_registry();
        let user = test_user(100);
        let settings = UserSettings {
            tg_id: 100,
            sleep_time: Some("23:00".to_string()),
            wake_time: Some("06:55".to_string()),
            breakfast_time: Some("08:30".to_string()),
            lunch_time: None,
            dinner_time: Some("19:00".to_string()),
        };
        registry.schedule_user(&user, Some(&settings));

        assert_eq!(registry.job(100, JobKind::Workout), Some((8, 0)));
        assert_eq!(registry.job(100, JobKind::SleepEvening), Some((22, 0)));
        assert_eq!(registry.job(100, JobKind::SleepMorning), Some((7, 0)));
        assert_eq!(registry.job(100, JobKind::Breakfast), Some((8, 30)));
        assert_eq!(registry.job(100, JobKind::Lunch), None);
        assert_eq!(registry.job(100, JobKind::Dinner), Some((19, 0)));
    }

    #[test]
    fn test_schedule_user_disabled_cancels_everything() {
        let registry = test_registry();
        let mut user = test_user(100);
        registry.schedule_user(&user, None);
        assert!(registry.job_count() > 0);

        user.reminders_enabled = false;
        registry.schedule_user(&user, None);
        assert_eq!(registry.job_count(), 0);
    }

    #[tokio::test]
    async fn test_start_is_idempotent_and_stop_halts() {
        let registry = test_registry();
        registry.start().await;
        registry.start().await;
        assert!(registry.is_running().await);

        registry.stop().await;
        assert!(!registry.is_running().await);
        // stopping again is a no-op
        registry.stop().await;
    }

    #[tokio::test]
    async fn test_reload_rebuilds_projection_from_db() {
        let (dispatcher, _notifier) = mock_dispatcher();
        let db = dispatcher.db();
        {
            let db = db.lock().await;
            db.ensure_user(100).unwrap();
            db.set_workout_pref(100, TimeOfDay::Evening).unwrap();
            db.set_time(100, crate::db::TimeField::Sleep, "23:30").unwrap();
        }
        let registry = Registry::new(dispatcher);
        // stale job for a user that no longer exists
        registry.register(999, JobKind::Lunch, 13, 0);

        registry.reload().await.unwrap();
        assert_eq!(registry.job(100, JobKind::Workout), Some((19, 0)));
        assert_eq!(registry.job(100, JobKind::SleepEvening), Some((22, 30)));
        assert_eq!(registry.job(999, JobKind::Lunch), None);
    }
}
