use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::NaiveTime;
use gumtaper_models::profile::UserProfile;
use gumtaper_storage::{
    InMemoryProfileStore, ProfileStore, ProfileStoreError, QUIT_START_KEY, SLEEP_TIME_KEY,
};
use tokio::sync::Notify;

use super::test_utils::*;
use crate::*;

struct TestContext {
    alarms: Arc<RecordingAlarmFacility>,
    store: Arc<InMemoryProfileStore>,
    service: ReminderService<InMemoryProfileStore>,
}

impl TestContext {
    fn new() -> Self {
        let alarms = Arc::new(RecordingAlarmFacility::default());
        let store = Arc::new(InMemoryProfileStore::new());
        let service = ReminderService::new(store.clone(), scheduler(&alarms), chrono_tz::UTC);

        Self {
            alarms,
            store,
            service,
        }
    }
}

#[tokio::test]
async fn empty_store_skips_scheduling() {
    let ctx = TestContext::new();

    let outcome = ctx
        .service
        .handle_trigger_at(RescheduleTrigger::AppStart, now())
        .await
        .unwrap();

    assert_eq!(outcome, TriggerOutcome::NoActiveProfile);
    assert!(ctx.alarms.calls().is_empty());
}

#[tokio::test]
async fn profile_without_start_date_skips_scheduling() {
    let ctx = TestContext::new();
    ctx.store.write(&profile("06:00", "22:00", 3)).await.unwrap();
    ctx.store.remove(QUIT_START_KEY).await;

    let outcome = ctx
        .service
        .handle_trigger_at(RescheduleTrigger::BootCompleted, now())
        .await
        .unwrap();

    assert_eq!(outcome, TriggerOutcome::NoActiveProfile);
}

#[tokio::test]
async fn every_trigger_reschedules_from_stored_profile() {
    let ctx = TestContext::new();
    ctx.store.write(&profile("07:00", "23:00", 30)).await.unwrap();

    for trigger in [
        RescheduleTrigger::AppStart,
        RescheduleTrigger::BootCompleted,
        RescheduleTrigger::ProfileSaved,
        RescheduleTrigger::DayRollover,
    ] {
        let outcome = ctx.service.handle_trigger_at(trigger, now()).await.unwrap();

        let TriggerOutcome::Rescheduled(report) = outcome else {
            panic!("Expected reschedule for {trigger:?}");
        };
        assert_eq!(report.week.get(), 5);
        assert_eq!(report.spacing_minutes, 210);
        assert_eq!(ctx.alarms.installed().len(), report.registered.len());
    }
}

#[tokio::test]
async fn corrupt_stored_time_surfaces_as_schedule_error() {
    let ctx = TestContext::new();
    ctx.store.write(&profile("07:00", "23:00", 0)).await.unwrap();
    ctx.store.put(SLEEP_TIME_KEY, "midnight").await;

    let error = ctx
        .service
        .handle_trigger_at(RescheduleTrigger::AppStart, now())
        .await
        .unwrap_err();

    assert_eq!(
        error.downcast_ref::<ScheduleError>(),
        Some(&ScheduleError::InvalidTimeFormat {
            field: ProfileField::SleepTime,
            value: "midnight".to_owned()
        })
    );
    assert!(ctx.alarms.calls().is_empty());
}

#[tokio::test]
async fn saving_profile_persists_and_reschedules() {
    let ctx = TestContext::new();
    let profile = profile("06:00", "02:00", 0);

    let outcome = ctx.service.save_profile(&profile).await.unwrap();

    assert!(matches!(outcome, TriggerOutcome::Rescheduled(_)));
    assert_eq!(ctx.service.load_profile().await.unwrap(), Some(profile));
    assert!(!ctx.alarms.installed().is_empty());
}

/// Holds the first `read` open until `release` is notified.
struct GatedStore {
    inner: InMemoryProfileStore,
    gated: AtomicBool,
    reading: Notify,
    release: Notify,
}

impl GatedStore {
    fn new() -> Self {
        Self {
            inner: InMemoryProfileStore::new(),
            gated: AtomicBool::new(true),
            reading: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl ProfileStore for GatedStore {
    type Error = ProfileStoreError;

    async fn read(&self) -> Result<Option<UserProfile>, Self::Error> {
        let profile = self.inner.read().await;
        if self.gated.swap(false, Ordering::SeqCst) {
            self.reading.notify_one();
            self.release.notified().await;
        }
        profile
    }

    async fn write(&self, profile: &UserProfile) -> Result<(), Self::Error> {
        self.inner.write(profile).await
    }
}

fn installed_times(alarms: &RecordingAlarmFacility) -> Vec<NaiveTime> {
    alarms
        .installed()
        .values()
        .map(|(fires_at, _)| fires_at.naive_local().time())
        .collect()
}

#[tokio::test]
async fn stalled_trigger_does_not_overwrite_newer_saved_profile() {
    let alarms = Arc::new(RecordingAlarmFacility::default());
    let store = Arc::new(GatedStore::new());
    store.write(&profile("06:00", "23:00", 60)).await.unwrap();
    let service = Arc::new(ReminderService::new(
        store.clone(),
        scheduler(&alarms),
        chrono_tz::UTC,
    ));

    let stale_trigger = tokio::spawn({
        let service = Arc::clone(&service);
        async move {
            service
                .handle_trigger_at(RescheduleTrigger::BootCompleted, now())
                .await
        }
    });
    store.reading.notified().await;

    let save = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.save_profile(&profile("09:00", "21:00", 60)).await }
    });
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    store.release.notify_one();

    stale_trigger.await.unwrap().unwrap();
    save.await.unwrap().unwrap();

    let hour = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
    assert_eq!(
        installed_times(&alarms),
        vec![hour(9), hour(13), hour(17), hour(21)]
    );
    assert_eq!(
        service.load_profile().await.unwrap().unwrap().wake_up_time,
        "09:00"
    );
}
