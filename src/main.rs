mod appsettings;
mod delivery;

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use delivery::LogDeliveryChannel;
use gumtaper_scheduler::{
    ProgramProgress, ReminderScheduler, ReminderService, RescheduleTrigger, SchedulerConfig,
    TokioAlarmFacility, TriggerOutcome, duration_until_next_midnight,
};
use gumtaper_storage::{InMemoryProfileStore, ProfileStore};

const ROLLOVER_RETRY: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting gum taper reminders");

    let settings = appsettings::load().context("Could not load appsettings")?;

    let store = Arc::new(InMemoryProfileStore::new());
    if let Some(profile) = &settings.profile {
        store.write(profile).await?;
    }

    let alarms = Arc::new(TokioAlarmFacility::new(Arc::new(LogDeliveryChannel)));
    let scheduler = ReminderScheduler::new(alarms, SchedulerConfig::from(&settings.scheduler));
    let service = ReminderService::new(store, scheduler, settings.device.timezone);

    run_trigger(&service, RescheduleTrigger::AppStart).await;
    log_progress(&service).await;

    loop {
        let wait = duration_until_next_midnight(&service.now()).unwrap_or(ROLLOVER_RETRY);
        log::debug!("Next day rollover in {wait:?}");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down");
                break;
            }
            _ = tokio::time::sleep(wait) => {
                run_trigger(&service, RescheduleTrigger::DayRollover).await;
                log_progress(&service).await;
            }
        }
    }

    Ok(())
}

async fn run_trigger(service: &ReminderService<InMemoryProfileStore>, trigger: RescheduleTrigger) {
    match service.handle_trigger(trigger).await {
        Ok(TriggerOutcome::Rescheduled(report)) => {
            for failure in &report.failures {
                log::warn!("{failure}");
            }
            if let Some(next) = report.registered.iter().map(|r| r.fires_at).min() {
                log::info!("Next reminder at {next}");
            }
        }
        Ok(TriggerOutcome::NoActiveProfile) => {
            log::warn!("No profile configured. Fill in the [profile] section of appsettings.");
        }
        Err(error) => {
            log::error!("Could not reschedule reminders. [trigger = {trigger:?}, error = {error:#}]");
        }
    }
}

async fn log_progress(service: &ReminderService<InMemoryProfileStore>) {
    let profile = match service.load_profile().await {
        Ok(Some(profile)) => profile,
        Ok(None) => return,
        Err(error) => {
            log::warn!("Could not read profile: {error:#}");
            return;
        }
    };

    match ProgramProgress::compute(&profile, service.now().naive_local()) {
        Ok(progress) => {
            let reminders: Vec<_> = progress
                .todays_reminders(&profile)
                .iter()
                .map(|time| time.format("%H:%M").to_string())
                .collect();
            log::info!(
                "Day {} of week {} [saved = {:.2}, daily_savings = {:.2}, reminders = {}]",
                progress.day_of_week,
                progress.week,
                progress.total_savings,
                progress.daily_savings,
                reminders.join(", ")
            );
            for milestone in progress.milestones {
                log::info!("• {milestone}");
            }
        }
        Err(error) => log::warn!("Could not compute progress: {error}"),
    }
}
