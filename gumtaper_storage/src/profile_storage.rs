use std::{collections::HashMap, str::FromStr};

use async_trait::async_trait;
use gumtaper_models::profile::UserProfile;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::keys::*;

#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("Stored value for {key} is not a valid number: {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// `None` when wake/sleep times were never written.
    async fn read(&self) -> Result<Option<UserProfile>, Self::Error>;
    async fn write(&self, profile: &UserProfile) -> Result<(), Self::Error>;
}

/// Flat string key/value store, laid out the way the onboarding flow writes it.
pub struct InMemoryProfileStore {
    store: RwLock<HashMap<String, String>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        InMemoryProfileStore {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub async fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        self.store.write().await.insert(key.into(), value.into());
    }

    pub async fn remove(&self, key: &str) -> Option<String> {
        self.store.write().await.remove(key)
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.store.read().await.get(key).cloned()
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    type Error = ProfileStoreError;

    async fn read(&self) -> Result<Option<UserProfile>, Self::Error> {
        let store = self.store.read().await;
        let (Some(wake_up_time), Some(sleep_time)) =
            (store.get(WAKE_UP_TIME_KEY), store.get(SLEEP_TIME_KEY))
        else {
            return Ok(None);
        };

        Ok(Some(UserProfile {
            wake_up_time: wake_up_time.clone(),
            sleep_time: sleep_time.clone(),
            quit_start: store.get(QUIT_START_KEY).cloned(),
            cigarettes_per_day: number_or_default(&store, CIGARETTES_PER_DAY_KEY)?,
            cigarette_price: number_or_default(&store, CIGARETTE_PRICE_KEY)?,
            years_of_smoking: number_or_default(&store, YEARS_OF_SMOKING_KEY)?,
            age: number_or_default(&store, AGE_KEY)?,
            gender: store.get(GENDER_KEY).cloned().unwrap_or_default(),
        }))
    }

    async fn write(&self, profile: &UserProfile) -> Result<(), Self::Error> {
        let mut store = self.store.write().await;
        store.insert(WAKE_UP_TIME_KEY.to_owned(), profile.wake_up_time.clone());
        store.insert(SLEEP_TIME_KEY.to_owned(), profile.sleep_time.clone());
        match &profile.quit_start {
            Some(quit_start) => store.insert(QUIT_START_KEY.to_owned(), quit_start.clone()),
            None => store.remove(QUIT_START_KEY),
        };
        store.insert(
            CIGARETTES_PER_DAY_KEY.to_owned(),
            profile.cigarettes_per_day.to_string(),
        );
        store.insert(
            CIGARETTE_PRICE_KEY.to_owned(),
            profile.cigarette_price.to_string(),
        );
        store.insert(
            YEARS_OF_SMOKING_KEY.to_owned(),
            profile.years_of_smoking.to_string(),
        );
        store.insert(AGE_KEY.to_owned(), profile.age.to_string());
        store.insert(GENDER_KEY.to_owned(), profile.gender.clone());

        log::info!("Profile written [quit_start = {:?}]", profile.quit_start);
        Ok(())
    }
}

fn number_or_default<T: FromStr + Default>(
    store: &HashMap<String, String>,
    key: &'static str,
) -> Result<T, ProfileStoreError> {
    match store.get(key) {
        None => Ok(T::default()),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ProfileStoreError::InvalidNumber {
                key,
                value: value.clone(),
            }),
    }
}
