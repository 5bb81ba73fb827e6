mod keys;
mod profile_storage;

pub use keys::*;
pub use profile_storage::{InMemoryProfileStore, ProfileStore, ProfileStoreError};
