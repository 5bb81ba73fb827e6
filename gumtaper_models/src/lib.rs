pub mod profile;
pub mod program;
pub mod reminder;
pub mod settings;
