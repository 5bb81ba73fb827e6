use config::{Config, ConfigError, Environment, File};
use gumtaper_models::settings::Settings;

pub fn load() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("appsettings").required(true))
        .add_source(File::with_name("appsettings.local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    settings.try_deserialize()
}
