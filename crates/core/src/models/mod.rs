pub mod analytics;
pub mod date;
pub mod priced_asset;
pub mod settings;
