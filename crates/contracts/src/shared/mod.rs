pub mod form_settings;
pub mod metadata;
pub mod storage;
