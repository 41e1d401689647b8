pub mod data;
pub mod record;
pub mod settings;
