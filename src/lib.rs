pub mod analysis;
pub mod config;
pub mod db;
pub mod models;
pub mod service;

pub use config::Config;
pub use db::Database;
pub use models::{Activity, PersonalBest, Record, Sport, TrackSeries};
pub use service::Service;
