pub mod activity;
pub mod record;

pub use activity::{Activity, Sport, TrackSeries};
pub use record::{PersonalBest, Record};
