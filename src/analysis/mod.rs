pub mod elevation;
pub mod outliers;
pub mod paces;
pub mod segments;

pub use elevation::{elevation_summary, interpolate_nan};
pub use outliers::{finite_coords, is_outlier, is_outlier_pairs, OutlierParams};
pub use paces::{appropriate_partition, paces};
pub use segments::fastest_segment;
