pub mod aggregation;
pub mod point;
pub mod transect;
