pub mod distance;
pub mod volume;
