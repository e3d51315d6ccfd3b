pub mod geometry;
pub mod money;

pub use geometry::BoundingBox;
pub use money::{Money, MoneyError};
