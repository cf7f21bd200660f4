mod aabb;
mod color;
mod ray;

pub use aabb::AABB;
pub use color::{Color, ColorParseError};
pub use ray::{intersect_aabb, Ray};
