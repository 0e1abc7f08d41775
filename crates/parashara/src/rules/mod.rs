pub mod dignity;
pub mod geometry;
pub mod lordship;

pub use dignity::{Dignity, DignityEvaluator, Relationship};
pub use lordship::{house_lord, sign_ruler, HouseLordMap};
