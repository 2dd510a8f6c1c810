pub mod aggregations;
pub mod health;
pub mod navigation;
