pub mod confidence;
pub mod geometry;
pub mod group_classifier;
pub mod keywords;
pub mod model;
