pub mod column_classifier;
pub mod summarize;
pub mod view_builder;
