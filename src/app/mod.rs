pub mod pipelines;
pub mod outcome;
