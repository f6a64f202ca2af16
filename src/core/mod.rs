pub mod enrich;
pub mod etl;
pub mod json;
pub mod lookup;
pub mod ranking;
pub mod report;

pub use crate::domain::model::{GeneRecord, Probability, RankingTable, Registry};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::domain::reference::ReferenceLists;
pub use crate::utils::error::Result;
