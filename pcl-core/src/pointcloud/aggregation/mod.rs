pub mod csc;
pub mod summary;

pub use csc::CscVariables;
pub use summary::{
    ColumnSummary, MeanLeafHeightAggregator, SummaryRow, TransectAggregator, TransectSummary,
};
