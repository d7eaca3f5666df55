pub mod parsers;

pub use parsers::{load, ParseError, PointSource, SourceData};
