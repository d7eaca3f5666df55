pub mod error;
pub mod output;
pub mod plot;
pub mod tables;

pub use error::ExportError;
pub use output::OutputArtifacts;
