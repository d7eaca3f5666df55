pub mod pipeline;

pub use pipeline::{process_tls, PipelineError, ProcessOptions, TlsOutput};
