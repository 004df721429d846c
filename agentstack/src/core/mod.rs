//! Core domain model types for the agent stack.
//!
//! This module contains the values that flow through a pipeline run:
//! - Stage kinds used for labeling logs and metrics
//! - The request and response envelopes
//! - The intermediate record produced by the parser

mod kind;
mod record;
mod request;

pub use kind::StageKind;
pub use record::{ParsedRecord, ParserMetadata, PARSER_VERSION};
pub use request::{ProcessingRequest, ProcessingResponse};
