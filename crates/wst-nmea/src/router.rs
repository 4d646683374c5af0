//! Tag-keyed sentence dispatch

use std::collections::HashMap;

use tracing::trace;

use crate::sentence::{parse, Sentence};
use crate::{DecodeError, NmeaError};
use wst_core::ReadingData;

/// Per-tag decoder; handlers own whatever state their sentence type
/// needs (aggregator history, cached pressure, ...).
pub trait SentenceHandler: Send {
    fn handle(&mut self, sentence: &Sentence) -> Result<Option<ReadingData>, DecodeError>;
}

/// Registry dispatching validated sentences to handlers by tag.
///
/// Unknown tags are ignored without error so newer transducer firmware
/// can emit sentence types this collector does not yet understand.
#[derive(Default)]
pub struct SentenceRouter {
    handlers: HashMap<String, Box<dyn SentenceHandler>>,
}

impl SentenceRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tag: impl Into<String>, handler: Box<dyn SentenceHandler>) {
        self.handlers.insert(tag.into(), handler);
    }

    /// Validate one line and dispatch it.
    ///
    /// `Ok(None)` covers non-sentence noise, unknown tags, and
    /// handlers with nothing to publish yet; errors are recoverable
    /// and expected to be logged by the caller.
    pub fn route(&mut self, line: &str) -> Result<Option<ReadingData>, NmeaError> {
        let Some(sentence) = parse(line)? else {
            return Ok(None);
        };

        match self.handlers.get_mut(&sentence.tag) {
            Some(handler) => Ok(handler.handle(&sentence)?),
            None => {
                trace!(tag = %sentence.tag, "no handler for sentence tag");
                Ok(None)
            }
        }
    }

    pub fn tags(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }
}
