//! Chunked depth-first traversal collecting the values of one field
//!
//! The walk keeps an explicit stack of frames instead of recursing, so it can
//! stop after any array batch and pick up where it left off. Each call to
//! [`Traverser::resume`] runs until the next batch boundary (a suspension
//! point) or until the document is exhausted.
//!
//! Only array batches suspend. A very wide object, or deep nesting without
//! arrays, runs to the end without yielding.

use crate::error::{ExtractError, ExtractErrorKind, ExtractResult};
use crate::extraction::config::RunConfig;
use crate::extraction::progress::{CancellationToken, ProgressSink};
use crate::extraction::table::FrequencyTable;
use serde_json::{map, Value};

/// Where traversal stopped after a completed array batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchBoundary {
    /// Elements of the current array processed so far
    pub consumed: usize,
    /// Length of the current array
    pub len: usize,
    /// Percentage of the array consumed, for arrays with no array ancestor
    pub progress: Option<f64>,
}

/// Result of running the traverser up to its next stopping point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Yielded(BatchBoundary),
    Complete,
}

/// Counters describing one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    pub nodes_visited: u64,
    pub matches: u64,
    pub batches: u64,
}

enum Frame<'a> {
    Object {
        entries: map::Iter<'a>,
        depth: usize,
        within_array: bool,
    },
    Array {
        items: &'a [Value],
        cursor: usize,
        batch_end: usize,
        depth: usize,
        tracked: bool,
    },
}

/// Resumable walk over one document
pub struct Traverser<'a> {
    field_name: String,
    batch_size: usize,
    max_depth: Option<usize>,
    cancel: CancellationToken,
    stack: Vec<Frame<'a>>,
    table: FrequencyTable<'a>,
    summary: TraversalSummary,
}

impl<'a> Traverser<'a> {
    pub fn new(document: &'a Value, field_name: &str, config: &RunConfig) -> Self {
        let mut traverser = Self {
            field_name: field_name.to_string(),
            batch_size: config.batch_size.max(1),
            max_depth: config.max_depth,
            cancel: CancellationToken::new(),
            stack: Vec::new(),
            table: FrequencyTable::new(config.keying),
            summary: TraversalSummary::default(),
        };
        traverser.push(document, 0, false);
        traverser
    }

    /// Check `token` at every suspension point
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Run until the next batch boundary or the end of the document.
    ///
    /// Fails with a `Cancelled` error, discarding everything collected so far,
    /// if cancellation was requested while suspended.
    pub fn resume(&mut self) -> ExtractResult<Step> {
        if self.cancel.is_cancelled() {
            log::debug!("traversal of '{}' cancelled", self.field_name);
            self.abandon();
            return Err(ExtractError::cancelled());
        }

        while let Some(frame) = self.stack.last_mut() {
            match frame {
                Frame::Object {
                    entries,
                    depth,
                    within_array,
                } => {
                    let (depth, within_array) = (*depth, *within_array);
                    match entries.next() {
                        Some((key, value)) => {
                            if *key == self.field_name {
                                self.table.record(value);
                                self.summary.matches += 1;
                            }
                            self.enter(value, depth + 1, within_array)?;
                        }
                        None => {
                            self.stack.pop();
                        }
                    }
                }
                Frame::Array {
                    items,
                    cursor,
                    batch_end,
                    depth,
                    tracked,
                } => {
                    let items: &'a [Value] = *items;
                    if *cursor < *batch_end {
                        let item = &items[*cursor];
                        *cursor += 1;
                        let depth = *depth;
                        self.enter(item, depth + 1, true)?;
                        continue;
                    }

                    let consumed = *cursor;
                    let tracked = *tracked;
                    let len = items.len();
                    if consumed < len {
                        *batch_end = (consumed + self.batch_size).min(len);
                    } else {
                        self.stack.pop();
                        if len == 0 {
                            continue;
                        }
                    }

                    self.summary.batches += 1;
                    let progress = tracked.then(|| consumed as f64 * 100.0 / len as f64);
                    log::trace!("batch boundary at {}/{} elements", consumed, len);
                    return Ok(Step::Yielded(BatchBoundary {
                        consumed,
                        len,
                        progress,
                    }));
                }
            }
        }

        Ok(Step::Complete)
    }

    /// Drive the traversal to the end, forwarding progress to `progress`
    pub fn run_to_completion(
        mut self,
        progress: &mut dyn ProgressSink,
    ) -> ExtractResult<FrequencyTable<'a>> {
        loop {
            match self.resume()? {
                Step::Yielded(boundary) => {
                    if let Some(percent) = boundary.progress {
                        progress.report(percent);
                    }
                }
                Step::Complete => return Ok(self.finish()),
            }
        }
    }

    pub fn summary(&self) -> TraversalSummary {
        self.summary
    }

    /// Whether the document has been fully walked
    pub fn is_complete(&self) -> bool {
        self.stack.is_empty()
    }

    /// Take the collected table
    pub fn finish(self) -> FrequencyTable<'a> {
        self.table
    }

    /// Take the collected table together with the traversal counters
    pub fn into_parts(self) -> (FrequencyTable<'a>, TraversalSummary) {
        (self.table, self.summary)
    }

    fn enter(&mut self, value: &'a Value, depth: usize, within_array: bool) -> ExtractResult<()> {
        if let Some(limit) = self.max_depth {
            if depth > limit && (value.is_object() || value.is_array()) {
                self.abandon();
                return Err(ExtractError::extraction(
                    ExtractErrorKind::DepthLimitExceeded { depth, limit },
                ));
            }
        }
        self.push(value, depth, within_array);
        Ok(())
    }

    fn push(&mut self, value: &'a Value, depth: usize, within_array: bool) {
        self.summary.nodes_visited += 1;
        match value {
            Value::Object(map) => self.stack.push(Frame::Object {
                entries: map.iter(),
                depth,
                within_array,
            }),
            Value::Array(items) => self.stack.push(Frame::Array {
                items,
                cursor: 0,
                batch_end: self.batch_size.min(items.len()),
                depth,
                tracked: !within_array,
            }),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }

    fn abandon(&mut self) {
        self.stack.clear();
        self.table = FrequencyTable::new(self.table.keying());
    }
}
