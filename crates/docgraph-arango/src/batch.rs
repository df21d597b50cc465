// Dweve DocGraph - Document/Graph Mapping Adapters
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-collection write buffering.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::error::Result;
use crate::store::{BulkInsertResult, DocumentSink, InsertOptions, StoreError};
use docgraph_core::Document;

/// How a full buffer is submitted.
#[derive(Debug, Clone, Default)]
pub enum FlushMode {
    /// Wait for each bulk insert; failures propagate, including batches the
    /// store accepted with rejected documents.
    #[default]
    Sync,
    /// Hand each bulk insert to a blocking task on this runtime and move on.
    /// Failures are logged, not returned.
    Async(Handle),
}

/// Buffers documents per collection and submits them in batches.
///
/// With a batch size, a collection's buffer is submitted as soon as it holds
/// that many documents; without one, only explicit flushes submit. Buffers of
/// different collections never mix.
pub struct BatchFlusher<S> {
    sink: Arc<S>,
    batch_size: Option<usize>,
    mode: FlushMode,
    options: Arc<InsertOptions>,
    pending: BTreeMap<String, Vec<Document>>,
    buffered: BTreeMap<String, usize>,
    batches: usize,
    report: BulkInsertResult,
}

impl<S> BatchFlusher<S>
where
    S: DocumentSink + Send + Sync + 'static,
{
    /// Create a flusher. A batch size of zero means unbounded.
    pub fn new(sink: Arc<S>, batch_size: Option<usize>, options: InsertOptions) -> Self {
        Self {
            sink,
            batch_size: batch_size.filter(|size| *size > 0),
            mode: FlushMode::Sync,
            options: Arc::new(options),
            pending: BTreeMap::new(),
            buffered: BTreeMap::new(),
            batches: 0,
            report: BulkInsertResult::default(),
        }
    }

    /// Set the submission mode.
    pub fn with_mode(mut self, mode: FlushMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether batches are submitted without waiting.
    pub fn is_async(&self) -> bool {
        matches!(self.mode, FlushMode::Async(_))
    }

    /// Buffer a document, flushing its collection if the buffer is full.
    pub fn push(&mut self, collection: &str, document: Document) -> Result<()> {
        let buffer = self.pending.entry(collection.to_string()).or_default();
        buffer.push(document);
        let full = self.batch_size.is_some_and(|size| buffer.len() >= size);

        *self.buffered.entry(collection.to_string()).or_insert(0) += 1;
        if full {
            self.flush(collection)?;
        }
        Ok(())
    }

    /// Submit one collection's buffer. Empty buffers are not submitted.
    pub fn flush(&mut self, collection: &str) -> Result<()> {
        let documents = match self.pending.get_mut(collection) {
            Some(buffer) if !buffer.is_empty() => std::mem::take(buffer),
            _ => return Ok(()),
        };
        self.batches += 1;
        self.submit(collection.to_string(), documents)
    }

    /// Submit every non-empty buffer.
    pub fn flush_all(&mut self) -> Result<()> {
        let collections: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, buffer)| !buffer.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        for collection in collections {
            self.flush(&collection)?;
        }
        Ok(())
    }

    fn submit(&mut self, collection: String, documents: Vec<Document>) -> Result<()> {
        let count = documents.len();
        match &self.mode {
            FlushMode::Sync => {
                let result = self.sink.bulk_insert(&collection, documents, &self.options)?;
                debug!(
                    "flushed {} documents into '{}' ({} created, {} updated, {} errors)",
                    count, collection, result.created, result.updated, result.errors
                );
                self.report.merge(&result);
                if result.errors > 0 {
                    return Err(StoreError::InsertRejected {
                        collection,
                        reason: format!("{} of {} documents rejected", result.errors, count),
                    }
                    .into());
                }
            }
            FlushMode::Async(handle) => {
                let sink = Arc::clone(&self.sink);
                let options = Arc::clone(&self.options);
                debug!("submitting {} documents into '{}'", count, collection);
                // Detached: the join handle is dropped on purpose.
                drop(handle.spawn_blocking(move || {
                    match sink.bulk_insert(&collection, documents, &options) {
                        Ok(result) if result.errors > 0 => warn!(
                            "asynchronous flush into '{}' rejected {} of {} documents",
                            collection, result.errors, count
                        ),
                        Ok(_) => {}
                        Err(e) => warn!("asynchronous flush into '{}' failed: {}", collection, e),
                    }
                }));
            }
        }
        Ok(())
    }

    /// Documents currently buffered for a collection.
    pub fn pending(&self, collection: &str) -> usize {
        self.pending.get(collection).map_or(0, Vec::len)
    }

    /// Documents buffered so far per collection, flushed or not.
    pub fn buffered(&self) -> &BTreeMap<String, usize> {
        &self.buffered
    }

    /// Batches submitted so far.
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Store outcomes of the synchronous batches submitted so far.
    ///
    /// Asynchronous batches are never observed, so they are not counted.
    pub fn report(&self) -> &BulkInsertResult {
        &self.report
    }

    /// Consume the flusher, returning the per-collection totals, the batch
    /// count and the store report.
    pub fn into_counts(self) -> (BTreeMap<String, usize>, usize, BulkInsertResult) {
        (self.buffered, self.batches, self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocumentSource, MemoryStore};

    fn store() -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        store.create_collection("a", false).unwrap();
        store.create_collection("b", false).unwrap();
        Arc::new(store)
    }

    fn doc(key: usize) -> Document {
        Document::new().with("_key", key.to_string())
    }

    #[test]
    fn test_flushes_when_full() {
        let store = store();
        let mut flusher = BatchFlusher::new(Arc::clone(&store), Some(2), InsertOptions::default());
        flusher.push("a", doc(1)).unwrap();
        assert_eq!(flusher.pending("a"), 1);
        assert_eq!(store.count("a").unwrap(), 0);

        flusher.push("a", doc(2)).unwrap();
        assert_eq!(flusher.pending("a"), 0);
        assert_eq!(store.count("a").unwrap(), 2);
        assert_eq!(flusher.batches(), 1);
    }

    #[test]
    fn test_collections_do_not_mix() {
        let store = store();
        let mut flusher = BatchFlusher::new(Arc::clone(&store), Some(2), InsertOptions::default());
        flusher.push("a", doc(1)).unwrap();
        flusher.push("b", doc(2)).unwrap();
        assert_eq!(flusher.batches(), 0);
        flusher.push("b", doc(3)).unwrap();
        assert_eq!(store.count("b").unwrap(), 2);
        assert_eq!(store.count("a").unwrap(), 0);

        flusher.flush_all().unwrap();
        assert_eq!(store.count("a").unwrap(), 1);
        assert_eq!(flusher.batches(), 2);
        assert_eq!(flusher.buffered()["b"], 2);
    }

    #[test]
    fn test_unbounded_waits_for_flush() {
        let store = store();
        let mut flusher = BatchFlusher::new(Arc::clone(&store), None, InsertOptions::default());
        for key in 0..100 {
            flusher.push("a", doc(key)).unwrap();
        }
        assert_eq!(store.count("a").unwrap(), 0);
        flusher.flush_all().unwrap();
        assert_eq!(store.count("a").unwrap(), 100);
        assert_eq!(store.bulk_insert_count(), 1);
    }

    #[test]
    fn test_zero_batch_size_is_unbounded() {
        let store = store();
        let mut flusher = BatchFlusher::new(Arc::clone(&store), Some(0), InsertOptions::default());
        flusher.push("a", doc(1)).unwrap();
        assert_eq!(flusher.pending("a"), 1);
    }

    #[test]
    fn test_empty_flush_is_noop() {
        let store = store();
        let mut flusher = BatchFlusher::new(Arc::clone(&store), Some(3), InsertOptions::default());
        flusher.flush("a").unwrap();
        flusher.flush_all().unwrap();
        assert_eq!(flusher.batches(), 0);
        assert_eq!(store.bulk_insert_count(), 0);
    }

    #[test]
    fn test_sync_failure_propagates() {
        let store = store();
        let mut flusher = BatchFlusher::new(Arc::clone(&store), Some(1), InsertOptions::default());
        assert!(flusher.push("missing", doc(1)).is_err());
    }

    #[test]
    fn test_sync_rejected_documents_propagate() {
        let store = store();
        let mut flusher = BatchFlusher::new(Arc::clone(&store), None, InsertOptions::default());
        flusher.push("a", doc(1)).unwrap();
        flusher
            .push("a", Document::new().with("_key", "bad key"))
            .unwrap();

        let err = flusher.flush_all().unwrap_err();
        assert!(err.to_string().contains("1 of 2 documents rejected"));
        assert_eq!(flusher.report().created, 1);
        assert_eq!(flusher.report().errors, 1);
    }

    #[test]
    fn test_report_accumulates_batches() {
        let store = store();
        let mut flusher = BatchFlusher::new(Arc::clone(&store), Some(2), InsertOptions::default());
        for key in 0..3 {
            flusher.push("a", doc(key)).unwrap();
        }
        flusher.push("a", doc(0)).unwrap();
        flusher.flush_all().unwrap();

        let (buffered, batches, report) = flusher.into_counts();
        assert_eq!(buffered["a"], 4);
        assert_eq!(batches, 2);
        assert_eq!(report.created, 3);
        assert_eq!(report.updated, 1);
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn test_async_failure_is_swallowed() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .build()
            .unwrap();
        let store = store();
        let mut flusher = BatchFlusher::new(Arc::clone(&store), Some(1), InsertOptions::default())
            .with_mode(FlushMode::Async(runtime.handle().clone()));
        assert!(flusher.is_async());
        assert!(flusher.push("missing", doc(1)).is_ok());
        flusher.push("a", doc(2)).unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while store.count("a").unwrap() < 1 && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(store.count("a").unwrap(), 1);
        assert!(!store.has_collection("missing"));
    }
}
