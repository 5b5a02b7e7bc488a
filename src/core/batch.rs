//! Bounded batch processing
//!
//! Splits an ordered sequence of work items into fixed-size chunks and hands
//! each chunk to an async handler. Chunks run strictly one after another, so
//! at most one chunk is in flight at any time no matter how large the input
//! is. What happens *inside* a chunk (fan-out per item, a single bulk write)
//! is up to the handler.
//!
//! The first handler error stops processing and is returned to the caller
//! unchanged. There is no retry and no logging here; both are the caller's
//! business.

use crate::utils::error::{JobError, Result};
use futures::Future;
use futures::future::try_join_all;
use std::num::NonZeroUsize;

/// Number of chunks `len` items split into with the given chunk size.
pub fn chunk_count(len: usize, batch_size: NonZeroUsize) -> usize {
    len.div_ceil(batch_size.get())
}

/// Process `items` in chunks of `batch_size`, one chunk at a time.
///
/// Shorthand for `BoundedBatchProcessor::from(batch_size).process(items, handler)`.
pub async fn process_promises_batch<I, T, F, Fut, E>(
    items: I,
    batch_size: NonZeroUsize,
    handler: F,
) -> std::result::Result<(), E>
where
    I: IntoIterator<Item = T>,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
{
    BoundedBatchProcessor::from(batch_size)
        .process(items, handler)
        .await
}

/// Sequential chunk runner with a fixed chunk size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedBatchProcessor {
    batch_size: NonZeroUsize,
}

impl From<NonZeroUsize> for BoundedBatchProcessor {
    fn from(batch_size: NonZeroUsize) -> Self {
        Self { batch_size }
    }
}

impl BoundedBatchProcessor {
    /// Create a processor, rejecting a chunk size of zero
    pub fn new(batch_size: usize) -> Result<Self> {
        NonZeroUsize::new(batch_size)
            .map(Self::from)
            .ok_or_else(|| JobError::validation("batch size must be at least 1"))
    }

    /// Configured chunk size
    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// Invoke `handler` once per chunk, awaiting each before the next.
    pub async fn process<I, T, F, Fut, E>(
        &self,
        items: I,
        mut handler: F,
    ) -> std::result::Result<(), E>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
    {
        for chunk in Chunks::new(items.into_iter(), self.batch_size) {
            handler(chunk).await?;
        }
        Ok(())
    }

    /// Like [`process`](Self::process), but concatenates what each chunk returns.
    pub async fn process_collect<I, T, F, Fut, R, E>(
        &self,
        items: I,
        mut handler: F,
    ) -> std::result::Result<Vec<R>, E>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = std::result::Result<Vec<R>, E>>,
    {
        let iter = items.into_iter();
        let mut results = Vec::with_capacity(iter.size_hint().0);
        for chunk in Chunks::new(iter, self.batch_size) {
            results.extend(handler(chunk).await?);
        }
        Ok(results)
    }

    /// Run `handler` for every item of a chunk concurrently, chunks in sequence.
    ///
    /// At most `batch_size` item futures exist at once. Results keep input
    /// order. The first failing item fails its chunk; later chunks never start.
    pub async fn process_each<I, T, F, Fut, R, E>(
        &self,
        items: I,
        mut handler: F,
    ) -> std::result::Result<Vec<R>, E>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        self.process_collect(items, |chunk| {
            try_join_all(chunk.into_iter().map(&mut handler))
        })
        .await
    }
}

/// Moves items out of the source iterator into owned chunks
struct Chunks<I> {
    inner: I,
    size: usize,
}

impl<I: Iterator> Chunks<I> {
    fn new(inner: I, size: NonZeroUsize) -> Self {
        Self {
            inner,
            size: size.get(),
        }
    }
}

impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<_> = self.inner.by_ref().take(self.size).collect();
        (!chunk.is_empty()).then_some(chunk)
    }
}
