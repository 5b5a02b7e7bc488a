//! Batch processor integration tests
//!
//! Chunking, ordering and fail-fast behavior seen from outside the crate.

#[cfg(test)]
mod tests {
    use midday_jobs::{BoundedBatchProcessor, JobError, chunk_count, process_promises_batch};
    use std::num::NonZeroUsize;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// First item of every chunk, in the order chunks were handled
    #[tokio::test]
    async fn test_chunk_heads_follow_input_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let items: Vec<u32> = (100..150).collect();

        process_promises_batch(items.clone(), size(8), |chunk| {
            let log = log.clone();
            async move {
                // yield so a scheduler that interleaved chunks would show it
                tokio::task::yield_now().await;
                log.lock().await.push(chunk[0]);
                Ok::<_, JobError>(())
            }
        })
        .await
        .unwrap();

        let heads = log.lock().await.clone();
        let expected: Vec<u32> = items.iter().step_by(8).copied().collect();
        assert_eq!(heads, expected);
    }

    #[tokio::test]
    async fn test_invocation_count_matches_ceil() {
        let cases = [
            (0usize, 1),
            (1, 1),
            (10, 3),
            (300, 300),
            (301, 300),
            (1000, 300),
        ];
        for (len, batch_size) in cases {
            let calls = AtomicUsize::new(0);
            process_promises_batch(0..len, size(batch_size), |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, JobError>(()) }
            })
            .await
            .unwrap();

            let expected = len.div_ceil(batch_size);
            assert_eq!(calls.load(Ordering::SeqCst), expected);
            assert_eq!(chunk_count(len, size(batch_size)), expected);
        }
    }

    #[tokio::test]
    async fn test_error_is_returned_unchanged() {
        #[derive(Debug, PartialEq)]
        struct UpstreamRejected {
            chunk: usize,
        }

        let seen = AtomicUsize::new(0);
        let result = process_promises_batch(0..10, size(2), |_| {
            let chunk = seen.fetch_add(1, Ordering::SeqCst);
            async move {
                if chunk == 2 {
                    Err(UpstreamRejected { chunk })
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(result, Err(UpstreamRejected { chunk: 2 }));
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_processor_reuse_across_calls() {
        let processor = BoundedBatchProcessor::new(4).unwrap();
        assert_eq!(processor.batch_size().get(), 4);

        let first = processor
            .process_collect(vec!["a"; 9], |chunk| async move {
                Ok::<_, JobError>(vec![chunk.len()])
            })
            .await
            .unwrap();
        let second = processor
            .process_collect(vec!["b"; 4], |chunk| async move {
                Ok::<_, JobError>(vec![chunk.len()])
            })
            .await
            .unwrap();

        assert_eq!(first, vec![4, 4, 1]);
        assert_eq!(second, vec![4]);
    }

    #[tokio::test]
    async fn test_process_each_with_async_work() {
        let processor = BoundedBatchProcessor::new(5).unwrap();
        let lengths = processor
            .process_each(vec!["ab", "cde", "", "f"], |word| async move {
                tokio::task::yield_now().await;
                Ok::<_, JobError>(word.len())
            })
            .await
            .unwrap();
        assert_eq!(lengths, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_zero_size_is_configuration_error() {
        assert!(matches!(
            BoundedBatchProcessor::new(0),
            Err(JobError::Validation(_))
        ));
    }
}
