//! Batch decoding
//!
//! Decodes many independent records where one bad record must not stop
//! the rest. Failures are collected with their input position.

use crate::codec::decode_with_limits;
use crate::config::DecodeLimits;
use crate::error::DecodeError;
use crate::event::Event;

/// A record that failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the record in the input
    pub index: usize,

    pub error: DecodeError,
}

/// Result of decoding a batch
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully decoded events, in input order
    pub events: Vec<Event>,

    /// Records that were skipped, in input order
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Number of records seen
    pub fn total(&self) -> usize {
        self.events.len() + self.failures.len()
    }

    /// True when every record decoded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, index: usize, result: Result<Event, DecodeError>) {
        match result {
            Ok(event) => self.events.push(event),
            Err(error) => {
                tracing::warn!(index, %error, "skipping undecodable record");
                self.failures.push(BatchFailure { index, error });
            }
        }
    }

    fn extend(&mut self, other: BatchOutcome) {
        self.events.extend(other.events);
        self.failures.extend(other.failures);
    }
}

/// Decode every record, isolating per-record failures
pub fn decode_batch<I, R>(records: I, limits: &DecodeLimits) -> BatchOutcome
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    let mut outcome = BatchOutcome::default();
    for (index, record) in records.into_iter().enumerate() {
        outcome.record(index, decode_with_limits(record.as_ref(), limits));
    }

    tracing::debug!(
        decoded = outcome.events.len(),
        failed = outcome.failures.len(),
        "batch decoded"
    );
    outcome
}

/// Same as [`decode_batch`], spread across `workers` threads.
///
/// Records are split into contiguous chunks so the merged outcome keeps
/// input order. `workers == 0` is treated as 1.
pub fn decode_batch_parallel<R>(records: &[R], limits: &DecodeLimits, workers: usize) -> BatchOutcome
where
    R: AsRef<[u8]> + Sync,
{
    let workers = workers.max(1);
    if workers == 1 || records.len() < 2 {
        return decode_batch(records, limits);
    }

    let chunk_size = records.len().div_ceil(workers);

    let result = crossbeam::scope(|scope| {
        let handles: Vec<_> = records
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let base = chunk_index * chunk_size;
                scope.spawn(move |_| {
                    let mut outcome = BatchOutcome::default();
                    for (offset, record) in chunk.iter().enumerate() {
                        outcome.record(base + offset, decode_with_limits(record.as_ref(), limits));
                    }
                    outcome
                })
            })
            .collect();

        let mut merged = BatchOutcome::default();
        for handle in handles {
            match handle.join() {
                Ok(part) => merged.extend(part),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        merged
    });

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(panic) => std::panic::resume_unwind(panic),
    };

    tracing::debug!(
        workers,
        decoded = outcome.events.len(),
        failed = outcome.failures.len(),
        "parallel batch decoded"
    );
    outcome
}
