//! Bounded-parallelism scheduling for bulk transfers.
//!
//! Many changeset files can be queued for transfer at once; the queue keeps
//! at most `max_parallel` of them in flight, starting the rest in FIFO
//! order as slots free up.

mod queue;

pub use queue::{ParallelTaskQueue, QueueTask};
