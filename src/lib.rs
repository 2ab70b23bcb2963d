//! Async client library for the iModels REST API.
//!
//! Four cross-cutting mechanisms are shared by every operation: lazy paged
//! entity iteration, uniform HTTP retry with backoff, a bounded-parallelism
//! transfer queue, and a normalized error model. The HTTP transport and the
//! object-storage transfer primitive are injected behind traits.

pub mod config;
pub mod logging;

// Cross-cutting mechanisms.
pub mod control;
pub mod error_model;
pub mod http;
pub mod paging;
pub mod readiness;
pub mod retry;
pub mod scheduler;
pub mod transfer;

// Representative entity operations built on the shared mechanisms.
pub mod changesets;
pub mod imodels;
