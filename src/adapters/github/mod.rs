//! GitHub GraphQL adapter.
//!
//! Implements the domain's [`PullRequestSource`](crate::domain::ports::PullRequestSource)
//! and [`ProjectBoard`](crate::domain::ports::ProjectBoard) ports against
//! the GitHub GraphQL API (public or enterprise). Pagination, rate
//! limiting, retry, and timeouts all live here; the engine never sees
//! transport details.

pub mod board;
pub mod client;
pub mod models;
pub mod queries;
pub mod source;

pub use board::GithubProjectBoard;
pub use client::{GraphqlClient, RateLimiter};
pub use source::GithubPullRequestSource;
