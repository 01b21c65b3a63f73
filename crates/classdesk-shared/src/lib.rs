//! Platform-independent core of the ClassDesk client.
//!
//! Nothing here touches the DOM: the web crate supplies an [`HttpTransport`]
//! and a [`TokenStore`] and renders what these modules compute.

pub mod approvals;
pub mod auth;
pub mod calendar;
pub mod client;
pub mod config;
pub mod dates;
pub mod envelope;
pub mod error;
pub mod events;
pub mod generation;
pub mod models;
pub mod reconcile;
pub mod roles;
pub mod search;
pub mod session;

pub use client::{ApiClient, HttpRequest, HttpResponse, HttpTransport, Method};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use events::{Subscription, TaskBus, TaskEvent};
pub use generation::{Generation, RequestGenerations};
pub use session::{Session, SessionManager, TokenStore};
