//! Client for the vmpooler service.
//!
//! [`PoolerClient`] knows the endpoints and how to read their responses;
//! the bytes travel over a [`Transport`], which is [`HttpTransport`] outside
//! of tests.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{PoolerApi, PoolerClient};
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, Auth, HttpTransport, Method, Transport};
pub use types::{TokenInfo, VmInfo};
