//! Core type definitions used across the apikit workspace.

pub mod account;
pub mod pagination;
pub mod sorting;

pub use account::Account;
pub use pagination::{PagingInfo, RequestPagingParams};
pub use sorting::SortDirection;
