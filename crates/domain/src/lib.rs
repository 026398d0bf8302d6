//! Canopy Domain - Core types
//!
//! This crate defines the domain model for the Canopy registry conformance
//! runner. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod id;
pub mod monkey;
pub mod request;
pub mod response;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use monkey::{
    ApiInfo, CreatedMonkey, DeleteAck, ErrorBody, FetchedMonkey, GeneratedDescription,
    MonkeyDraft, MonkeyRef, UpdatedMonkey, ValidationErrors, contains_monkey, id_text,
};
pub use testing::{ResponseData, TestResult, TestSummary};
