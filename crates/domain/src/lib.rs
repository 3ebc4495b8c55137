//! Domain layer for the route planner
//!
//! Contains the point-selection vocabulary: coordinates, named points,
//! the selection aggregate, request epochs and route summaries.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
