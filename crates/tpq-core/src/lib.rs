#![deny(missing_docs)]

//! Core types shared by the TPQ bootstrap analysis crates: the structured
//! error surface, the deterministic RNG handle with its substream seeding
//! policy, and the provenance descriptors embedded in persisted artifacts.

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, TpqError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
