//! Business logic services for the Bloom Watch backend

pub mod bloom;
pub mod species;

pub use bloom::{BloomService, ObservationBatch};
pub use species::SpeciesService;
