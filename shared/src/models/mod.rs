//! Domain models for the Bloom Watch platform

mod bloom;
mod climate;
mod observation;
mod region;
mod request;
mod vegetation;

pub use bloom::*;
pub use climate::*;
pub use observation::*;
pub use region::*;
pub use request::*;
pub use vegetation::*;
