//! `flocktrack-batch` — rearing-cycle entity and its lifecycle transitions.

pub mod batch;
pub mod breed;

pub use batch::{Batch, BatchStatus, NewBatch};
pub use breed::{Breed, BreedCategory, breed_by_id, breeds};
