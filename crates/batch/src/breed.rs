//! Static breed catalog.
//!
//! The batch creation form offers a fixed breed list; the batch's
//! `breed_category` is derived from this lookup, never entered directly.

use serde::{Deserialize, Serialize};

/// Rearing purpose of a breed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreedCategory {
    Broiler,
    Layer,
    Dual,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breed {
    pub id: &'static str,
    pub name: &'static str,
    pub category: BreedCategory,
}

const CATALOG: &[Breed] = &[
    Breed {
        id: "cobb500",
        name: "Cobb 500",
        category: BreedCategory::Broiler,
    },
    Breed {
        id: "ross308",
        name: "Ross 308",
        category: BreedCategory::Broiler,
    },
    Breed {
        id: "lohmann-brown",
        name: "Lohmann Brown",
        category: BreedCategory::Layer,
    },
    Breed {
        id: "hyline-brown",
        name: "Hy-Line Brown",
        category: BreedCategory::Layer,
    },
    Breed {
        id: "kampung-super",
        name: "Kampung Super",
        category: BreedCategory::Dual,
    },
    Breed {
        id: "joper",
        name: "Joper",
        category: BreedCategory::Dual,
    },
];

/// All known breeds, in display order.
pub fn breeds() -> &'static [Breed] {
    CATALOG
}

/// Look a breed up by its catalog id.
pub fn breed_by_id(id: &str) -> Option<&'static Breed> {
    CATALOG.iter().find(|b| b.id == id)
}
