//! Licensors and licensees share their shape, and are handled alike.

pub mod endpoints;
pub mod model;
pub mod service;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    /// Grants licenses
    Licensor,
    /// Is granted licenses
    Licensee,
}

impl PartyKind {
    /// The name as used in paths and messages, like `licensor`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Licensor => "licensor",
            Self::Licensee => "licensee",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Licensor => "Licensor",
            Self::Licensee => "Licensee",
        }
    }
}
