//! Static room catalog: display metadata for each room type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BellbotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Matrimonial,
    Doble,
    TripleMatrimonial,
    TripleIndividual,
}

/// Display metadata for a room type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomInfo {
    pub display_name: &'static str,
    pub capacity: u8,
    pub image_url: &'static str,
}

impl RoomType {
    pub fn all() -> &'static [RoomType] {
        &[
            RoomType::Matrimonial,
            RoomType::Doble,
            RoomType::TripleMatrimonial,
            RoomType::TripleIndividual,
        ]
    }

    /// Wire identifier, as used by both remote services.
    pub fn id(&self) -> &'static str {
        match self {
            RoomType::Matrimonial => "matrimonial",
            RoomType::Doble => "doble",
            RoomType::TripleMatrimonial => "triple_matrimonial",
            RoomType::TripleIndividual => "triple_individual",
        }
    }

    pub fn info(&self) -> RoomInfo {
        match self {
            RoomType::Matrimonial => RoomInfo {
                display_name: "Matrimonial",
                capacity: 2,
                image_url: "https://images.unsplash.com/photo-1645619200527-c6786729c2da?w=870",
            },
            RoomType::Doble => RoomInfo {
                display_name: "Doble",
                capacity: 2,
                image_url: "https://images.unsplash.com/photo-1605346576608-92f1346b67d6?w=870",
            },
            RoomType::TripleMatrimonial => RoomInfo {
                display_name: "Triple (1 Matrimonial + 1 Simple)",
                capacity: 3,
                image_url: "https://images.unsplash.com/photo-1648383228240-6ed939727ad6?w=774",
            },
            RoomType::TripleIndividual => RoomInfo {
                display_name: "Triple (3 Individuales)",
                capacity: 3,
                image_url: "https://images.unsplash.com/photo-1737517302831-e7b8a8eaa97c?w=870",
            },
        }
    }

    pub fn label(&self) -> &'static str {
        self.info().display_name
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RoomType {
    type Err = BellbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::all()
            .iter()
            .copied()
            .find(|r| r.id() == s)
            .ok_or_else(|| BellbotError::Decode(format!("unknown room type: {}", s)))
    }
}
