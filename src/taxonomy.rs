//! Canonical uniform taxonomy.
//!
//! The legacy data carried two drifted vocabularies: piece-level personnel
//! categories ("ocp bottoms", "pt shorts") and unprefixed stock spellings
//! ("bottoms", "shorts"). This module defines one canonical taxonomy and an
//! explicit alias table that normalizes the legacy names on parse.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::errors::ServiceError;

/// Piece-level uniform category. Every value belongs to exactly one
/// [`CategoryGroup`]; the string forms are the canonical spellings stored in
/// the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    // OCP pieces; unprefixed aliases come from the legacy stock sheet.
    #[strum(to_string = "ocp bottoms", serialize = "bottoms")]
    OcpBottoms,
    #[strum(to_string = "ocp tops", serialize = "tops")]
    OcpTops,
    #[strum(to_string = "ocp belt", serialize = "belt")]
    OcpBelt,
    #[strum(to_string = "ocp fleece jacket", serialize = "fleece jacket")]
    OcpFleeceJacket,
    #[strum(to_string = "ocp undershirts", serialize = "undershirts")]
    OcpUndershirts,
    #[strum(to_string = "ocp socks", serialize = "socks")]
    OcpSocks,
    #[strum(to_string = "ocp cover", serialize = "cover")]
    OcpCover,
    #[strum(to_string = "ocp blouse", serialize = "blouse")]
    OcpBlouse,
    #[strum(to_string = "ocp boots", serialize = "boots")]
    OcpBoots,
    #[strum(to_string = "ocp det patch", serialize = "det patch")]
    OcpDetPatch,
    #[strum(to_string = "ocp air force tape", serialize = "air force tape")]
    OcpAirForceTape,

    // PT pieces; the bare piece words historically meant the PT set.
    #[strum(to_string = "pt shorts", serialize = "shorts")]
    PtShorts,
    #[strum(to_string = "pt shirt", serialize = "shirt")]
    PtShirt,
    #[strum(to_string = "pt pants", serialize = "pants")]
    PtPants,
    #[strum(to_string = "pt jacket", serialize = "jacket")]
    PtJacket,

    // Blues pieces.
    #[strum(to_string = "blue pants")]
    BluePants,
    #[strum(to_string = "blue tops")]
    BlueTops,
    #[strum(to_string = "blue jackets", serialize = "jackets")]
    BlueJackets,
    #[strum(to_string = "blue belt")]
    BlueBelt,
    #[strum(to_string = "blue cover")]
    BlueCover,
    #[strum(to_string = "blue socks")]
    BlueSocks,
    #[strum(to_string = "blue shoes", serialize = "shoes")]
    BlueShoes,

    // Flight line.
    #[strum(to_string = "flight suit")]
    FlightSuit,
    #[strum(to_string = "caps")]
    Caps,

    // Roster entries tracked alongside issued items.
    #[strum(to_string = "cadets names")]
    CadetsNames,
}

impl Category {
    /// The group a category is issued under.
    pub fn group(self) -> CategoryGroup {
        use Category::*;
        match self {
            OcpBottoms | OcpTops | OcpBelt | OcpFleeceJacket | OcpUndershirts | OcpSocks
            | OcpCover | OcpBlouse | OcpBoots | OcpDetPatch | OcpAirForceTape => CategoryGroup::Ocp,
            PtShorts | PtShirt | PtPants | PtJacket => CategoryGroup::Pt,
            BluePants | BlueTops | BlueJackets | BlueBelt | BlueCover | BlueSocks | BlueShoes => {
                CategoryGroup::Blues
            }
            FlightSuit | Caps => CategoryGroup::FlightSuits,
            CadetsNames => CategoryGroup::Cadets,
        }
    }
}

/// Named cluster of categories backing one set of list/add/delete endpoints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum CategoryGroup {
    #[strum(to_string = "ocp")]
    Ocp,
    #[strum(to_string = "pt")]
    Pt,
    #[strum(to_string = "blues")]
    Blues,
    #[strum(to_string = "flight-suits")]
    FlightSuits,
    #[strum(to_string = "cadets")]
    Cadets,
}

impl CategoryGroup {
    /// Categories accepted by this group's add endpoint and returned by its
    /// list endpoint.
    pub fn members(self) -> Vec<Category> {
        Category::iter().filter(|c| c.group() == self).collect()
    }

    /// Canonical spellings of the member categories, for store filters.
    pub fn member_names(self) -> Vec<String> {
        self.members().iter().map(Category::to_string).collect()
    }

    /// OCP and Blues issue flows record the member's rank.
    pub fn requires_ranks(self) -> bool {
        matches!(self, CategoryGroup::Ocp | CategoryGroup::Blues)
    }

    /// Blues issue flow records a ribbon count.
    pub fn requires_ribbons(self) -> bool {
        matches!(self, CategoryGroup::Blues)
    }
}

/// Uniform family carried by the aggregate stock store. Cadets rosters are
/// not stocked, so this is a four-value vocabulary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum StockCategory {
    #[strum(to_string = "blue uniforms")]
    BlueUniforms,
    #[strum(to_string = "ocp uniforms")]
    OcpUniforms,
    #[strum(to_string = "flight suits")]
    FlightSuits,
    #[strum(to_string = "pt uniforms")]
    PtUniforms,
}

/// Garment size. Long legacy forms normalize to the short canonical codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Size {
    #[strum(to_string = "xs")]
    Xs,
    #[strum(to_string = "s", serialize = "small")]
    S,
    #[strum(to_string = "m", serialize = "medium")]
    M,
    #[strum(to_string = "l", serialize = "large")]
    L,
    #[strum(to_string = "xl", serialize = "extra large", serialize = "extra-large")]
    Xl,
}

pub fn parse_category(raw: &str) -> Result<Category, ServiceError> {
    Category::from_str(raw.trim())
        .map_err(|_| ServiceError::ValidationError(format!("unknown category '{}'", raw.trim())))
}

pub fn parse_stock_category(raw: &str) -> Result<StockCategory, ServiceError> {
    StockCategory::from_str(raw.trim()).map_err(|_| {
        ServiceError::ValidationError(format!("unknown stock category '{}'", raw.trim()))
    })
}

pub fn parse_size(raw: &str) -> Result<Size, ServiceError> {
    Size::from_str(raw.trim())
        .map_err(|_| ServiceError::ValidationError(format!("unknown size '{}'", raw.trim())))
}
