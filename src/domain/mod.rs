//! Domain types for curated registry items.
//!
//! This module provides:
//! - Primitives: TimeMs, UnixSeconds, Address, ItemId, DisputeId, Wei, Party
//! - The chronological item model (RegistryItem, Request, Round)
//! - Registry parameters and stake multipliers
//! - Raw indexed-source types and their one-time normalization

pub mod item;
pub mod ordering;
pub mod params;
pub mod primitives;
pub mod raw;

pub use item::{RawStatus, RegistryItem, Request, RequestType, Round, Ruling};
pub use ordering::normalize_item;
pub use params::{RegistryParameters, StakeMultipliers};
pub use primitives::{
    Address, AddressParseError, DisputeId, ItemId, Party, TimeMs, UnixSeconds, Wei, WeiParseError,
};
pub use raw::{RawItem, RawRequest, RawRound};
