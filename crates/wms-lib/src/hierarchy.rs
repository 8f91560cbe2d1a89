//! Warehouse containment hierarchy: Warehouse → Zone → Aisle → Shelf → Bin.
//!
//! Repositories hand out a [`WarehouseHierarchy`] tree. Graph construction
//! never walks the tree itself; it consumes the flat bin list produced by
//! [`WarehouseHierarchy::bins`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Basic warehouse record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub total_capacity: f64,
}

/// Functional classification of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    Receiving,
    Storage,
    Picking,
    Shipping,
}

impl ZoneType {
    pub fn as_str(self) -> &'static str {
        match self {
            ZoneType::Receiving => "receiving",
            ZoneType::Storage => "storage",
            ZoneType::Picking => "picking",
            ZoneType::Shipping => "shipping",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "receiving" => Ok(ZoneType::Receiving),
            "storage" => Ok(ZoneType::Storage),
            "picking" => Ok(ZoneType::Picking),
            "shipping" => Ok(ZoneType::Shipping),
            other => Err(format!("unknown zone type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<ZoneType>,
    #[serde(default)]
    pub aisles: Vec<Aisle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aisle {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub shelves: Vec<Shelf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub id: String,
    pub code: String,
    #[serde(default = "default_levels")]
    pub levels: u32,
    #[serde(default)]
    pub bins: Vec<Bin>,
}

/// Smallest addressable storage location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub id: String,
    /// Location code, e.g. `A-01-03-B`.
    pub code: String,
    #[serde(default = "default_capacity")]
    pub capacity: f64,
    #[serde(default)]
    pub occupied: f64,
}

impl Bin {
    pub fn new(id: impl Into<String>, code: impl Into<String>, capacity: f64, occupied: f64) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            capacity,
            occupied,
        }
    }
}

fn default_levels() -> u32 {
    4
}

fn default_capacity() -> f64 {
    100.0
}

/// Full containment tree for one warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseHierarchy {
    pub warehouse: WarehouseSummary,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl WarehouseHierarchy {
    /// Every bin under every zone, aisle and shelf, in containment order.
    pub fn bins(&self) -> impl Iterator<Item = &Bin> + '_ {
        self.zones
            .iter()
            .flat_map(|zone| zone.aisles.iter())
            .flat_map(|aisle| aisle.shelves.iter())
            .flat_map(|shelf| shelf.bins.iter())
    }

    pub fn bin_count(&self) -> usize {
        self.bins().count()
    }

    /// Hash of the structural layout (ids and codes, not stock levels).
    ///
    /// Any bin being added, removed or moved changes the fingerprint.
    pub fn topology_fingerprint(&self) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(self.warehouse.id.as_bytes());
        for zone in &self.zones {
            feed(&mut hasher, b'z', &zone.id, "");
            for aisle in &zone.aisles {
                feed(&mut hasher, b'a', &aisle.id, &aisle.code);
                for shelf in &aisle.shelves {
                    feed(&mut hasher, b's', &shelf.id, &shelf.code);
                    for bin in &shelf.bins {
                        feed(&mut hasher, b'b', &bin.id, &bin.code);
                    }
                }
            }
        }
        Fingerprint(hasher.finalize().into())
    }
}

fn feed(hasher: &mut Sha256, tag: u8, id: &str, code: &str) {
    hasher.update([tag]);
    hasher.update(id.as_bytes());
    hasher.update([0]);
    hasher.update(code.as_bytes());
    hasher.update([b'\n']);
}

/// SHA-256 digest identifying a hierarchy layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
