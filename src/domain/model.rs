use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LOADOUT_SCHEMA: &str = "http://cdn.coriolis.io/schemas/ship-loadout/1.json#";

/// A companion snapshot (or just its `ship` part). Other top-level keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadoutRecord {
    pub ship: Ship,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ship {
    pub name: String,
    /// Keyed by slot name; `BTreeMap` iteration gives installation order.
    #[serde(default)]
    pub modules: BTreeMap<String, Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModuleRef {
    pub module: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Occupied(ModuleRef),
}

impl Slot {
    pub fn module(name: &str) -> Self {
        Slot::Occupied(ModuleRef {
            module: name.to_string(),
        })
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if is_blank(&value) {
            return Ok(Slot::Empty);
        }
        serde_json::from_value(value)
            .map(Slot::Occupied)
            .map_err(de::Error::custom)
    }
}

// The companion API is not consistent about how an unequipped slot looks.
fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        serde_json::Value::Object(o) => o.is_empty(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleCategory {
    Standard,
    Internal,
    Hardpoint,
    Utility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    pub category: ModuleCategory,
    pub class: String,
    pub rating: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

/// The list-valued sections of `components`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentList {
    Hardpoints,
    Utility,
    Internal,
}

impl ComponentList {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentList::Hardpoints => "hardpoints",
            ComponentList::Utility => "utility",
            ComponentList::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardKey {
    Bulkheads,
    PowerPlant,
    Thrusters,
    FrameShiftDrive,
    LifeSupport,
    PowerDistributor,
    Sensors,
    FuelTank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub class: String,
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub class: String,
    pub rating: String,
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missile: Option<char>,
}

/// Known armour is written as its bare name. Anything else that lands on the
/// bulkheads key keeps its rating like the other standard components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Bulkheads {
    Named(String),
    Rated(Rating),
}

/// Field order here is the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardComponents {
    pub bulkheads: Option<Bulkheads>,
    pub power_plant: Option<Rating>,
    pub thrusters: Option<Rating>,
    pub frame_shift_drive: Option<Rating>,
    pub life_support: Option<Rating>,
    pub power_distributor: Option<Rating>,
    pub sensors: Option<Rating>,
    pub fuel_tank: Option<Rating>,
}

impl StandardComponents {
    pub fn set(&mut self, key: StandardKey, rating: Rating) {
        let slot = match key {
            StandardKey::Bulkheads => {
                self.bulkheads = Some(Bulkheads::Rated(rating));
                return;
            }
            StandardKey::PowerPlant => &mut self.power_plant,
            StandardKey::Thrusters => &mut self.thrusters,
            StandardKey::FrameShiftDrive => &mut self.frame_shift_drive,
            StandardKey::LifeSupport => &mut self.life_support,
            StandardKey::PowerDistributor => &mut self.power_distributor,
            StandardKey::Sensors => &mut self.sensors,
            StandardKey::FuelTank => &mut self.fuel_tank,
        };
        *slot = Some(rating);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Components {
    pub standard: StandardComponents,
    pub hardpoints: Vec<Option<Component>>,
    pub utility: Vec<Option<Component>>,
    pub internal: Vec<Option<Component>>,
}

impl Components {
    pub fn list_mut(&mut self, list: ComponentList) -> &mut Vec<Option<Component>> {
        match list {
            ComponentList::Hardpoints => &mut self.hardpoints,
            ComponentList::Utility => &mut self.utility,
            ComponentList::Internal => &mut self.internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadoutDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub ship: String,
    pub components: Components,
}

impl LoadoutDocument {
    pub fn new(ship: &str) -> Self {
        Self {
            schema: LOADOUT_SCHEMA.to_string(),
            name: ship.to_string(),
            ship: ship.to_string(),
            components: Components::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No descriptor exists for the module yet.
    Unrecognized,
    /// A descriptor exists but failed a consistency check.
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSlot {
    pub slot: String,
    pub module: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOrderWarning {
    pub slot: String,
    pub previous: String,
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub ship_code: String,
    pub ship: String,
    pub document: LoadoutDocument,
    pub skipped: Vec<SkippedSlot>,
    pub order_warnings: Vec<SlotOrderWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Written { path: String },
    /// Same content as `path`, the most recent export for this ship.
    SkippedDuplicate { path: String },
}

impl PersistOutcome {
    pub fn path(&self) -> &str {
        match self {
            PersistOutcome::Written { path } | PersistOutcome::SkippedDuplicate { path } => path,
        }
    }

    pub fn was_written(&self) -> bool {
        matches!(self, PersistOutcome::Written { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub ship: String,
    pub outcome: PersistOutcome,
    pub skipped: Vec<SkippedSlot>,
    pub order_warnings: Vec<SlotOrderWarning>,
}
