//! Fixed translation tables between the companion outfitting names and Coriolis.
//!
//! Every table is an ordered, immutable slice; lookups are linear because none has
//! more than a couple of dozen entries.

use crate::domain::model::{ComponentList, ModuleCategory, StandardKey};

/// Companion ship code to the name Coriolis displays.
pub const SHIP_NAMES: &[(&str, &str)] = &[
    ("Adder", "Adder"),
    ("Anaconda", "Anaconda"),
    ("Asp", "Asp Explorer"),
    ("CobraMkIII", "Cobra Mk III"),
    ("DiamondBack", "Diamondback Scout"),
    ("DiamondBackXL", "Diamondback Explorer"),
    ("Eagle", "Eagle"),
    ("Empire_Courier", "Imperial Courier"),
    ("Empire_Eagle", "Imperial Eagle"),
    ("Empire_Fighter", "Imperial Fighter"),
    ("Empire_Trader", "Imperial Clipper"),
    ("Federation_Dropship", "Federal Dropship"),
    ("Federation_Fighter", "F63 Condor"),
    ("FerDeLance", "Fer-de-Lance"),
    ("Hauler", "Hauler"),
    ("Orca", "Orca"),
    ("Python", "Python"),
    ("SideWinder", "Sidewinder"),
    ("Type6", "Type-6 Transporter"),
    ("Type7", "Type-7 Transporter"),
    ("Type9", "Type-9 Heavy"),
    ("Viper", "Viper"),
    ("Vulture", "Vulture"),
];

/// Slot name prefixes whose empty slots need a placeholder in a specific list.
pub const SLOT_PREFIXES: &[(&str, ComponentList)] = &[
    ("HugeHardpoint", ComponentList::Hardpoints),
    ("LargeHardpoint", ComponentList::Hardpoints),
    ("MediumHardpoint", ComponentList::Hardpoints),
    ("SmallHardpoint", ComponentList::Hardpoints),
    ("TinyHardpoint", ComponentList::Utility),
    ("Slot", ComponentList::Internal),
];

/// Companion slot names of the standard components. These are never empty.
pub const STANDARD_SLOTS: &[&str] = &[
    "Armour",
    "PowerPlant",
    "MainEngines",
    "FrameShiftDrive",
    "LifeSupport",
    "PowerDistributor",
    "Radar",
    "FuelTank",
];

/// Standard module names to `components.standard` keys, in output order.
pub const STANDARD_KEYS: &[(&str, StandardKey)] = &[
    ("Armour", StandardKey::Bulkheads),
    ("Power Plant", StandardKey::PowerPlant),
    ("Thrusters", StandardKey::Thrusters),
    ("Frame Shift Drive", StandardKey::FrameShiftDrive),
    ("Life Support", StandardKey::LifeSupport),
    ("Power Distributor", StandardKey::PowerDistributor),
    ("Sensors", StandardKey::Sensors),
    ("Fuel Tank", StandardKey::FuelTank),
];

pub const WEAPON_MOUNTS: &[(&str, &str)] = &[
    ("Fixed", "Fixed"),
    ("Gimballed", "Gimballed"),
    ("Turreted", "Turret"),
];

pub const BULKHEADS: &[&str] = &[
    "Lightweight Alloy",
    "Reinforced Alloy",
    "Military Grade Composite",
    "Mirrored Surface Composite",
    "Reactive Surface Composite",
];

pub const SCANNERS: &[&str] = &[
    "Basic Discovery Scanner",
    "Intermediate Discovery Scanner",
    "Advanced Discovery Scanner",
    "Detailed Surface Scanner",
];

pub const COUNTERMEASURES: &[&str] = &[
    "Chaff Launcher",
    "Electronic Countermeasure",
    "Heat Sink Launcher",
    "Point Defence",
];

/// Modules whose Coriolis group differs from their name: `(group, name)`.
pub const FIXUPS: &[(&str, (&str, Option<&str>))] = &[
    ("Advanced Plasma Accelerator", ("Plasma Accelerator", Some("Advanced"))),
    ("Cytoscrambler Burst Laser", ("Burst Laser", Some("Cytoscrambler"))),
    ("Enforcer Cannon", ("Multi-cannon", Some("Enforcer"))),
    ("Frame Shift Drive Interdictor", ("FSD Interdictor", None)),
    ("Imperial Hammer Rail Gun", ("Rail Gun", Some("Imperial Hammer"))),
    ("Impulse Mine Launcher", ("Mine Launcher", Some("Impulse"))),
    ("Mining Lance Beam Laser", ("Mining Laser", Some("Mining Lance"))),
    ("Multi-Cannon", ("Multi-cannon", None)),
    ("Pacifier Frag-Cannon", ("Fragment Cannon", Some("Pacifier"))),
    ("Pack-Hound Missile Rack", ("Missile Rack", Some("Pack-Hound"))),
    // Coriolis spells it this way
    ("Pulse Disruptor Laser", ("Pulse Laser", Some("Distruptor"))),
    ("Standard Docking Computer", ("Docking Computer", Some("Standard Docking Computer"))),
];

fn find<'a, V>(table: &'a [(&str, V)], key: &str) -> Option<&'a V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
}

/// Display name for a companion ship code; unknown codes pass through unchanged.
pub fn ship_display_name(code: &str) -> &str {
    find(SHIP_NAMES, code)
        .or_else(|| {
            SHIP_NAMES
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(code))
                .map(|(_, v)| v)
        })
        .copied()
        .unwrap_or(code)
}

/// Target list for a non-standard category.
pub fn category_list(category: ModuleCategory) -> Option<ComponentList> {
    match category {
        ModuleCategory::Standard => None,
        ModuleCategory::Hardpoint => Some(ComponentList::Hardpoints),
        ModuleCategory::Utility => Some(ComponentList::Utility),
        ModuleCategory::Internal => Some(ComponentList::Internal),
    }
}

/// The matching prefix and list for a slot name. `None` for standard slots.
pub fn slot_route(slot: &str) -> Option<(&'static str, ComponentList)> {
    if STANDARD_SLOTS.contains(&slot) {
        return None;
    }
    SLOT_PREFIXES
        .iter()
        .find(|(prefix, _)| slot.starts_with(prefix))
        .map(|(prefix, list)| (*prefix, *list))
        .or(Some(("", ComponentList::Internal)))
}

pub fn standard_key(name: &str) -> Option<StandardKey> {
    find(STANDARD_KEYS, name).copied()
}

pub fn weapon_mount(mount: &str) -> Option<&'static str> {
    find(WEAPON_MOUNTS, mount).copied()
}

pub fn fixup(name: &str) -> Option<(&'static str, Option<&'static str>)> {
    find(FIXUPS, name).copied()
}

pub fn is_bulkhead(name: &str) -> bool {
    BULKHEADS.contains(&name)
}

pub fn is_scanner(name: &str) -> bool {
    SCANNERS.contains(&name)
}

pub fn is_countermeasure(name: &str) -> bool {
    COUNTERMEASURES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_display_name() {
        assert_eq!(ship_display_name("Asp"), "Asp Explorer");
        assert_eq!(ship_display_name("Empire_Trader"), "Imperial Clipper");
        assert_eq!(ship_display_name("sidewinder"), "Sidewinder");
        assert_eq!(ship_display_name("Krait_MkII"), "Krait_MkII");
    }

    #[test]
    fn test_slot_routes() {
        assert_eq!(
            slot_route("HugeHardpoint1"),
            Some(("HugeHardpoint", ComponentList::Hardpoints))
        );
        assert_eq!(
            slot_route("TinyHardpoint4"),
            Some(("TinyHardpoint", ComponentList::Utility))
        );
        assert_eq!(
            slot_route("Slot06_Size2"),
            Some(("Slot", ComponentList::Internal))
        );
        assert_eq!(slot_route("Bay3"), Some(("", ComponentList::Internal)));
        assert_eq!(slot_route("PowerPlant"), None);
    }

    #[test]
    fn test_standard_keys_cover_every_standard_component() {
        assert_eq!(STANDARD_KEYS.len(), 8);
        assert_eq!(standard_key("Armour"), Some(StandardKey::Bulkheads));
        assert_eq!(standard_key("Fuel Tank"), Some(StandardKey::FuelTank));
        assert_eq!(standard_key("Cargo Rack"), None);
    }

    #[test]
    fn test_name_sets_do_not_overlap() {
        for name in SCANNERS.iter().chain(COUNTERMEASURES).chain(BULKHEADS) {
            assert!(fixup(name).is_none(), "{} is also a fixup", name);
        }
        for name in SCANNERS {
            assert!(!is_countermeasure(name));
            assert!(!is_bulkhead(name));
        }
    }

    #[test]
    fn test_weapon_mounts() {
        assert_eq!(weapon_mount("Turreted"), Some("Turret"));
        assert_eq!(weapon_mount("Fixed"), Some("Fixed"));
        assert_eq!(weapon_mount("Pivoting"), None);
    }
}
