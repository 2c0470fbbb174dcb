use crate::core::tables;
use crate::domain::model::{
    Bulkheads, Component, LoadoutDocument, LoadoutRecord, ModuleDescriptor, ModuleRef, Rating,
    SkipReason, SkippedSlot, Slot, SlotOrderWarning, Translation,
};
use crate::domain::ports::ModuleLookup;
use crate::utils::error::{ExportError, Result};
use std::collections::HashMap;

/// Translates a companion loadout into a Coriolis loadout document.
///
/// Slots are visited in lexicographic order, which for companion slot names is
/// installation order (and `Huge < Large < Medium < Small` for hardpoints).
/// Modules the lookup does not know, or rejects, are skipped and reported in
/// [`Translation::skipped`]. Anything else that cannot be mapped is a gap in the
/// translation tables and fails the whole translation.
pub fn translate<L: ModuleLookup + ?Sized>(
    record: &LoadoutRecord,
    lookup: &L,
) -> Result<Translation> {
    let ship_code = record.ship.name.as_str();
    let ship = tables::ship_display_name(ship_code);
    let mut document = LoadoutDocument::new(ship);
    let mut skipped = Vec::new();

    let order_warnings = check_slot_order(record.ship.modules.keys().map(String::as_str));
    for warning in &order_warnings {
        tracing::warn!(
            "Slot '{}' sorts after '{}'; {} may be listed out of order",
            warning.slot,
            warning.previous,
            ship
        );
    }

    for (slot, content) in &record.ship.modules {
        let module = match content {
            Slot::Empty => {
                place_empty(&mut document, slot);
                continue;
            }
            Slot::Occupied(module) => module,
        };

        let descriptor = match lookup.lookup(&module.module) {
            Ok(Some(descriptor)) => descriptor,
            Ok(None) => {
                tracing::debug!("Skipping unrecognized module '{}' in {}", module.module, slot);
                skipped.push(skip(slot, module, SkipReason::Unrecognized));
                continue;
            }
            Err(rejection) => {
                tracing::warn!("Loadout: {} ({} in {})", rejection, module.module, slot);
                skipped.push(skip(slot, module, SkipReason::Rejected(rejection.reason)));
                continue;
            }
        };

        place_module(&mut document, slot, &descriptor)?;
    }

    tracing::debug!(
        "Translated {} ({} slots, {} skipped)",
        ship,
        record.ship.modules.len(),
        skipped.len()
    );

    Ok(Translation {
        ship_code: ship_code.to_string(),
        ship: ship.to_string(),
        document,
        skipped,
        order_warnings,
    })
}

fn skip(slot: &str, module: &ModuleRef, reason: SkipReason) -> SkippedSlot {
    SkippedSlot {
        slot: slot.to_string(),
        module: module.module.clone(),
        reason,
    }
}

fn place_empty(document: &mut LoadoutDocument, slot: &str) {
    match tables::slot_route(slot) {
        Some((_, list)) => {
            tracing::debug!("Empty slot {} -> {}", slot, list.as_str());
            document.components.list_mut(list).push(None);
        }
        None => tracing::debug!("Standard slot {} is empty; no placeholder", slot),
    }
}

fn place_module(
    document: &mut LoadoutDocument,
    slot: &str,
    descriptor: &ModuleDescriptor,
) -> Result<()> {
    let name = descriptor.name.as_str();
    let rating = Rating {
        class: descriptor.class.clone(),
        rating: descriptor.rating.clone(),
    };

    if tables::is_bulkhead(name) {
        document.components.standard.bulkheads = Some(Bulkheads::Named(name.to_string()));
        return Ok(());
    }

    let Some(list) = tables::category_list(descriptor.category) else {
        let key = tables::standard_key(name).ok_or_else(|| ExportError::MappingError {
            slot: slot.to_string(),
            message: format!("standard module '{}' has no Coriolis key", name),
        })?;
        document.components.standard.set(key, rating);
        return Ok(());
    };

    let component = build_component(slot, descriptor, rating)?;
    document.components.list_mut(list).push(Some(component));
    Ok(())
}

fn build_component(slot: &str, descriptor: &ModuleDescriptor, rating: Rating) -> Result<Component> {
    let name = descriptor.name.as_str();
    let (group, label) = if tables::is_scanner(name) {
        ("Scanner".to_string(), Some(name.to_string()))
    } else if tables::is_countermeasure(name) {
        ("Countermeasure".to_string(), Some(name.to_string()))
    } else if let Some((group, label)) = tables::fixup(name) {
        (group.to_string(), label.map(str::to_string))
    } else {
        (name.to_string(), None)
    };

    let mount = match descriptor.mount.as_deref() {
        Some(mount) => Some(
            tables::weapon_mount(mount)
                .ok_or_else(|| ExportError::MappingError {
                    slot: slot.to_string(),
                    message: format!("unknown weapon mount '{}' on '{}'", mount, name),
                })?
                .to_string(),
        ),
        None => None,
    };

    let missile = match descriptor.guidance.as_deref() {
        Some(guidance) => Some(guidance.chars().next().ok_or_else(|| {
            ExportError::MappingError {
                slot: slot.to_string(),
                message: format!("empty missile guidance on '{}'", name),
            }
        })?),
        None => None,
    };

    Ok(Component {
        class: rating.class,
        rating: rating.rating,
        group,
        name: label,
        mount,
        missile,
    })
}

/// Flags slots whose trailing number is lower than an earlier slot with the same
/// prefix, e.g. `Slot10_Size1` visited before `Slot2_Size1`.
pub fn check_slot_order<'a, I>(slots: I) -> Vec<SlotOrderWarning>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut last_seen: HashMap<&'static str, (u32, &'a str)> = HashMap::new();
    let mut warnings = Vec::new();

    for slot in slots {
        let Some((prefix, _)) = tables::slot_route(slot) else {
            continue;
        };
        if prefix.is_empty() {
            continue;
        }
        let Some(index) = slot_index(&slot[prefix.len()..]) else {
            continue;
        };
        if let Some(&(previous_index, previous)) = last_seen.get(prefix) {
            if index < previous_index {
                warnings.push(SlotOrderWarning {
                    slot: slot.to_string(),
                    previous: previous.to_string(),
                });
            }
        }
        last_seen.insert(prefix, (index, slot));
    }

    warnings
}

// Leading digits after the prefix: "03_Size2" -> 3, "2" -> 2.
fn slot_index(rest: &str) -> Option<u32> {
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
