//! The small post-cataclysm world every new save starts from.

use crate::entity::{Entity, EntityId};
use crate::error::WtResult;
use crate::item::{ItemCatalog, MaterialComposition};
use crate::tree::WorldTree;

/// Build the starter world. Items are drawn from `catalog`, which must know
/// the types listed in [`BARN_STOCK`].
pub fn starter_world(catalog: &ItemCatalog) -> WtResult<WorldTree> {
    let mut tree = WorldTree::new(Entity::location(
        "global",
        "Container for the entire world.",
    ));
    let global = tree.root_id().clone();

    tree.add_child(
        Entity::location(
            "town",
            "What is left of a town of a few thousand. Nobody here survived the \
             cataclysm, and not all of the dead stayed dead. The ruins still hold \
             supplies, for anyone willing to risk scavenging them.",
        ),
        &global,
    )?;
    let shelter = tree.add_child(
        Entity::location(
            "shelter",
            "A lone house with a sturdy basement, far enough out that it kept you \
             alive through the cataclysm. The food is running low.",
        ),
        &global,
    )?;
    tree.add_child(
        Entity::creature("player", "This is you, and you are this."),
        &shelter,
    )?;

    let settlement = tree.add_child(
        Entity::location(
            "settlement",
            "A walled farmstead held by survivors. A patched barn, an extended \
             house, and a tended garden sit behind high wooden walls. Guards \
             patrol the fields outside.",
        ),
        &global,
    )?;
    let barn = tree.add_child(
        Entity::location(
            "barn",
            "An old barn turned storage space. Supplies are stacked high in bins.",
        ),
        &settlement,
    )?;
    let entrance = tree.add_child(
        Entity::location(
            "wall entrance",
            "A gap in the wall. A thick wooden gate hangs wide open.",
        ),
        &settlement,
    )?;
    tree.add_child(
        Entity::creature(
            "entrance guard",
            "A short, burly man in woodsy leather, a shotgun slung over his \
             shoulder and a metal-tipped spear in hand.",
        ),
        &entrance,
    )?;
    tree.add_child(
        Entity::location(
            "counter",
            "A desk buried in paper and clipboards. The quartermaster waits \
             behind it.",
        ),
        &barn,
    )?;

    for (item_type, count) in BARN_STOCK {
        for _ in 0..*count {
            tree.add_child(Entity::new(catalog.instantiate(item_type)?), &barn)?;
        }
    }

    Ok(tree)
}

/// Item types and counts stored in the settlement's barn.
pub const BARN_STOCK: &[(&str, usize)] = &[
    ("CANNED_FOOD", 3),
    ("WATER_BOTTLE", 2),
    ("SCRAP_METAL", 1),
];

/// Materials held in a settlement's barn.
pub fn stockpile(tree: &WorldTree, settlement: &EntityId) -> WtResult<MaterialComposition> {
    let barn = tree.child(settlement, "barn")?;
    tree.materials_in(&barn.id)
}
