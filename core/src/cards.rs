//! Card factories and stat tables
//!
//! All class/level/game-level derived numbers live here: templar baselines,
//! enemy scaling and buff pools, item duration/weight/buff tables, and the
//! per-turn spawn cadence.

use crate::buffs::apply_buff;
use crate::rng::GameRng;
use crate::state::ELITE_INTERVAL;
use crate::types::{
    AttackDirection, AttackType, Belongs, Buff, Card, CardId, CardKind, CharacterStats, ItemKind,
    ItemStats, TemplarClass,
};

/// Item levels cap here; stacking past the cap is clamped
pub const MAX_ITEM_LEVEL: u8 = 4;

/// Number of elite archetypes cycled round-robin
pub const ELITE_POOL_SIZE: usize = 6;

/// Number of regular enemy stat-trade buffs, picked uniformly
pub const REGULAR_POOL_SIZE: usize = 4;

/// The spawn slot table repeats every 5 moves
const SPAWN_CYCLE: u32 = 5;

// ==========================================
// TEMPLAR
// ==========================================

/// Construct the player card for the chosen class
pub fn create_templar(id: CardId, class: TemplarClass) -> Card {
    let stats = match class {
        TemplarClass::Knight => CharacterStats {
            max_health: 10,
            health: 10,
            shield: 0,
            attack: 3,
            hit_rate: 0.90,
            critical_rate: 0.15,
            attack_direction: AttackDirection::Front,
            attack_type: AttackType::Normal,
            hit_back_attack: 0,
            belongs: Belongs::Player,
        },
        TemplarClass::Wizard => CharacterStats {
            max_health: 8,
            health: 8,
            shield: 0,
            attack: 2,
            hit_rate: 0.85,
            critical_rate: 0.10,
            attack_direction: AttackDirection::Front,
            attack_type: AttackType::Normal,
            hit_back_attack: 0,
            belongs: Belongs::Player,
        },
        TemplarClass::Defender => CharacterStats {
            max_health: 12,
            health: 12,
            shield: 4,
            attack: 2,
            hit_rate: 0.85,
            critical_rate: 0.05,
            attack_direction: AttackDirection::Front,
            attack_type: AttackType::Normal,
            // Tracks shield from the start
            hit_back_attack: 4,
            belongs: Belongs::Player,
        },
    };
    Card::new(id, CardKind::Templar { class, stats })
}

// ==========================================
// ENEMIES
// ==========================================

/// Enemy baseline before any pool buff is applied
///
/// Enemies land fewer hits on a Defender.
pub(crate) fn base_enemy_stats(level: u32, templar_class: TemplarClass) -> CharacterStats {
    let health = 5 + 2 * level as i32;
    let hit_rate = if templar_class == TemplarClass::Defender {
        0.70
    } else {
        0.80
    };
    CharacterStats {
        max_health: health,
        health,
        shield: 0,
        attack: 2 + level as i32,
        hit_rate,
        critical_rate: 0.10,
        attack_direction: AttackDirection::Front,
        attack_type: AttackType::Normal,
        hit_back_attack: 0,
        belongs: Belongs::Enemy,
    }
}

/// Construct a regular enemy with one stat-trade buff from the pool
pub fn create_enemy<R: GameRng>(
    id: CardId,
    level: u32,
    templar_class: TemplarClass,
    rng: &mut R,
) -> Card {
    let mut stats = base_enemy_stats(level, templar_class);
    apply_buff(&mut stats, &regular_buff(rng.gen_range(REGULAR_POOL_SIZE)));
    Card::new(id, CardKind::Enemy { stats })
}

/// Construct an elite enemy using the archetype at `archetype_index`
///
/// Archetypes cycle round-robin across successive elite spawns; the
/// session owns the cursor.
pub fn create_elite_enemy(
    id: CardId,
    level: u32,
    templar_class: TemplarClass,
    archetype_index: usize,
) -> Card {
    let mut stats = base_enemy_stats(level, templar_class);
    apply_buff(&mut stats, &elite_buff(archetype_index % ELITE_POOL_SIZE));
    Card::new(id, CardKind::Enemy { stats })
}

/// The four regular stat-trade buffs, picked uniformly at random
fn regular_buff(index: usize) -> Buff {
    match index % REGULAR_POOL_SIZE {
        // Bulky
        0 => Buff {
            max_health: 2,
            health: 2,
            attack: -1,
            ..Default::default()
        },
        // Fierce
        1 => Buff {
            attack: 2,
            health: -2,
            ..Default::default()
        },
        // Keen
        2 => Buff {
            hit_rate: 0.20,
            health: -1,
            ..Default::default()
        },
        // Savage
        _ => Buff {
            critical_rate: 0.30,
            health: -1,
            ..Default::default()
        },
    }
}

/// The six elite archetypes
fn elite_buff(index: usize) -> Buff {
    match index {
        // Juggernaut
        0 => Buff {
            max_health: 4,
            health: 4,
            attack: 1,
            ..Default::default()
        },
        // Berserker
        1 => Buff {
            attack: 3,
            critical_rate: 0.20,
            ..Default::default()
        },
        // Sentinel
        2 => Buff {
            shield: 4,
            hit_back_attack: 2,
            ..Default::default()
        },
        // Reaver
        3 => Buff {
            attack: 1,
            attack_type: Some(AttackType::Penetrate),
            ..Default::default()
        },
        // Warcaller
        4 => Buff {
            max_health: 2,
            health: 2,
            attack_direction: Some(AttackDirection::Around),
            ..Default::default()
        },
        // Pikeman
        _ => Buff {
            hit_rate: 0.10,
            attack_direction: Some(AttackDirection::Line),
            ..Default::default()
        },
    }
}

// ==========================================
// ITEMS
// ==========================================

/// Construct an item card of the given kind and level
pub fn create_item(
    id: CardId,
    kind: ItemKind,
    level: u8,
    class: TemplarClass,
    game_level: u32,
) -> Card {
    let level = level.clamp(1, MAX_ITEM_LEVEL);
    let stats = ItemStats {
        kind,
        duration: item_duration(kind),
        weight: item_weight(kind, class),
        level,
        buff: item_buff(kind, level, class, game_level),
    };
    Card::new(id, CardKind::Item { stats })
}

/// Base duration in turns per item kind
pub(crate) fn item_duration(kind: ItemKind) -> i32 {
    match kind {
        ItemKind::Weapon => 7,
        ItemKind::Shield => 6,
        ItemKind::Potion => 5,
    }
}

/// Base weight per kind, adjusted for how natural the gear is to the class
///
/// Potions never weigh anything.
pub(crate) fn item_weight(kind: ItemKind, class: TemplarClass) -> i32 {
    match (kind, class) {
        (ItemKind::Potion, _) => 0,
        (ItemKind::Weapon, TemplarClass::Knight) => 2,
        (ItemKind::Weapon, TemplarClass::Defender) => 3,
        (ItemKind::Weapon, TemplarClass::Wizard) => 4,
        (ItemKind::Shield, TemplarClass::Defender) => 2,
        (ItemKind::Shield, TemplarClass::Knight) => 3,
        (ItemKind::Shield, TemplarClass::Wizard) => 4,
    }
}

/// Weight of an item after an upgrade merge
pub(crate) fn upgraded_weight(kind: ItemKind, level: u8) -> i32 {
    if kind == ItemKind::Potion {
        0
    } else {
        2 * i32::from(level)
    }
}

const WEAPON_ATTACK: [i32; MAX_ITEM_LEVEL as usize] = [2, 3, 4, 6];
const SHIELD_BLOCK: [i32; MAX_ITEM_LEVEL as usize] = [3, 4, 6, 9];
const POTION_HEAL: [i32; MAX_ITEM_LEVEL as usize] = [3, 5, 8, 12];

/// Buff granted by an item at the given level
///
/// Magnitudes scale with the game level so late pickups stay relevant;
/// each class gets a bonus on its signature gear.
pub fn item_buff(kind: ItemKind, level: u8, class: TemplarClass, game_level: u32) -> Buff {
    let level = level.clamp(1, MAX_ITEM_LEVEL);
    let idx = usize::from(level - 1);
    let scale = game_level as i32;
    match kind {
        ItemKind::Weapon => {
            let class_bonus = if class == TemplarClass::Knight { 1 } else { 0 };
            Buff {
                attack: WEAPON_ATTACK[idx] + scale + class_bonus,
                ..Default::default()
            }
        }
        ItemKind::Shield => {
            let class_bonus = if class == TemplarClass::Defender { 2 } else { 0 };
            Buff {
                shield: SHIELD_BLOCK[idx] + scale + class_bonus,
                ..Default::default()
            }
        }
        ItemKind::Potion => Buff {
            health: POTION_HEAL[idx] + 2 * scale,
            ..Default::default()
        },
    }
}

// ==========================================
// SPAWN CADENCE
// ==========================================

/// What to spawn at the end of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpawnSpec {
    Enemy { elite: bool },
    Item(ItemKind),
}

/// One entry of the rotating 5-slot spawn table
#[derive(Debug, Clone, Copy)]
enum SpawnSlot {
    Enemy,
    Item(ItemKind),
    /// Uniform random pick between a potion and a shield
    PotionOrShield,
}

fn spawn_slots(class: TemplarClass) -> [SpawnSlot; SPAWN_CYCLE as usize] {
    match class {
        TemplarClass::Knight => [
            SpawnSlot::Enemy,
            SpawnSlot::Item(ItemKind::Weapon),
            SpawnSlot::Enemy,
            SpawnSlot::Item(ItemKind::Shield),
            SpawnSlot::PotionOrShield,
        ],
        TemplarClass::Defender => [
            SpawnSlot::Enemy,
            SpawnSlot::Item(ItemKind::Shield),
            SpawnSlot::Enemy,
            SpawnSlot::Item(ItemKind::Weapon),
            SpawnSlot::PotionOrShield,
        ],
        TemplarClass::Wizard => [
            SpawnSlot::Enemy,
            SpawnSlot::Item(ItemKind::Weapon),
            SpawnSlot::Enemy,
            SpawnSlot::Item(ItemKind::Potion),
            SpawnSlot::PotionOrShield,
        ],
    }
}

/// Decide what the completed swipe spawns
///
/// An elite enemy replaces the slot pick exactly when `move_count` is a
/// multiple of 13; two cards spawn when `move_count % 5` is 1 or 3.
pub(crate) fn plan_spawns<R: GameRng>(
    move_count: u32,
    class: TemplarClass,
    rng: &mut R,
) -> Vec<SpawnSpec> {
    let mut plan = Vec::with_capacity(2);

    if move_count % ELITE_INTERVAL == 0 {
        plan.push(SpawnSpec::Enemy { elite: true });
    } else {
        let slot = spawn_slots(class)[(move_count % SPAWN_CYCLE) as usize];
        plan.push(match slot {
            SpawnSlot::Enemy => SpawnSpec::Enemy { elite: false },
            SpawnSlot::Item(kind) => SpawnSpec::Item(kind),
            SpawnSlot::PotionOrShield => {
                if rng.gen_range(2) == 0 {
                    SpawnSpec::Item(ItemKind::Potion)
                } else {
                    SpawnSpec::Item(ItemKind::Shield)
                }
            }
        });
    }

    if matches!(move_count % SPAWN_CYCLE, 1 | 3) {
        plan.push(SpawnSpec::Enemy { elite: false });
    }

    plan
}
