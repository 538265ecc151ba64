//! Buff application and reversal
//!
//! Numeric fields merge additively; direction/type overrides overwrite.
//! Hit and crit rates are re-clamped to [0, 1] after every application,
//! not checked once at construction.

use crate::types::{Buff, Card, CardKind, CharacterStats, TemplarClass};

/// Apply a buff's deltas to a character
///
/// `max_health` is applied before `health` so a combined buff heals into
/// the new maximum. A buff that drops health to 0 or below leaves the
/// character dead; the caller routes it through the standard death path.
pub fn apply_buff(stats: &mut CharacterStats, buff: &Buff) {
    stats.max_health += buff.max_health;
    stats.health = (stats.health + buff.health).min(stats.max_health);
    stats.shield += buff.shield;
    stats.attack += buff.attack;
    stats.hit_rate += buff.hit_rate;
    stats.critical_rate += buff.critical_rate;
    stats.hit_back_attack += buff.hit_back_attack;

    if let Some(dir) = buff.attack_direction {
        stats.attack_direction = dir;
    }
    if let Some(ty) = buff.attack_type {
        stats.attack_type = ty;
    }

    clamp_rates(stats);
}

/// Reverse an expired item's buff
///
/// Shield gained from the item is kept; direction/type overrides fall back
/// to the defaults. Health may drop to 0 here, which kills the character
/// exactly like combat damage would.
pub fn remove_buff(stats: &mut CharacterStats, buff: &Buff) {
    stats.max_health -= buff.max_health;
    stats.health = (stats.health - buff.health).min(stats.max_health);
    stats.attack -= buff.attack;
    stats.hit_rate -= buff.hit_rate;
    stats.critical_rate -= buff.critical_rate;
    stats.hit_back_attack -= buff.hit_back_attack;

    if buff.attack_direction.is_some() {
        stats.attack_direction = Default::default();
    }
    if buff.attack_type.is_some() {
        stats.attack_type = Default::default();
    }

    clamp_rates(stats);
}

/// A Defender's counter damage tracks its current shield
///
/// Called after anything that can change the templar's shield: buffs,
/// expiry, shield absorption in combat.
pub fn sync_defender_hit_back(card: &mut Card) {
    if let CardKind::Templar {
        class: TemplarClass::Defender,
        stats,
    } = &mut card.kind
    {
        stats.hit_back_attack = stats.shield;
    }
}

fn clamp_rates(stats: &mut CharacterStats) {
    stats.hit_rate = stats.hit_rate.clamp(0.0, 1.0);
    stats.critical_rate = stats.critical_rate.clamp(0.0, 1.0);
}
