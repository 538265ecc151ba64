//! Combat resolution
//!
//! Runs strictly after movement. All (attacker, target, direction) triples
//! are collected first in row-major scan order, then executed sequentially.
//! Combat is never simultaneous; a target that died to an earlier triple
//! silently absorbs nothing from later ones.

use crate::board::{Board, Coord, GRID_SIZE};
use crate::buffs::sync_defender_hit_back;
use crate::error::GameResult;
use crate::rng::GameRng;
use crate::turn::TurnEvent;
use crate::types::{AttackDirection, AttackType, Belongs, CardId, Direction};

/// One pending attack, discovered before any damage is applied
#[derive(Debug, Clone, Copy)]
struct AttackOrder {
    attacker: CardId,
    target: CardId,
    direction: Direction,
}

/// What kind of strike is being resolved
///
/// Only a plain strike can provoke a hit-back counter; a counter can never
/// provoke another one (explicit max depth 1), and area bursts are never
/// retaliated against.
#[derive(Debug, Clone, Copy)]
enum Strike {
    Plain,
    HitBack,
    Burst { magnitude: i32 },
}

/// Detect and execute every attack the settled board produces
pub(crate) fn resolve_combat<R: GameRng>(
    board: &mut Board,
    swipe: Direction,
    rng: &mut R,
    events: &mut Vec<TurnEvent>,
) -> GameResult<()> {
    for order in collect_orders(board, swipe) {
        // skip triples gone stale from earlier resolutions
        if board.find(order.attacker).is_none() || board.find(order.target).is_none() {
            continue;
        }
        resolve_strike(
            board,
            order.attacker,
            order.target,
            order.direction,
            Strike::Plain,
            rng,
            events,
        )?;
    }
    Ok(())
}

/// Wizard potion pickups burst against every enemy on the board
///
/// One burst per consumed potion, executed sequentially, with a forced
/// damage magnitude of `level * (game_level + 1)`.
pub(crate) fn resolve_potion_bursts<R: GameRng>(
    board: &mut Board,
    burst_levels: &[u8],
    game_level: u32,
    swipe: Direction,
    rng: &mut R,
    events: &mut Vec<TurnEvent>,
) -> GameResult<()> {
    for &level in burst_levels {
        let Some((_, templar)) = board.templar() else {
            break;
        };
        let templar_id = templar.id;
        let magnitude = i32::from(level) * (game_level as i32 + 1);
        events.push(TurnEvent::PotionBurst {
            level,
            damage: magnitude,
        });

        let enemy_ids: Vec<CardId> = board
            .cards()
            .filter(|(_, card)| card.belongs() == Some(Belongs::Enemy))
            .map(|(_, card)| card.id)
            .collect();
        for enemy in enemy_ids {
            resolve_strike(
                board,
                templar_id,
                enemy,
                swipe,
                Strike::Burst { magnitude },
                rng,
                events,
            )?;
        }
    }
    Ok(())
}

/// Remove a dead card from the board and report it
pub(crate) fn kill_card(board: &mut Board, coord: Coord, events: &mut Vec<TurnEvent>) {
    if let Some(mut card) = board.take(coord) {
        card.active = false;
        events.push(TurnEvent::CardDied { id: card.id, coord });
    }
}

// ==========================================
// ATTACK DETECTION
// ==========================================

fn collect_orders(board: &Board, swipe: Direction) -> Vec<AttackOrder> {
    let mut orders = Vec::new();

    for (coord, card) in board.cards() {
        let Some(stats) = card.character() else {
            continue;
        };
        if stats.is_dead() {
            continue;
        }
        let attacker = card.id;
        let belongs = stats.belongs;

        match stats.attack_direction {
            AttackDirection::Front => {
                if let Some(ahead) = coord.step(swipe) {
                    if let Some(target) = opposing(board, ahead, belongs) {
                        orders.push(AttackOrder {
                            attacker,
                            target,
                            direction: swipe,
                        });
                    }
                }
            }
            AttackDirection::Around => {
                for (direction, neighbor) in coord.neighbors() {
                    if let Some(target) = opposing(board, neighbor, belongs) {
                        orders.push(AttackOrder {
                            attacker,
                            target,
                            direction,
                        });
                    }
                }
            }
            AttackDirection::Line => {
                if swipe.is_horizontal() {
                    for col in 0..GRID_SIZE {
                        if col == coord.col() {
                            continue;
                        }
                        let cell = Coord::raw(coord.row(), col);
                        if let Some(target) = opposing(board, cell, belongs) {
                            let direction = if col > coord.col() {
                                Direction::Right
                            } else {
                                Direction::Left
                            };
                            orders.push(AttackOrder {
                                attacker,
                                target,
                                direction,
                            });
                        }
                    }
                } else {
                    for row in 0..GRID_SIZE {
                        if row == coord.row() {
                            continue;
                        }
                        let cell = Coord::raw(row, coord.col());
                        if let Some(target) = opposing(board, cell, belongs) {
                            let direction = if row > coord.row() {
                                Direction::Down
                            } else {
                                Direction::Up
                            };
                            orders.push(AttackOrder {
                                attacker,
                                target,
                                direction,
                            });
                        }
                    }
                }
            }
        }
    }

    orders
}

/// The living opposing character at `coord`, if any
fn opposing(board: &Board, coord: Coord, belongs: Belongs) -> Option<CardId> {
    let card = board.at(coord)?;
    let stats = card.character()?;
    (stats.belongs != belongs && !stats.is_dead()).then_some(card.id)
}

// ==========================================
// DAMAGE PIPELINE
// ==========================================

/// Resolve one strike: hit roll, crit roll, shield absorption, death,
/// and the hit-back counter on both the miss and survived-hit branches.
fn resolve_strike<R: GameRng>(
    board: &mut Board,
    attacker_id: CardId,
    target_id: CardId,
    direction: Direction,
    strike: Strike,
    rng: &mut R,
    events: &mut Vec<TurnEvent>,
) -> GameResult<()> {
    let is_hit_back = matches!(strike, Strike::HitBack);

    let Some(att_coord) = board.find(attacker_id) else {
        return Ok(());
    };
    let (hit_rate, critical_rate, base_damage, attack_type) = {
        let Some(stats) = board.at(att_coord).and_then(|c| c.character()) else {
            return Ok(());
        };
        if stats.is_dead() {
            return Ok(());
        }
        let base = match strike {
            Strike::Plain => stats.attack,
            Strike::HitBack => stats.hit_back_attack,
            Strike::Burst { magnitude } => magnitude,
        };
        (stats.hit_rate, stats.critical_rate, base, stats.attack_type)
    };

    if !rng.chance(hit_rate) {
        events.push(TurnEvent::AttackMissed {
            attacker: attacker_id,
            target: target_id,
            is_hit_back,
        });
        // a dodged attack still provokes the counter
        maybe_hit_back(board, target_id, attacker_id, direction, strike, rng, events)?;
        return Ok(());
    }

    let critical = rng.chance(critical_rate);
    let damage = if critical { base_damage * 2 } else { base_damage };
    let penetrated = attack_type == AttackType::Penetrate;

    let Some(tgt_coord) = board.find(target_id) else {
        return Ok(());
    };
    let mut dead = false;
    let mut remaining_shield = 0;
    let mut remaining_health = 0;
    if let Some(card) = board.at_mut(tgt_coord) {
        if let Some(stats) = card.character_mut() {
            if penetrated {
                stats.health -= damage;
            } else {
                let absorbed = damage.min(stats.shield);
                stats.shield -= absorbed;
                stats.health -= damage - absorbed;
            }
            stats.health = stats.health.max(0);
        }
        sync_defender_hit_back(card);
        if let Some(stats) = card.character() {
            remaining_shield = stats.shield;
            remaining_health = stats.health;
            dead = stats.is_dead();
        }
    }

    events.push(TurnEvent::DamageDealt {
        attacker: attacker_id,
        target: target_id,
        damage,
        critical,
        penetrated,
        is_hit_back,
        remaining_shield,
        remaining_health,
    });

    if dead {
        kill_card(board, tgt_coord, events);
        return Ok(());
    }

    maybe_hit_back(board, target_id, attacker_id, direction, strike, rng, events)
}

/// Fire the single counter-attack a struck card is owed, if eligible
fn maybe_hit_back<R: GameRng>(
    board: &mut Board,
    retaliator_id: CardId,
    original_attacker_id: CardId,
    direction: Direction,
    provoking: Strike,
    rng: &mut R,
    events: &mut Vec<TurnEvent>,
) -> GameResult<()> {
    if !matches!(provoking, Strike::Plain) {
        return Ok(());
    }
    let eligible = board
        .find(retaliator_id)
        .and_then(|c| board.at(c))
        .and_then(|card| card.character())
        .map_or(false, |stats| !stats.is_dead() && stats.hit_back_attack > 0);
    if !eligible {
        return Ok(());
    }
    resolve_strike(
        board,
        retaliator_id,
        original_attacker_id,
        direction.opposite(),
        Strike::HitBack,
        rng,
        events,
    )
}
