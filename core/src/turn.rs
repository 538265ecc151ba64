//! Turn sequencer
//!
//! One swipe runs the full pipeline: overweight check, movement, potion
//! bursts, combat, duration decay, then spawns. The whole turn resolves
//! synchronously and is not cancellable; everything presentation needs to
//! animate comes back as the flat [`TurnOutcome`] event list instead of a
//! callback registry.

use serde::{Deserialize, Serialize};

use crate::board::Coord;
use crate::buffs::{remove_buff, sync_defender_hit_back};
use crate::cards::{self, SpawnSpec};
use crate::combat::{self, kill_card};
use crate::error::{GameError, GameResult};
use crate::log;
use crate::movement;
use crate::rng::GameRng;
use crate::state::{GameSession, TurnState, WEIGHT_LIMIT};
use crate::types::{CardId, Direction, ItemKind, TemplarClass};
use crate::view::{CardView, ItemView};

/// Discrete notifications generated while a turn resolves, for UI playback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum TurnEvent {
    #[serde(rename_all = "camelCase")]
    ClassChosen { class: TemplarClass },
    #[serde(rename_all = "camelCase")]
    Overweight {
        weight: i32,
        damage: i32,
        remaining_health: i32,
    },
    #[serde(rename_all = "camelCase")]
    CardMoved { id: CardId, from: Coord, to: Coord },
    #[serde(rename_all = "camelCase")]
    ItemEquipped {
        id: CardId,
        kind: ItemKind,
        level: u8,
    },
    #[serde(rename_all = "camelCase")]
    ItemUpgraded {
        id: CardId,
        consumed: CardId,
        level: u8,
    },
    #[serde(rename_all = "camelCase")]
    PotionConsumed { id: CardId, level: u8, healed: i32 },
    #[serde(rename_all = "camelCase")]
    PotionBurst { level: u8, damage: i32 },
    #[serde(rename_all = "camelCase")]
    AttackMissed {
        attacker: CardId,
        target: CardId,
        is_hit_back: bool,
    },
    #[serde(rename_all = "camelCase")]
    DamageDealt {
        attacker: CardId,
        target: CardId,
        damage: i32,
        critical: bool,
        penetrated: bool,
        is_hit_back: bool,
        remaining_shield: i32,
        remaining_health: i32,
    },
    #[serde(rename_all = "camelCase")]
    CardDied { id: CardId, coord: Coord },
    #[serde(rename_all = "camelCase")]
    ItemExpired {
        id: CardId,
        kind: ItemKind,
        equipped: bool,
    },
    #[serde(rename_all = "camelCase")]
    ItemsChanged {
        added: Vec<ItemView>,
        removed: Vec<CardId>,
    },
    #[serde(rename_all = "camelCase")]
    WeightChanged { weight: i32, overweight: bool },
    #[serde(rename_all = "camelCase")]
    CardSpawned {
        card: CardView,
        coord: Coord,
        elite: bool,
    },
    #[serde(rename_all = "camelCase")]
    TurnComplete { move_count: u32, level: u32 },
    #[serde(rename_all = "camelCase")]
    GameOver { move_count: u32 },
}

/// Everything one resolved swipe produced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub move_count: u32,
    pub level: u32,
    /// State the session settled into: `Idle` or `GameOver`
    pub state: TurnState,
    pub events: Vec<TurnEvent>,
}

/// Resolve one swipe, or return None if the session is not accepting input
///
/// Out-of-turn swipes are an expected non-error: they are dropped, never
/// queued. A turn that starts always runs to completion; `move_count`
/// increments even when nothing on the board can move.
pub fn resolve_swipe<R: GameRng>(
    session: &mut GameSession,
    direction: Direction,
    rng: &mut R,
) -> GameResult<Option<TurnOutcome>> {
    if session.state != TurnState::Idle {
        log::debug("swipe", "ignored: session not idle");
        return Ok(None);
    }
    let class = session.class.ok_or(GameError::ClassNotChosen)?;

    session.state = TurnState::Swiping;
    session.move_count += 1;
    log::action("swipe", &format!("{:?} move {}", direction, session.move_count));

    let mut events = Vec::new();

    apply_overweight_penalty(session, &mut events);

    let game_level = session.level();
    let moved = movement::resolve_movement(
        &mut session.board,
        direction,
        class,
        game_level,
        &mut events,
    )?;

    if !moved.burst_levels.is_empty() {
        combat::resolve_potion_bursts(
            &mut session.board,
            &moved.burst_levels,
            game_level,
            direction,
            rng,
            &mut events,
        )?;
    }

    if !moved.equipped.is_empty() {
        let added: Vec<ItemView> = moved.equipped.iter().filter_map(ItemView::from_card).collect();
        session.equipped.extend(moved.equipped);
        events.push(TurnEvent::ItemsChanged {
            added,
            removed: Vec::new(),
        });
        push_weight_event(session, &mut events);
    }

    combat::resolve_combat(&mut session.board, direction, rng, &mut events)?;

    decay_items(session, &mut events);

    spawn_cards(session, rng, &mut events)?;

    let state = if session.board.templar().is_some() {
        events.push(TurnEvent::TurnComplete {
            move_count: session.move_count,
            level: session.level(),
        });
        TurnState::Idle
    } else {
        events.push(TurnEvent::GameOver {
            move_count: session.move_count,
        });
        TurnState::GameOver
    };
    session.state = state;

    Ok(Some(TurnOutcome {
        move_count: session.move_count,
        level: session.level(),
        state,
        events,
    }))
}

/// Carrying too much costs 1 health before anything slides
///
/// The penalty bypasses shield entirely. A templar killed here is off the
/// board before movement; the rest of the turn still resolves.
fn apply_overweight_penalty(session: &mut GameSession, events: &mut Vec<TurnEvent>) {
    let weight = session.carried_weight();
    if weight < WEIGHT_LIMIT {
        return;
    }
    let Some((coord, _)) = session.board.templar() else {
        return;
    };

    let mut dead = false;
    let mut remaining_health = 0;
    if let Some(stats) = session.board.at_mut(coord).and_then(|c| c.character_mut()) {
        stats.health = (stats.health - 1).max(0);
        remaining_health = stats.health;
        dead = stats.is_dead();
    }
    events.push(TurnEvent::Overweight {
        weight,
        damage: 1,
        remaining_health,
    });
    if dead {
        kill_card(&mut session.board, coord, events);
    }
}

/// Tick every item's duration and drop the expired ones
///
/// Board items vanish outright; equipped items additionally reverse their
/// buff (shield is kept) and shed their weight.
fn decay_items(session: &mut GameSession, events: &mut Vec<TurnEvent>) {
    let item_coords: Vec<Coord> = session
        .board
        .cards()
        .filter(|(_, card)| card.is_item())
        .map(|(coord, _)| coord)
        .collect();
    for coord in item_coords {
        let mut expired = false;
        if let Some(stats) = session.board.at_mut(coord).and_then(|c| c.item_mut()) {
            stats.duration -= 1;
            expired = stats.duration <= 0;
        }
        if expired {
            if let Some(mut card) = session.board.take(coord) {
                card.active = false;
                if let Some(stats) = card.item() {
                    events.push(TurnEvent::ItemExpired {
                        id: card.id,
                        kind: stats.kind,
                        equipped: false,
                    });
                }
            }
        }
    }

    let mut expired_cards = Vec::new();
    let mut index = 0;
    while index < session.equipped.len() {
        let expired = match session.equipped[index].item_mut() {
            Some(stats) => {
                stats.duration -= 1;
                stats.duration <= 0
            }
            None => false,
        };
        if expired {
            let mut card = session.equipped.remove(index);
            card.active = false;
            expired_cards.push(card);
        } else {
            index += 1;
        }
    }
    if expired_cards.is_empty() {
        return;
    }

    let mut removed = Vec::new();
    for card in &expired_cards {
        let Some(istats) = card.item() else { continue };
        events.push(TurnEvent::ItemExpired {
            id: card.id,
            kind: istats.kind,
            equipped: true,
        });
        removed.push(card.id);

        if let Some((coord, _)) = session.board.templar() {
            let mut died = false;
            if let Some(templar) = session.board.at_mut(coord) {
                if let Some(stats) = templar.character_mut() {
                    remove_buff(stats, &istats.buff);
                    stats.health = stats.health.max(0);
                    died = stats.is_dead();
                }
                sync_defender_hit_back(templar);
            }
            if died {
                kill_card(&mut session.board, coord, events);
            }
        }
    }
    events.push(TurnEvent::ItemsChanged {
        added: Vec::new(),
        removed,
    });
    push_weight_event(session, events);
}

/// Spawn the card(s) the completed swipe is owed, on random empty cells
fn spawn_cards<R: GameRng>(
    session: &mut GameSession,
    rng: &mut R,
    events: &mut Vec<TurnEvent>,
) -> GameResult<()> {
    let class = session.class.ok_or(GameError::ClassNotChosen)?;
    let level = session.level();

    for spec in cards::plan_spawns(session.move_count, class, rng) {
        let empties = session.board.empty_cells();
        if empties.is_empty() {
            log::debug("spawn", "board full, skipping");
            continue;
        }
        let coord = empties[rng.gen_range(empties.len())];
        let id = session.generate_card_id();
        let (card, elite) = match spec {
            SpawnSpec::Enemy { elite: true } => {
                let archetype = session.next_elite_archetype();
                (cards::create_elite_enemy(id, level, class, archetype), true)
            }
            SpawnSpec::Enemy { elite: false } => {
                (cards::create_enemy(id, level, class, rng), false)
            }
            SpawnSpec::Item(kind) => (cards::create_item(id, kind, 1, class, level), false),
        };
        events.push(TurnEvent::CardSpawned {
            card: CardView::from(&card),
            coord,
            elite,
        });
        session.board.place(card, coord)?;
    }
    Ok(())
}

fn push_weight_event(session: &GameSession, events: &mut Vec<TurnEvent>) {
    events.push(TurnEvent::WeightChanged {
        weight: session.carried_weight(),
        overweight: session.overweight(),
    });
}
