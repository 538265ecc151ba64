//! Directional movement resolution
//!
//! Two passes per swipe, lanes ordered nearest-wall-first so chain slides
//! settle correctly (classic 2048-style resolution): a slide pass that
//! packs every card toward the wall, then an interaction pass where cards
//! walk into what now blocks them. Templars equip items, same-kind items
//! stack, and everything else stops the walk.

use crate::board::{Board, Coord, GRID_SIZE};
use crate::buffs::{apply_buff, sync_defender_hit_back};
use crate::cards::{item_buff, item_duration, upgraded_weight, MAX_ITEM_LEVEL};
use crate::error::GameResult;
use crate::turn::TurnEvent;
use crate::types::{Card, CardId, Direction, ItemKind, TemplarClass};

/// Side effects of one movement resolution
#[derive(Debug, Default)]
pub(crate) struct MovementOutcome {
    /// Non-potion items picked up by the templar, in pickup order
    pub equipped: Vec<Card>,
    /// Levels of potions a Wizard converted into pending area bursts
    pub burst_levels: Vec<u8>,
}

/// Resolve one swipe's worth of sliding and merging
///
/// Emits `CardMoved` events for every card that changed cells (animations
/// run concurrently, so they are batched ahead of the interaction events),
/// followed by equip/upgrade/consume events in the order they happened.
pub(crate) fn resolve_movement(
    board: &mut Board,
    dir: Direction,
    class: TemplarClass,
    game_level: u32,
    events: &mut Vec<TurnEvent>,
) -> GameResult<MovementOutcome> {
    let before: Vec<(CardId, Coord)> = board.cards().map(|(c, card)| (card.id, c)).collect();
    let order = scan_order(dir);

    slide_pass(board, dir, &order)?;

    let mut outcome = MovementOutcome::default();
    let mut interactions = Vec::new();
    interaction_pass(
        board,
        dir,
        &order,
        class,
        game_level,
        &mut outcome,
        &mut interactions,
    )?;

    for (id, from) in before {
        if let Some(to) = board.find(id) {
            if to != from {
                events.push(TurnEvent::CardMoved { id, from, to });
            }
        }
    }
    events.append(&mut interactions);

    Ok(outcome)
}

/// Lane iteration order: cells nearest the destination wall first
///
/// UP/LEFT scan from index 1 upward, DOWN/RIGHT from index N-2 downward;
/// cells already on the wall never move.
fn scan_order(dir: Direction) -> Vec<Coord> {
    let mut order = Vec::with_capacity(GRID_SIZE * (GRID_SIZE - 1));
    match dir {
        Direction::Up => {
            for row in 1..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    order.push(Coord::raw(row, col));
                }
            }
        }
        Direction::Down => {
            for row in (0..GRID_SIZE - 1).rev() {
                for col in 0..GRID_SIZE {
                    order.push(Coord::raw(row, col));
                }
            }
        }
        Direction::Left => {
            for col in 1..GRID_SIZE {
                for row in 0..GRID_SIZE {
                    order.push(Coord::raw(row, col));
                }
            }
        }
        Direction::Right => {
            for col in (0..GRID_SIZE - 1).rev() {
                for row in 0..GRID_SIZE {
                    order.push(Coord::raw(row, col));
                }
            }
        }
    }
    order
}

/// Pack every card toward the wall, stopping at the first occupied cell
fn slide_pass(board: &mut Board, dir: Direction, order: &[Coord]) -> GameResult<()> {
    for &from in order {
        if board.is_empty_cell(from) {
            continue;
        }
        let mut pos = from;
        while let Some(next) = pos.step(dir) {
            if !board.is_empty_cell(next) {
                break;
            }
            pos = next;
        }
        if pos != from {
            if let Some(card) = board.take(from) {
                board.place(card, pos)?;
            }
        }
    }
    Ok(())
}

/// Walk each card into whatever now blocks it and resolve the contact
fn interaction_pass(
    board: &mut Board,
    dir: Direction,
    order: &[Coord],
    class: TemplarClass,
    game_level: u32,
    outcome: &mut MovementOutcome,
    events: &mut Vec<TurnEvent>,
) -> GameResult<()> {
    for &start in order {
        let (walker_is_templar, walker_item_kind) = match board.at(start) {
            Some(card) => (card.is_templar(), card.item().map(|s| s.kind)),
            None => continue,
        };

        let mut pos = start;
        loop {
            let Some(next) = pos.step(dir) else { break };

            if board.is_empty_cell(next) {
                if let Some(card) = board.take(pos) {
                    board.place(card, next)?;
                }
                pos = next;
                continue;
            }

            let blocker_item_kind = board.at(next).and_then(|c| c.item().map(|s| s.kind));

            if walker_is_templar && blocker_item_kind.is_some() {
                if let Some(item) = board.take(next) {
                    equip_item(board, pos, item, class, game_level, outcome, events);
                }
                // cell ahead is now free; the walk repeats through it
                continue;
            }

            if let (Some(kind), Some(blocked)) = (walker_item_kind, blocker_item_kind) {
                if kind == blocked {
                    if let Some(consumed) = board.take(pos) {
                        upgrade_item(board, next, &consumed, class, game_level, events);
                    }
                    // the walker merged away
                    break;
                }
            }

            // anything else blocks: rest one cell short
            break;
        }
    }
    Ok(())
}

/// The templar slides over an item and picks it up
///
/// Potions are consumed on contact: a Wizard banks an area-burst charge,
/// everyone else drinks the heal. Other items buff the templar, add their
/// weight, and join the equipped set.
fn equip_item(
    board: &mut Board,
    templar_pos: Coord,
    item: Card,
    class: TemplarClass,
    game_level: u32,
    outcome: &mut MovementOutcome,
    events: &mut Vec<TurnEvent>,
) {
    let Some(istats) = item.item() else { return };

    if istats.kind == ItemKind::Potion {
        if class == TemplarClass::Wizard {
            outcome.burst_levels.push(istats.level);
            events.push(TurnEvent::PotionConsumed {
                id: item.id,
                level: istats.level,
                healed: 0,
            });
        } else {
            let mut healed = 0;
            if let Some(stats) = board.at_mut(templar_pos).and_then(|c| c.character_mut()) {
                let health_before = stats.health;
                apply_buff(stats, &istats.buff);
                healed = stats.health - health_before;
            }
            events.push(TurnEvent::PotionConsumed {
                id: item.id,
                level: istats.level,
                healed,
            });
        }
        return;
    }

    if let Some(card) = board.at_mut(templar_pos) {
        if let Some(stats) = card.character_mut() {
            apply_buff(stats, &istats.buff);
        }
        sync_defender_hit_back(card);
    }
    events.push(TurnEvent::ItemEquipped {
        id: item.id,
        kind: istats.kind,
        level: istats.level,
    });
    outcome.equipped.push(item);
}

/// A moving item stacks onto the same-kind item blocking it
///
/// The stationary card levels up (cap 4), refreshes its duration, takes
/// the post-upgrade weight, and recomputes its buff; the mover is gone.
fn upgrade_item(
    board: &mut Board,
    stationary: Coord,
    consumed: &Card,
    class: TemplarClass,
    game_level: u32,
    events: &mut Vec<TurnEvent>,
) {
    let Some(consumed_stats) = consumed.item() else { return };
    let mut upgraded = None;

    if let Some(stats) = board.at_mut(stationary).and_then(|c| c.item_mut()) {
        let level = (stats.level + consumed_stats.level).min(MAX_ITEM_LEVEL);
        stats.level = level;
        stats.duration = item_duration(stats.kind);
        stats.weight = upgraded_weight(stats.kind, level);
        stats.buff = item_buff(stats.kind, level, class, game_level);
        upgraded = Some(level);
    }

    if let (Some(level), Some(card)) = (upgraded, board.at(stationary)) {
        events.push(TurnEvent::ItemUpgraded {
            id: card.id,
            consumed: consumed.id,
            level,
        });
    }
}
