use crate::board::Board;
use crate::movement::resolve_movement;
use crate::tests::*;
use crate::turn::TurnEvent;
use crate::types::{Direction, ItemKind, TemplarClass};

fn run(
    board: &mut Board,
    dir: Direction,
    class: TemplarClass,
) -> (crate::movement::MovementOutcome, Vec<TurnEvent>) {
    let mut events = Vec::new();
    let outcome = resolve_movement(board, dir, class, 0, &mut events).expect("movement resolves");
    assert_board_bijection(board);
    (outcome, events)
}

#[test]
fn test_single_card_slides_to_the_wall() {
    let mut board = Board::new();
    board
        .place(templar_card(1, TemplarClass::Knight, 10, 3), coord(2, 2))
        .expect("free");

    let (_, events) = run(&mut board, Direction::Right, TemplarClass::Knight);

    assert_eq!(board.find(1), Some(coord(2, 4)));
    assert!(events.iter().any(|e| matches!(
        e,
        TurnEvent::CardMoved { id: 1, from, to } if *from == coord(2, 2) && *to == coord(2, 4)
    )));
}

#[test]
fn test_lane_packs_nearest_wall_first() {
    let mut board = Board::new();
    board.place(enemy_card(1, 5, 2), coord(2, 0)).expect("free");
    board.place(enemy_card(2, 5, 2), coord(2, 2)).expect("free");

    run(&mut board, Direction::Right, TemplarClass::Knight);

    // the card nearer the wall settles first; the other packs behind it
    assert_eq!(board.find(2), Some(coord(2, 4)));
    assert_eq!(board.find(1), Some(coord(2, 3)));
}

#[test]
fn test_blocked_board_emits_no_moves() {
    let mut board = Board::new();
    board
        .place(templar_card(1, TemplarClass::Knight, 10, 3), coord(2, 3))
        .expect("free");
    board.place(enemy_card(2, 5, 2), coord(2, 4)).expect("free");

    let (_, events) = run(&mut board, Direction::Right, TemplarClass::Knight);

    assert_eq!(board.find(1), Some(coord(2, 3)));
    assert_eq!(board.find(2), Some(coord(2, 4)));
    assert!(!events
        .iter()
        .any(|e| matches!(e, TurnEvent::CardMoved { .. })));
}

#[test]
fn test_same_kind_items_merge_and_cap_at_four() {
    let mut board = Board::new();
    board
        .place(item_card(1, ItemKind::Weapon, 2), coord(2, 2))
        .expect("free");
    board
        .place(item_card(2, ItemKind::Weapon, 3), coord(2, 3))
        .expect("free");

    let (_, events) = run(&mut board, Direction::Left, TemplarClass::Knight);

    // one weapon survives at the wall, level capped at 4
    assert_eq!(board.card_count(), 1);
    let merged = board.at(coord(2, 0)).expect("merged weapon at the wall");
    assert_eq!(merged.id, 1);
    let stats = merged.item().expect("item stats");
    assert_eq!(stats.level, 4);
    assert_eq!(stats.weight, 8);
    assert_eq!(stats.duration, 7);
    assert!(events.iter().any(|e| matches!(
        e,
        TurnEvent::ItemUpgraded { id: 1, consumed: 2, level: 4 }
    )));
}

#[test]
fn test_low_level_merge_sums_levels() {
    let mut board = Board::new();
    board
        .place(item_card(1, ItemKind::Shield, 1), coord(0, 1))
        .expect("free");
    board
        .place(item_card(2, ItemKind::Shield, 1), coord(3, 1))
        .expect("free");

    run(&mut board, Direction::Up, TemplarClass::Knight);

    let merged = board.at(coord(0, 1)).expect("merged shield");
    assert_eq!(merged.item().map(|s| s.level), Some(2));
    assert_eq!(merged.item().map(|s| s.weight), Some(4));
}

#[test]
fn test_different_item_kinds_block_instead_of_merging() {
    let mut board = Board::new();
    board
        .place(item_card(1, ItemKind::Weapon, 1), coord(2, 3))
        .expect("free");
    board
        .place(item_card(2, ItemKind::Shield, 1), coord(2, 1))
        .expect("free");

    run(&mut board, Direction::Right, TemplarClass::Knight);

    assert_eq!(board.find(1), Some(coord(2, 4)));
    assert_eq!(board.find(2), Some(coord(2, 3)));
    assert_eq!(board.card_count(), 2);
}

#[test]
fn test_templar_equips_item_and_slides_through() {
    let mut board = Board::new();
    board
        .place(templar_card(1, TemplarClass::Knight, 10, 3), coord(2, 2))
        .expect("free");
    board
        .place(item_card(2, ItemKind::Weapon, 1), coord(2, 4))
        .expect("free");

    let (outcome, events) = run(&mut board, Direction::Right, TemplarClass::Knight);

    // the weapon is gone and the templar rests where it was
    assert_eq!(board.find(1), Some(coord(2, 4)));
    assert_eq!(board.find(2), None);
    assert_eq!(outcome.equipped.len(), 1);
    assert_eq!(outcome.equipped[0].id, 2);
    assert!(events.iter().any(|e| matches!(
        e,
        TurnEvent::ItemEquipped { id: 2, kind: ItemKind::Weapon, level: 1 }
    )));

    // knight weapon buff at game level 0: +3 attack
    let stats = board
        .at(coord(2, 4))
        .and_then(|c| c.character())
        .expect("templar stats");
    assert_eq!(stats.attack, 6);
}

#[test]
fn test_templar_multi_equips_in_one_slide() {
    let mut board = Board::new();
    board
        .place(templar_card(1, TemplarClass::Knight, 10, 3), coord(2, 0))
        .expect("free");
    board
        .place(item_card(2, ItemKind::Weapon, 1), coord(2, 3))
        .expect("free");
    board
        .place(item_card(3, ItemKind::Shield, 1), coord(2, 4))
        .expect("free");

    let (outcome, _) = run(&mut board, Direction::Right, TemplarClass::Knight);

    assert_eq!(board.find(1), Some(coord(2, 4)));
    assert_eq!(outcome.equipped.len(), 2);
    assert_eq!(board.card_count(), 1);
}

#[test]
fn test_wizard_banks_potion_as_burst_charge() {
    let mut board = Board::new();
    board
        .place(templar_card(1, TemplarClass::Wizard, 8, 2), coord(2, 3))
        .expect("free");
    board
        .place(item_card(2, ItemKind::Potion, 2), coord(2, 4))
        .expect("free");

    let (outcome, events) = run(&mut board, Direction::Right, TemplarClass::Wizard);

    assert_eq!(outcome.burst_levels, vec![2]);
    assert!(outcome.equipped.is_empty());
    assert_eq!(board.find(2), None);
    assert!(events.iter().any(|e| matches!(
        e,
        TurnEvent::PotionConsumed { id: 2, level: 2, healed: 0 }
    )));
}

#[test]
fn test_non_wizard_drinks_potion_immediately() {
    let mut board = Board::new();
    let mut templar = templar_card(1, TemplarClass::Knight, 10, 3);
    if let Some(stats) = templar.character_mut() {
        stats.health = 5;
    }
    board.place(templar, coord(2, 3)).expect("free");
    board
        .place(item_card(2, ItemKind::Potion, 1), coord(2, 4))
        .expect("free");

    let (outcome, events) = run(&mut board, Direction::Right, TemplarClass::Knight);

    assert!(outcome.burst_levels.is_empty());
    assert!(outcome.equipped.is_empty());
    // level 1 potion at game level 0 heals 3
    let stats = board
        .at(coord(2, 4))
        .and_then(|c| c.character())
        .expect("templar stats");
    assert_eq!(stats.health, 8);
    assert!(events.iter().any(|e| matches!(
        e,
        TurnEvent::PotionConsumed { id: 2, level: 1, healed: 3 }
    )));
}

#[test]
fn test_item_sliding_into_templar_blocks() {
    let mut board = Board::new();
    board
        .place(templar_card(1, TemplarClass::Knight, 10, 3), coord(2, 4))
        .expect("free");
    board
        .place(item_card(2, ItemKind::Weapon, 1), coord(2, 0))
        .expect("free");

    let (outcome, _) = run(&mut board, Direction::Right, TemplarClass::Knight);

    // pickups only happen when the templar is the one moving
    assert!(outcome.equipped.is_empty());
    assert_eq!(board.find(2), Some(coord(2, 3)));
}

#[test]
fn test_vertical_swipe_uses_column_lanes() {
    let mut board = Board::new();
    board.place(enemy_card(1, 5, 2), coord(1, 2)).expect("free");
    board.place(enemy_card(2, 5, 2), coord(4, 2)).expect("free");

    run(&mut board, Direction::Down, TemplarClass::Knight);

    assert_eq!(board.find(2), Some(coord(4, 2)));
    assert_eq!(board.find(1), Some(coord(3, 2)));
}
