mod movement;

use crate::board::{Board, Coord};
use crate::state::{GameSession, TurnState};
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

fn coord(row: usize, col: usize) -> Coord {
    Coord::new(row, col).expect("test coordinate in range")
}

fn base_character(belongs: Belongs, health: i32, attack: i32) -> CharacterStats {
    CharacterStats {
        max_health: health,
        health,
        shield: 0,
        attack,
        hit_rate: 1.0,
        critical_rate: 0.0,
        attack_direction: AttackDirection::Front,
        attack_type: AttackType::Normal,
        hit_back_attack: 0,
        belongs,
    }
}

fn enemy_card(id: u32, health: i32, attack: i32) -> Card {
    Card::new(
        id,
        CardKind::Enemy {
            stats: base_character(Belongs::Enemy, health, attack),
        },
    )
}

fn templar_card(id: u32, class: TemplarClass, health: i32, attack: i32) -> Card {
    Card::new(
        id,
        CardKind::Templar {
            class,
            stats: base_character(Belongs::Player, health, attack),
        },
    )
}

fn item_card(id: u32, kind: ItemKind, level: u8) -> Card {
    crate::cards::create_item(id, kind, level, TemplarClass::Knight, 0)
}

/// A session with only a hand-built templar at the center, ready to swipe
fn session_with_templar(class: TemplarClass) -> GameSession {
    let mut session = GameSession::new();
    session.class = Some(class);
    let id = session.generate_card_id();
    let templar = crate::cards::create_templar(id, class);
    session
        .board
        .place(templar, coord(2, 2))
        .expect("center cell free");
    session.state = TurnState::Idle;
    session
}

/// Every active card occupies exactly one cell and is found back at it
fn assert_board_bijection(board: &Board) {
    let mut ids = Vec::new();
    for (cell, card) in board.cards() {
        assert!(card.active, "inactive card left on board");
        assert_eq!(board.find(card.id), Some(cell));
        ids.push(card.id);
    }
    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(ids.len(), unique.len(), "duplicate card on board");
}

fn assert_rates_clamped(stats: &CharacterStats) {
    assert!((0.0..=1.0).contains(&stats.hit_rate));
    assert!((0.0..=1.0).contains(&stats.critical_rate));
}
