//! View types for UI serialization
//!
//! Flattened snapshots of the session for the presentation layer; the UI
//! never feeds these back into the core.

use serde::{Deserialize, Serialize};

use crate::board::GRID_SIZE;
use crate::state::{GameSession, TurnState};
use crate::types::{Card, CardId, CardKind, CharacterStats, ItemKind, TemplarClass};

/// View of an item, on the board or equipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: CardId,
    pub kind: ItemKind,
    pub level: u8,
    pub duration: i32,
    pub weight: i32,
}

impl ItemView {
    pub fn from_card(card: &Card) -> Option<Self> {
        card.item().map(|stats| Self {
            id: card.id,
            kind: stats.kind,
            level: stats.level,
            duration: stats.duration,
            weight: stats.weight,
        })
    }
}

/// View of any card for the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: CardId,
    /// "templar", "enemy" or "item"
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<CharacterStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemView>,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        let kind = match card.kind {
            CardKind::Templar { .. } => "templar",
            CardKind::Enemy { .. } => "enemy",
            CardKind::Item { .. } => "item",
        };
        Self {
            id: card.id,
            kind: String::from(kind),
            character: card.character().cloned(),
            item: ItemView::from_card(card),
        }
    }
}

/// The complete game view sent to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// 25 row-major cells, None = empty
    pub grid: Vec<Option<CardView>>,
    pub state: TurnState,
    pub class: Option<TemplarClass>,
    pub move_count: u32,
    pub level: u32,
    pub carried_weight: i32,
    pub overweight: bool,
    pub equipped: Vec<ItemView>,
}

impl GameView {
    pub fn from_session(session: &GameSession) -> Self {
        let mut grid: Vec<Option<CardView>> = vec![None; GRID_SIZE * GRID_SIZE];
        for (coord, card) in session.board.cards() {
            grid[coord.row() * GRID_SIZE + coord.col()] = Some(CardView::from(card));
        }
        Self {
            grid,
            state: session.state,
            class: session.class,
            move_count: session.move_count,
            level: session.level(),
            carried_weight: session.carried_weight(),
            overweight: session.overweight(),
            equipped: session
                .equipped
                .iter()
                .filter_map(ItemView::from_card)
                .collect(),
        }
    }
}
