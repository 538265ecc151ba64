//! Session state and the turn state machine

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord};
use crate::cards;
use crate::error::{GameError, GameResult};
use crate::rng::GameRng;
use crate::turn::TurnEvent;
use crate::types::{Card, CardId, ItemKind, TemplarClass};
use crate::view::CardView;

/// Carried weight at or above this costs the templar health each turn
pub const WEIGHT_LIMIT: i32 = 13;
/// The game level (stat/damage scaling factor) rises every 5 moves
pub const MOVES_PER_LEVEL: u32 = 5;
/// An enemy spawn is elite exactly when move_count hits this cadence
pub const ELITE_INTERVAL: u32 = 13;

/// The turn state machine
///
/// Swipes are accepted only while `Idle`; everything else ignores input
/// (not queued). `Swiping` is the sole concurrency guard the core needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnState {
    /// Pre-class-selection
    Prologue,
    /// Accepting input
    Idle,
    /// A turn is resolving; input is ignored
    Swiping,
    /// Terminal; only an external restart leaves this state
    GameOver,
}

/// Per-match state owned by the turn sequencer
///
/// Threaded explicitly through the resolvers and factories; there is no
/// process-wide singleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub board: Board,
    /// Chosen once at start, immutable thereafter
    pub class: Option<TemplarClass>,
    /// Increments once per completed swipe
    pub move_count: u32,
    pub state: TurnState,
    /// Non-potion items currently buffing the templar
    pub equipped: Vec<Card>,
    /// Round-robin index into the elite archetype pool
    pub elite_cursor: usize,
    /// Counter for generating unique card IDs
    pub next_card_id: CardId,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            class: None,
            move_count: 0,
            state: TurnState::Prologue,
            equipped: Vec::new(),
            elite_cursor: 0,
            next_card_id: 1,
        }
    }

    /// Bootstrap the match: pick the class and seed the board
    ///
    /// Places the templar at the center with a starter enemy and weapon on
    /// random empty cells. Callable exactly once, in the prologue.
    pub fn choose_class<R: GameRng>(
        &mut self,
        class: TemplarClass,
        rng: &mut R,
    ) -> GameResult<Vec<TurnEvent>> {
        if self.state != TurnState::Prologue {
            return Err(GameError::ClassAlreadyChosen);
        }
        self.class = Some(class);

        let mut events = vec![TurnEvent::ClassChosen { class }];

        let templar = cards::create_templar(self.generate_card_id(), class);
        let center = Coord::new(2, 2)?;
        events.push(TurnEvent::CardSpawned {
            card: CardView::from(&templar),
            coord: center,
            elite: false,
        });
        self.board.place(templar, center)?;

        let enemy = cards::create_enemy(self.generate_card_id(), 0, class, rng);
        self.place_at_random(enemy, rng, &mut events)?;
        let weapon = cards::create_item(self.generate_card_id(), ItemKind::Weapon, 1, class, 0);
        self.place_at_random(weapon, rng, &mut events)?;

        events.push(TurnEvent::WeightChanged {
            weight: 0,
            overweight: false,
        });
        self.state = TurnState::Idle;
        Ok(events)
    }

    /// Damage/stat scaling factor derived from the move count
    pub fn level(&self) -> u32 {
        self.move_count / MOVES_PER_LEVEL
    }

    /// Sum of equipped item weights
    pub fn carried_weight(&self) -> i32 {
        self.equipped
            .iter()
            .filter_map(|card| card.item())
            .map(|stats| stats.weight)
            .sum()
    }

    pub fn overweight(&self) -> bool {
        self.carried_weight() >= WEIGHT_LIMIT
    }

    /// Generate a unique card ID
    pub fn generate_card_id(&mut self) -> CardId {
        let id = self.next_card_id;
        self.next_card_id += 1;
        id
    }

    /// Advance the round-robin elite archetype cursor
    pub(crate) fn next_elite_archetype(&mut self) -> usize {
        let index = self.elite_cursor;
        self.elite_cursor = (self.elite_cursor + 1) % cards::ELITE_POOL_SIZE;
        index
    }

    pub(crate) fn place_at_random<R: GameRng>(
        &mut self,
        card: Card,
        rng: &mut R,
        events: &mut Vec<TurnEvent>,
    ) -> GameResult<()> {
        let empties = self.board.empty_cells();
        if empties.is_empty() {
            return Ok(());
        }
        let coord = empties[rng.gen_range(empties.len())];
        events.push(TurnEvent::CardSpawned {
            card: CardView::from(&card),
            coord,
            elite: false,
        });
        self.board.place(card, coord)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
