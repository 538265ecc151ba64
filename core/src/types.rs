use serde::{Deserialize, Serialize};

/// Unique identifier for cards
///
/// Stable for the lifetime of the card; never reused while any event or
/// view still references it.
pub type CardId = u32;

/// A cardinal swipe direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row/column delta of a one-cell step in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The reverse direction (used for hit-back counters)
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// The templar's class, chosen once at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplarClass {
    Knight,
    Wizard,
    Defender,
}

/// Ownership tag gating valid attack targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Belongs {
    Player,
    Enemy,
}

/// Attack fan-out pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackDirection {
    /// Single cell directly ahead in the swipe direction
    #[default]
    Front,
    /// Every opposing character sharing the swipe axis (row or column)
    Line,
    /// All four orthogonal neighbors, regardless of swipe direction
    Around,
}

/// How damage interacts with shields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackType {
    #[default]
    Normal,
    /// Bypasses shield absorption entirely
    Penetrate,
}

/// Kind of equippable item card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Weapon,
    Shield,
    Potion,
}

/// Combat stats held by templar and enemy cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStats {
    pub max_health: i32,
    /// 0 means dead
    pub health: i32,
    /// Absorbs damage before health
    pub shield: i32,
    pub attack: i32,
    /// Always clamped to [0, 1]
    pub hit_rate: f32,
    /// Always clamped to [0, 1]
    pub critical_rate: f32,
    pub attack_direction: AttackDirection,
    pub attack_type: AttackType,
    /// Counter-attack damage dealt when hit while this is > 0
    pub hit_back_attack: i32,
    pub belongs: Belongs,
}

impl CharacterStats {
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Stats held by item cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStats {
    pub kind: ItemKind,
    /// Expires when it reaches 0 after the per-turn decrement
    pub duration: i32,
    /// Contributes to the templar's carried weight while equipped
    pub weight: i32,
    /// 1 to 4; stacking caps at 4
    pub level: u8,
    /// Recomputed from kind/level/class/game level whenever level changes
    pub buff: Buff,
}

/// Partial stat record applied as deltas to a character
///
/// Numeric fields add; `attack_direction`/`attack_type`, when present,
/// overwrite rather than add.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buff {
    pub max_health: i32,
    pub health: i32,
    pub shield: i32,
    pub attack: i32,
    pub hit_rate: f32,
    pub critical_rate: f32,
    pub hit_back_attack: i32,
    pub attack_direction: Option<AttackDirection>,
    pub attack_type: Option<AttackType>,
}

/// Variant payload of a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CardKind {
    #[serde(rename_all = "camelCase")]
    Templar {
        class: TemplarClass,
        stats: CharacterStats,
    },
    #[serde(rename_all = "camelCase")]
    Enemy { stats: CharacterStats },
    #[serde(rename_all = "camelCase")]
    Item { stats: ItemStats },
}

/// A card on the board or in the templar's equipped set
///
/// Position is authoritative only via the board occupancy grid; cards do
/// not self-report position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    /// Inactive cards are pending removal and no longer participate
    pub active: bool,
}

impl Card {
    pub fn new(id: CardId, kind: CardKind) -> Self {
        Self {
            id,
            kind,
            active: true,
        }
    }

    pub fn is_templar(&self) -> bool {
        matches!(self.kind, CardKind::Templar { .. })
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, CardKind::Item { .. })
    }

    pub fn templar_class(&self) -> Option<TemplarClass> {
        match self.kind {
            CardKind::Templar { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Combat stats for character cards, None for items
    pub fn character(&self) -> Option<&CharacterStats> {
        match &self.kind {
            CardKind::Templar { stats, .. } | CardKind::Enemy { stats } => Some(stats),
            CardKind::Item { .. } => None,
        }
    }

    pub fn character_mut(&mut self) -> Option<&mut CharacterStats> {
        match &mut self.kind {
            CardKind::Templar { stats, .. } | CardKind::Enemy { stats } => Some(stats),
            CardKind::Item { .. } => None,
        }
    }

    /// Item stats for item cards, None for characters
    pub fn item(&self) -> Option<&ItemStats> {
        match &self.kind {
            CardKind::Item { stats } => Some(stats),
            _ => None,
        }
    }

    pub fn item_mut(&mut self) -> Option<&mut ItemStats> {
        match &mut self.kind {
            CardKind::Item { stats } => Some(stats),
            _ => None,
        }
    }

    /// Ownership tag for character cards
    pub fn belongs(&self) -> Option<Belongs> {
        self.character().map(|s| s.belongs)
    }
}
