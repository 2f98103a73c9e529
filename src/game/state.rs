use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Index of an acting agent. Index 0 is the controlled player; hunters follow.
pub type AgentIndex = usize;

/// A grid cell. The origin is the south-west corner; x grows east, y grows north.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The closed action vocabulary shared by every agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    North,
    South,
    East,
    West,
    Stop,
}

impl Action {
    /// Movement directions in legality-enumeration order. `Stop` is appended
    /// separately where an agent may stand still.
    pub const DIRECTIONS: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::North => (0, 1),
            Action::South => (0, -1),
            Action::East => (1, 0),
            Action::West => (-1, 0),
            Action::Stop => (0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl Default for GameStatus {
    fn default() -> Self {
        GameStatus::Playing
    }
}

/// An adversary chasing the player. While `frightened` is positive the hunter
/// poses no threat and can be eaten on contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hunter {
    pub position: Position,
    pub spawn: Position,
    #[serde(default)]
    pub frightened: u32,
}

impl Hunter {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            spawn: position,
            frightened: 0,
        }
    }

    pub fn is_frightened(&self) -> bool {
        self.frightened > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum GameEvent {
    PelletEaten { at: Position },
    PowerPelletEaten { at: Position },
    HunterEaten { hunter: AgentIndex },
    PlayerCaught { hunter: AgentIndex },
    GameWon { score: i32 },
    GameLost { score: i32 },
}

/// Full maze state. Search never mutates a state in place; the rules engine
/// clones and applies to produce successors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub width: i32,
    pub height: i32,
    pub walls: HashSet<Position>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pellets: Vec<Position>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub power_pellets: Vec<Position>,
    pub player: Position,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hunters: Vec<Hunter>,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub status: GameStatus,
}

impl GameState {
    /// An empty arena of the given size, enclosed by border walls, with the
    /// player in the south-west corner cell.
    pub fn new(width: i32, height: i32) -> Self {
        let mut walls = HashSet::new();
        for x in 0..width {
            walls.insert(Position::new(x, 0));
            walls.insert(Position::new(x, height - 1));
        }
        for y in 0..height {
            walls.insert(Position::new(0, y));
            walls.insert(Position::new(width - 1, y));
        }
        Self {
            width,
            height,
            walls,
            pellets: Vec::new(),
            power_pellets: Vec::new(),
            player: Position::new(1, 1),
            hunters: Vec::new(),
            score: 0,
            status: GameStatus::Playing,
        }
    }

    /// A small playable maze used as the default session state and as the
    /// shared test fixture.
    pub fn sample() -> Self {
        let mut state = GameState::new(9, 7);
        for y in 2..=4 {
            state.walls.insert(Position::new(4, y));
        }
        state.pellets = vec![
            Position::new(3, 1),
            Position::new(5, 1),
            Position::new(3, 5),
            Position::new(6, 3),
        ];
        state.power_pellets = vec![Position::new(1, 5)];
        state.hunters = vec![
            Hunter::new(Position::new(7, 5)),
            Hunter::new(Position::new(7, 1)),
        ];
        state
    }

    /// Player plus hunters.
    pub fn num_agents(&self) -> usize {
        1 + self.hunters.len()
    }

    pub fn is_win(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn is_lose(&self) -> bool {
        self.status == GameStatus::Lost
    }

    pub fn is_finished(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Out-of-bounds cells count as walls.
    pub fn has_wall(&self, position: Position) -> bool {
        !self.in_bounds(position) || self.walls.contains(&position)
    }

    pub fn agent_position(&self, agent: AgentIndex) -> Option<Position> {
        if agent == 0 {
            Some(self.player)
        } else {
            self.hunters.get(agent - 1).map(|hunter| hunter.position)
        }
    }
}
