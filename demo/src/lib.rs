//! Terminal pathfinding visualizer model.
//!
//! Owns a [`SquareGrid`] sized to the terminal, scatters random obstacles,
//! and animates a search one expansion per tick. Drawing pulls tile
//! classifications from the search state; see `main.rs` for the crossterm
//! front end.

use gridpath_core::{Rect, Vec2};
use gridpath_paths::{
    BestFirstSearch, Bfs, Grid, NodeId, NodeState, PathError, Pathfinder, SquareGrid,
    SquareGridConfig, StepStatus, TileCount,
};
use rand::Rng;

/// Terminal columns per tile; rows follow from the aspect ratio.
pub const TILE_WIDTH: f32 = 2.0;
/// Rows reserved below the grid for the status line.
pub const STATUS_ROWS: u16 = 1;
pub const OBSTACLE_DENSITY: f64 = 0.25;

pub const HELP_TEXT: &str =
    "space: pause  n: step  tab: algorithm  r: restart  o: new obstacles  q: quit";

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Search strategies the visualizer can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bfs,
    BestFirst,
}

impl Algorithm {
    pub fn pathfinder(self) -> Box<dyn Pathfinder> {
        match self {
            Self::Bfs => Box::new(Bfs::default()),
            Self::BestFirst => Box::new(BestFirstSearch::default()),
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Bfs => Self::BestFirst,
            Self::BestFirst => Self::Bfs,
        }
    }
}

/// What a single tile should look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Start,
    Goal,
    Wall,
    Open(NodeState),
}

// ---------------------------------------------------------------------------
// Visualizer
// ---------------------------------------------------------------------------

pub struct Visualizer {
    grid: SquareGrid,
    algorithm: Algorithm,
    finder: Box<dyn Pathfinder>,
    start: NodeId,
    goal: NodeId,
    paused: bool,
}

/// World rectangle covered by the grid for a terminal of the given size.
pub fn grid_bounds(width: u16, height: u16) -> Rect {
    Rect::from_size(
        f32::from(width),
        f32::from(height.saturating_sub(STATUS_ROWS)),
    )
}

fn cell_center(x: u16, y: u16) -> Vec2 {
    Vec2::new(f32::from(x) + 0.5, f32::from(y) + 0.5)
}

impl Visualizer {
    /// Build a visualizer for a `width × height` terminal and start a search.
    pub fn new(width: u16, height: u16, rng: &mut impl Rng) -> Result<Self, PathError> {
        let bounds = grid_bounds(width, height);
        let tiles = TileCount::for_bounds(bounds, TILE_WIDTH);
        let config = SquareGridConfig::default()
            .with_tile_width(TILE_WIDTH)
            .with_default_tiles(tiles.columns, tiles.rows);
        let grid = SquareGrid::with_config(bounds, config)?;

        let algorithm = Algorithm::Bfs;
        let mut vis = Self {
            grid,
            algorithm,
            finder: algorithm.pathfinder(),
            start: 0,
            goal: 0,
            paused: false,
        };
        vis.place_endpoints();
        vis.scatter_obstacles(rng)?;
        Ok(vis)
    }

    #[inline]
    pub fn grid(&self) -> &SquareGrid {
        &self.grid
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn pathfinder(&self) -> &dyn Pathfinder {
        self.finder.as_ref()
    }

    #[inline]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.start, self.goal)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// React to a terminal resize. Node ids are reassigned, so obstacles are
    /// scattered again and the search restarts.
    pub fn resize(&mut self, width: u16, height: u16, rng: &mut impl Rng) -> Result<(), PathError> {
        if self.grid.resize(grid_bounds(width, height))? {
            self.place_endpoints();
            self.scatter_obstacles(rng)?;
        }
        Ok(())
    }

    /// Block a random share of the tiles, keeping the endpoints open, and
    /// restart the search.
    pub fn scatter_obstacles(&mut self, rng: &mut impl Rng) -> Result<(), PathError> {
        let (start, goal) = (self.start, self.goal);
        let walls: Vec<NodeId> = (0..self.grid.len())
            .filter(|&id| id != start && id != goal && rng.random_bool(OBSTACLE_DENSITY))
            .collect();
        self.grid.clear_blocked();
        let blocked = self.grid.set_blocked_many(walls, true)?;
        log::debug!("scattered {blocked} obstacles");
        self.restart()?;
        Ok(())
    }

    /// Move the start (or goal) to the tile under terminal cell `(x, y)`.
    /// Walls and cells outside the grid are ignored; returns whether the
    /// endpoint moved.
    pub fn move_endpoint(&mut self, x: u16, y: u16, goal: bool) -> Result<bool, PathError> {
        let Some(id) = self.grid.node_at(cell_center(x, y)) else {
            return Ok(false);
        };
        if self.grid.is_blocked(id) {
            return Ok(false);
        }
        if goal {
            self.goal = id;
        } else {
            self.start = id;
        }
        self.restart()?;
        Ok(true)
    }

    pub fn switch_algorithm(&mut self) -> Result<StepStatus, PathError> {
        self.algorithm = self.algorithm.next();
        self.finder = self.algorithm.pathfinder();
        self.restart()
    }

    /// Start the current search over from scratch.
    pub fn restart(&mut self) -> Result<StepStatus, PathError> {
        log::debug!(
            "restarting {} from {} to {}",
            self.finder.name(),
            self.start,
            self.goal
        );
        self.finder.start(&self.grid, self.start, self.goal)
    }

    /// Advance the search by one expansion unless paused.
    pub fn tick(&mut self) -> Result<StepStatus, PathError> {
        if self.paused {
            return self.finder.state().status().ok_or(PathError::NotStarted);
        }
        self.step()
    }

    /// Advance the search by one expansion, even while paused.
    pub fn step(&mut self) -> Result<StepStatus, PathError> {
        self.finder.step(&self.grid)
    }

    /// Run the current search to completion.
    pub fn finish(&mut self) -> Result<Option<Vec<NodeId>>, PathError> {
        self.finder.find_path(&self.grid, self.start, self.goal)
    }

    pub fn tile(&self, id: NodeId) -> Tile {
        if id == self.start {
            Tile::Start
        } else if id == self.goal {
            Tile::Goal
        } else if self.grid.is_blocked(id) {
            Tile::Wall
        } else {
            Tile::Open(self.finder.state().classify(&self.grid, id))
        }
    }

    /// Tile under the terminal cell at column `x`, row `y`.
    pub fn tile_at(&self, x: u16, y: u16) -> Option<Tile> {
        self.grid.node_at(cell_center(x, y)).map(|id| self.tile(id))
    }

    pub fn status_line(&self) -> String {
        let state = self.finder.state();
        let outcome = match state.status() {
            Some(StepStatus::Continue) if self.paused => "paused".to_string(),
            Some(StepStatus::Continue) => "searching".to_string(),
            Some(StepStatus::Found) => format!("path of {} tiles", state.path().len()),
            Some(StepStatus::Exhausted) => "no path".to_string(),
            None => "idle".to_string(),
        };
        format!(
            "{} | {} | expanded {} | frontier {} | {}x{}",
            self.finder.name(),
            outcome,
            state.expansions(),
            state.frontier_len(),
            self.grid.columns(),
            self.grid.rows(),
        )
    }

    fn place_endpoints(&mut self) {
        self.start = 0;
        self.goal = self.grid.len() - 1;
    }
}
