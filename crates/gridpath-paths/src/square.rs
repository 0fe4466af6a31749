//! Square tiling: the bounding rectangle is cut into `columns × rows` equal
//! tiles and every tile becomes one node at its center.

use std::sync::atomic::{AtomicU64, Ordering};

use gridpath_core::{Rect, Segment, Vec2};

use crate::error::GridError;
use crate::node::{Node, NodeId};
use crate::traits::Grid;

/// Number of tiles along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCount {
    pub columns: usize,
    pub rows: usize,
}

impl TileCount {
    #[inline]
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Tile count for `bounds` given a target tile width; rows follow the
    /// aspect ratio of the rectangle. Both axes resolve to at least one tile.
    pub fn for_bounds(bounds: Rect, tile_width: f32) -> Self {
        let columns = if tile_width > 0.0 && tile_width.is_finite() {
            (bounds.width() / tile_width).floor() as usize
        } else {
            1
        }
        .max(1);
        let rows = ((bounds.height() / bounds.width() * columns as f32).round() as usize).max(1);
        Self { columns, rows }
    }

    /// Total tile count, saturating at `usize::MAX`.
    #[inline]
    pub fn len(self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    fn clamped(self) -> Self {
        Self::new(self.columns.max(1), self.rows.max(1))
    }
}

/// Column/row of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub column: usize,
    pub row: usize,
}

/// Tunables for a [`SquareGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SquareGridConfig {
    /// Target tile width used to derive tile counts on resize.
    pub tile_width: f32,
    /// Tile count used when the grid is first created.
    pub default_tiles: TileCount,
    /// Also link diagonal neighbors.
    pub diagonals: bool,
}

impl Default for SquareGridConfig {
    fn default() -> Self {
        Self {
            tile_width: 12.0,
            default_tiles: TileCount::new(50, 50),
            diagonals: false,
        }
    }
}

impl SquareGridConfig {
    pub fn with_tile_width(mut self, tile_width: f32) -> Self {
        self.tile_width = tile_width;
        self
    }

    pub fn with_default_tiles(mut self, columns: usize, rows: usize) -> Self {
        self.default_tiles = TileCount::new(columns, rows);
        self
    }

    pub fn with_diagonals(mut self, diagonals: bool) -> Self {
        self.diagonals = diagonals;
        self
    }
}

/// Generations are drawn from one process-wide counter so two grids never
/// share one.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Neighbor directions as (dx, dy), clockwise from the left.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// A grid of equal rectangular tiles with 4-way (or optionally 8-way) links.
#[derive(Debug, Clone)]
pub struct SquareGrid {
    config: SquareGridConfig,
    bounds: Rect,
    tiles: TileCount,
    nodes: Vec<Node>,
    coords: Vec<TileCoord>,
    blocked: Vec<bool>,
    lines: Vec<Segment>,
    generation: u64,
}

impl SquareGrid {
    /// Largest number of tiles a grid will allocate.
    pub const MAX_TILES: usize = 1 << 22;

    /// Tile `bounds` with the default configuration.
    pub fn new(bounds: Rect) -> Result<Self, GridError> {
        Self::with_config(bounds, SquareGridConfig::default())
    }

    /// Tile `bounds` with `config.default_tiles` tiles.
    pub fn with_config(bounds: Rect, config: SquareGridConfig) -> Result<Self, GridError> {
        let mut grid = Self {
            config,
            bounds: Rect::default(),
            tiles: TileCount::new(1, 1),
            nodes: Vec::new(),
            coords: Vec::new(),
            blocked: Vec::new(),
            lines: Vec::new(),
            generation: 0,
        };
        grid.regenerate(bounds, config.default_tiles)?;
        Ok(grid)
    }

    /// Tile `bounds` with an explicit tile count.
    pub fn with_tiles(bounds: Rect, columns: usize, rows: usize) -> Result<Self, GridError> {
        let config = SquareGridConfig::default().with_default_tiles(columns, rows);
        Self::with_config(bounds, config)
    }

    /// Rebuild everything for `bounds` using `tiles` as the tile count: grid
    /// lines, then node positions, then neighbor edges. Obstacles are
    /// cleared. A degenerate rectangle or a tile count above
    /// [`MAX_TILES`](Self::MAX_TILES) is rejected and nothing changes.
    pub fn regenerate(&mut self, bounds: Rect, tiles: TileCount) -> Result<(), GridError> {
        if bounds.is_degenerate() {
            log::warn!("square grid: rejecting degenerate bounds {bounds}");
            return Err(GridError::DegenerateBounds {
                width: bounds.width(),
                height: bounds.height(),
            });
        }
        let tiles = tiles.clamped();
        if tiles.len() > Self::MAX_TILES {
            log::warn!(
                "square grid: rejecting {}x{} tiles over {bounds}",
                tiles.columns,
                tiles.rows
            );
            return Err(GridError::TooManyTiles {
                columns: tiles.columns,
                rows: tiles.rows,
            });
        }

        self.bounds = bounds;
        self.tiles = tiles;
        self.generate_lines();
        self.generate_nodes();
        self.blocked.clear();
        self.blocked.resize(self.nodes.len(), false);
        self.calculate_neighbors();
        self.generation = next_generation();

        log::debug!(
            "square grid: {}x{} tiles over {bounds} (generation {})",
            self.tiles.columns,
            self.tiles.rows,
            self.generation
        );
        Ok(())
    }

    #[inline]
    pub fn config(&self) -> &SquareGridConfig {
        &self.config
    }

    #[inline]
    pub fn tiles(&self) -> TileCount {
        self.tiles
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.tiles.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.tiles.rows
    }

    /// Size of a single tile.
    #[inline]
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(
            self.bounds.width() / self.tiles.columns as f32,
            self.bounds.height() / self.tiles.rows as f32,
        )
    }

    /// Cost of a diagonal link (the tile diagonal), whether or not diagonal
    /// links are enabled.
    #[inline]
    pub fn diagonal_cost(&self) -> f32 {
        self.tile_size().length()
    }

    /// Tile boundary lines: `columns + 1` vertical ones followed by
    /// `rows + 1` horizontal ones.
    #[inline]
    pub fn grid_lines(&self) -> &[Segment] {
        &self.lines
    }

    pub fn coord_of(&self, id: NodeId) -> Option<TileCoord> {
        self.coords.get(id).copied()
    }

    pub fn id_at(&self, column: usize, row: usize) -> Option<NodeId> {
        (column < self.tiles.columns && row < self.tiles.rows)
            .then_some(row * self.tiles.columns + column)
    }

    /// The node whose tile contains `p`.
    pub fn node_at(&self, p: Vec2) -> Option<NodeId> {
        if !self.bounds.contains(p) {
            return None;
        }
        let tile = self.tile_size();
        let column = (((p.x - self.bounds.left()) / tile.x) as usize).min(self.tiles.columns - 1);
        let row = (((p.y - self.bounds.top()) / tile.y) as usize).min(self.tiles.rows - 1);
        self.id_at(column, row)
    }

    pub fn is_blocked(&self, id: NodeId) -> bool {
        self.blocked.get(id).copied().unwrap_or(false)
    }

    /// Mark `id` as an obstacle (removing every edge that touches it) or
    /// restore it. Must not be called while a search on this grid is running;
    /// the generation changes so such a search fails on its next step.
    pub fn set_blocked(&mut self, id: NodeId, blocked: bool) -> Result<(), GridError> {
        let slot = self.blocked.get_mut(id).ok_or(GridError::UnknownNode(id))?;
        if *slot == blocked {
            return Ok(());
        }
        *slot = blocked;
        self.calculate_neighbors();
        self.generation = next_generation();
        Ok(())
    }

    /// Apply `blocked` to every id in `ids`, recomputing edges once.
    /// Unknown ids are rejected before anything changes; returns how many
    /// nodes changed state.
    pub fn set_blocked_many<I>(&mut self, ids: I, blocked: bool) -> Result<usize, GridError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let ids: Vec<NodeId> = ids.into_iter().collect();
        if let Some(&bad) = ids.iter().find(|&&id| id >= self.blocked.len()) {
            return Err(GridError::UnknownNode(bad));
        }
        let mut changed = 0;
        for id in ids {
            if self.blocked[id] != blocked {
                self.blocked[id] = blocked;
                changed += 1;
            }
        }
        if changed > 0 {
            self.calculate_neighbors();
            self.generation = next_generation();
        }
        Ok(changed)
    }

    /// Restore every blocked node.
    pub fn clear_blocked(&mut self) {
        if self.blocked.iter().any(|&b| b) {
            self.blocked.fill(false);
            self.calculate_neighbors();
            self.generation = next_generation();
        }
    }

    fn generate_lines(&mut self) {
        let tile = self.tile_size();
        let top_left = self.bounds.pos;
        let TileCount { columns, rows } = self.tiles;

        self.lines.clear();
        self.lines.reserve(columns + rows + 2);
        for i in 0..=columns {
            let start = top_left + Vec2::new(tile.x, 0.0) * i as f32;
            self.lines
                .push(Segment::new(start, start + Vec2::new(0.0, self.bounds.height())));
        }
        for i in 0..=rows {
            let start = top_left + Vec2::new(0.0, tile.y) * i as f32;
            self.lines
                .push(Segment::new(start, start + Vec2::new(self.bounds.width(), 0.0)));
        }
    }

    fn generate_nodes(&mut self) {
        let tile = self.tile_size();
        let origin = self.bounds.pos + tile / 2.0;

        self.nodes.clear();
        self.coords.clear();
        self.nodes.reserve(self.tiles.len());
        self.coords.reserve(self.tiles.len());
        for row in 0..self.tiles.rows {
            for column in 0..self.tiles.columns {
                let position = origin + Vec2::new(column as f32 * tile.x, row as f32 * tile.y);
                self.nodes.push(Node::new(self.nodes.len(), position));
                self.coords.push(TileCoord { column, row });
            }
        }
    }

    /// Neighbor of `coord` in direction `(dx, dy)`, or `None` past the border.
    fn offset(&self, coord: TileCoord, dx: isize, dy: isize) -> Option<NodeId> {
        let column = coord.column.checked_add_signed(dx)?;
        let row = coord.row.checked_add_signed(dy)?;
        self.id_at(column, row)
    }

    fn calculate_neighbors(&mut self) {
        let tile = self.tile_size();
        let diagonal = self.diagonal_cost();

        for id in 0..self.nodes.len() {
            self.nodes[id].clear_neighbors();
            if self.blocked[id] {
                continue;
            }
            let coord = self.coords[id];
            for (dx, dy) in DIRECTIONS {
                let is_diagonal = dx != 0 && dy != 0;
                if is_diagonal && !self.config.diagonals {
                    continue;
                }
                let Some(to) = self.offset(coord, dx, dy) else {
                    continue;
                };
                if self.blocked[to] {
                    continue;
                }
                let cost = if is_diagonal {
                    diagonal
                } else if dx != 0 {
                    tile.x
                } else {
                    tile.y
                };
                self.nodes[id].add_neighbor(to, cost);
            }
        }
    }
}

impl Grid for SquareGrid {
    fn name(&self) -> &str {
        "Square"
    }

    #[inline]
    fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Tile counts are re-derived only when the size changes; a pure move
    /// keeps them and just repositions every node.
    fn resize(&mut self, bounds: Rect) -> Result<bool, GridError> {
        if bounds == self.bounds {
            return Ok(false);
        }
        let tiles = if bounds.size != self.bounds.size && !bounds.is_degenerate() {
            TileCount::for_bounds(bounds, self.config.tile_width)
        } else {
            self.tiles
        };
        self.regenerate(bounds, tiles)?;
        Ok(true)
    }
}
