//! Static tile grid with a single purchasable door and shop fixtures.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{CellCoord, StationId, WeaponKind};

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Walkable floor.
    Open,
    /// Solid wall that blocks movement, rays and traces.
    Wall,
}

/// Purchasable door that behaves as a wall until opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Door {
    cell: CellCoord,
    cost: u32,
    open: bool,
}

impl Door {
    /// Cell the door occupies.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Price of opening the door.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Reports whether the door has been opened.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// World-space centre of the door cell.
    #[must_use]
    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.cell.column() as f32 + 0.5, self.cell.row() as f32 + 0.5)
    }
}

/// Goods sold by a station.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StationKind {
    /// Replaces the held weapon with a fresh instance of the kind.
    Weapon(WeaponKind),
    /// Refills the held weapon's reserve to capacity.
    Ammo,
}

impl StationKind {
    /// Short label used by interaction prompts.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            StationKind::Weapon(kind) => kind.name(),
            StationKind::Ammo => "Ammo",
        }
    }
}

/// Shop fixture anchored at a point in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Station {
    id: StationId,
    position: Vec2,
    kind: StationKind,
    cost: u32,
}

impl Station {
    /// Identifier of the station, stable for the lifetime of the map.
    #[must_use]
    pub const fn id(&self) -> StationId {
        self.id
    }

    /// World-space anchor of the station.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Goods sold by the station.
    #[must_use]
    pub const fn kind(&self) -> StationKind {
        self.kind
    }

    /// Price charged per purchase.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

/// Immutable wall grid plus the mutable door and the fixtures placed on it.
///
/// Rows are indexed by the world `y` axis and columns by `x`; a world point
/// belongs to the cell obtained by flooring both coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMap {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
    door: Option<Door>,
    stations: Vec<Station>,
    spawn_points: Vec<Vec2>,
    player_start: Vec2,
}

impl GridMap {
    /// Builds a map from text rows where `'1'` marks a wall and anything else is open.
    ///
    /// Rows shorter than the widest row are padded with walls.
    #[must_use]
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let columns = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut cells = Vec::with_capacity(columns * rows.len());

        for row in rows {
            let mut width = 0;
            for glyph in row.as_ref().chars() {
                cells.push(if glyph == '1' {
                    CellKind::Wall
                } else {
                    CellKind::Open
                });
                width += 1;
            }
            cells.extend(std::iter::repeat(CellKind::Wall).take(columns - width));
        }

        Self {
            columns: columns as u32,
            rows: rows.len() as u32,
            cells,
            door: None,
            stations: Vec::new(),
            spawn_points: Vec::new(),
            player_start: Vec2::ZERO,
        }
    }

    /// Places the purchasable door, replacing any previous one.
    #[must_use]
    pub fn with_door(mut self, cell: CellCoord, cost: u32) -> Self {
        self.door = Some(Door {
            cell,
            cost,
            open: false,
        });
        self
    }

    /// Appends a station; ids follow insertion order.
    #[must_use]
    pub fn with_station(mut self, position: Vec2, kind: StationKind, cost: u32) -> Self {
        let id = StationId::new(self.stations.len() as u32);
        self.stations.push(Station {
            id,
            position,
            kind,
            cost,
        });
        self
    }

    /// Appends an enemy spawn point.
    #[must_use]
    pub fn with_spawn_point(mut self, position: Vec2) -> Self {
        self.spawn_points.push(position);
        self
    }

    /// Sets the location the player starts at.
    #[must_use]
    pub fn with_player_start(mut self, position: Vec2) -> Self {
        self.player_start = position;
        self
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Static contents of a cell, or `None` outside the grid.
    #[must_use]
    pub fn cell_kind(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Reports whether a world point is impassable.
    ///
    /// Points outside the grid are blocked, as is the door cell while closed.
    #[must_use]
    pub fn is_blocked(&self, point: Vec2) -> bool {
        self.is_blocked_xy(point.x, point.y)
    }

    /// Coordinate form of [`GridMap::is_blocked`].
    #[must_use]
    pub fn is_blocked_xy(&self, x: f32, y: f32) -> bool {
        if !(x >= 0.0 && y >= 0.0) {
            return true;
        }

        let column = x.floor();
        let row = y.floor();
        if column >= self.columns as f32 || row >= self.rows as f32 {
            return true;
        }

        let cell = CellCoord::new(column as u32, row as u32);
        if let Some(door) = &self.door {
            if !door.open && door.cell == cell {
                return true;
            }
        }

        matches!(self.cell_kind(cell), Some(CellKind::Wall) | None)
    }

    /// Opens the door. Returns `true` only for the call that changed its state.
    pub fn open_door(&mut self) -> bool {
        match &mut self.door {
            Some(door) if !door.open => {
                door.open = true;
                true
            }
            _ => false,
        }
    }

    /// The purchasable door, if the map has one.
    #[must_use]
    pub const fn door(&self) -> Option<&Door> {
        self.door.as_ref()
    }

    /// Stations in map order.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Looks up a station by identifier.
    #[must_use]
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|station| station.id == id)
    }

    /// Enemy spawn points in map order.
    #[must_use]
    pub fn spawn_points(&self) -> &[Vec2] {
        &self.spawn_points
    }

    /// Location the player starts at.
    #[must_use]
    pub const fn player_start(&self) -> Vec2 {
        self.player_start
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            Some((cell.row() * self.columns + cell.column()) as usize)
        } else {
            None
        }
    }
}
