//! Coordinates, sizes, and write-position rectangles.

/// An absolute screen coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Column, 0-based.
    pub x: u16,
    /// Row, 0-based.
    pub y: u16,
}

impl Position {
    /// Creates a new position.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The origin, `(0, 0)`.
    pub const fn origin() -> Self {
        Self { x: 0, y: 0 }
    }
}

/// A terminal size in columns and rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A rectangular sub-region of the screen granted to a child to write into.
///
/// Unlike [`Size`]/[`Position`], width and height are signed: a negative width or
/// height is a legal, meaningful value representing an empty region.
/// Value equality, immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WritePosition {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Width; negative means empty.
    pub width: i32,
    /// Height; negative means empty.
    pub height: i32,
}

impl WritePosition {
    /// Creates a new write-position.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the region has non-positive area.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Iterates the `(x, y)` cell coordinates covered by this region, in row-major
    /// order. Yields nothing for an empty region.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (x0, y0, w, h) = (self.x, self.y, self.width, self.height);
        let rows: Vec<i32> = if h > 0 { (y0..y0 + h).collect() } else { Vec::new() };
        let cols: Vec<i32> = if w > 0 { (x0..x0 + w).collect() } else { Vec::new() };
        rows.into_iter()
            .flat_map(move |y| cols.clone().into_iter().map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_origin() {
        assert_eq!(Position::origin(), Position::new(0, 0));
    }

    #[test]
    fn negative_width_is_empty() {
        let wp = WritePosition::new(0, 0, -1, 5);
        assert!(wp.is_empty());
        assert_eq!(wp.cells().count(), 0);
    }

    #[test]
    fn negative_height_is_empty() {
        let wp = WritePosition::new(0, 0, 5, -1);
        assert!(wp.is_empty());
    }

    #[test]
    fn positive_region_enumerates_cells() {
        let wp = WritePosition::new(1, 2, 2, 2);
        let cells: Vec<_> = wp.cells().collect();
        assert_eq!(cells, vec![(1, 2), (2, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn value_equality() {
        assert_eq!(WritePosition::new(0, 0, 1, 1), WritePosition::new(0, 0, 1, 1));
    }
}
