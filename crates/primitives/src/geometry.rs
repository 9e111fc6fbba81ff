//! Screen geometry for detached menu placement.
//!
//! Coordinates are CSS-pixel-like: origin at the top-left, x growing right,
//! y growing down. Only the operations placement needs are provided.

/// A position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
	pub x: i32,
	pub y: i32,
}

impl Point {
	/// Creates a new point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
	pub width: i32,
	pub height: i32,
}

impl Size {
	/// Creates a new size.
	pub const fn new(width: i32, height: i32) -> Self {
		Self { width, height }
	}
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
	pub x: i32,
	pub y: i32,
	pub width: i32,
	pub height: i32,
}

impl Rect {
	/// Creates a new rectangle.
	pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
		Self { x, y, width, height }
	}

	/// Creates a rectangle from an origin and a size.
	pub const fn from_parts(origin: Point, size: Size) -> Self {
		Self::new(origin.x, origin.y, size.width, size.height)
	}

	/// Left edge.
	pub const fn left(&self) -> i32 {
		self.x
	}

	/// Right edge (exclusive).
	pub const fn right(&self) -> i32 {
		self.x + self.width
	}

	/// Top edge.
	pub const fn top(&self) -> i32 {
		self.y
	}

	/// Bottom edge (exclusive).
	pub const fn bottom(&self) -> i32 {
		self.y + self.height
	}

	/// Top-left corner.
	pub const fn origin(&self) -> Point {
		Point::new(self.x, self.y)
	}

	/// Dimensions.
	pub const fn size(&self) -> Size {
		Size::new(self.width, self.height)
	}

	/// Shrinks the rectangle by `margin` on every side.
	///
	/// Collapses to a zero-sized rectangle at the center when the margin
	/// exceeds half of either dimension.
	pub fn inner(&self, margin: i32) -> Self {
		let width = (self.width - 2 * margin).max(0);
		let height = (self.height - 2 * margin).max(0);
		Self::new(self.x + margin, self.y + margin, width, height)
	}

	/// Moves this rectangle the minimum distance needed to fit inside `outer`.
	///
	/// When this rectangle is larger than `outer` on an axis it is pinned to
	/// `outer`'s near edge on that axis.
	pub fn clamp_within(&self, outer: Rect) -> Self {
		let x = self.x.min(outer.right() - self.width).max(outer.left());
		let y = self.y.min(outer.bottom() - self.height).max(outer.top());
		Self::new(x, y, self.width, self.height)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamp_moves_inside() {
		let outer = Rect::new(0, 0, 100, 100);
		let r = Rect::new(90, 95, 20, 20).clamp_within(outer);
		assert_eq!(r, Rect::new(80, 80, 20, 20));
	}

	#[test]
	fn clamp_pins_oversized_to_near_edge() {
		let outer = Rect::new(0, 0, 50, 50);
		let r = Rect::new(10, 10, 80, 80).clamp_within(outer);
		assert_eq!(r.origin(), Point::new(0, 0));
	}

	#[test]
	fn inner_collapses_on_large_margin() {
		let r = Rect::new(0, 0, 10, 10).inner(8);
		assert_eq!(r.size(), Size::new(0, 0));
	}
}
