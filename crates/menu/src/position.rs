//! Detached menu placement.
//!
//! Backdrop-style menus (mobile sheets, click-away popovers, context menus)
//! are positioned absolutely. The default placement hangs the menu below
//! its toggle, left-aligned; a context-menu gesture supplies an explicit
//! anchor point instead. Either way the menu is clamped inside the
//! viewport with a safety margin so it never renders off screen.

use switchboard_primitives::{Point, Rect, Size};

/// Safety margin kept between a detached menu and the viewport edges.
pub const VIEWPORT_MARGIN: i32 = 16;

/// Where a detached menu wants to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
	/// Below the toggle element, left-aligned with it.
	Toggle(Rect),
	/// At an explicit point, e.g. the context-menu click position.
	At(Point),
}

/// Computes the menu's top-left position, clamped into the viewport.
pub fn place(menu: Size, anchor: Anchor, viewport: Rect) -> Point {
	let desired = match anchor {
		Anchor::Toggle(toggle) => Point::new(toggle.left(), toggle.bottom()),
		Anchor::At(point) => point,
	};

	Rect::from_parts(desired, menu)
		.clamp_within(viewport.inner(VIEWPORT_MARGIN))
		.origin()
}
