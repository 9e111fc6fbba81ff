//! Menu tree nodes.
//!
//! The renderer produces a widget-neutral tree; hosts translate it to DOM,
//! native menus, or test assertions. A tree is rebuilt wholesale per render
//! pass — there is no incremental patching.

/// Accessibility metadata carried by interactive nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aria {
	/// ARIA role ("menuitem", "button").
	pub role: &'static str,
	/// Mirrors `aria-disabled`.
	pub disabled: bool,
	/// Mirrors `aria-haspopup` on dropdown toggles.
	pub haspopup: bool,
	/// Mirrors `aria-expanded` on dropdown toggles.
	pub expanded: bool,
	/// Accessible label; falls back to the tooltip for icon-only items.
	pub label: String,
}

/// Enablement of an item across the two render phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableState {
	/// Structural phase: matchers not settled yet.
	Pending,
	/// At least one action under the link matched.
	Enabled,
	/// Available but nothing matched; rendered only under draw-disabled.
	Disabled,
}

/// A leaf menu entry bound to an action point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
	/// Id of the link that produced this item.
	pub link_id: String,
	/// Display label.
	pub label: String,
	/// Icon name, if any.
	pub icon: Option<String>,
	/// Action point dispatched on activation (empty for dropdown toggles).
	pub point: String,
	/// Enablement state.
	pub state: EnableState,
	/// Accessibility metadata.
	pub aria: Aria,
}

impl MenuItem {
	/// True when activation would dispatch something.
	pub fn is_enabled(&self) -> bool {
		self.state == EnableState::Enabled
	}
}

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
	/// Actionable entry.
	Item(MenuItem),
	/// Visual divider between sections.
	Divider,
	/// Section heading.
	SectionTitle(String),
	/// Caption row following an item.
	Caption(String),
	/// Nested dropdown: toggle plus submenu nodes.
	Submenu { toggle: MenuItem, nodes: Vec<MenuNode> },
}

/// A rendered menu.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
	/// Nodes in structural order.
	pub nodes: Vec<MenuNode>,
}

impl Menu {
	/// True when nothing would render.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Number of enabled actionable entries, submenus included.
	pub fn enabled_count(&self) -> usize {
		fn count(nodes: &[MenuNode]) -> usize {
			nodes
				.iter()
				.map(|node| match node {
					MenuNode::Item(item) => usize::from(item.is_enabled()),
					MenuNode::Submenu { nodes, .. } => count(nodes),
					_ => 0,
				})
				.sum()
		}
		count(&self.nodes)
	}

	/// Link ids of the items in structural order, submenu toggles included.
	pub fn link_ids(&self) -> Vec<&str> {
		fn walk<'a>(nodes: &'a [MenuNode], out: &mut Vec<&'a str>) {
			for node in nodes {
				match node {
					MenuNode::Item(item) => out.push(&item.link_id),
					MenuNode::Submenu { toggle, nodes } => {
						out.push(&toggle.link_id);
						walk(nodes, out);
					}
					_ => {}
				}
			}
		}
		let mut out = Vec::new();
		walk(&self.nodes, &mut out);
		out
	}
}
