//! Link records.
//!
//! A link is what the user sees in a toolbar or dropdown: label, icon,
//! ordering, section tags. What it *does* is delegated: an invoke link
//! references an action point (one or more actions implement it), a
//! dropdown link references a nested link point rendered as a submenu.

use switchboard_actions::PointEntry;

/// What activating a link does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
	/// Dispatch through the referenced action point.
	Invoke(String),
	/// Open a submenu rendered from the referenced link point.
	Dropdown(String),
}

/// An immutable link registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
	id: String,
	label: String,
	icon: Option<String>,
	tooltip: Option<String>,
	priority: i16,
	kind: LinkKind,
	section: Option<String>,
	section_title: Option<String>,
	caption: Option<String>,
	draw_disabled: bool,
}

impl Link {
	/// Starts building an invoke link dispatching `point`.
	pub fn invoke(id: impl Into<String>, label: impl Into<String>, point: impl Into<String>) -> LinkBuilder {
		LinkBuilder::new(id, label, LinkKind::Invoke(point.into()))
	}

	/// Starts building a dropdown link over the nested link point.
	pub fn dropdown(id: impl Into<String>, label: impl Into<String>, point: impl Into<String>) -> LinkBuilder {
		LinkBuilder::new(id, label, LinkKind::Dropdown(point.into()))
	}

	/// Link identifier, unique per point.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Display label.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Icon name, if any.
	pub fn icon(&self) -> Option<&str> {
		self.icon.as_deref()
	}

	/// Tooltip, doubling as the accessible label for icon-only rendering.
	pub fn tooltip(&self) -> Option<&str> {
		self.tooltip.as_deref()
	}

	/// What activation does.
	pub fn kind(&self) -> &LinkKind {
		&self.kind
	}

	/// Section tag for divider grouping.
	pub fn section(&self) -> Option<&str> {
		self.section.as_deref()
	}

	/// Optional title rendered before the section's first item.
	pub fn section_title(&self) -> Option<&str> {
		self.section_title.as_deref()
	}

	/// Optional caption row rendered after the item.
	pub fn caption(&self) -> Option<&str> {
		self.caption.as_deref()
	}

	/// Render disabled (with `aria-disabled`) instead of hiding when no
	/// action is enabled.
	pub fn draw_disabled(&self) -> bool {
		self.draw_disabled
	}
}

impl PointEntry for Link {
	fn id(&self) -> &str {
		&self.id
	}

	fn priority(&self) -> i16 {
		self.priority
	}
}

/// Builder for [`Link`].
pub struct LinkBuilder {
	link: Link,
}

impl LinkBuilder {
	fn new(id: impl Into<String>, label: impl Into<String>, kind: LinkKind) -> Self {
		Self {
			link: Link {
				id: id.into(),
				label: label.into(),
				icon: None,
				tooltip: None,
				priority: 0,
				kind,
				section: None,
				section_title: None,
				caption: None,
				draw_disabled: false,
			},
		}
	}

	/// Sets the render priority (lower renders first).
	pub fn priority(mut self, priority: i16) -> Self {
		self.link.priority = priority;
		self
	}

	/// Sets an icon name.
	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.link.icon = Some(icon.into());
		self
	}

	/// Sets a tooltip.
	pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
		self.link.tooltip = Some(tooltip.into());
		self
	}

	/// Tags the link with a section.
	pub fn section(mut self, section: impl Into<String>) -> Self {
		self.link.section = Some(section.into());
		self
	}

	/// Sets the section title rendered before the section's first item.
	pub fn section_title(mut self, title: impl Into<String>) -> Self {
		self.link.section_title = Some(title.into());
		self
	}

	/// Adds a caption row after the item.
	pub fn caption(mut self, caption: impl Into<String>) -> Self {
		self.link.caption = Some(caption.into());
		self
	}

	/// Renders the link disabled instead of hiding it when nothing is
	/// enabled.
	pub fn draw_disabled(mut self) -> Self {
		self.link.draw_disabled = true;
		self
	}

	/// Finishes the record.
	pub fn build(self) -> Link {
		self.link
	}
}
