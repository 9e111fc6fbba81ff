//! Two-phase menu rendering.
//!
//! Phase one ([`MenuBuilder::build`]) is synchronous and structural: it
//! lists the link point, keeps each link's statically-available actions as
//! candidates, recurses into nested dropdown points, and omits links with
//! no available action at all. The tree order is fixed here — registration
//! order — and never changes afterwards, no matter which async check
//! settles first.
//!
//! Phase two ([`PendingMenu::settle`]) walks each link's candidates with
//! the short-circuit matcher semantics the invoker uses, turns the pending
//! states into enabled/disabled, drops what ended up inert (unless the link
//! asked to be drawn disabled), and finally injects section dividers,
//! titles, and caption rows.

use std::sync::Arc;

use switchboard_actions::{Action, Baton, Platform, Registry, is_available, is_eligible};
use switchboard_primitives::BoxFutureLocal;

use crate::item::{Aria, EnableState, Menu, MenuItem, MenuNode};
use crate::link::{Link, LinkKind};

/// Nesting cap for dropdown recursion; a cycle in link declarations stops
/// here instead of overflowing the stack.
const MAX_DEPTH: usize = 8;

enum PendingNode {
	Leaf {
		link: Arc<Link>,
		point: String,
		candidates: Vec<Arc<Action>>,
	},
	Dropdown {
		link: Arc<Link>,
		children: Vec<PendingNode>,
	},
}

/// Renders menus for one platform and link registry.
pub struct MenuBuilder<'a> {
	platform: &'a Platform,
	links: &'a Registry<Link>,
}

impl<'a> MenuBuilder<'a> {
	/// Creates a builder.
	pub fn new(platform: &'a Platform, links: &'a Registry<Link>) -> Self {
		Self { platform, links }
	}

	/// Structural pass over a link point.
	pub fn build(&self, point: &str) -> PendingMenu<'a> {
		PendingMenu {
			platform: self.platform,
			nodes: self.build_nodes(point, 0),
		}
	}

	/// Resolves the baton's collection, then builds and settles in one go.
	pub async fn render(&self, point: &str, baton: &mut Baton) -> Menu {
		baton.collection_mut().resolve(self.platform.folders()).await;
		self.build(point).settle(baton).await
	}

	fn build_nodes(&self, point: &str, depth: usize) -> Vec<PendingNode> {
		if depth >= MAX_DEPTH {
			tracing::warn!(point, "dropdown nesting too deep, truncating");
			return Vec::new();
		}

		let mut nodes = Vec::new();
		for link in self.links.list(point) {
			match link.kind().clone() {
				LinkKind::Invoke(action_point) => {
					let candidates: Vec<Arc<Action>> = self
						.platform
						.actions()
						.list(&action_point)
						.into_iter()
						.filter(|action| is_available(self.platform.gate(), self.platform.device(), action))
						.collect();
					// No available action at all: the link does not render,
					// not even disabled.
					if candidates.is_empty() {
						continue;
					}
					nodes.push(PendingNode::Leaf {
						link,
						point: action_point,
						candidates,
					});
				}
				LinkKind::Dropdown(nested_point) => {
					let children = self.build_nodes(&nested_point, depth + 1);
					if children.is_empty() {
						continue;
					}
					nodes.push(PendingNode::Dropdown { link, children });
				}
			}
		}
		nodes
	}
}

/// Structure with unsettled enablement.
pub struct PendingMenu<'a> {
	platform: &'a Platform,
	nodes: Vec<PendingNode>,
}

impl PendingMenu<'_> {
	/// The structural tree with every state still pending. What a host
	/// shows immediately while matchers resolve.
	pub fn skeleton(&self) -> Menu {
		fn walk(nodes: &[PendingNode]) -> Vec<MenuNode> {
			nodes
				.iter()
				.map(|node| match node {
					PendingNode::Leaf { link, point, .. } => MenuNode::Item(menu_item(link, point, EnableState::Pending)),
					PendingNode::Dropdown { link, children } => MenuNode::Submenu {
						toggle: toggle_item(link, EnableState::Pending),
						nodes: walk(children),
					},
				})
				.collect()
		}
		Menu {
			nodes: walk(&self.nodes),
		}
	}

	/// Resolves all matcher chains and finishes the tree.
	pub async fn settle(self, baton: &Baton) -> Menu {
		Menu {
			nodes: settle_nodes(self.platform, &self.nodes, baton).await,
		}
	}
}

fn settle_nodes<'a>(platform: &'a Platform, nodes: &'a [PendingNode], baton: &'a Baton) -> BoxFutureLocal<'a, Vec<MenuNode>> {
	Box::pin(async move {
		let mut resolved: Vec<(Arc<Link>, MenuNode)> = Vec::new();

		for node in nodes {
			match node {
				PendingNode::Leaf { link, point, candidates } => {
					let enabled = link_enabled(platform, point, candidates, baton).await;
					if !enabled && !link.draw_disabled() {
						continue;
					}
					let state = if enabled { EnableState::Enabled } else { EnableState::Disabled };
					resolved.push((Arc::clone(link), MenuNode::Item(menu_item(link, point, state))));
				}
				PendingNode::Dropdown { link, children } => {
					let sub = settle_nodes(platform, children, baton).await;
					let enabled = sub.iter().any(node_has_enabled);
					if !enabled && !link.draw_disabled() {
						tracing::trace!(link = link.id(), "hiding dropdown with no actionable item");
						continue;
					}
					let state = if enabled { EnableState::Enabled } else { EnableState::Disabled };
					resolved.push((
						Arc::clone(link),
						MenuNode::Submenu {
							toggle: toggle_item(link, state),
							nodes: sub,
						},
					));
				}
			}
		}

		section_pass(resolved)
	})
}

/// Short-circuit walk of one link's candidates, in priority order: the
/// first action that is eligible and matches enables the link. Eligibility
/// re-checks the propagation flag each step, so an action claiming
/// exclusivity mid-walk ends the link as if no further actions existed.
async fn link_enabled(platform: &Platform, action_point: &str, candidates: &[Arc<Action>], baton: &Baton) -> bool {
	for action in candidates {
		if baton.is_disabled(action_point, action.id()) {
			continue;
		}
		if !is_eligible(baton, platform.folders(), action) {
			continue;
		}
		match action.matcher() {
			Some(matcher) => {
				if matcher.matches(baton, action.id()).await {
					return true;
				}
			}
			None => return true,
		}
	}
	false
}

fn node_has_enabled(node: &MenuNode) -> bool {
	match node {
		MenuNode::Item(item) => item.is_enabled(),
		MenuNode::Submenu { nodes, .. } => nodes.iter().any(node_has_enabled),
		_ => false,
	}
}

/// Injects dividers, section titles, and caption rows around the resolved
/// items. A divider precedes the first item of each new section tag, never
/// the very first item; a section title renders when the section's first
/// link declares one; a caption row follows any item tagged with one.
fn section_pass(resolved: Vec<(Arc<Link>, MenuNode)>) -> Vec<MenuNode> {
	let mut out = Vec::new();
	let mut last_section: Option<String> = None;
	let mut first = true;

	for (link, node) in resolved {
		let section = link.section().map(str::to_string);
		if section != last_section || first {
			if !first {
				out.push(MenuNode::Divider);
			}
			if let Some(title) = link.section_title() {
				out.push(MenuNode::SectionTitle(title.to_string()));
			}
			last_section = section;
		}
		first = false;

		let caption = link.caption().map(str::to_string);
		out.push(node);
		if let Some(caption) = caption {
			out.push(MenuNode::Caption(caption));
		}
	}

	out
}

fn menu_item(link: &Link, point: &str, state: EnableState) -> MenuItem {
	MenuItem {
		link_id: link.id().to_string(),
		label: link.label().to_string(),
		icon: link.icon().map(str::to_string),
		point: point.to_string(),
		state,
		aria: Aria {
			role: "menuitem",
			disabled: state == EnableState::Disabled,
			haspopup: false,
			expanded: false,
			label: link.tooltip().unwrap_or(link.label()).to_string(),
		},
	}
}

fn toggle_item(link: &Link, state: EnableState) -> MenuItem {
	MenuItem {
		link_id: link.id().to_string(),
		label: link.label().to_string(),
		icon: link.icon().map(str::to_string),
		point: String::new(),
		state,
		aria: Aria {
			role: "button",
			disabled: state == EnableState::Disabled,
			haspopup: true,
			expanded: false,
			label: link.tooltip().unwrap_or(link.label()).to_string(),
		},
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use pretty_assertions::assert_eq;
	use serde_json::json;
	use switchboard_actions::{Action, Baton, CapabilityGate, Matcher, MemFolders, Platform, Registry, StaticGate};

	use super::*;

	fn platform() -> Platform {
		Platform::new(Arc::new(StaticGate::new()) as Arc<dyn CapabilityGate>, Arc::new(MemFolders::new()))
	}

	async fn render(platform: &Platform, links: &Registry<Link>, point: &str, baton: &mut Baton) -> Menu {
		MenuBuilder::new(platform, links).render(point, baton).await
	}

	#[tokio::test]
	async fn link_without_available_actions_is_omitted() {
		let platform = platform();
		let links = Registry::new();
		links.extend("toolbar", Link::invoke("ghost", "Ghost", "ghost/actions").build());
		platform.actions().extend("real/actions", Action::builder("go").build());
		links.extend("toolbar", Link::invoke("real", "Real", "real/actions").priority(10).build());

		let mut baton = Baton::new(vec![json!({"id": "1"})]);
		let menu = render(&platform, &links, "toolbar", &mut baton).await;
		assert_eq!(menu.link_ids(), vec!["real"]);
	}

	#[tokio::test]
	async fn disabled_link_hides_unless_draw_disabled() {
		let platform = platform();
		platform
			.actions()
			.extend("never/actions", Action::builder("never").matcher(Matcher::new(|_| false)).build());

		let links = Registry::new();
		links.extend("toolbar", Link::invoke("hidden", "Hidden", "never/actions").build());
		links.extend("toolbar", Link::invoke("shown", "Shown", "never/actions").priority(10).draw_disabled().build());

		let mut baton = Baton::new(vec![json!({"id": "1"})]);
		let menu = render(&platform, &links, "toolbar", &mut baton).await;
		assert_eq!(menu.link_ids(), vec!["shown"]);
		match &menu.nodes[0] {
			MenuNode::Item(item) => {
				assert_eq!(item.state, EnableState::Disabled);
				assert!(item.aria.disabled);
			}
			other => panic!("expected disabled item, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn matcher_walk_short_circuits_per_link() {
		let platform = platform();
		platform
			.actions()
			.extend("pt/actions", Action::builder("no").priority(10).matcher(Matcher::new(|_| false)).build());
		platform
			.actions()
			.extend("pt/actions", Action::builder("yes").priority(20).matcher(Matcher::new(|_| true)).build());

		let links = Registry::new();
		links.extend("toolbar", Link::invoke("pt", "Pt", "pt/actions").build());

		let mut baton = Baton::new(vec![json!({"id": "1"})]);
		let menu = render(&platform, &links, "toolbar", &mut baton).await;
		assert_eq!(menu.enabled_count(), 1);
	}

	#[tokio::test]
	async fn propagation_stop_ends_the_walk() {
		let platform = platform();
		// The first matcher claims exclusivity and rejects; the second
		// would match but must be skipped.
		platform.actions().extend(
			"pt/actions",
			Action::builder("claims")
				.priority(10)
				.matcher(Matcher::new(|baton: &Baton| {
					baton.stop_propagation();
					false
				}))
				.build(),
		);
		platform
			.actions()
			.extend("pt/actions", Action::builder("late").priority(20).matcher(Matcher::new(|_| true)).build());

		let links = Registry::new();
		links.extend("toolbar", Link::invoke("pt", "Pt", "pt/actions").draw_disabled().build());

		let mut baton = Baton::new(vec![json!({"id": "1"})]);
		let menu = render(&platform, &links, "toolbar", &mut baton).await;
		assert_eq!(menu.enabled_count(), 0);
		assert_eq!(menu.link_ids(), vec!["pt"]);
	}

	#[tokio::test]
	async fn sections_dividers_titles_and_captions() {
		let platform = platform();
		platform.actions().extend("a/actions", Action::builder("a").build());

		let links = Registry::new();
		links.extend("toolbar", Link::invoke("one", "One", "a/actions").priority(10).section("first").build());
		links.extend("toolbar", Link::invoke("two", "Two", "a/actions").priority(20).section("first").build());
		links.extend(
			"toolbar",
			Link::invoke("three", "Three", "a/actions")
				.priority(30)
				.section("second")
				.section_title("Second")
				.caption("acts on the selection")
				.build(),
		);

		let mut baton = Baton::new(vec![json!({"id": "1"})]);
		let menu = render(&platform, &links, "toolbar", &mut baton).await;

		let shape: Vec<&str> = menu
			.nodes
			.iter()
			.map(|node| match node {
				MenuNode::Item(item) => item.link_id.as_str(),
				MenuNode::Divider => "---",
				MenuNode::SectionTitle(_) => "title",
				MenuNode::Caption(_) => "caption",
				MenuNode::Submenu { .. } => "submenu",
			})
			.collect();
		assert_eq!(shape, vec!["one", "two", "---", "title", "three", "caption"]);
	}

	#[tokio::test]
	async fn nested_dropdown_hides_when_inert() {
		let platform = platform();
		platform
			.actions()
			.extend("never/actions", Action::builder("never").matcher(Matcher::new(|_| false)).build());
		platform.actions().extend("ok/actions", Action::builder("ok").build());

		let links = Registry::new();
		links.extend("toolbar", Link::dropdown("more", "More", "toolbar/more").build());
		links.extend("toolbar/more", Link::invoke("never", "Never", "never/actions").build());

		let mut baton = Baton::new(vec![json!({"id": "1"})]);
		let menu = render(&platform, &links, "toolbar", &mut baton).await;
		assert!(menu.is_empty());

		// With one live child the dropdown renders, toggle enabled.
		links.extend("toolbar/more", Link::invoke("ok", "Ok", "ok/actions").priority(10).build());
		let mut baton = Baton::new(vec![json!({"id": "1"})]);
		let menu = render(&platform, &links, "toolbar", &mut baton).await;
		match &menu.nodes[0] {
			MenuNode::Submenu { toggle, nodes } => {
				assert_eq!(toggle.state, EnableState::Enabled);
				assert!(toggle.aria.haspopup);
				assert_eq!(nodes.len(), 1);
			}
			other => panic!("expected submenu, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn skeleton_is_structural_with_pending_states() {
		let platform = platform();
		platform.actions().extend("a/actions", Action::builder("a").matcher(Matcher::new(|_| true)).build());

		let links = Registry::new();
		links.extend("toolbar", Link::invoke("one", "One", "a/actions").build());

		let builder = MenuBuilder::new(&platform, &links);
		let skeleton = builder.build("toolbar").skeleton();
		assert_eq!(skeleton.link_ids(), vec!["one"]);
		match &skeleton.nodes[0] {
			MenuNode::Item(item) => assert_eq!(item.state, EnableState::Pending),
			other => panic!("expected item, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn rerender_is_idempotent() {
		let platform = platform();
		platform.actions().extend("a/actions", Action::builder("a").build());
		platform
			.actions()
			.extend("b/actions", Action::builder("b").matcher(Matcher::new(|_| false)).build());

		let links = Registry::new();
		links.extend("toolbar", Link::invoke("one", "One", "a/actions").priority(10).section("x").build());
		links.extend("toolbar", Link::invoke("two", "Two", "b/actions").priority(20).section("y").draw_disabled().build());

		let mut first = Baton::new(vec![json!({"id": "1"})]);
		let menu_a = render(&platform, &links, "toolbar", &mut first).await;
		let mut second = Baton::new(vec![json!({"id": "1"})]);
		let menu_b = render(&platform, &links, "toolbar", &mut second).await;
		assert_eq!(menu_a, menu_b);
	}
}
