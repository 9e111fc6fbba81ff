//! Menu rendering over the dispatch pipeline.
//!
//! Links registered on menu points reference action points; rendering runs
//! the same gating pipeline the invoker uses and produces a widget-neutral
//! [`Menu`] tree in two phases: [`MenuBuilder::build`] yields the structure
//! immediately (availability only, enablement pending), and
//! [`PendingMenu::settle`] resolves every link's matcher chain, drops or
//! disables what ended up inert, and injects section dividers and titles.
//!
//! Placement of detached menus and the selection-driven re-render slot live
//! here too.

pub mod item;
pub mod link;
pub mod position;
pub mod render;
pub mod selection;

pub use item::{Aria, EnableState, Menu, MenuItem, MenuNode};
pub use link::{Link, LinkBuilder, LinkKind};
pub use position::{Anchor, VIEWPORT_MARGIN, place};
pub use render::{MenuBuilder, PendingMenu};
pub use selection::{SelectionSlot, SelectionTicket};
