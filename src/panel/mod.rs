//! ReviewPanelState: navigation panel over a projected test map.
//!
//! The panel owns the projection, the active item, the active filter and the
//! accordion fold state. Everything it hands out is either borrowed
//! read-only or an owned [`PanelView`] snapshot.

mod events;
mod filter_state;
mod layout;
mod state;

pub use events::PanelEvent;
pub use filter_state::{FilterOption, FilterSelection};
pub use layout::{
    AccordionPart, AccordionSection, FilterButton, FizzyButton, FizzySection, NavItem, PanelBody,
    PanelPhase, PanelView, ScoreLine,
};
pub use state::ReviewPanel;
