//! ReviewPanel: navigation state over a projected test map.

use super::events::PanelEvent;
use super::filter_state::FilterSelection;
use super::layout::{build_body, BodyContext, FilterButton, PanelPhase, PanelView, ScoreLine};
use crate::config::{PanelConfig, ReviewLayout};
use crate::error::Result;
use crate::events::{EventEmitter, ListenerId};
use crate::model::TestMap;
use crate::projection::{
    apply_filter, project, ProjectOptions, ProjectedItem, ProjectedPart, ProjectedRoot,
    ReviewFilter,
};
use indexmap::IndexSet;

/// Review panel state machine.
///
/// Construction is two-phase: attach listeners with [`ReviewPanel::on`],
/// then call [`ReviewPanel::start`]. Nothing is emitted before `start()`.
///
/// The unfiltered projection is kept alongside the filtered view. Item
/// lookup, active-item fallback and the header score always use the
/// unfiltered projection.
#[derive(Debug)]
pub struct ReviewPanel {
    config: PanelConfig,
    phase: PanelPhase,
    source: TestMap,
    projection: ProjectedRoot,
    visible: Vec<ProjectedPart>,
    active_item: Option<String>,
    filters: FilterSelection,
    expanded: IndexSet<String>,
    disabled: bool,
    pending_map: Option<TestMap>,
    events: EventEmitter<PanelEvent>,
}

impl ReviewPanel {
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        let filters = FilterSelection::new(&config.filters);
        Self {
            config,
            phase: PanelPhase::Uninitialized,
            source: TestMap::default(),
            projection: ProjectedRoot::default(),
            visible: Vec::new(),
            active_item: None,
            filters,
            expanded: IndexSet::new(),
            disabled: false,
            pending_map: None,
            events: EventEmitter::new(),
        }
    }

    /// Map loaded by `start()` right after `ready`.
    #[must_use]
    pub fn with_initial_map(mut self, map: TestMap) -> Self {
        self.pending_map = Some(map);
        self
    }

    pub fn on(&mut self, listener: impl FnMut(&PanelEvent) + 'static) -> ListenerId {
        self.events.on(listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Direct access to the emitter, e.g. to attach an [`EventQueue`](crate::events::EventQueue).
    pub fn events_mut(&mut self) -> &mut EventEmitter<PanelEvent> {
        &mut self.events
    }

    /// Fire `ready`, then load the initial map if one was supplied.
    pub fn start(&mut self) {
        if self.phase != PanelPhase::Uninitialized {
            tracing::debug!(phase = ?self.phase, "Panel already started");
            return;
        }
        self.phase = PanelPhase::Rendered;
        self.emit(PanelEvent::Ready);
        if let Some(map) = self.pending_map.take() {
            self.set_data(&map);
        }
    }

    /// Replace the source map.
    ///
    /// Fires `datachange`, then `active` when the active item moved, `expand`
    /// when its section was opened, and finally `update`.
    pub fn set_data(&mut self, map: &TestMap) {
        if self.is_destroyed("set_data") {
            return;
        }
        self.source = map.clone();
        self.projection = project(map, self.project_options());
        self.emit(PanelEvent::DataChange);

        let kept = self
            .active_item
            .as_deref()
            .filter(|id| self.projection.contains(id))
            .map(str::to_string);
        let next = kept.or_else(|| self.projection.first_item().map(|item| item.id.clone()));
        if next != self.active_item {
            tracing::debug!(from = ?self.active_item, to = ?next, "Active item fallback");
            self.active_item = next.clone();
            if let Some(item_id) = next {
                self.emit(PanelEvent::Active { item_id });
            }
        }

        let projection = &self.projection;
        self.expanded.retain(|id| {
            projection
                .parts
                .iter()
                .flat_map(|part| part.sections.iter())
                .any(|section| &section.id == id)
        });
        self.expand_active_section();
        self.refresh();
    }

    /// Host-driven selection. Never fires `itemchange`.
    ///
    /// Returns false (and does nothing) when `id` is already active or not
    /// part of the current map.
    pub fn set_active_item(&mut self, id: &str) -> bool {
        if self.is_destroyed("set_active_item") {
            return false;
        }
        if self.active_item.as_deref() == Some(id) || !self.projection.contains(id) {
            return false;
        }
        tracing::debug!(item = id, "Active item set");
        self.active_item = Some(id.to_string());
        self.emit(PanelEvent::Active {
            item_id: id.to_string(),
        });
        self.expand_active_section();
        true
    }

    /// Reviewer click on an item: fires `active` when the item changes, then
    /// always `itemchange` so the host jumps to it.
    pub fn select_item(&mut self, id: &str) -> bool {
        if self.is_destroyed("select_item") {
            return false;
        }
        if self.disabled {
            tracing::debug!(item = id, "Selection ignored while disabled");
            return false;
        }
        let Some(position) = self.position_of(id) else {
            tracing::warn!(item = id, "Selected item is not part of the test map");
            return false;
        };
        self.set_active_item(id);
        self.emit(PanelEvent::ItemChange {
            item_id: id.to_string(),
            position,
        });
        true
    }

    /// Activate a configured filter by id; fires `filterchange` then `update`.
    ///
    /// Unknown or unconfigured ids are rejected and leave the panel untouched.
    pub fn set_active_filter(&mut self, filter_id: &str) -> Result<()> {
        if self.is_destroyed("set_active_filter") {
            return Ok(());
        }
        let filter = self.filters.set(filter_id)?;
        self.filter_changed(filter);
        Ok(())
    }

    /// Cycle to the next configured filter. No-op without filters.
    pub fn next_filter(&mut self) {
        if self.is_destroyed("next_filter") {
            return;
        }
        if let Some(filter) = self.filters.next() {
            self.filter_changed(filter);
        }
    }

    /// Cycle to the previous configured filter. No-op without filters.
    pub fn prev_filter(&mut self) {
        if self.is_destroyed("prev_filter") {
            return;
        }
        if let Some(filter) = self.filters.prev() {
            self.filter_changed(filter);
        }
    }

    /// Open or close an accordion section. Returns the new expanded state,
    /// `None` when the section is unknown or the layout has no sections to fold.
    pub fn toggle_section(&mut self, section_id: &str) -> Option<bool> {
        if self.is_destroyed("toggle_section") || !self.folds_sections() {
            return None;
        }
        if !self.has_section(section_id) {
            return None;
        }
        if self.expanded.shift_remove(section_id) {
            self.emit(PanelEvent::Collapse {
                section_id: section_id.to_string(),
            });
            Some(false)
        } else {
            self.expand(section_id);
            Some(true)
        }
    }

    pub fn expand_all(&mut self) {
        if self.is_destroyed("expand_all") || !self.folds_sections() {
            return;
        }
        for id in self.section_ids() {
            self.expand(&id);
        }
    }

    pub fn collapse_all(&mut self) {
        if self.is_destroyed("collapse_all") || !self.folds_sections() {
            return;
        }
        for section_id in std::mem::take(&mut self.expanded) {
            self.emit(PanelEvent::Collapse { section_id });
        }
    }

    pub fn enable(&mut self) {
        if self.is_destroyed("enable") || !self.disabled {
            return;
        }
        self.disabled = false;
        self.emit(PanelEvent::Enable);
    }

    pub fn disable(&mut self) {
        if self.is_destroyed("disable") || self.disabled {
            return;
        }
        self.disabled = true;
        self.emit(PanelEvent::Disable);
    }

    /// Fire `destroy`, detach every listener and drop the data.
    pub fn destroy(&mut self) {
        if self.phase == PanelPhase::Destroyed {
            return;
        }
        self.emit(PanelEvent::Destroy);
        self.events.clear();
        self.phase = PanelPhase::Destroyed;
        self.source = TestMap::default();
        self.projection = ProjectedRoot::default();
        self.visible.clear();
        self.expanded.clear();
        self.active_item = None;
        self.pending_map = None;
        tracing::debug!("Panel destroyed");
    }

    // ------------------------------------------------------------------
    // Read-only accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn phase(&self) -> PanelPhase {
        self.phase
    }

    #[must_use]
    pub const fn config(&self) -> &PanelConfig {
        &self.config
    }

    #[must_use]
    pub fn active_item(&self) -> Option<&str> {
        self.active_item.as_deref()
    }

    /// Id of the active filter, `None` when no filter is configured.
    #[must_use]
    pub fn active_filter(&self) -> Option<&'static str> {
        self.filters.current().map(|option| option.filter.id())
    }

    #[must_use]
    pub fn current_filter(&self) -> ReviewFilter {
        self.filters.current_filter()
    }

    /// Projected item from the unfiltered lookup.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&ProjectedItem> {
        self.projection.item(id)
    }

    #[must_use]
    pub const fn projection(&self) -> &ProjectedRoot {
        &self.projection
    }

    /// The filtered tree currently displayed.
    #[must_use]
    pub fn visible_parts(&self) -> &[ProjectedPart] {
        &self.visible
    }

    /// The map last passed to `set_data`.
    #[must_use]
    pub const fn source_map(&self) -> &TestMap {
        &self.source
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_expanded(&self, section_id: &str) -> bool {
        self.expanded.contains(section_id)
    }

    /// Build a snapshot of the displayed state.
    #[must_use]
    pub fn view(&self) -> PanelView {
        let totals = self.projection.totals.filter(|_| self.config.show_score);
        let header = totals.and_then(|totals| {
            self.config
                .header_label
                .as_ref()
                .map(|label| ScoreLine::new(label.clone(), totals))
        });
        let footer = totals.and_then(|totals| {
            self.config
                .footer_label
                .as_ref()
                .map(|label| ScoreLine::new(label.clone(), totals))
        });
        let active_filter = self.filters.current().map(|option| option.filter);
        let filters = self
            .filters
            .options()
            .iter()
            .map(|option| FilterButton {
                id: option.filter.id().to_string(),
                label: option.label.clone(),
                active: Some(option.filter) == active_filter,
            })
            .collect();
        let ctx = BodyContext {
            config: &self.config,
            active_item: self.active_item.as_deref(),
            expanded: &self.expanded,
        };

        PanelView {
            phase: self.phase,
            layout: self.config.layout,
            disabled: self.disabled,
            active_item_id: self.active_item.clone(),
            active_filter: active_filter.map(|filter| filter.id().to_string()),
            filters,
            header,
            footer,
            body: build_body(&self.visible, &ctx),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn project_options(&self) -> ProjectOptions {
        ProjectOptions::default()
            .with_score(self.config.show_score)
            .show_correct(self.config.show_correct)
            .numbered_labels(self.config.layout == ReviewLayout::Fizzy)
    }

    fn filter_changed(&mut self, filter: ReviewFilter) {
        tracing::debug!(filter = filter.id(), "Filter changed");
        self.emit(PanelEvent::FilterChange {
            filter_id: filter.id().to_string(),
        });
        self.refresh();
    }

    /// Re-derive the displayed view from the unfiltered projection.
    fn refresh(&mut self) {
        self.visible = apply_filter(&self.projection.parts, self.filters.current_filter());
        if self.phase != PanelPhase::Uninitialized {
            self.phase = PanelPhase::Filtered;
        }
        self.emit(PanelEvent::Update);
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        let (idx, _, item) = self.projection.items.get_full(id)?;
        Some(item.position.unwrap_or(idx))
    }

    const fn folds_sections(&self) -> bool {
        matches!(self.config.layout, ReviewLayout::Default)
    }

    fn section_ids(&self) -> Vec<String> {
        self.projection
            .parts
            .iter()
            .flat_map(|part| part.sections.iter())
            .filter(|section| !section.id.is_empty())
            .map(|section| section.id.clone())
            .collect()
    }

    fn has_section(&self, section_id: &str) -> bool {
        !section_id.is_empty() && self.section_ids().iter().any(|id| id == section_id)
    }

    fn expand(&mut self, section_id: &str) {
        if self.expanded.insert(section_id.to_string()) {
            self.emit(PanelEvent::Expand {
                section_id: section_id.to_string(),
            });
        }
    }

    fn expand_active_section(&mut self) {
        if !self.folds_sections() {
            return;
        }
        let section_id = self
            .active_item
            .as_deref()
            .and_then(|id| self.projection.section_of(id))
            .map(|section| section.id.clone())
            .filter(|id| !id.is_empty());
        if let Some(section_id) = section_id {
            self.expand(&section_id);
        }
    }

    fn is_destroyed(&self, operation: &str) -> bool {
        let destroyed = self.phase == PanelPhase::Destroyed;
        if destroyed {
            tracing::warn!(operation, "Panel operation after destroy ignored");
        }
        destroyed
    }

    fn emit(&mut self, event: PanelEvent) {
        if self.phase == PanelPhase::Uninitialized {
            tracing::trace!(event = ?event, "Panel not started, event dropped");
            return;
        }
        self.events.emit(&event);
    }
}
