// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::VecDeque;

use chrono::{Local, NaiveDate, NaiveDateTime};
use hashbrown::HashMap;
use kurbo::{Rect, Size};
use timegrid_gesture::{GestureAction, GestureAdapter, GestureEvent};
use timegrid_selection::{CommittedSelection, SelectionMachine, SelectionPhase};
use timegrid_slots::{GridSpace, SlotGrids, WorkingSlots, format_slot_label};
use timegrid_view::{SlotAxis, ZoomAxis, ZoomController, ZoomDebugInfo, ZoomLimits, hour_to_pixel};
use timegrid_virtual::{ColumnVirtualizer, ColumnWindow, RowVirtualizer, ScrollAlign, VirtualWindow};

use crate::keyboard::display_range_to_selection;
use crate::layout::{EventBox, TimedEvent, layout_column, now_indicator_offset};
use crate::{
    FocusCell, HapticPattern, KeyCommand, KeyOutcome, KeyboardNavigator, Resource,
    TimelineConfig, TimelineError, TimelineEvent, TimelineHandler,
};

/// A resource timeline for one day.
///
/// The timeline owns every piece of interactive state: the slot grids, the
/// zoom controller, the selection machine, the gesture adapter, keyboard focus
/// and both virtualizers. Input arrives as [`TimelineEvent`]s and is applied
/// in order; results go to the [`TimelineHandler`].
///
/// An invalid configuration is reported through
/// [`TimelineHandler::on_error`] and leaves the timeline inert: it has no
/// selectable slots and ignores gestures until a valid configuration is set.
#[derive(Debug)]
pub struct Timeline<H> {
    config: TimelineConfig,
    date: NaiveDate,
    resources: Vec<Resource>,
    resource_index: HashMap<String, usize>,
    grids: Option<SlotGrids>,
    zoom: ZoomController,
    gestures: GestureAdapter,
    selection: SelectionMachine<usize>,
    keyboard: KeyboardNavigator,
    rows: RowVirtualizer<f64>,
    columns: ColumnVirtualizer<f64>,
    viewport: Size,
    queue: VecDeque<TimelineEvent>,
    handler: H,
}

impl<H: TimelineHandler> Timeline<H> {
    /// Creates a timeline with a zero-sized viewport.
    ///
    /// Configuration and resource problems are reported to `handler` right
    /// away.
    pub fn new(
        config: TimelineConfig,
        date: NaiveDate,
        resources: Vec<Resource>,
        handler: H,
    ) -> Self {
        let zoom = ZoomController::new(
            config.grid.hour_height,
            config.layout.column_width,
            config.vertical_limits().unwrap_or(ZoomLimits::VERTICAL),
            config.horizontal_limits().unwrap_or(ZoomLimits::HORIZONTAL),
        );
        let mut timeline = Self {
            gestures: GestureAdapter::new(config.gesture_config()),
            rows: RowVirtualizer::new(0, 0.0, 0.0),
            columns: ColumnVirtualizer::new(resources.len(), config.layout.column_width, 0.0),
            config,
            date,
            resources,
            resource_index: HashMap::new(),
            grids: None,
            zoom,
            selection: SelectionMachine::new(),
            keyboard: KeyboardNavigator::new(),
            viewport: Size::ZERO,
            queue: VecDeque::new(),
            handler,
        };
        timeline.configure();
        timeline.index_resources();
        timeline
    }

    /// Current configuration.
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// Drops any gesture and selection in progress and resets zoom to the new
    /// natural extents.
    pub fn set_config(&mut self, config: TimelineConfig) {
        self.abort_interaction();
        self.config = config;
        self.configure();
    }

    /// Day shown.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Shows another day. The selection is cleared.
    pub fn set_date(&mut self, date: NaiveDate) {
        if date != self.date {
            self.abort_interaction();
            self.date = date;
        }
    }

    /// Columns, in display order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Replaces the columns.
    ///
    /// The selection is cleared and the column zoom restarts from its natural
    /// width.
    pub fn set_resources(&mut self, resources: Vec<Resource>) {
        self.abort_interaction();
        self.resources = resources;
        self.columns.set_count(self.resources.len());
        self.zoom
            .set_base_extent(ZoomAxis::Horizontal, self.config.layout.column_width);
        self.index_resources();
        self.apply_gesture_config();
        self.sync_extents();
        let focus = self.keyboard.focus();
        self.keyboard
            .focus_cell(focus, self.resources.len(), self.display_len());
    }

    /// Index of the resource with `id`.
    pub fn resource_position(&self, id: &str) -> Option<usize> {
        self.resource_index.get(id).copied()
    }

    /// Display and selection grids, or `None` while inert.
    pub fn grids(&self) -> Option<&SlotGrids> {
        self.grids.as_ref()
    }

    /// Returns `true` if the configuration was rejected.
    pub fn is_inert(&self) -> bool {
        self.grids.is_none()
    }

    /// The host callbacks.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The host callbacks, mutably.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Effective hour height, including a live pinch.
    pub fn hour_height(&self) -> f64 {
        self.zoom.hour_height()
    }

    /// Effective column width, including a live pinch.
    pub fn column_width(&self) -> f64 {
        self.zoom.column_width()
    }

    /// Zoom state snapshot.
    pub fn zoom_debug_info(&self) -> ZoomDebugInfo {
        self.zoom.debug_info()
    }

    /// The selection grid at the effective hour height.
    pub fn selection_axis(&self) -> Option<SlotAxis> {
        self.axis(GridSpace::Selection)
    }

    /// The display grid at the effective hour height.
    pub fn display_axis(&self) -> Option<SlotAxis> {
        self.axis(GridSpace::Display)
    }

    fn axis(&self, space: GridSpace) -> Option<SlotAxis> {
        let grids = self.grids.as_ref()?;
        Some(SlotAxis::for_grid(grids, space, self.zoom.hour_height()))
    }

    fn display_len(&self) -> usize {
        self.grids
            .as_ref()
            .map_or(0, |grids| grids.len(GridSpace::Display))
    }

    /// Display rows to render.
    pub fn visible_rows(&self) -> VirtualWindow<f64> {
        self.rows.window()
    }

    /// Resource columns to render.
    pub fn visible_columns(&self) -> ColumnWindow<f64> {
        self.columns.window()
    }

    /// Current scroll offsets.
    pub fn scroll_offset(&self) -> (f64, f64) {
        (self.columns.scroll_x(), self.rows.scroll_offset())
    }

    /// Phase of the selection machine.
    pub fn selection_phase(&self) -> SelectionPhase {
        self.selection.phase()
    }

    /// The highlighted selection-grid range and its resource id.
    pub fn highlighted_range(&self) -> Option<(&str, usize, usize)> {
        let (&column, start, end) = self.selection.highlighted_range()?;
        let resource = self.resources.get(column)?;
        Some((resource.id.as_str(), start, end))
    }

    /// Content-space rectangle of the highlighted range.
    pub fn selection_rect(&self) -> Option<Rect> {
        let (&column, start, end) = self.selection.highlighted_range()?;
        let axis = self.selection_axis()?;
        let width = self.zoom.column_width();
        let x = column as f64 * width;
        Some(axis.span_rect(start, end, x..x + width))
    }

    /// Keyboard focus and, while a range is anchored, its anchor.
    pub fn keyboard_focus(&self) -> (FocusCell, Option<FocusCell>) {
        (self.keyboard.focus(), self.keyboard.anchor())
    }

    /// Label of display slot `index` in the configured clock format.
    pub fn time_label(&self, index: usize) -> Option<String> {
        let grids = self.grids.as_ref()?;
        let slot = grids.slot(GridSpace::Display, index)?;
        let show_minutes = grids.interval(GridSpace::Display) % 60 != 0;
        Some(format_slot_label(
            slot.hours,
            slot.minutes,
            self.config.clock_format(),
            show_minutes,
        ))
    }

    /// Working-hours annotation of a resource on the timeline's date.
    pub fn working_slots(&self, resource_id: &str) -> Result<WorkingSlots, TimelineError> {
        let position = self
            .resource_position(resource_id)
            .ok_or_else(|| TimelineError::UnknownResource(resource_id.to_owned()))?;
        Ok(match self.grids.as_ref() {
            Some(grids) => self.resources[position].working_slots(self.date, grids),
            None => WorkingSlots::none(0),
        })
    }

    /// Minimum event height, scaled with the vertical zoom like the hour
    /// height.
    pub fn event_min_height(&self) -> f64 {
        self.config.grid.event_min_height * self.zoom.axis(ZoomAxis::Vertical).scale()
    }

    /// Lays out the events of one column at the effective hour height.
    pub fn layout_events(&self, events: &[TimedEvent]) -> Vec<EventBox> {
        let Some(grids) = self.grids.as_ref() else {
            return Vec::new();
        };
        layout_column(
            self.date,
            events,
            grids.range(),
            self.zoom.hour_height(),
            self.event_min_height(),
        )
    }

    /// Lays out the events of one column, keeping only those near the visible
    /// rows once there are enough events to be worth clipping.
    pub fn visible_events(&self, events: &[TimedEvent]) -> Vec<EventBox> {
        let mut boxes = self.layout_events(events);
        if self
            .config
            .layout
            .virtualizes_events(events.len(), self.resources.len())
        {
            let window = self.rows.window();
            let top = window.leading_offset;
            let bottom = window.content_extent - window.trailing_offset;
            boxes.retain(|b| b.top < bottom && b.top + b.height > top);
        }
        boxes
    }

    /// Offset of the now indicator at `now`, if it is enabled and visible.
    pub fn now_indicator_at(&self, now: NaiveDateTime) -> Option<f64> {
        if !self.config.grid.show_now_indicator {
            return None;
        }
        let grids = self.grids.as_ref()?;
        now_indicator_offset(self.date, now, grids.range(), self.zoom.hour_height())
    }

    /// Offset of the now indicator at the local wall-clock time.
    pub fn now_indicator(&self) -> Option<f64> {
        self.now_indicator_at(Local::now().naive_local())
    }

    /// Queues an event for the next [`process`](Self::process).
    pub fn push(&mut self, event: TimelineEvent) {
        self.queue.push_back(event);
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queues `event` and processes the queue.
    pub fn dispatch(&mut self, event: TimelineEvent, now_ms: u64) {
        self.push(event);
        self.process(now_ms);
    }

    /// Fires due timers, then applies every queued event in order.
    ///
    /// Returns the number of events applied.
    pub fn process(&mut self, now_ms: u64) -> usize {
        self.tick(now_ms);
        let mut applied = 0;
        while let Some(event) = self.queue.pop_front() {
            self.apply(event, now_ms);
            applied += 1;
        }
        applied
    }

    /// Fires due timers. Returns `true` if the selection was auto-cleared.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.selection.tick(now_ms)
    }

    /// Deadline of the next timer, so the host knows when to call
    /// [`tick`](Self::tick).
    pub fn next_deadline(&self) -> Option<u64> {
        self.selection.next_deadline()
    }

    /// Clears any selection, committed or in progress.
    pub fn clear_selection(&mut self) {
        self.gestures.cancel();
        self.selection.clear();
        self.keyboard.clear();
    }

    /// Abandons a drag in progress. A committed selection stays.
    pub fn clear_drag_selection(&mut self) {
        if self.selection.is_dragging() {
            self.gestures.cancel();
            self.selection.cancel_drag();
        }
    }

    /// Returns both zoom axes to scale `1`.
    pub fn reset_zoom(&mut self) {
        self.zoom.reset_zoom();
        self.sync_extents();
    }

    /// Resizes the viewport.
    pub fn resize(&mut self, size: Size) {
        self.viewport = size;
        self.rows.set_viewport_extent(size.height);
        self.columns.set_viewport_width(size.width);
        self.sync_extents();
    }

    /// Applies a host scroll. Offsets are clamped to the content.
    pub fn scroll_to(&mut self, x: Option<f64>, y: Option<f64>) {
        if let Some(y) = y.filter(|y| y.is_finite()) {
            self.rows.set_scroll_offset(y);
        }
        if let Some(x) = x.filter(|x| x.is_finite()) {
            self.columns.set_scroll_x(x.min(self.max_scroll_x()));
        }
    }

    /// Scrolls `resource_id` to the left edge and returns the new horizontal
    /// offset.
    pub fn scroll_to_resource(&mut self, resource_id: &str) -> Result<f64, TimelineError> {
        let Some(position) = self.resource_position(resource_id) else {
            let err = TimelineError::UnknownResource(resource_id.to_owned());
            self.handler.on_error(&err);
            return Err(err);
        };
        let x = self.columns.offset_for_index(position).min(self.max_scroll_x());
        self.columns.set_scroll_x(x);
        Ok(self.columns.scroll_x())
    }

    /// Scrolls a (fractional) hour of day to the top edge and returns the new
    /// vertical offset.
    pub fn scroll_to_time(&mut self, hour: f64) -> Option<f64> {
        if !hour.is_finite() {
            return None;
        }
        let grids = self.grids.as_ref()?;
        let y = hour_to_pixel(hour, grids.range().start_hour(), self.zoom.hour_height());
        self.rows.set_scroll_offset(y);
        Some(self.rows.scroll_offset())
    }

    /// Number of pages of [`LayoutConfig::resources_per_page`] columns.
    ///
    /// [`LayoutConfig::resources_per_page`]: crate::LayoutConfig::resources_per_page
    pub fn page_count(&self) -> usize {
        self.resources.len().div_ceil(self.resources_per_page())
    }

    /// Page nearest to the horizontal scroll offset.
    pub fn current_page(&self) -> usize {
        let page_width = self.page_width();
        if page_width <= 0.0 {
            return 0;
        }
        let page = (self.columns.scroll_x() / page_width).round();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "scroll offsets are non-negative and bounded by the content width"
        )]
        let page = page.max(0.0) as usize;
        page.min(self.page_count().saturating_sub(1))
    }

    /// Scrolls to the first column of `page` and returns the new horizontal
    /// offset, or `None` if there is no such page.
    pub fn scroll_to_page(&mut self, page: usize) -> Option<f64> {
        if page >= self.page_count() {
            log::trace!("no page {page}");
            return None;
        }
        let x = (page as f64 * self.page_width()).min(self.max_scroll_x());
        self.columns.set_scroll_x(x);
        Some(self.columns.scroll_x())
    }

    /// Horizontal scroll position as a fraction of the scrollable width, `0`
    /// when nothing scrolls.
    pub fn scroll_progress(&self) -> f64 {
        let max_x = self.max_scroll_x();
        if max_x > 0.0 {
            (self.columns.scroll_x() / max_x).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn resources_per_page(&self) -> usize {
        self.config.layout.resources_per_page.max(1)
    }

    fn page_width(&self) -> f64 {
        self.zoom.column_width() * self.resources_per_page() as f64
    }

    /// Stops everything: gestures, live zoom, timers and queued events.
    pub fn teardown(&mut self) {
        log::debug!("timeline teardown");
        self.gestures.cancel();
        self.zoom.cancel_live();
        self.selection.cancel_timers();
        self.queue.clear();
        self.sync_extents();
    }

    fn apply(&mut self, event: TimelineEvent, now_ms: u64) {
        match event {
            TimelineEvent::Gesture(gesture) => self.apply_gesture(gesture, now_ms),
            TimelineEvent::Key(key) => self.apply_key(key, now_ms),
            TimelineEvent::Resize(size) => self.resize(size),
            TimelineEvent::Scroll { x, y } => self.scroll_to(x, y),
            TimelineEvent::ClearSelection => self.clear_selection(),
            TimelineEvent::ClearDragSelection => self.clear_drag_selection(),
            TimelineEvent::ResetZoom => self.reset_zoom(),
            TimelineEvent::ScrollToResource(id) => {
                // Already reported to the handler.
                let _ = self.scroll_to_resource(&id);
            }
            TimelineEvent::ScrollToTime(hour) => {
                self.scroll_to_time(hour);
            }
            TimelineEvent::ScrollToPage(page) => {
                self.scroll_to_page(page);
            }
        }
    }

    fn apply_gesture(&mut self, gesture: GestureEvent, now_ms: u64) {
        let Some(axis) = self.selection_axis() else {
            log::trace!("inert timeline ignores {gesture:?}");
            return;
        };
        let actions = self.gestures.handle(gesture, &axis, now_ms);
        for action in actions {
            self.apply_action(action, now_ms);
        }
    }

    fn apply_action(&mut self, action: GestureAction, now_ms: u64) {
        match action {
            GestureAction::StartDrag { column, slot } => {
                if column >= self.resources.len() {
                    log::trace!("drag on missing column {column}");
                } else if self.selection.start_drag(column, slot) {
                    self.haptic(HapticPattern::Medium);
                }
            }
            GestureAction::UpdateDrag { slot } => {
                if self.selection.update_drag(slot) {
                    self.haptic(HapticPattern::Selection);
                }
            }
            GestureAction::CompleteDrag => {
                let Some(grids) = self.grids.as_ref() else {
                    return;
                };
                if let Some(committed) = self.selection.complete_drag(grids, now_ms) {
                    self.report(committed);
                }
            }
            GestureAction::CancelDrag => {
                self.selection.cancel_drag();
            }
            GestureAction::Press { column, slot } => {
                if column < self.resources.len() && self.selection.press(column, slot) {
                    self.haptic(HapticPattern::Light);
                }
            }
            GestureAction::Tap { column, slot } => {
                if column >= self.resources.len() {
                    log::trace!("tap on missing column {column}");
                } else if let Some(committed) = self.selection.commit_tap(column, slot, now_ms) {
                    self.report(committed);
                }
            }
            GestureAction::BeginZoom { axis } => {
                self.zoom.begin(axis);
            }
            GestureAction::LiveZoom { raw_scale } => {
                if self.zoom.update_live(raw_scale).is_some() {
                    self.sync_extents();
                }
            }
            GestureAction::CommitZoom => {
                if self.zoom.commit().is_some() {
                    self.haptic(HapticPattern::Light);
                }
                self.sync_extents();
            }
            GestureAction::CancelZoom => {
                self.zoom.cancel_live();
                self.sync_extents();
            }
        }
    }

    fn apply_key(&mut self, key: KeyCommand, now_ms: u64) {
        let Some(grids) = self.grids.as_ref() else {
            return;
        };
        let outcome = self
            .keyboard
            .handle(key, self.resources.len(), grids.len(GridSpace::Display));
        match outcome {
            KeyOutcome::Moved(cell) => {
                self.rows.scroll_to_index(cell.slot, ScrollAlign::Nearest);
            }
            KeyOutcome::Completed {
                resource,
                start_slot,
                end_slot,
            } => {
                let (start, end) = display_range_to_selection(grids, start_slot, end_slot);
                if !self.selection.start_drag(resource, start) {
                    log::trace!("keyboard selection ignored while dragging");
                    return;
                }
                self.selection.update_drag(end);
                if let Some(committed) = self.selection.complete_drag(grids, now_ms) {
                    self.report(committed);
                }
            }
            KeyOutcome::Anchored(_) | KeyOutcome::Cancelled | KeyOutcome::Ignored => {}
        }
    }

    fn report(&mut self, committed: CommittedSelection<usize>) {
        let Some(resource) = self.resources.get(committed.resource) else {
            let err = TimelineError::UnknownResource(committed.resource.to_string());
            self.handler.on_error(&err);
            return;
        };
        self.handler.on_time_slot_select(
            &resource.id,
            committed.start_slot,
            committed.end_slot,
        );
        self.haptic(HapticPattern::Success);
    }

    fn haptic(&mut self, pattern: HapticPattern) {
        if self.config.selection.haptics {
            self.handler.on_haptic(pattern);
        }
    }

    fn abort_interaction(&mut self) {
        self.gestures.cancel();
        self.zoom.cancel_live();
        self.selection.clear();
        self.keyboard.clear();
    }

    fn configure(&mut self) {
        if let Err(err) = self.try_configure() {
            log::warn!("timeline configuration rejected: {err}");
            self.grids = None;
            self.handler.on_error(&err);
        }
        self.apply_gesture_config();
        self.sync_extents();
    }

    fn try_configure(&mut self) -> Result<(), TimelineError> {
        self.config.validate()?;
        let grids = self.config.grids()?;
        self.zoom
            .set_limits(ZoomAxis::Vertical, self.config.vertical_limits()?);
        self.zoom
            .set_limits(ZoomAxis::Horizontal, self.config.horizontal_limits()?);
        self.zoom
            .set_base_extent(ZoomAxis::Vertical, self.config.grid.hour_height);
        self.zoom
            .set_base_extent(ZoomAxis::Horizontal, self.config.layout.column_width);
        self.selection
            .set_clear_after_commit(self.config.selection.clear_after_drag);
        self.selection
            .set_auto_clear_delay_ms(self.config.selection.auto_clear_ms);
        self.rows.set_overscan(self.config.layout.row_overscan);
        self.columns.set_threshold(self.config.layout.column_threshold);
        self.columns.set_buffer(self.config.layout.column_buffer);
        log::debug!(
            "timeline configured: {} display slots, {} selection slots",
            grids.len(GridSpace::Display),
            grids.len(GridSpace::Selection)
        );
        self.grids = Some(grids);
        Ok(())
    }

    fn apply_gesture_config(&mut self) {
        let horizontal = self.config.zoom.horizontal_enabled && self.resources.len() > 1;
        self.zoom.set_horizontal_enabled(horizontal);
        let mut gestures = self.config.gesture_config();
        gestures.horizontal_zoom_enabled = horizontal;
        self.gestures.set_config(gestures);
    }

    fn index_resources(&mut self) {
        self.resource_index.clear();
        let mut duplicate = None;
        for (position, resource) in self.resources.iter().enumerate() {
            if self.resource_index.contains_key(&resource.id) {
                duplicate.get_or_insert_with(|| resource.id.clone());
            } else {
                self.resource_index.insert(resource.id.clone(), position);
            }
        }
        if let Some(id) = duplicate {
            self.handler.on_error(&TimelineError::DuplicateResource(id));
        }
        if self.resources.is_empty() {
            self.handler.on_error(&TimelineError::EmptyResources);
        }
    }

    fn sync_extents(&mut self) {
        match self.grids.as_ref() {
            Some(grids) => {
                self.rows.set_len(grids.len(GridSpace::Display));
                self.rows.set_row_extent(
                    grids.slot_height(GridSpace::Display, self.zoom.hour_height()),
                );
            }
            None => self.rows.set_len(0),
        }
        self.columns.set_column_width(self.zoom.column_width());
        let max_x = self.max_scroll_x();
        if self.columns.scroll_x() > max_x {
            self.columns.set_scroll_x(max_x);
        }
    }

    fn max_scroll_x(&self) -> f64 {
        (self.columns.content_width() - self.viewport.width).max(0.0)
    }
}
