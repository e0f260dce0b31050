use crate::layout::floating::{clamp_position, clamp_size};
use crate::layout::{Point, Size, Viewport};

use super::chrome::{ChromeMetrics, WindowZone};
use super::{AppId, WindowRecord};

/// One dock slot as the dock dispatcher sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockEntry {
    pub id: AppId,
    pub icon: &'static str,
    pub title: &'static str,
    /// The window is open, minimized or not.
    pub running: bool,
    /// The window is open and not minimized.
    pub visible: bool,
    pub active: bool,
}

/// Owns every window record, the stacking counter and the active window.
///
/// Every operation is total. Ids come from the closed [`AppId`] set, so a
/// missing record means the registry was built from an incomplete layout;
/// that trips a debug assertion and is otherwise ignored.
#[derive(Debug, Clone)]
pub struct WindowRegistry {
    windows: Vec<WindowRecord>,
    max_z: u64,
    active: Option<AppId>,
    viewport: Viewport,
}

impl WindowRegistry {
    /// Builds a registry over `records`. The stacking counter starts at the
    /// highest z in use and the topmost open window, if any, is active.
    pub fn new(viewport: Viewport, records: Vec<WindowRecord>) -> Self {
        let max_z = records.iter().map(|r| r.z_index).max().unwrap_or(0);
        let active = records
            .iter()
            .filter(|r| r.is_visible())
            .max_by_key(|r| r.z_index)
            .map(|r| r.id);
        Self {
            windows: records,
            max_z,
            active,
            viewport,
        }
    }

    pub fn with_default_layout(viewport: Viewport) -> Self {
        Self::new(viewport, super::default_layout())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Later moves clamp against the new bounds; existing positions are left
    /// alone.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport != viewport {
            tracing::debug!(width = viewport.width, height = viewport.height, "viewport changed");
            self.viewport = viewport;
        }
    }

    pub fn active(&self) -> Option<AppId> {
        self.active
    }

    pub fn max_z(&self) -> u64 {
        self.max_z
    }

    pub fn get(&self, id: AppId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    fn record_mut(&mut self, id: AppId) -> Option<&mut WindowRecord> {
        let found = self.windows.iter_mut().find(|w| w.id == id);
        debug_assert!(found.is_some(), "no window record for {id:?}");
        if found.is_none() {
            tracing::warn!(window_id = ?id, "ignoring command for unknown window");
        }
        found
    }

    fn raise(&mut self, id: AppId) -> bool {
        let z = self.max_z + 1;
        let Some(window) = self.record_mut(id) else {
            return false;
        };
        window.z_index = z;
        self.max_z = z;
        self.active = Some(id);
        true
    }

    pub fn open(&mut self, id: AppId) {
        if self.get(id).is_some_and(WindowRecord::is_visible) {
            self.focus(id);
            return;
        }
        let Some(window) = self.record_mut(id) else {
            return;
        };
        window.is_open = true;
        window.is_minimized = false;
        if self.raise(id) {
            tracing::debug!(window_id = ?id, z = self.max_z, "opened window");
        }
    }

    /// Position, size and the minimized flag survive for the next open.
    pub fn close(&mut self, id: AppId) {
        let Some(window) = self.record_mut(id) else {
            return;
        };
        window.is_open = false;
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::debug!(window_id = ?id, "closed window");
    }

    pub fn minimize(&mut self, id: AppId) {
        let Some(window) = self.record_mut(id) else {
            return;
        };
        window.is_minimized = true;
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::debug!(window_id = ?id, "minimized window");
    }

    pub fn focus(&mut self, id: AppId) {
        if self.raise(id) {
            tracing::debug!(window_id = ?id, z = self.max_z, "focused window");
        }
    }

    pub fn move_window(&mut self, id: AppId, position: Point) {
        let viewport = self.viewport;
        if let Some(window) = self.record_mut(id) {
            window.position = clamp_position(position, window.size, viewport);
        }
    }

    /// Applies the minimum size only. A resize never re-clamps the position.
    pub fn resize_window(&mut self, id: AppId, size: Size) {
        if let Some(window) = self.record_mut(id) {
            window.size = clamp_size(size);
        }
    }

    /// Visible windows, bottom of the stack first.
    pub fn visible_in_paint_order(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// The topmost visible window under `point` and the zone that was hit.
    pub fn hit_test(&self, point: Point, metrics: &ChromeMetrics) -> Option<(AppId, WindowZone)> {
        self.visible_in_paint_order()
            .into_iter()
            .rev()
            .find_map(|w| WindowZone::hit_test(w.rect(), point, metrics).map(|zone| (w.id, zone)))
    }

    /// Visible windows after `current` in stacking order, wrapping around.
    pub fn next_visible_after(&self, current: Option<AppId>) -> Option<AppId> {
        let ordered: Vec<AppId> = self.visible_in_paint_order().iter().map(|w| w.id).collect();
        if ordered.is_empty() {
            return None;
        }
        let next = current
            .and_then(|id| ordered.iter().position(|&o| o == id))
            .map(|idx| (idx + 1) % ordered.len())
            .unwrap_or(0);
        ordered.get(next).copied()
    }

    pub fn dock_entries(&self) -> Vec<DockEntry> {
        self.windows
            .iter()
            .map(|w| DockEntry {
                id: w.id,
                icon: w.icon,
                title: w.title,
                running: w.is_open,
                visible: w.is_visible(),
                active: self.active == Some(w.id),
            })
            .collect()
    }
}
