pub mod chrome;
pub mod decorator;

mod registry;

pub use chrome::{ChromeMetrics, WindowZone};
pub use registry::{DockEntry, WindowRegistry};

use crate::layout::{PixelRect, Point, Size};

/// The fixed set of applications hosted by the desktop. Windows are never
/// created or destroyed; each identity has exactly one record for the
/// registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppId {
    StatusPanel,
    WebViewer,
    Files,
    Gallery,
    Notes,
    Monitor,
    Settings,
}

impl AppId {
    pub const ALL: [AppId; 7] = [
        AppId::StatusPanel,
        AppId::WebViewer,
        AppId::Files,
        AppId::Gallery,
        AppId::Notes,
        AppId::Monitor,
        AppId::Settings,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            AppId::StatusPanel => "BILL Protocol",
            AppId::WebViewer => "Spatial Web",
            AppId::Files => "Files",
            AppId::Gallery => "Spatial Memories",
            AppId::Notes => "Thoughts",
            AppId::Monitor => "Shape Monitor",
            AppId::Settings => "Environment",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            AppId::StatusPanel => "◈",
            AppId::WebViewer => "◎",
            AppId::Files => "▤",
            AppId::Gallery => "▣",
            AppId::Notes => "✎",
            AppId::Monitor => "◷",
            AppId::Settings => "⚙",
        }
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// One window's state. Display metadata is fixed; everything else is owned
/// and mutated by [`WindowRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: AppId,
    pub title: &'static str,
    pub icon: &'static str,
    pub is_open: bool,
    pub is_minimized: bool,
    pub z_index: u64,
    pub position: Point,
    pub size: Size,
}

impl WindowRecord {
    pub fn new(id: AppId, position: Point, size: Size, z_index: u64) -> Self {
        Self {
            id,
            title: id.title(),
            icon: id.icon(),
            is_open: false,
            is_minimized: false,
            z_index,
            position,
            size,
        }
    }

    pub fn opened(mut self) -> Self {
        self.is_open = true;
        self
    }

    /// Open and not minimized: present in the spatial layer.
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }

    pub fn rect(&self) -> PixelRect {
        PixelRect::new(self.position, self.size)
    }
}

/// The initial desktop: every app at its home position, only the protocol
/// panel open.
pub fn default_layout() -> Vec<WindowRecord> {
    let at = |x, y| Point::new(x, y);
    let size = |w, h| Size::new(w, h);
    vec![
        WindowRecord::new(AppId::StatusPanel, at(80, 60), size(500, 600), 10).opened(),
        WindowRecord::new(AppId::WebViewer, at(150, 80), size(900, 650), 11),
        WindowRecord::new(AppId::Files, at(200, 120), size(800, 500), 12),
        WindowRecord::new(AppId::Gallery, at(600, 150), size(640, 480), 13),
        WindowRecord::new(AppId::Notes, at(700, 100), size(400, 500), 14),
        WindowRecord::new(AppId::Monitor, at(900, 50), size(320, 380), 15),
        WindowRecord::new(AppId::Settings, at(400, 200), size(420, 550), 16),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_covers_every_app_once() {
        let layout = default_layout();
        assert_eq!(layout.len(), AppId::ALL.len());
        for id in AppId::ALL {
            assert_eq!(layout.iter().filter(|r| r.id == id).count(), 1);
        }
        let open: Vec<AppId> = layout.iter().filter(|r| r.is_open).map(|r| r.id).collect();
        assert_eq!(open, vec![AppId::StatusPanel]);
    }

    #[test]
    fn visibility_requires_open_and_not_minimized() {
        let mut r = WindowRecord::new(AppId::Notes, Point::new(0, 0), Size::new(300, 200), 1);
        assert!(!r.is_visible());
        r.is_open = true;
        assert!(r.is_visible());
        r.is_minimized = true;
        assert!(!r.is_visible());
    }
}
