//! Content panels hosted inside windows.
//!
//! Panels know nothing about window geometry. They draw into the content
//! rectangle they are handed, receive input already translated into the
//! window's local cell space, and talk back to the desktop only through
//! [`ContentRequest`]s.

use std::collections::BTreeMap;
use std::rc::Rc;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::store::KeyValueStore;
use crate::ui::UiFrame;
use crate::window::AppId;

pub mod alert;
pub mod files;
pub mod gallery;
pub mod monitor;
pub mod notes;
pub mod settings;
pub mod status_panel;
pub mod toggle_list;
pub mod web_view;

pub use alert::AlertDialog;
pub use files::FilesComponent;
pub use gallery::GalleryComponent;
pub use monitor::MonitorComponent;
pub use notes::NotesComponent;
pub use settings::SettingsComponent;
pub use status_panel::StatusPanelComponent;
pub use toggle_list::{ToggleItem, ToggleListComponent};
pub use web_view::WebViewComponent;

pub use crate::component_context::ComponentContext;

/// Something a panel wants the desktop to do on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    StartTour,
    Alert(String),
}

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }

    /// The hosting window became visible.
    fn mount(&mut self) {}

    /// The hosting window was closed or minimized.
    fn unmount(&mut self) {}

    fn take_request(&mut self) -> Option<ContentRequest> {
        None
    }
}

/// Maps each application to the panel rendered inside its window.
#[derive(Default)]
pub struct ContentHost {
    panels: BTreeMap<AppId, Box<dyn Component>>,
}

impl ContentHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock panel for every application.
    pub fn with_defaults(store: Rc<dyn KeyValueStore>) -> Self {
        let mut host = Self::new();
        host.insert(AppId::StatusPanel, Box::new(StatusPanelComponent::new()));
        host.insert(AppId::WebViewer, Box::new(WebViewComponent::new()));
        host.insert(AppId::Files, Box::new(FilesComponent::new()));
        host.insert(AppId::Gallery, Box::new(GalleryComponent::new()));
        host.insert(AppId::Notes, Box::new(NotesComponent::new(store)));
        host.insert(AppId::Monitor, Box::new(MonitorComponent::new()));
        host.insert(AppId::Settings, Box::new(SettingsComponent::new()));
        host
    }

    pub fn insert(&mut self, id: AppId, panel: Box<dyn Component>) {
        self.panels.insert(id, panel);
    }

    pub fn contains(&self, id: AppId) -> bool {
        self.panels.contains_key(&id)
    }

    pub fn mount(&mut self, id: AppId) {
        if let Some(panel) = self.panels.get_mut(&id) {
            tracing::debug!(window_id = ?id, "mounting content");
            panel.mount();
        }
    }

    pub fn unmount(&mut self, id: AppId) {
        if let Some(panel) = self.panels.get_mut(&id) {
            tracing::debug!(window_id = ?id, "unmounting content");
            panel.unmount();
        }
    }

    pub fn render(
        &mut self,
        id: AppId,
        frame: &mut UiFrame<'_>,
        area: Rect,
        ctx: &ComponentContext,
    ) {
        if let Some(panel) = self.panels.get_mut(&id) {
            panel.render(frame, area, ctx);
        }
    }

    pub fn handle_event(&mut self, id: AppId, event: &Event, ctx: &ComponentContext) -> bool {
        self.panels
            .get_mut(&id)
            .is_some_and(|panel| panel.handle_event(event, ctx))
    }

    /// Collects pending requests from every panel.
    pub fn drain_requests(&mut self) -> Vec<(AppId, ContentRequest)> {
        let mut out = Vec::new();
        for (id, panel) in self.panels.iter_mut() {
            while let Some(request) = panel.take_request() {
                out.push((*id, request));
            }
        }
        out
    }
}

/// Translates a mouse event into the coordinate space of a component's last
/// rendered area. Returns `None` for key events or clicks outside `area`.
pub(crate) fn mouse_in(event: &Event, area: Rect) -> Option<(u16, u16, crossterm::event::MouseEventKind)> {
    let Event::Mouse(mouse) = event else {
        return None;
    };
    if !crate::layout::rect_contains(area, mouse.column, mouse.row) {
        return None;
    }
    Some((mouse.column - area.x, mouse.row - area.y, mouse.kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct Dummy {
        mounted: u32,
        pending: Vec<ContentRequest>,
    }

    impl Component for Dummy {
        fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _ctx: &ComponentContext) {}

        fn mount(&mut self) {
            self.mounted += 1;
        }

        fn take_request(&mut self) -> Option<ContentRequest> {
            self.pending.pop()
        }
    }

    #[test]
    fn default_handle_event_returns_false() {
        let mut d = Dummy {
            mounted: 0,
            pending: Vec::new(),
        };
        assert!(!d.handle_event(
            &Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            &ComponentContext::default()
        ));
    }

    #[test]
    fn host_drains_requests_from_every_panel() {
        let mut host = ContentHost::new();
        host.insert(
            AppId::Notes,
            Box::new(Dummy {
                mounted: 0,
                pending: vec![ContentRequest::StartTour, ContentRequest::Alert("x".into())],
            }),
        );
        let drained = host.drain_requests();
        assert_eq!(drained.len(), 2);
        assert!(host.drain_requests().is_empty());
    }

    #[test]
    fn defaults_cover_every_app() {
        let host = ContentHost::with_defaults(Rc::new(MemoryStore::new()));
        for id in AppId::ALL {
            assert!(host.contains(id));
        }
    }
}
