//! The desktop: windows, dock, menu, icons and tour wired to terminal input.
//!
//! Everything the core knows is in viewport pixels. This type is the only
//! place that converts between terminal cells and pixels, using the
//! configured [`CellMetrics`] for mouse input and for painting windows.

use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::components::{AlertDialog, ComponentContext, ContentHost, ContentRequest};
use crate::config::DesktopConfig;
use crate::context_menu::{ContextMenu, MenuAction, MenuOutcome};
use crate::dock::{Dock, DockOutcome};
use crate::icons::{DesktopIcons, IconOutcome};
use crate::keybindings::{Action, KeyBindings};
use crate::layout::{CellMetrics, CellRect, Point, Size, cell_rect_visible, rect_contains};
use crate::pointer::PointerController;
use crate::store::KeyValueStore;
use crate::theme;
use crate::tour::TourSequencer;
use crate::ui::{UiFrame, truncate_to_width};
use crate::window::decorator::{GlassDecorator, WindowDecorator};
use crate::window::{AppId, ChromeMetrics, WindowRegistry, WindowZone};

pub const DISPLAY_SETTINGS_ALERT: &str = "Display settings calibrated for Vision Pro";

const TOUR_CARD_WIDTH: u16 = 36;
const TOUR_CARD_HEIGHT: u16 = 10;
const TOUR_NEXT_SUFFIX: &str = " ▸ ]";

/// Cell rectangles of the tour card and its two buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourCardLayout {
    pub card: Rect,
    pub next: Rect,
    pub close: Rect,
}

pub struct Desktop {
    registry: WindowRegistry,
    pointer: PointerController,
    tour: TourSequencer,
    dock: Dock,
    menu: ContextMenu,
    icons: DesktopIcons,
    alert: AlertDialog,
    content: ContentHost,
    decorator: Box<dyn WindowDecorator>,
    cells: CellMetrics,
    chrome: ChromeMetrics,
    keys: KeyBindings,
    area: Rect,
    mounted: BTreeSet<AppId>,
    quit: bool,
}

impl std::fmt::Debug for Desktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("registry", &self.registry)
            .field("gesture", &self.pointer.gesture())
            .field("tour", &self.tour.state())
            .field("area", &self.area)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl Desktop {
    pub fn new(store: Rc<dyn KeyValueStore>, config: &DesktopConfig, area: Rect) -> Self {
        let cells = config.cell_metrics;
        let registry = WindowRegistry::with_default_layout(cells.viewport_for_area(area));
        let tour = TourSequencer::new(store.clone()).with_delay(config.tour_delay);
        let mut desktop = Self {
            registry,
            pointer: PointerController::new(),
            tour,
            dock: Dock::new(),
            menu: ContextMenu::new(),
            icons: DesktopIcons::default(),
            alert: AlertDialog::new(),
            content: ContentHost::with_defaults(store),
            decorator: Box::new(GlassDecorator),
            cells,
            chrome: ChromeMetrics::for_cells(cells),
            keys: KeyBindings::default(),
            area,
            mounted: BTreeSet::new(),
            quit: false,
        };
        desktop.arrange_dock();
        desktop.sync_mounts();
        desktop
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn pointer(&self) -> &PointerController {
        &self.pointer
    }

    pub fn tour(&self) -> &TourSequencer {
        &self.tour
    }

    pub fn dock(&self) -> &Dock {
        &self.dock
    }

    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    pub fn icons(&self) -> &DesktopIcons {
        &self.icons
    }

    pub fn alert(&self) -> &AlertDialog {
        &self.alert
    }

    pub fn cells(&self) -> CellMetrics {
        self.cells
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn is_mounted(&self, id: AppId) -> bool {
        self.mounted.contains(&id)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Follows a terminal resize. Window positions are kept; later moves
    /// clamp against the new viewport.
    pub fn set_area(&mut self, area: Rect) {
        if self.area == area {
            return;
        }
        self.area = area;
        self.registry
            .set_viewport(self.cells.viewport_for_area(area));
        self.menu.close();
        self.arrange_dock();
    }

    fn arrange_dock(&mut self) {
        let entries = self.registry.dock_entries();
        self.dock.arrange(self.area, &entries);
    }

    /// Schedules the first-run tour unless it has been completed before.
    pub fn arm_first_run_tour(&mut self, now: Instant) -> bool {
        self.tour.arm_auto_start(now)
    }

    /// Time-driven work. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let started = self.tour.poll(now);
        if started {
            self.menu.close();
        }
        started
    }

    // Command surface

    pub fn open_window(&mut self, id: AppId) {
        self.registry.open(id);
        self.after_command();
    }

    pub fn close_window(&mut self, id: AppId) {
        self.cancel_gesture_on(id);
        self.registry.close(id);
        self.after_command();
    }

    pub fn minimize_window(&mut self, id: AppId) {
        self.cancel_gesture_on(id);
        self.registry.minimize(id);
        self.after_command();
    }

    pub fn focus_window(&mut self, id: AppId) {
        self.registry.focus(id);
    }

    pub fn move_window(&mut self, id: AppId, position: Point) {
        self.registry.move_window(id, position);
    }

    pub fn resize_window(&mut self, id: AppId, size: Size) {
        self.registry.resize_window(id, size);
    }

    pub fn start_tour(&mut self) {
        self.menu.close();
        self.tour.start();
    }

    pub fn advance_tour(&mut self) {
        self.tour.advance();
    }

    pub fn skip_tour(&mut self) {
        self.tour.skip();
    }

    fn cancel_gesture_on(&mut self, id: AppId) {
        if self.pointer.gesture().window() == Some(id) {
            self.pointer.cancel();
        }
    }

    fn after_command(&mut self) {
        self.sync_mounts();
        self.arrange_dock();
    }

    /// Mounts content whose window just became visible and unmounts content
    /// whose window was closed or minimized.
    fn sync_mounts(&mut self) {
        for id in AppId::ALL {
            let visible = self.registry.get(id).is_some_and(|w| w.is_visible());
            let mounted = self.mounted.contains(&id);
            if visible && !mounted {
                self.content.mount(id);
                self.mounted.insert(id);
            } else if !visible && mounted {
                self.content.unmount(id);
                self.mounted.remove(&id);
            }
        }
    }

    fn drain_requests(&mut self) {
        for (id, request) in self.content.drain_requests() {
            tracing::debug!(window_id = ?id, ?request, "content request");
            match request {
                ContentRequest::StartTour => self.start_tour(),
                ContentRequest::Alert(message) => self.alert.show(message),
            }
        }
    }

    fn apply_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::NewFolder => self.open_window(AppId::Files),
            MenuAction::SystemPreferences => self.open_window(AppId::Settings),
            MenuAction::DisplaySettings => self.alert.show(DISPLAY_SETTINGS_ALERT),
            MenuAction::Refresh | MenuAction::ChangeWallpaper => {
                tracing::info!(?action, "menu action has no effect");
            }
        }
    }

    // Input

    /// Routes one terminal event. Returns whether it was handled.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        let handled = self.route_event(event, now);
        self.drain_requests();
        handled
    }

    fn route_event(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Resize(width, height) => {
                self.set_area(Rect::new(0, 0, *width, *height));
                true
            }
            Event::FocusLost => {
                self.pointer.cancel();
                false
            }
            Event::Mouse(mouse) => self.route_mouse(event, mouse, now),
            Event::Key(key) => self.route_key(event, key, now),
            _ => false,
        }
    }

    fn pointer_at(&self, column: u16, row: u16) -> Point {
        self.cells.point_for_cell(
            column.saturating_sub(self.area.x),
            row.saturating_sub(self.area.y),
        )
    }

    fn route_mouse(&mut self, event: &Event, mouse: &MouseEvent, now: Instant) -> bool {
        if self.pointer.is_active() {
            match mouse.kind {
                MouseEventKind::Up(_) => {
                    self.pointer.pointer_up();
                    return true;
                }
                MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                    let point = self.pointer_at(mouse.column, mouse.row);
                    self.pointer.pointer_move(&mut self.registry, point);
                    return true;
                }
                _ => {}
            }
        }

        if self.alert.handle_event(event) {
            return true;
        }
        if self.tour.is_active() {
            return self.route_tour_mouse(mouse);
        }
        match self.menu.handle_event(event) {
            MenuOutcome::Consumed => return true,
            MenuOutcome::Activated(action) => {
                self.apply_menu_action(action);
                return true;
            }
            MenuOutcome::Ignored => {}
        }
        if let MouseEventKind::Down(MouseButton::Right) = mouse.kind {
            self.menu.open_at(mouse.column, mouse.row, self.area);
            return true;
        }
        match self.dock.handle_event(event) {
            DockOutcome::Open(id) => {
                self.open_window(id);
                return true;
            }
            DockOutcome::Consumed => return true,
            DockOutcome::Ignored => {}
        }
        if self.route_window_mouse(event, mouse, now) {
            return true;
        }
        match self.icons.handle_event(event, self.area, now) {
            IconOutcome::Activated(id) => {
                self.open_window(id);
                true
            }
            IconOutcome::Selected(_) => true,
            IconOutcome::Ignored => false,
        }
    }

    fn route_window_mouse(&mut self, event: &Event, mouse: &MouseEvent, now: Instant) -> bool {
        let point = self.pointer_at(mouse.column, mouse.row);
        let Some((id, zone)) = self.registry.hit_test(point, &self.chrome) else {
            return false;
        };
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            match zone {
                WindowZone::Close => self.close_window(id),
                WindowZone::Minimize => self.minimize_window(id),
                WindowZone::TitleBar => {
                    self.pointer.begin_drag(&mut self.registry, id, point);
                }
                WindowZone::ResizeHandle => {
                    self.pointer.begin_resize(&mut self.registry, id, point);
                }
                WindowZone::Body => {
                    self.focus_window(id);
                    self.forward_to_content(id, event, now);
                }
            }
            return true;
        }
        if zone == WindowZone::Body {
            self.forward_to_content(id, event, now);
        }
        true
    }

    /// Hands a mouse event to `id`'s content in window-local cells.
    fn forward_to_content(&mut self, id: AppId, event: &Event, now: Instant) -> bool {
        let Some(window) = self.registry.get(id) else {
            return false;
        };
        let local = match event {
            Event::Mouse(mouse) => {
                let rect = self.cells.to_cells(window.rect());
                let column = i32::from(mouse.column.saturating_sub(self.area.x)) - rect.x;
                let row = i32::from(mouse.row.saturating_sub(self.area.y)) - rect.y;
                Event::Mouse(MouseEvent {
                    column: column.clamp(0, i32::from(u16::MAX)) as u16,
                    row: row.clamp(0, i32::from(u16::MAX)) as u16,
                    kind: mouse.kind,
                    modifiers: mouse.modifiers,
                })
            }
            other => other.clone(),
        };
        let ctx = ComponentContext::new(self.registry.active() == Some(id)).with_now(now);
        self.content.handle_event(id, &local, &ctx)
    }

    fn route_tour_mouse(&mut self, mouse: &MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return true;
        }
        let Some(layout) = self.tour_card_layout() else {
            return true;
        };
        if rect_contains(layout.next, mouse.column, mouse.row) {
            self.advance_tour();
        } else if rect_contains(layout.close, mouse.column, mouse.row)
            || !rect_contains(layout.card, mouse.column, mouse.row)
        {
            self.skip_tour();
        }
        true
    }

    fn route_key(&mut self, event: &Event, key: &KeyEvent, now: Instant) -> bool {
        if self.alert.handle_event(event) {
            return true;
        }
        if self.keys.matches(Action::Quit, key) {
            self.request_quit();
            return true;
        }
        if self.tour.is_active() {
            if self.keys.matches(Action::TourNext, key) {
                self.advance_tour();
            } else if self.keys.matches(Action::TourSkip, key) {
                self.skip_tour();
            }
            return true;
        }
        match self.menu.handle_event(event) {
            MenuOutcome::Consumed => return true,
            MenuOutcome::Activated(action) => {
                self.apply_menu_action(action);
                return true;
            }
            MenuOutcome::Ignored => {}
        }
        if self.keys.matches(Action::StartTour, key) {
            self.start_tour();
            return true;
        }
        if self.keys.matches(Action::FocusNextWindow, key) {
            if let Some(next) = self.registry.next_visible_after(self.registry.active()) {
                self.focus_window(next);
            }
            return true;
        }
        let active = self.registry.active();
        if self.keys.matches(Action::CloseWindow, key) {
            if let Some(id) = active {
                self.close_window(id);
            }
            return true;
        }
        if self.keys.matches(Action::MinimizeWindow, key) {
            if let Some(id) = active {
                self.minimize_window(id);
            }
            return true;
        }
        match active {
            Some(id) => {
                let ctx = ComponentContext::new(true).with_now(now);
                self.content.handle_event(id, event, &ctx)
            }
            None => false,
        }
    }

    // Rendering

    /// Where the tour card sits for the current step, clamped on-screen.
    pub fn tour_card_layout(&self) -> Option<TourCardLayout> {
        let placement = self
            .tour
            .current_placement(&self.registry, self.registry.viewport())?;
        let width = TOUR_CARD_WIDTH.min(self.area.width);
        let height = TOUR_CARD_HEIGHT.min(self.area.height);
        let pixels = placement.card_rect(self.cells.cells_to_pixels(width, height));
        let cell = self.cells.to_cells(pixels);
        let max_x = i32::from(self.area.width.saturating_sub(width));
        let max_y = i32::from(self.area.height.saturating_sub(height));
        let card = Rect::new(
            self.area.x + cell.x.clamp(0, max_x) as u16,
            self.area.y + cell.y.clamp(0, max_y) as u16,
            width,
            height,
        );
        let inner = Block::default().borders(Borders::ALL).inner(card);
        let next_width =
            (self.tour.next_label().chars().count() + 2 + TOUR_NEXT_SUFFIX.chars().count()) as u16;
        let footer_y = (inner.y + inner.height).saturating_sub(1);
        let next = Rect::new(
            (inner.x + inner.width).saturating_sub(next_width),
            footer_y,
            next_width.min(inner.width),
            1,
        );
        let close = Rect::new((inner.x + inner.width).saturating_sub(1), inner.y, 1, 1);
        Some(TourCardLayout { card, next, close })
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        let area = frame.area();
        self.set_area(area);

        frame.fill(
            area,
            Style::default()
                .bg(theme::wallpaper_bg())
                .fg(theme::wallpaper_fg()),
        );
        self.icons.render(frame, area);
        self.render_windows(frame, now);
        self.render_status_bar(frame);
        let entries = self.registry.dock_entries();
        self.dock.render(frame, area, &entries);
        self.menu.render(frame);
        self.render_tour(frame);
        self.alert.render(frame, area);
    }

    fn render_windows(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        let active = self.registry.active();
        let windows: Vec<_> = self
            .registry
            .visible_in_paint_order()
            .into_iter()
            .map(|w| (w.id, w.title, w.icon, self.cells.to_cells(w.rect())))
            .collect();
        for (id, title, icon, mut rect) in windows {
            rect.x += i32::from(self.area.x);
            rect.y += i32::from(self.area.y);
            let visible = cell_rect_visible(rect, self.area);
            if visible.is_empty() {
                continue;
            }
            let local = Rect {
                x: 0,
                y: 0,
                width: rect.width,
                height: rect.height,
            };
            let mut surface = Buffer::empty(self.window_surface(rect, visible));
            {
                let mut window_frame = UiFrame::from_parts(surface.area, &mut surface);
                let is_active = active == Some(id);
                let content_area =
                    self.decorator
                        .render_window(&mut window_frame, local, title, icon, is_active);
                let ctx = ComponentContext::new(is_active).with_now(now);
                self.content
                    .render(id, &mut window_frame, content_area, &ctx);
            }
            frame.blit_from_signed(&surface, rect);
        }
    }

    /// Window-local cells backing the offscreen surface for a window whose
    /// on-screen part is `visible`. Hidden leading cells are kept up to one
    /// screen's worth so a partly off-screen window keeps its layout; the
    /// rest of the window is never allocated.
    fn window_surface(&self, rect: CellRect, visible: Rect) -> Rect {
        let skip_x = (i32::from(visible.x) - rect.x).clamp(0, i32::from(rect.width)) as u16;
        let skip_y = (i32::from(visible.y) - rect.y).clamp(0, i32::from(rect.height)) as u16;
        let x = skip_x.saturating_sub(self.area.width);
        let y = skip_y.saturating_sub(self.area.height);
        Rect {
            x,
            y,
            width: (skip_x - x).saturating_add(visible.width),
            height: (skip_y - y).saturating_add(visible.height),
        }
    }

    fn render_status_bar(&self, frame: &mut UiFrame<'_>) {
        let area = self.area;
        if area.height == 0 {
            return;
        }
        let pill = Style::default().bg(theme::bar_bg()).fg(theme::bar_fg());
        let lamp = pill.fg(theme::success()).add_modifier(Modifier::BOLD);
        frame.text(area.x + 1, area.y, " ● ", lamp);
        frame.text(area.x + 4, area.y, "BILL Protocol Active ", pill);

        let hint = self.keys.hint(&[
            (Action::StartTour, "tour"),
            (Action::FocusNextWindow, "next"),
            (Action::Quit, "quit"),
        ]);
        let title = self
            .registry
            .active()
            .map(AppId::title)
            .unwrap_or("Desktop");
        let right = format!(" {title} │ {hint} ");
        let room = area.width.saturating_sub(28) as usize;
        let right = truncate_to_width(&right, room);
        let width = right.chars().count() as u16;
        let x = (area.x + area.width).saturating_sub(width + 1);
        frame.text(x, area.y, &right, pill);
    }

    fn render_tour(&self, frame: &mut UiFrame<'_>) {
        let Some((index, step)) = self.tour.current() else {
            return;
        };
        let Some(layout) = self.tour_card_layout() else {
            return;
        };
        frame
            .buffer_mut()
            .set_style(self.area, Style::default().add_modifier(Modifier::DIM));

        let style = Style::default().bg(theme::dialog_bg()).fg(theme::dialog_fg());
        frame.fill(layout.card, style);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style.fg(theme::accent())),
            layout.card,
        );
        let inner = Block::default().borders(Borders::ALL).inner(layout.card);
        if inner.height < 3 {
            return;
        }
        let accent = style.fg(theme::accent()).add_modifier(Modifier::BOLD);
        frame.text(inner.x, inner.y, "● BILL GUIDE", accent);
        frame.text(layout.close.x, layout.close.y, "x", style.fg(theme::dialog_muted()));
        frame.text(
            inner.x,
            inner.y + 1,
            step.title,
            style.add_modifier(Modifier::BOLD),
        );
        let body = Rect {
            y: inner.y + 2,
            height: inner.height.saturating_sub(3),
            ..inner
        };
        frame.render_widget(
            Paragraph::new(step.description)
                .style(style.fg(theme::dialog_muted()))
                .wrap(Wrap { trim: true }),
            body,
        );
        let footer_y = layout.next.y;
        let counter = format!("STEP {}/{}", index + 1, self.tour.len());
        frame.text(inner.x, footer_y, &counter, style.fg(theme::dialog_muted()));
        let button = format!("[ {}{}", self.tour.next_label(), TOUR_NEXT_SUFFIX);
        frame.text(layout.next.x, footer_y, &button, accent);
    }
}
