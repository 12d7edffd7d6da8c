//! The screen state machine.
//!
//! The navigator owns the active screen, its view and the back-stack. It never
//! writes to the terminal: [`Navigator::handle`] returns [`Effect`]s for the
//! event loop to apply, and [`Navigator::render`] returns the next frame.

use std::mem;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::catalog::{CatalogProvider, ImageLoader};
use crate::input::{InputEvent, Key};
use crate::kitty::{self, ImageCodec};
use crate::screen::Screen;
use crate::text::fit_height;
use crate::theme::Theme;
use crate::view::{Reply, ScreenView, ViewContext, Viewport};

/// Images to delete from the terminal before the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    Image(u32),
    All,
}

impl ClearTarget {
    pub fn escape(self) -> String {
        match self {
            ClearTarget::Image(id) => kitty::clear(id),
            ClearTarget::All => kitty::clear_all(),
        }
    }
}

/// Work to run later on the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    Search(String),
}

/// Terminal-side consequences of an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Wipe the terminal before drawing the next frame.
    ClearScreen,
    Schedule { delay: Duration, task: Deferred },
    /// Write the pending clear, then stop.
    Exit,
}

pub struct Navigator {
    provider: Box<dyn CatalogProvider>,
    loader: Box<dyn ImageLoader>,
    data_dir: PathBuf,
    codec: ImageCodec,
    theme: Theme,
    screen: Screen,
    history: Vec<Screen>,
    view: ScreenView,
    pending_clear: Option<ClearTarget>,
    exiting: bool,
    viewport: Viewport,
}

impl Navigator {
    pub fn new(
        provider: Box<dyn CatalogProvider>,
        loader: Box<dyn ImageLoader>,
        data_dir: PathBuf,
        theme: Theme,
        viewport: Viewport,
    ) -> Self {
        let mut codec = ImageCodec::new();
        let screen = Screen::Home;
        let view = ScreenView::build(
            &screen,
            &mut ViewContext {
                provider: provider.as_ref(),
                loader: loader.as_ref(),
                codec: &mut codec,
                data_dir: &data_dir,
                viewport,
            },
        );

        Self {
            provider,
            loader,
            data_dir,
            codec,
            theme,
            screen,
            history: Vec::new(),
            view,
            pending_clear: None,
            exiting: false,
            viewport,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    pub fn view(&self) -> &ScreenView {
        &self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub fn pending_clear(&self) -> Option<ClearTarget> {
        self.pending_clear
    }

    pub fn take_pending_clear(&mut self) -> Option<ClearTarget> {
        self.pending_clear.take()
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
        if self.exiting {
            return Vec::new();
        }

        match event {
            InputEvent::Resize { width, height } => {
                self.viewport = Viewport::new(usize::from(width), usize::from(height));
                vec![Effect::ClearScreen]
            }
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        if key.is_quit() {
            self.quit();
            return vec![Effect::Exit];
        }
        if key.is_back() {
            self.back();
            return if self.exiting {
                vec![Effect::Exit]
            } else {
                vec![Effect::ClearScreen]
            };
        }
        if key.is_search() && !self.screen.is_search() {
            self.navigate(Screen::search(""));
            return vec![Effect::ClearScreen];
        }

        match self.view.handle_key(key, self.provider.as_ref()) {
            Reply::Idle => Vec::new(),
            Reply::Navigate(to) => {
                self.navigate(to);
                vec![Effect::ClearScreen]
            }
            Reply::Schedule(pending) => vec![Effect::Schedule {
                delay: pending.delay,
                task: Deferred::Search(pending.query),
            }],
        }
    }

    pub fn navigate(&mut self, to: Screen) {
        self.clear_current_image();
        info!(from = %self.screen, to = %to, "navigate");
        let from = mem::replace(&mut self.screen, to);
        self.history.push(from);
        self.rebuild_view();
    }

    /// Returns to the previous screen, or starts exiting when there is none.
    pub fn back(&mut self) {
        let Some(previous) = self.history.pop() else {
            info!("history empty, exiting");
            self.quit();
            return;
        };

        self.clear_current_image();
        info!(from = %self.screen, to = %previous, "back");
        self.screen = previous;
        self.rebuild_view();
    }

    pub fn quit(&mut self) {
        self.pending_clear = Some(ClearTarget::All);
        self.exiting = true;
    }

    /// Runs a deferred task. Returns whether the frame needs redrawing.
    pub fn fire(&mut self, task: Deferred) -> bool {
        match task {
            Deferred::Search(query) => {
                let hits = self.provider.search(&query);
                debug!(query = %query, hits = hits.len(), "search lookup finished");
                self.view.on_search_results(&query, hits)
            }
        }
    }

    /// Builds the next frame, prefixed with any pending image delete.
    pub fn render(&mut self) -> String {
        let prefix = self
            .pending_clear
            .take()
            .map(ClearTarget::escape)
            .unwrap_or_default();
        let viewport = self.viewport.or_fallback();
        let content = self.view.render(viewport, &self.theme);
        format!("{prefix}{}", fit_height(&content, viewport.height))
    }

    fn clear_current_image(&mut self) {
        if let Some(id) = self.view.image_id() {
            self.pending_clear = Some(ClearTarget::Image(id));
        }
    }

    fn rebuild_view(&mut self) {
        self.view = ScreenView::build(
            &self.screen,
            &mut ViewContext {
                provider: self.provider.as_ref(),
                loader: self.loader.as_ref(),
                codec: &mut self.codec,
                data_dir: &self.data_dir,
                viewport: self.viewport,
            },
        );
    }
}
