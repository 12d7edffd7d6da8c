//! Per-screen view models and the layout every screen shares: a two-line
//! header followed by a split pane.

mod bookmarks;
mod diagram;
mod group;
mod home;
mod notes;
mod part_detail;
mod search;
mod subgroup;

use std::path::Path;

pub use bookmarks::BookmarksView;
pub use diagram::DiagramPane;
pub use group::GroupView;
pub use home::HomeView;
pub use notes::NotesView;
pub use part_detail::PartDetailView;
pub use search::SearchView;
pub use subgroup::SubgroupView;

use crate::catalog::{CatalogProvider, ImageLoader, SearchHit};
use crate::input::Key;
use crate::kitty::ImageCodec;
use crate::menu::{DEFAULT_MAX_VISIBLE, ListWindow};
use crate::screen::Screen;
use crate::search::PendingSearch;
use crate::split_pane::{compose, pane_widths};
use crate::text::align_right;
use crate::theme::Theme;

const FALLBACK_WIDTH: usize = 80;
const FALLBACK_HEIGHT: usize = 24;
const MIN_SPLIT_HEIGHT: usize = 10;
/// Rows above the split pane plus a little slack at the bottom.
const CHROME_ROWS: usize = 5;

pub(crate) const RULE: &str = "─────────────────────────────────";
pub(crate) const LIST_FOOTER: &str = "↑↓ navigate   enter select";

/// Terminal size in cells. Zero means not yet known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Falls back to 80x24 on any unknown axis.
    pub fn or_fallback(self) -> Self {
        Self {
            width: if self.width == 0 {
                FALLBACK_WIDTH
            } else {
                self.width
            },
            height: if self.height == 0 {
                FALLBACK_HEIGHT
            } else {
                self.height
            },
        }
    }

    pub fn split_height(self) -> usize {
        self.or_fallback()
            .height
            .saturating_sub(CHROME_ROWS)
            .max(MIN_SPLIT_HEIGHT)
    }

    pub fn split_width(self) -> usize {
        self.or_fallback().width.saturating_sub(2)
    }

    /// Cell box a diagram may occupy inside the left pane, below its label row.
    pub fn diagram_cells(self) -> (u32, u32) {
        let cols = pane_widths(self.split_width()).left.saturating_sub(1);
        let rows = self.split_height().saturating_sub(1);
        (
            u32::try_from(cols).unwrap_or(u32::MAX),
            u32::try_from(rows).unwrap_or(u32::MAX),
        )
    }
}

/// Collaborators a view reads while it is being built.
pub struct ViewContext<'a> {
    pub provider: &'a dyn CatalogProvider,
    pub loader: &'a dyn ImageLoader,
    pub codec: &'a mut ImageCodec,
    pub data_dir: &'a Path,
    pub viewport: Viewport,
}

/// What a view asks of the navigator after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Idle,
    Navigate(Screen),
    Schedule(PendingSearch),
}

#[derive(Debug)]
pub enum ScreenView {
    Home(HomeView),
    Group(GroupView),
    Subgroup(SubgroupView),
    PartDetail(PartDetailView),
    Search(SearchView),
    Bookmarks(BookmarksView),
    Notes(NotesView),
}

impl ScreenView {
    /// Builds the view for `screen`. Never fails; missing data yields a
    /// placeholder view.
    pub fn build(screen: &Screen, ctx: &mut ViewContext<'_>) -> Self {
        match screen {
            Screen::Home => ScreenView::Home(HomeView::new(ctx.provider)),
            Screen::Group { group_id } => ScreenView::Group(GroupView::new(ctx.provider, group_id)),
            Screen::Subgroup { subgroup_id } => {
                ScreenView::Subgroup(SubgroupView::new(ctx, subgroup_id))
            }
            Screen::PartDetail {
                part_id,
                came_from_search,
            } => ScreenView::PartDetail(PartDetailView::new(ctx, *part_id, *came_from_search)),
            Screen::Search { query } => ScreenView::Search(SearchView::new(ctx.provider, query)),
            Screen::Bookmarks => ScreenView::Bookmarks(BookmarksView::new(ctx.provider)),
            Screen::Notes => ScreenView::Notes(NotesView::new(ctx.provider)),
        }
    }

    pub fn handle_key(&mut self, key: Key, provider: &dyn CatalogProvider) -> Reply {
        match self {
            ScreenView::Home(view) => view.handle_key(key),
            ScreenView::Group(view) => view.handle_key(key),
            ScreenView::Subgroup(view) => view.handle_key(key),
            ScreenView::PartDetail(view) => view.handle_key(key, provider),
            ScreenView::Search(view) => view.handle_key(key),
            ScreenView::Bookmarks(view) => view.handle_key(key),
            ScreenView::Notes(view) => view.handle_key(key),
        }
    }

    pub fn render(&mut self, viewport: Viewport, theme: &Theme) -> String {
        let viewport = viewport.or_fallback();
        match self {
            ScreenView::Home(view) => view.render(viewport, theme),
            ScreenView::Group(view) => view.render(viewport, theme),
            ScreenView::Subgroup(view) => view.render(viewport, theme),
            ScreenView::PartDetail(view) => view.render(viewport, theme),
            ScreenView::Search(view) => view.render(viewport, theme),
            ScreenView::Bookmarks(view) => view.render(viewport, theme),
            ScreenView::Notes(view) => view.render(viewport, theme),
        }
    }

    /// Id of the diagram this view has on screen, if any.
    pub fn image_id(&self) -> Option<u32> {
        match self {
            ScreenView::Subgroup(view) => view.image_id(),
            ScreenView::PartDetail(view) => view.image_id(),
            _ => None,
        }
    }

    /// Delivers a finished lookup. Returns whether anything visible changed.
    pub fn on_search_results(&mut self, query: &str, hits: Vec<SearchHit>) -> bool {
        match self {
            ScreenView::Search(view) => view.on_results(query, hits),
            _ => false,
        }
    }

    pub fn menu(&self) -> Option<&ListWindow> {
        match self {
            ScreenView::Home(view) => Some(view.menu()),
            ScreenView::Group(view) => Some(view.menu()),
            ScreenView::Subgroup(view) => Some(view.menu()),
            ScreenView::Bookmarks(view) => Some(view.menu()),
            ScreenView::Notes(view) => Some(view.menu()),
            ScreenView::PartDetail(_) | ScreenView::Search(_) => None,
        }
    }
}

/// Header rows, an optional out-of-band image placement, then the split pane.
pub(crate) fn layout(
    viewport: Viewport,
    hint: Option<&str>,
    placement: &str,
    left: &str,
    right: &str,
    theme: &Theme,
) -> String {
    let header = match hint {
        Some(hint) => {
            let inner = viewport.width.saturating_sub(4);
            format!(" {} ", align_right(&Theme::paint(theme.dim, hint), inner))
        }
        None => String::new(),
    };
    let split = compose(left, right, viewport.split_width(), viewport.split_height());
    format!("\n{header}\n{placement}{split}")
}

/// Visible rows for a list in a pane of `split_height` rows.
pub(crate) fn menu_height(split_height: usize) -> usize {
    split_height.saturating_sub(5).clamp(5, DEFAULT_MAX_VISIBLE)
}

/// Right-pane list: title, rule, the menu (or `empty` text), then the footer.
pub(crate) fn list_pane(
    title: &str,
    menu: &mut ListWindow,
    split_height: usize,
    empty: &[&str],
    theme: &Theme,
) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&Theme::paint(theme.dim, RULE));

    menu.set_max_visible(menu_height(split_height));
    // The top indicator row stands in for one blank line.
    out.push_str(if menu.needs_scrolling() { "\n" } else { "\n\n" });

    if menu.is_empty() {
        let empty: Vec<String> = empty
            .iter()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    Theme::paint(theme.dim, line)
                }
            })
            .collect();
        out.push_str(&empty.join("\n"));
    } else {
        out.push_str(&menu.render(theme));
    }

    out.push_str("\n\n");
    out.push_str(&Theme::paint(theme.dim, LIST_FOOTER));
    out
}

/// Moves `menu` for up/down keys. Returns true when the key was consumed.
pub(crate) fn move_cursor(menu: &mut ListWindow, key: Key) -> bool {
    if key.is_up() {
        menu.move_up();
        true
    } else if key.is_down() {
        menu.move_down();
        true
    } else {
        false
    }
}

/// Enter on a list of parts whose item ids are part ids.
pub(crate) fn open_selected_part(menu: &ListWindow, came_from_search: bool) -> Reply {
    menu.selected()
        .and_then(|item| item.id.parse::<i64>().ok())
        .map_or(Reply::Idle, |part_id| {
            Reply::Navigate(Screen::part_detail(part_id, came_from_search))
        })
}
