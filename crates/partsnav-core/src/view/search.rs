use crate::catalog::{CatalogProvider, SearchHit, part_label};
use crate::input::Key;
use crate::menu::{ListItem, ListWindow};
use crate::screen::Screen;
use crate::search::SearchCoordinator;
use crate::text::pad_to_width;
use crate::theme::Theme;

use super::{RULE, Reply, Viewport, layout};

const INPUT_WIDTH: usize = 50;
const PLACEHOLDER: &str = "Search parts by number or description...";

#[derive(Debug)]
pub struct SearchView {
    search: SearchCoordinator<SearchHit>,
}

impl SearchView {
    /// A non-empty initial query is looked up right away.
    pub fn new(provider: &dyn CatalogProvider, query: &str) -> Self {
        let search = if query.is_empty() {
            SearchCoordinator::new()
        } else {
            SearchCoordinator::seeded(query, provider.search(query))
        };
        Self { search }
    }

    pub fn coordinator(&self) -> &SearchCoordinator<SearchHit> {
        &self.search
    }

    /// Only the arrow keys move the cursor; every other printable key is text.
    pub fn handle_key(&mut self, key: Key) -> Reply {
        let pending = match key {
            Key::Up => {
                self.search.move_up();
                None
            }
            Key::Down => {
                self.search.move_down();
                None
            }
            Key::Enter => {
                return self.search.selected().map_or(Reply::Idle, |hit| {
                    Reply::Navigate(Screen::part_detail(hit.part.id, true))
                });
            }
            Key::Backspace => self.search.backspace(),
            Key::Char(ch) => self.search.push_char(ch),
            _ => None,
        };
        pending.map_or(Reply::Idle, Reply::Schedule)
    }

    pub fn on_results(&mut self, query: &str, hits: Vec<SearchHit>) -> bool {
        self.search.on_results_arrived(query, hits)
    }

    pub fn render(&mut self, viewport: Viewport, theme: &Theme) -> String {
        let left = [
            Theme::paint(theme.header, "SEARCH TIPS"),
            String::new(),
            "Search by:".to_string(),
            "  - Part number".to_string(),
            "  - Description".to_string(),
            "  - PNC code".to_string(),
            String::new(),
            Theme::paint(theme.dim, "Results update as"),
            Theme::paint(theme.dim, "you type"),
        ]
        .join("\n");

        let right = self.results_pane(viewport.split_height(), theme);
        layout(viewport, Some("esc back"), "", &left, &right, theme)
    }

    fn input_box(&self, theme: &Theme) -> Vec<String> {
        let input = if self.search.input().is_empty() {
            Theme::paint(theme.dim, PLACEHOLDER)
        } else {
            format!("{}█", self.search.input())
        };
        let border = "─".repeat(INPUT_WIDTH + 2);
        vec![
            format!("╭{border}╮"),
            format!("│ {} │", pad_to_width(&format!("> {input}"), INPUT_WIDTH)),
            format!("╰{border}╯"),
        ]
    }

    fn results_pane(&self, height: usize, theme: &Theme) -> String {
        let mut lines = self.input_box(theme);
        lines.push(String::new());
        lines.push(Theme::paint(theme.dim, RULE));
        lines.push(String::new());

        let query = self.search.input().trim();
        let results = self.search.results();
        if query.is_empty() {
            lines.push(Theme::paint(theme.dim, "Start typing to search parts"));
        } else if results.is_empty() {
            lines.push(Theme::paint(theme.dim, format!("No results for \"{query}\"")));
        } else {
            let mut menu = ListWindow::new(results.iter().map(hit_item).collect());
            menu.set_max_visible(result_rows(height, results.len()));
            menu.select(self.search.cursor());
            lines.push(menu.render(theme));
            lines.push(String::new());
            lines.push(Theme::paint(theme.count, format!("{} results", results.len())));
        }

        lines.push(String::new());
        lines.push(Theme::paint(theme.dim, "↑↓ select   enter view"));
        lines.join("\n")
    }
}

/// Lines the results pane spends on everything but the result rows.
const PANE_CHROME: usize = 10;
const MAX_RESULT_ROWS: usize = 20;

/// Result rows that fit under the input box with the count and footer still
/// visible. Only rows that exist are drawn.
fn result_rows(pane_height: usize, results: usize) -> usize {
    pane_height
        .saturating_sub(PANE_CHROME)
        .clamp(1, MAX_RESULT_ROWS)
        .min(results)
}

fn hit_item(hit: &SearchHit) -> ListItem {
    let part = &hit.part;
    let location = hit.subgroup_name.as_deref().unwrap_or(&hit.group_name);
    let hint = match &part.description {
        Some(description) => format!("{description} - {location}"),
        None => location.to_string(),
    };
    ListItem::new(part.id.to_string(), part_label(&part.part_number, part.pnc.as_deref()))
        .with_hint(hint)
}
