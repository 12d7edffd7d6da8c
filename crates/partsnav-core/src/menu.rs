use crate::theme::Theme;

pub const DEFAULT_MAX_VISIBLE: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: String,
    pub label: String,
    pub hint: String,
}

impl ListItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            hint: String::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}

/// The slice of items a [`ListWindow`] shows, plus how many sit outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
    pub indicators: bool,
}

impl VisibleRange {
    pub fn above(&self) -> usize {
        self.start
    }

    pub fn below(&self, total: usize) -> usize {
        total.saturating_sub(self.end)
    }
}

/// Cursor over an ordered item list, rendered into a fixed number of lines.
///
/// When the list is longer than the block, the first and last lines carry
/// "more above"/"more below" indicators and the cursor stays centred in the
/// rows between them, except near either end where the window pins to the
/// boundary.
#[derive(Debug, Clone)]
pub struct ListWindow {
    items: Vec<ListItem>,
    cursor: usize,
    max_visible: usize,
}

impl ListWindow {
    pub fn new(items: Vec<ListItem>) -> Self {
        Self {
            items,
            cursor: 0,
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn select(&mut self, index: usize) {
        self.cursor = index.min(self.items.len().saturating_sub(1));
    }

    pub fn selected(&self) -> Option<&ListItem> {
        self.items.get(self.cursor)
    }

    pub fn set_max_visible(&mut self, n: usize) {
        self.max_visible = n.max(1);
    }

    pub fn needs_scrolling(&self) -> bool {
        self.items.len() > self.max_visible
    }

    pub fn visible_range(&self) -> VisibleRange {
        let len = self.items.len();
        if !self.needs_scrolling() {
            return VisibleRange {
                start: 0,
                end: len,
                indicators: false,
            };
        }

        // Blocks shorter than three lines have no room for indicator rows.
        let indicators = self.max_visible >= 3;
        let interior = if indicators {
            self.max_visible - 2
        } else {
            self.max_visible
        };

        let half = interior / 2;
        let mut start = self.cursor.saturating_sub(half);
        let mut end = start + interior;
        if end > len {
            end = len;
            start = end.saturating_sub(interior);
        }

        VisibleRange {
            start,
            end,
            indicators,
        }
    }

    /// Renders exactly `max_visible` lines.
    pub fn render(&self, theme: &Theme) -> String {
        let mut lines = Vec::with_capacity(self.max_visible);

        if self.items.is_empty() {
            lines.push(Theme::paint(theme.dim, "No items"));
        } else {
            let range = self.visible_range();

            if range.indicators {
                lines.push(if range.above() > 0 {
                    Theme::paint(theme.dim, format!("  ↑ {} more", range.above()))
                } else {
                    String::new()
                });
            }

            for (index, item) in self.items[range.start..range.end].iter().enumerate() {
                lines.push(self.render_item(item, range.start + index == self.cursor, theme));
            }

            if range.indicators {
                let below = range.below(self.items.len());
                lines.push(if below > 0 {
                    Theme::paint(theme.dim, format!("  ↓ {below} more"))
                } else {
                    String::new()
                });
            }
        }

        lines.resize(self.max_visible, String::new());
        lines.join("\n")
    }

    fn render_item(&self, item: &ListItem, selected: bool, theme: &Theme) -> String {
        let label = item.label.to_uppercase();
        let mut line = if selected {
            Theme::paint(theme.selected_marker, "› ") + &Theme::paint(theme.selected_label, label)
        } else {
            format!("  {}", Theme::paint(theme.normal_label, label))
        };

        if !item.hint.is_empty() {
            line.push_str(&Theme::paint(
                theme.dim,
                format!(" {}", item.hint.to_uppercase()),
            ));
        }

        line
    }
}
