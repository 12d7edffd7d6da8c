use crate::catalog::{CatalogProvider, Note, part_label};
use crate::input::Key;
use crate::menu::{ListItem, ListWindow};
use crate::theme::Theme;

use super::{Reply, Viewport, layout, list_pane, move_cursor, open_selected_part};

const HINT_LIMIT: usize = 60;

#[derive(Debug)]
pub struct NotesView {
    menu: ListWindow,
}

impl NotesView {
    pub fn new(provider: &dyn CatalogProvider) -> Self {
        let items = provider.notes().iter().map(note_item).collect();
        Self {
            menu: ListWindow::new(items),
        }
    }

    pub fn menu(&self) -> &ListWindow {
        &self.menu
    }

    pub fn handle_key(&mut self, key: Key) -> Reply {
        if move_cursor(&mut self.menu, key) || !key.is_enter() {
            return Reply::Idle;
        }
        open_selected_part(&self.menu, false)
    }

    pub fn render(&mut self, viewport: Viewport, theme: &Theme) -> String {
        let left = [
            Theme::paint(theme.header, "NOTES"),
            String::new(),
            format!("{} parts with notes", self.menu.len()),
        ]
        .join("\n");

        let right = list_pane(
            &Theme::paint(theme.header, "PARTS WITH NOTES"),
            &mut self.menu,
            viewport.split_height(),
            &["No notes yet"],
            theme,
        );

        layout(viewport, Some("esc back"), "", &left, &right, theme)
    }
}

fn note_item(note: &Note) -> ListItem {
    ListItem::new(
        note.part_id.to_string(),
        part_label(&note.part_number, note.pnc.as_deref()),
    )
    .with_hint(note_hint(&note.content))
}

/// One-line preview, cut to 60 characters.
fn note_hint(content: &str) -> String {
    let hint = if content.chars().count() > HINT_LIMIT {
        let head: String = content.chars().take(HINT_LIMIT - 3).collect();
        format!("{head}...")
    } else {
        content.to_string()
    };
    hint.replace('\n', " ")
}
