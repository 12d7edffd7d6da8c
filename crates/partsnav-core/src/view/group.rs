use crate::catalog::{CatalogProvider, Group};
use crate::input::Key;
use crate::menu::{ListItem, ListWindow};
use crate::screen::Screen;
use crate::theme::Theme;

use super::{Reply, Viewport, layout, list_pane, move_cursor};

#[derive(Debug)]
pub struct GroupView {
    group: Option<Group>,
    menu: ListWindow,
}

impl GroupView {
    pub fn new(provider: &dyn CatalogProvider, group_id: &str) -> Self {
        let items = provider
            .subgroups(group_id)
            .into_iter()
            .map(|s| ListItem::new(s.id, s.name))
            .collect();

        Self {
            group: provider.group(group_id),
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
        self.menu
            .selected()
            .map_or(Reply::Idle, |item| Reply::Navigate(Screen::subgroup(item.id.clone())))
    }

    pub fn render(&mut self, viewport: Viewport, theme: &Theme) -> String {
        let left = [
            String::new(),
            Theme::paint(theme.dim, "Select a subgroup to"),
            Theme::paint(theme.dim, "view parts and diagrams"),
        ]
        .join("\n");

        let title = self
            .group
            .as_ref()
            .map_or_else(|| "UNKNOWN".to_string(), |g| g.name.to_uppercase());
        let right = list_pane(
            &Theme::paint(theme.header, title),
            &mut self.menu,
            viewport.split_height(),
            &["No subgroups found"],
            theme,
        );

        layout(viewport, Some("esc back"), "", &left, &right, theme)
    }
}
