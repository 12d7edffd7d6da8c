use tracing::{info, warn};

use crate::catalog::{CatalogProvider, Note, PartRecord};
use crate::input::Key;
use crate::screen::Screen;
use crate::theme::Theme;

use super::{DiagramPane, RULE, Reply, ViewContext, Viewport, layout};

const FIELD_WIDTH: usize = 12;
const REPLACED_BY: &str = "REPLACED BY";

#[derive(Debug)]
pub struct PartDetailView {
    part_id: i64,
    record: Option<PartRecord>,
    diagram: DiagramPane,
    bookmarked: bool,
    note: Option<Note>,
    came_from_search: bool,
    status: Option<Result<String, String>>,
}

impl PartDetailView {
    pub fn new(ctx: &mut ViewContext<'_>, part_id: i64, came_from_search: bool) -> Self {
        let provider = ctx.provider;
        let record = provider.part(part_id);
        let diagram = match &record {
            Some(record) => DiagramPane::load(
                ctx,
                Some(record.part.diagram_id.clone()),
                record.image_path.as_deref(),
            ),
            None => DiagramPane::missing(),
        };

        Self {
            part_id,
            bookmarked: provider.is_bookmarked(part_id),
            note: provider.note_for_part(part_id),
            record,
            diagram,
            came_from_search,
            status: None,
        }
    }

    pub fn image_id(&self) -> Option<u32> {
        self.diagram.image_id()
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    pub fn handle_key(&mut self, key: Key, provider: &dyn CatalogProvider) -> Reply {
        if key.is_bookmark() && self.record.is_some() {
            self.toggle_bookmark(provider);
            return Reply::Idle;
        }
        if key == Key::Char('o') {
            let subgroup = self
                .record
                .as_ref()
                .and_then(|r| r.part.subgroup_id.clone());
            return subgroup.map_or(Reply::Idle, |id| Reply::Navigate(Screen::subgroup(id)));
        }
        Reply::Idle
    }

    fn toggle_bookmark(&mut self, provider: &dyn CatalogProvider) {
        match provider.toggle_bookmark(self.part_id) {
            Ok(bookmarked) => {
                info!(part_id = self.part_id, bookmarked, "bookmark toggled");
                self.bookmarked = bookmarked;
                self.status = Some(Ok(if bookmarked {
                    "Bookmarked".to_string()
                } else {
                    "Bookmark removed".to_string()
                }));
            }
            Err(err) => {
                warn!(part_id = self.part_id, error = %err, "bookmark toggle failed");
                self.status = Some(Err(err.to_string()));
            }
        }
    }

    pub fn render(&mut self, viewport: Viewport, theme: &Theme) -> String {
        let left = self.diagram.lines(theme).join("\n");
        let right = match &self.record {
            Some(record) => self.details(record, theme),
            None => [
                Theme::paint(theme.header, "PART"),
                Theme::paint(theme.dim, RULE),
                String::new(),
                Theme::paint(theme.error, "Part not found"),
            ]
            .join("\n"),
        };

        let hint = if self.came_from_search {
            "esc back to search"
        } else {
            "esc back"
        };
        layout(viewport, Some(hint), &self.diagram.placement(), &left, &right, theme)
    }

    fn details(&self, record: &PartRecord, theme: &Theme) -> String {
        let part = &record.part;
        let mut lines = vec![
            Theme::paint(theme.part_number, part.part_number.to_uppercase()),
            Theme::paint(theme.dim, RULE),
            String::new(),
        ];

        let location = match &record.subgroup_name {
            Some(subgroup) => format!("{} > {}", record.group_name, subgroup),
            None => record.group_name.clone(),
        };
        let quantity = part.quantity.map(|q| q.to_string());
        let fields = [
            ("PNC", part.pnc.as_deref()),
            ("DESCRIPTION", part.description.as_deref()),
            ("REF", part.ref_number.as_deref()),
            ("QTY", quantity.as_deref()),
            ("SPEC", part.spec.as_deref()),
            ("COLOR", part.color.as_deref()),
            ("MODELS", part.model_date_range.as_deref()),
            ("NOTES", part.notes.as_deref()),
            (REPLACED_BY, part.replacement_part_number.as_deref()),
            ("LOCATION", Some(location.as_str())),
        ];
        for (name, value) in fields {
            let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            let value = value.to_uppercase();
            let value = if name == REPLACED_BY {
                Theme::paint(theme.link, value)
            } else {
                value
            };
            lines.push(format!(
                "{}{value}",
                Theme::paint(theme.dim, format!("{name:<width$}", width = FIELD_WIDTH)),
            ));
        }

        lines.push(String::new());
        lines.push(if self.bookmarked {
            Theme::paint(theme.status, "★ BOOKMARKED")
        } else {
            Theme::paint(theme.dim, "☆ not bookmarked")
        });

        if let Some(note) = &self.note {
            lines.push(String::new());
            lines.push(Theme::paint(theme.header, "NOTE"));
            lines.extend(note.content.lines().map(str::to_string));
        }

        if let Some(status) = &self.status {
            lines.push(String::new());
            lines.push(match status {
                Ok(message) => Theme::paint(theme.status, message),
                Err(message) => Theme::paint(theme.error, message),
            });
        }

        lines.push(String::new());
        lines.push(Theme::paint(theme.dim, "b bookmark   o open subgroup"));
        lines.join("\n")
    }
}
