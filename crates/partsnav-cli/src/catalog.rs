//! SQLite-backed catalog.

use std::path::Path;

use anyhow::{Context, Result};
use partsnav_core::{
    Bookmark, CatalogError, CatalogProvider, Diagram, Group, Note, Part, PartRecord, SearchHit,
    Subgroup, SubgroupWithGroup,
};
use rusqlite::{Connection, OptionalExtension, Params, Row, params};
use tracing::{debug, warn};

pub const SEARCH_LIMIT: usize = 100;

const PART_COLUMNS: &str = "p.id, p.part_number, p.pnc, p.description, p.ref_number, \
     p.quantity, p.spec, p.notes, p.color, p.model_date_range, p.diagram_id, p.group_id, \
     p.subgroup_id, p.replacement_part_number";
const PART_COLUMN_COUNT: usize = 14;

const APP_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS bookmarks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        part_id INTEGER NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        part_id INTEGER NOT NULL UNIQUE,
        content TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
";

pub struct SqliteCatalog {
    conn: Connection,
    has_fts: bool,
}

impl SqliteCatalog {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("open catalog database {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(APP_TABLES)
            .context("create bookmark and note tables")?;
        let has_fts = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE name = 'parts_fts'",
                [],
                |_| Ok(()),
            )
            .optional()
            .context("inspect catalog schema")?
            .is_some();
        debug!(has_fts, "catalog opened");
        Ok(Self { conn, has_fts })
    }

    pub fn has_fts(&self) -> bool {
        self.has_fts
    }

    fn query_list<T, P, F>(&self, what: &str, sql: &str, params: P, map: F) -> Vec<T>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let run = || -> rusqlite::Result<Vec<T>> {
            let mut stmt = self.conn.prepare(sql)?;
            let rows = stmt.query_map(params, map)?;
            rows.collect()
        };
        run().unwrap_or_else(|err| {
            warn!(query = what, error = %err, "catalog query failed");
            Vec::new()
        })
    }

    fn query_opt<T, P, F>(&self, what: &str, sql: &str, params: P, map: F) -> Option<T>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.conn
            .query_row(sql, params, map)
            .optional()
            .unwrap_or_else(|err| {
                warn!(query = what, error = %err, "catalog query failed");
                None
            })
    }

    fn search_fts(&self, query: &str) -> Option<Vec<SearchHit>> {
        let expr = fts_expression(query)?;
        let sql = format!(
            "SELECT {PART_COLUMNS}, g.name, s.name FROM parts p
             JOIN parts_fts fts ON p.id = fts.rowid
             JOIN groups g ON g.id = p.group_id
             LEFT JOIN subgroups s ON s.id = p.subgroup_id
             WHERE parts_fts MATCH ?1
             ORDER BY rank
             LIMIT {SEARCH_LIMIT}"
        );
        let run = || -> rusqlite::Result<Vec<SearchHit>> {
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params![expr], search_hit_from_row)?;
            rows.collect()
        };
        match run() {
            Ok(hits) => Some(hits),
            Err(err) => {
                debug!(error = %err, "fts query rejected, using LIKE scan");
                None
            }
        }
    }

    fn search_like(&self, query: &str) -> Vec<SearchHit> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT {PART_COLUMNS}, g.name, s.name FROM parts p
             JOIN groups g ON g.id = p.group_id
             LEFT JOIN subgroups s ON s.id = p.subgroup_id
             WHERE p.part_number LIKE ?1 ESCAPE '\\'
                OR p.pnc LIKE ?1 ESCAPE '\\'
                OR p.description LIKE ?1 ESCAPE '\\'
             ORDER BY p.part_number
             LIMIT {SEARCH_LIMIT}"
        );
        self.query_list("search", &sql, params![pattern], search_hit_from_row)
    }
}

/// Builds an FTS5 prefix query, one quoted term per whitespace token.
fn fts_expression(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|token| format!("\"{}\"*", token.replace('"', "\"\"")))
        .collect();
    (!terms.is_empty()).then(|| terms.join(" "))
}

fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn part_from_row(row: &Row<'_>) -> rusqlite::Result<Part> {
    Ok(Part {
        id: row.get(0)?,
        part_number: row.get(1)?,
        pnc: row.get(2)?,
        description: row.get(3)?,
        ref_number: row.get(4)?,
        quantity: row.get(5)?,
        spec: row.get(6)?,
        notes: row.get(7)?,
        color: row.get(8)?,
        model_date_range: row.get(9)?,
        diagram_id: row.get(10)?,
        group_id: row.get(11)?,
        subgroup_id: row.get(12)?,
        replacement_part_number: row.get(13)?,
    })
}

fn search_hit_from_row(row: &Row<'_>) -> rusqlite::Result<SearchHit> {
    Ok(SearchHit {
        part: part_from_row(row)?,
        group_name: row.get(PART_COLUMN_COUNT)?,
        subgroup_name: row.get(PART_COLUMN_COUNT + 1)?,
    })
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        part_id: row.get(0)?,
        part_number: row.get(1)?,
        pnc: row.get(2)?,
        content: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

impl CatalogProvider for SqliteCatalog {
    fn groups(&self) -> Vec<Group> {
        self.query_list(
            "groups",
            "SELECT id, name FROM groups ORDER BY name",
            [],
            |row| {
                Ok(Group {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
    }

    fn group(&self, id: &str) -> Option<Group> {
        self.query_opt(
            "group",
            "SELECT id, name FROM groups WHERE id = ?1",
            params![id],
            |row| {
                Ok(Group {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
    }

    fn all_subgroups(&self) -> Vec<SubgroupWithGroup> {
        self.query_list(
            "all_subgroups",
            "SELECT s.id, s.name, g.id, g.name FROM subgroups s
             JOIN groups g ON g.id = s.group_id
             ORDER BY g.name, s.name",
            [],
            |row| {
                Ok(SubgroupWithGroup {
                    subgroup_id: row.get(0)?,
                    subgroup_name: row.get(1)?,
                    group_id: row.get(2)?,
                    group_name: row.get(3)?,
                })
            },
        )
    }

    fn subgroups(&self, group_id: &str) -> Vec<Subgroup> {
        self.query_list(
            "subgroups",
            "SELECT id, name, group_id FROM subgroups WHERE group_id = ?1 ORDER BY name",
            params![group_id],
            |row| {
                Ok(Subgroup {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    group_id: row.get(2)?,
                })
            },
        )
    }

    fn subgroup(&self, id: &str) -> Option<Subgroup> {
        self.query_opt(
            "subgroup",
            "SELECT id, name, group_id FROM subgroups WHERE id = ?1",
            params![id],
            |row| {
                Ok(Subgroup {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    group_id: row.get(2)?,
                })
            },
        )
    }

    fn parts_for_subgroup(&self, subgroup_id: &str) -> Vec<Part> {
        let sql = format!(
            "SELECT {PART_COLUMNS} FROM parts p WHERE p.subgroup_id = ?1
             ORDER BY p.pnc, p.part_number"
        );
        self.query_list(
            "parts_for_subgroup",
            &sql,
            params![subgroup_id],
            part_from_row,
        )
    }

    fn part(&self, id: i64) -> Option<PartRecord> {
        let sql = format!(
            "SELECT {PART_COLUMNS}, d.image_path, g.name, s.name FROM parts p
             LEFT JOIN diagrams d ON d.id = p.diagram_id
             JOIN groups g ON g.id = p.group_id
             LEFT JOIN subgroups s ON s.id = p.subgroup_id
             WHERE p.id = ?1"
        );
        self.query_opt("part", &sql, params![id], |row| {
            Ok(PartRecord {
                part: part_from_row(row)?,
                image_path: row.get(PART_COLUMN_COUNT)?,
                group_name: row.get(PART_COLUMN_COUNT + 1)?,
                subgroup_name: row.get(PART_COLUMN_COUNT + 2)?,
            })
        })
    }

    fn diagram_for_subgroup(&self, subgroup_id: &str) -> Option<Diagram> {
        self.query_opt(
            "diagram_for_subgroup",
            "SELECT id, group_id, subgroup_id, name, image_path FROM diagrams
             WHERE subgroup_id = ?1
             ORDER BY id
             LIMIT 1",
            params![subgroup_id],
            |row| {
                Ok(Diagram {
                    id: row.get(0)?,
                    group_id: row.get(1)?,
                    subgroup_id: row.get(2)?,
                    name: row.get(3)?,
                    image_path: row.get(4)?,
                })
            },
        )
    }

    fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        if self.has_fts
            && let Some(hits) = self.search_fts(query)
        {
            return hits;
        }
        self.search_like(query)
    }

    fn bookmarks(&self) -> Vec<Bookmark> {
        self.query_list(
            "bookmarks",
            "SELECT b.part_id, p.part_number, p.pnc, p.description, g.name, s.name, b.created_at
             FROM bookmarks b
             JOIN parts p ON p.id = b.part_id
             JOIN groups g ON g.id = p.group_id
             LEFT JOIN subgroups s ON s.id = p.subgroup_id
             ORDER BY b.created_at DESC, b.id DESC",
            [],
            |row| {
                Ok(Bookmark {
                    part_id: row.get(0)?,
                    part_number: row.get(1)?,
                    pnc: row.get(2)?,
                    description: row.get(3)?,
                    group_name: row.get(4)?,
                    subgroup_name: row.get(5)?,
                    created_at: row.get(6)?,
                })
            },
        )
    }

    fn notes(&self) -> Vec<Note> {
        self.query_list(
            "notes",
            "SELECT n.part_id, p.part_number, p.pnc, n.content, n.updated_at
             FROM notes n
             JOIN parts p ON p.id = n.part_id
             ORDER BY n.updated_at DESC, n.id DESC",
            [],
            note_from_row,
        )
    }

    fn is_bookmarked(&self, part_id: i64) -> bool {
        self.query_opt(
            "is_bookmarked",
            "SELECT 1 FROM bookmarks WHERE part_id = ?1",
            params![part_id],
            |_| Ok(()),
        )
        .is_some()
    }

    fn note_for_part(&self, part_id: i64) -> Option<Note> {
        self.query_opt(
            "note_for_part",
            "SELECT n.part_id, p.part_number, p.pnc, n.content, n.updated_at
             FROM notes n
             JOIN parts p ON p.id = n.part_id
             WHERE n.part_id = ?1",
            params![part_id],
            note_from_row,
        )
    }

    fn toggle_bookmark(&self, part_id: i64) -> Result<bool, CatalogError> {
        let backend = |err: rusqlite::Error| CatalogError::Backend(err.to_string());
        let removed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE part_id = ?1", params![part_id])
            .map_err(backend)?;
        if removed > 0 {
            return Ok(false);
        }
        self.conn
            .execute(
                "INSERT INTO bookmarks (part_id) VALUES (?1)",
                params![part_id],
            )
            .map_err(backend)?;
        Ok(true)
    }
}
