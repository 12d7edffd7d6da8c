use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::catalog::{
    Bookmark, CatalogError, CatalogProvider, Diagram, Group, Note, Part, PartRecord, SearchHit,
    Subgroup, SubgroupWithGroup,
};

/// In-memory catalog for unit tests.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    pub groups: Vec<Group>,
    pub subgroups: Vec<Subgroup>,
    pub parts: Vec<Part>,
    pub diagrams: Vec<Diagram>,
    pub notes: Vec<Note>,
    pub bookmarked: RefCell<BTreeSet<i64>>,
    pub fail_writes: bool,
}

impl FakeCatalog {
    pub fn sample() -> Self {
        let group = |id: &str, name: &str| Group {
            id: id.to_string(),
            name: name.to_string(),
        };
        let subgroup = |id: &str, name: &str, group_id: &str| Subgroup {
            id: id.to_string(),
            name: name.to_string(),
            group_id: group_id.to_string(),
        };
        let part = |id: i64, number: &str, pnc: Option<&str>, desc: &str, sub: &str| Part {
            id,
            part_number: number.to_string(),
            pnc: pnc.map(str::to_string),
            description: Some(desc.to_string()),
            diagram_id: format!("D-{sub}"),
            group_id: "G1".to_string(),
            subgroup_id: Some(sub.to_string()),
            ..Part::default()
        };

        Self {
            groups: vec![group("G1", "Engine"), group("G2", "Body")],
            subgroups: vec![
                subgroup("S1", "Cylinder head", "G1"),
                subgroup("S2", "Oil pump", "G1"),
                subgroup("S3", "Doors", "G2"),
            ],
            parts: vec![
                part(1, "MD100", Some("11"), "Head gasket", "S1"),
                part(2, "MD101", None, "Head bolt", "S1"),
                part(3, "MD200", Some("21"), "Oil pump assy", "S2"),
            ],
            diagrams: vec![Diagram {
                id: "D-S1".to_string(),
                group_id: "G1".to_string(),
                subgroup_id: Some("S1".to_string()),
                name: "Cylinder head".to_string(),
                image_path: Some("images/s1.png".to_string()),
            }],
            notes: vec![Note {
                part_id: 3,
                part_number: "MD200".to_string(),
                pnc: Some("21".to_string()),
                content: "check seal".to_string(),
                updated_at: "2024-01-01".to_string(),
            }],
            ..Self::default()
        }
    }

    fn group_name(&self, id: &str) -> String {
        self.group(id).map(|g| g.name).unwrap_or_default()
    }

    fn subgroup_name(&self, id: Option<&str>) -> Option<String> {
        id.and_then(|id| self.subgroup(id)).map(|s| s.name)
    }
}

impl CatalogProvider for FakeCatalog {
    fn groups(&self) -> Vec<Group> {
        self.groups.clone()
    }

    fn group(&self, id: &str) -> Option<Group> {
        self.groups.iter().find(|g| g.id == id).cloned()
    }

    fn all_subgroups(&self) -> Vec<SubgroupWithGroup> {
        self.subgroups
            .iter()
            .map(|s| SubgroupWithGroup {
                subgroup_id: s.id.clone(),
                subgroup_name: s.name.clone(),
                group_id: s.group_id.clone(),
                group_name: self.group_name(&s.group_id),
            })
            .collect()
    }

    fn subgroups(&self, group_id: &str) -> Vec<Subgroup> {
        self.subgroups
            .iter()
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect()
    }

    fn subgroup(&self, id: &str) -> Option<Subgroup> {
        self.subgroups.iter().find(|s| s.id == id).cloned()
    }

    fn parts_for_subgroup(&self, subgroup_id: &str) -> Vec<Part> {
        self.parts
            .iter()
            .filter(|p| p.subgroup_id.as_deref() == Some(subgroup_id))
            .cloned()
            .collect()
    }

    fn part(&self, id: i64) -> Option<PartRecord> {
        let part = self.parts.iter().find(|p| p.id == id)?.clone();
        let image_path = self
            .diagrams
            .iter()
            .find(|d| d.id == part.diagram_id)
            .and_then(|d| d.image_path.clone());
        Some(PartRecord {
            group_name: self.group_name(&part.group_id),
            subgroup_name: self.subgroup_name(part.subgroup_id.as_deref()),
            image_path,
            part,
        })
    }

    fn diagram_for_subgroup(&self, subgroup_id: &str) -> Option<Diagram> {
        self.diagrams
            .iter()
            .find(|d| d.subgroup_id.as_deref() == Some(subgroup_id))
            .cloned()
    }

    fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.parts
            .iter()
            .filter(|p| {
                p.part_number.to_lowercase().contains(&query)
                    || p.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
            })
            .map(|p| SearchHit {
                part: p.clone(),
                group_name: self.group_name(&p.group_id),
                subgroup_name: self.subgroup_name(p.subgroup_id.as_deref()),
            })
            .collect()
    }

    fn bookmarks(&self) -> Vec<Bookmark> {
        self.bookmarked
            .borrow()
            .iter()
            .filter_map(|id| self.part(*id))
            .map(|record| Bookmark {
                part_id: record.part.id,
                part_number: record.part.part_number,
                pnc: record.part.pnc,
                description: record.part.description,
                group_name: record.group_name,
                subgroup_name: record.subgroup_name,
                created_at: String::new(),
            })
            .collect()
    }

    fn notes(&self) -> Vec<Note> {
        self.notes.clone()
    }

    fn is_bookmarked(&self, part_id: i64) -> bool {
        self.bookmarked.borrow().contains(&part_id)
    }

    fn note_for_part(&self, part_id: i64) -> Option<Note> {
        self.notes.iter().find(|n| n.part_id == part_id).cloned()
    }

    fn toggle_bookmark(&self, part_id: i64) -> Result<bool, CatalogError> {
        if self.fail_writes {
            return Err(CatalogError::Backend("database is locked".to_string()));
        }
        let mut bookmarked = self.bookmarked.borrow_mut();
        if bookmarked.remove(&part_id) {
            Ok(false)
        } else {
            bookmarked.insert(part_id);
            Ok(true)
        }
    }
}
