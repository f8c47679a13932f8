//! Entity table — the alias registry for multi-book texts
//!
//! A [`Table`] is built once from a list of [`EntityRecord`]s (usually
//! decoded from JSON by [`Table::from_json`]) and is read-only afterwards.
//!
//! # Construction invariants
//!
//! - Every record has a non-empty id and name, at least one chapter, and
//!   an `order` of 1 or more when present
//! - Every entity's normalized id, normalized display name, and every
//!   normalized alias is a key of the alias index, pointing at that
//!   entity's id
//! - No normalized alias points at two different ids
//! - No alias normalizes to an empty string or a bare number

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::normalizer::normalize_alias;
use crate::resolver::{Bounds, Registry};
use crate::{Error, Result};

/// One entity as supplied by an external loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(alias = "osis")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub chapters: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Opaque grouping such as a testament; not used by parsing
    #[serde(default, alias = "testament", skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A validated book or section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: String,
    display_name: String,
    aliases: BTreeSet<String>,
    max_chapter: u32,
    order: Option<u32>,
    group: Option<String>,
}

impl Entity {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Normalized aliases, including the normalized id and display name
    pub fn aliases(&self) -> &BTreeSet<String> {
        &self.aliases
    }

    pub fn max_chapter(&self) -> u32 {
        self.max_chapter
    }

    pub fn order(&self) -> Option<u32> {
        self.order
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn bounds(&self) -> Bounds<'_> {
        Bounds {
            id: &self.id,
            display_name: &self.display_name,
            max_chapter: self.max_chapter,
        }
    }

    /// Back to the loader shape, with the normalized alias set
    pub fn to_record(&self) -> EntityRecord {
        EntityRecord {
            id: self.id.clone(),
            name: self.display_name.clone(),
            aliases: self.aliases.iter().cloned().collect(),
            chapters: self.max_chapter,
            order: self.order,
            group: self.group.clone(),
        }
    }
}

impl TryFrom<EntityRecord> for Entity {
    type Error = Error;

    fn try_from(record: EntityRecord) -> Result<Self> {
        if record.id.trim().is_empty() {
            return Err(Error::invalid_entity(&record.name, "entity id cannot be empty"));
        }
        if record.name.trim().is_empty() {
            return Err(Error::invalid_entity(&record.id, "entity name cannot be empty"));
        }
        if record.chapters < 1 {
            return Err(Error::invalid_entity(
                &record.id,
                "entity must have at least one chapter",
            ));
        }
        if record.order == Some(0) {
            return Err(Error::invalid_entity(
                &record.id,
                "entity order must be a positive integer",
            ));
        }

        let mut aliases = BTreeSet::new();
        let candidates = [&record.id, &record.name]
            .into_iter()
            .chain(record.aliases.iter());
        for raw in candidates {
            let alias = normalize_alias(raw);
            if alias.is_empty() {
                return Err(Error::invalid_entity(
                    &record.id,
                    format!("alias {:?} is empty after normalization", raw),
                ));
            }
            if alias.chars().all(|c| c.is_ascii_digit() || c == ' ') {
                return Err(Error::invalid_entity(
                    &record.id,
                    format!("alias {:?} is numeric and would collide with chapter numbers", raw),
                ));
            }
            aliases.insert(alias);
        }

        Ok(Entity {
            id: record.id.trim().to_string(),
            display_name: record.name.trim().to_string(),
            aliases,
            max_chapter: record.chapters,
            order: record.order,
            group: record.group,
        })
    }
}

/// Read-only registry of entities, indexed by id and by normalized alias.
#[derive(Debug, Clone)]
pub struct Table {
    by_id: BTreeMap<String, Entity>,
    by_alias: HashMap<String, String>,
}

impl Table {
    /// Build a table, validating every record.
    ///
    /// # Errors
    /// `InvalidEntity` for a malformed record, `DuplicateId` when two
    /// records share an id, `DuplicateAlias` when one normalized alias
    /// would point at two different entities.
    pub fn new(records: impl IntoIterator<Item = EntityRecord>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        let mut by_alias: HashMap<String, String> = HashMap::new();

        for record in records {
            let entity = Entity::try_from(record)?;

            for alias in &entity.aliases {
                match by_alias.get(alias) {
                    Some(existing) if existing != &entity.id => {
                        return Err(Error::DuplicateAlias {
                            alias: alias.clone(),
                            first: existing.clone(),
                            second: entity.id.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        by_alias.insert(alias.clone(), entity.id.clone());
                    }
                }
            }

            if by_id.contains_key(&entity.id) {
                return Err(Error::DuplicateId(entity.id));
            }
            by_id.insert(entity.id.clone(), entity);
        }

        tracing::debug!(
            entities = by_id.len(),
            aliases = by_alias.len(),
            "built entity table"
        );

        Ok(Table { by_id, by_alias })
    }

    /// Decode a JSON array of [`EntityRecord`]s and build a table from it.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<EntityRecord> = serde_json::from_str(json)?;
        Table::new(records)
    }

    pub fn from_json_slice(json: &[u8]) -> Result<Self> {
        let records: Vec<EntityRecord> = serde_json::from_slice(json)?;
        Table::new(records)
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Id an already-normalized alias points at
    pub fn alias_target(&self, normalized_alias: &str) -> Option<&str> {
        self.by_alias.get(normalized_alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Entities by `order`, unordered ones last, ties broken by id
    pub fn entities(&self) -> Vec<&Entity> {
        let mut entities: Vec<&Entity> = self.by_id.values().collect();
        entities.sort_by(|a, b| {
            (a.order.is_none(), a.order, &a.id).cmp(&(b.order.is_none(), b.order, &b.id))
        });
        entities
    }
}

impl TryFrom<Vec<EntityRecord>> for Table {
    type Error = Error;

    fn try_from(records: Vec<EntityRecord>) -> Result<Self> {
        Table::new(records)
    }
}

impl Registry for Table {
    fn resolve(&self, head: &str) -> Result<&str> {
        let normalized = normalize_alias(head);

        if let Some(id) = self.by_alias.get(&normalized) {
            return Ok(id.as_str());
        }
        // Literal id fallback
        if let Some((id, _)) = self.by_id.get_key_value(normalized.as_str()) {
            return Ok(id.as_str());
        }

        Err(Error::unknown_entity(
            head.trim(),
            format!("no book matches {:?}", normalized),
        ))
    }

    fn bounds(&self, id: &str) -> Option<Bounds<'_>> {
        self.by_id.get(id).map(Entity::bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn record(id: &str, name: &str, aliases: &[&str], chapters: u32) -> EntityRecord {
        EntityRecord {
            id: id.into(),
            name: name.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            chapters,
            order: None,
            group: None,
        }
    }

    fn test_records() -> Vec<EntityRecord> {
        vec![
            EntityRecord {
                order: Some(20),
                group: Some("OT".into()),
                ..record("Prov", "Proverbs", &["proverbs", "prov", "pro"], 31)
            },
            EntityRecord {
                order: Some(9),
                ..record(
                    "1Sam",
                    "1 Samuel",
                    &["1 samuel", "1samuel", "1 sam", "1sam", "i samuel", "i sam"],
                    31,
                )
            },
            EntityRecord {
                order: Some(10),
                ..record(
                    "2Sam",
                    "2 Samuel",
                    &["2 samuel", "2samuel", "2 sam", "2sam", "ii samuel", "ii sam"],
                    24,
                )
            },
            EntityRecord {
                order: Some(70),
                group: Some("Apocrypha".into()),
                ..record(
                    "Wis",
                    "Wisdom of Solomon",
                    &["wisdom of solomon", "wisdom", "wis", "book of wisdom"],
                    19,
                )
            },
            EntityRecord {
                order: Some(40),
                ..record("Matt", "Matthew", &["matthew", "matt", "mt"], 28)
            },
        ]
    }

    #[test]
    fn test_aliases_resolve_to_ids() {
        let table = Table::new(test_records()).unwrap();
        let cases = [
            ("proverbs", "Prov"),
            ("prov", "Prov"),
            ("pro", "Prov"),
            ("1 samuel", "1Sam"),
            ("1samuel", "1Sam"),
            ("1sam", "1Sam"),
            ("I Samuel", "1Sam"),
            ("ii samuel", "2Sam"),
            ("wisdom", "Wis"),
            ("WIS", "Wis"),
            ("Book of Wisdom", "Wis"),
        ];
        for (alias, expected) in cases {
            assert_eq!(table.resolve(alias).unwrap(), expected, "alias {:?}", alias);
            assert!(table.contains(expected));
        }
    }

    #[test]
    fn test_every_alias_and_id_is_indexed() {
        let records = test_records();
        let table = Table::new(records.clone()).unwrap();
        for record in &records {
            let ids_and_aliases = std::iter::once(&record.id)
                .chain(std::iter::once(&record.name))
                .chain(record.aliases.iter());
            for raw in ids_and_aliases {
                assert_eq!(
                    table.alias_target(&normalize_alias(raw)),
                    Some(record.id.as_str()),
                    "{:?} not indexed for {}",
                    raw,
                    record.id
                );
            }
        }
    }

    #[test]
    fn test_id_resolves_without_explicit_alias() {
        let table = Table::new(vec![record("Song", "Song of Songs", &[], 8)]).unwrap();
        assert_eq!(table.resolve("Song").unwrap(), "Song");
        assert_eq!(table.resolve("song of songs").unwrap(), "Song");
    }

    #[test]
    fn test_literal_lowercase_id_fallback() {
        let table = Table::new(vec![record("gen", "Genesis", &[], 50)]).unwrap();
        assert_eq!(table.resolve("GEN").unwrap(), "gen");
    }

    #[test]
    fn test_unknown_alias() {
        let table = Table::new(test_records()).unwrap();
        let err = table.resolve("Unknown").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownEntity);
        assert_eq!(err.fragment(), "Unknown");
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let records = vec![
            record("Prov", "Proverbs", &["proverbs", "prov"], 31),
            record("Matt", "Matthew", &["matthew", "prov"], 28),
        ];
        let err = Table::new(records).unwrap_err();
        match err {
            Error::DuplicateAlias {
                alias,
                first,
                second,
            } => {
                assert_eq!(alias, "prov");
                assert_eq!(first, "Prov");
                assert_eq!(second, "Matt");
            }
            other => panic!("expected DuplicateAlias, got {:?}", other),
        }
    }

    #[test]
    fn test_alias_repeated_within_entity_is_fine() {
        let table = Table::new(vec![record("Prov", "Proverbs", &["prov", "PROV", "Prov."], 31)]);
        assert!(table.is_ok());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let records = vec![
            record("Prov", "Proverbs", &[], 31),
            record("Prov", "Proverbs again", &[], 31),
        ];
        assert_eq!(Table::new(records).unwrap_err().kind(), ErrorKind::DuplicateId);
    }

    #[test]
    fn test_invalid_records_rejected() {
        let cases = [
            record("", "Proverbs", &[], 31),
            record("Prov", "", &[], 31),
            record("Prov", "Proverbs", &[], 0),
            record("Prov", "Proverbs", &["..."], 31),
            record("Prov", "Proverbs", &["31"], 31),
            EntityRecord {
                order: Some(0),
                ..record("Prov", "Proverbs", &[], 31)
            },
        ];
        for case in cases {
            let err = Table::new(vec![case.clone()]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidEntity, "accepted {:?}", case);
        }
    }

    #[test]
    fn test_from_json_accepts_loader_keys() {
        let json = r#"[
            {"osis": "Prov", "name": "Proverbs", "aliases": ["pro"], "chapters": 31,
             "order": 20, "testament": "OT"},
            {"id": "Wis", "name": "Wisdom of Solomon", "chapters": 19}
        ]"#;
        let table = Table::from_json(json).unwrap();
        assert_eq!(table.len(), 2);
        let prov = table.get("Prov").unwrap();
        assert_eq!(prov.display_name(), "Proverbs");
        assert_eq!(prov.max_chapter(), 31);
        assert_eq!(prov.group(), Some("OT"));
        assert_eq!(table.get("Wis").unwrap().order(), None);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = Table::from_json("[{\"id\": \"Prov\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        let err = Table::from_json_slice(br#"[{"id": "Prov", "name": "P", "chapters": -1}]"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
    }

    #[test]
    fn test_entities_sorted_by_order() {
        let table = Table::new(test_records()).unwrap();
        let ids: Vec<&str> = table.entities().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["1Sam", "2Sam", "Prov", "Matt", "Wis"]);
    }

    #[test]
    fn test_to_record_keeps_metadata() {
        let table = Table::new(test_records()).unwrap();
        let back = table.get("Prov").unwrap().to_record();
        assert_eq!(back.id, "Prov");
        assert_eq!(back.chapters, 31);
        assert_eq!(back.order, Some(20));
        assert!(back.aliases.contains(&"proverbs".to_string()));
    }

    #[test]
    fn test_table_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Table>();
    }
}
