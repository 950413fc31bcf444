//! Local history of generated migrations.
//!
//! Records live in a single JSON document, `<root>/migration_generators.json`,
//! rewritten in full on every change.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::generator::Generated;
use crate::store;
use crate::validate;

pub const HISTORY_FILE: &str = "migration_generators.json";
pub const PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Generated,
    Saved,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Generated => "generated",
            Status::Saved => "saved",
            Status::Error => "error",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    pub id: u64,
    pub name: String,
    pub sql_schema: String,
    pub generated_migration: String,
    /// Relative to the storage root, set once the script is written out.
    pub migration_file_path: Option<String>,
    pub status: Status,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`RecordStore::create`].
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub name: String,
    pub sql_schema: String,
    pub generated_migration: String,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

impl NewRecord {
    /// Record of a generation run; keeps the sanitized SQL, not the raw input.
    pub fn from_generated(name: &str, generated: Generated) -> Self {
        Self {
            name: name.to_string(),
            sql_schema: generated.sanitized.into_inner(),
            generated_migration: generated.script.into_string(),
            ..Default::default()
        }
    }
}

/// One page of [`RecordStore::list`], 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
    pub from: Option<usize>,
    pub to: Option<usize>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Catalog {
    next_id: u64,
    records: Vec<MigrationRecord>,
}

impl Catalog {
    fn find_mut(&mut self, id: u64) -> Result<&mut MigrationRecord, StoreError> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
    clock: fn() -> DateTime<Utc>,
}

impl RecordStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clock: Utc::now,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    fn load(&self) -> Result<Catalog, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Catalog::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn persist(&self, catalog: &Catalog) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(catalog)?;
        std::fs::write(self.path(), json)?;
        Ok(())
    }

    pub fn create(&self, new: NewRecord) -> Result<MigrationRecord, StoreError> {
        validate::migration_name(&new.name)?;
        validate::notes(new.notes.as_deref())?;

        let mut catalog = self.load()?;
        catalog.next_id += 1;
        let now = (self.clock)();
        let record = MigrationRecord {
            id: catalog.next_id,
            name: new.name,
            sql_schema: new.sql_schema,
            generated_migration: new.generated_migration,
            migration_file_path: None,
            status: Status::Generated,
            notes: new.notes,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        };
        catalog.records.push(record.clone());
        self.persist(&catalog)?;

        info!(id = record.id, name = %record.name, "recorded migration");
        Ok(record)
    }

    /// Most recently updated first.
    pub fn list(&self, page: usize) -> Result<Page<MigrationRecord>, StoreError> {
        let mut records = self.load()?.records;
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

        let total = records.len();
        let last_page = total.div_ceil(PER_PAGE).max(1);
        let current_page = page.max(1);
        let offset = (current_page - 1) * PER_PAGE;
        let data: Vec<_> = records.into_iter().skip(offset).take(PER_PAGE).collect();
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            (Some(offset + 1), Some(offset + data.len()))
        };

        Ok(Page {
            data,
            current_page,
            last_page,
            per_page: PER_PAGE,
            total,
            from,
            to,
        })
    }

    pub fn get(&self, id: u64) -> Result<MigrationRecord, StoreError> {
        self.load()?
            .records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn mark_saved(&self, id: u64, file_path: String) -> Result<MigrationRecord, StoreError> {
        let mut catalog = self.load()?;
        let now = (self.clock)();
        let record = catalog.find_mut(id)?;
        record.migration_file_path = Some(file_path);
        record.status = Status::Saved;
        record.updated_at = now;
        let record = record.clone();
        self.persist(&catalog)?;
        Ok(record)
    }

    /// Write the record's script to `migrations/` and mark it saved.
    pub fn save(&self, id: u64, file_name: &str) -> Result<MigrationRecord, StoreError> {
        let record = self.get(id)?;
        if record.generated_migration.is_empty() {
            return Err(StoreError::EmptyMigration(id));
        }
        let at = (self.clock)().with_timezone(&Local).naive_local();
        let path = store::save_to_file_at(&record.generated_migration, file_name, &self.root, at)?;
        self.mark_saved(id, path)
    }

    /// Copy a record as a fresh, unsaved entry named `<name>_copy_HHMMSS`.
    pub fn duplicate(&self, id: u64) -> Result<MigrationRecord, StoreError> {
        let original = self.get(id)?;
        let suffix = (self.clock)().with_timezone(&Local).format("%H%M%S");
        let copy = self.create(NewRecord {
            name: format!("{}_copy_{}", original.name, suffix),
            sql_schema: original.sql_schema,
            generated_migration: original.generated_migration,
            notes: original.notes,
            created_by: original.created_by,
        })?;
        debug!(from = id, to = copy.id, "duplicated migration record");
        Ok(copy)
    }

    /// Remove a record and its saved file, if any.
    pub fn delete(&self, id: u64) -> Result<MigrationRecord, StoreError> {
        let mut catalog = self.load()?;
        let index = catalog
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let record = catalog.records.remove(index);

        if let Some(rel) = &record.migration_file_path {
            let file = self.root.join(rel);
            if file.exists() {
                std::fs::remove_file(&file)?;
                debug!(path = %file.display(), "removed saved migration file");
            } else {
                warn!(path = %file.display(), "saved migration file already gone");
            }
        }

        self.persist(&catalog)?;
        info!(id, "deleted migration record");
        Ok(record)
    }

    /// File name and content for handing the script to someone else.
    pub fn export(&self, id: u64) -> Result<(String, String), StoreError> {
        let record = self.get(id)?;
        if record.generated_migration.is_empty() {
            return Err(StoreError::EmptyMigration(id));
        }
        let at = (self.clock)().with_timezone(&Local).naive_local();
        Ok((
            store::download_file_name(&record.name, at),
            record.generated_migration,
        ))
    }
}
