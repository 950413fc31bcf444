//! Writing generated migrations to disk.

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::error::StoreError;
use crate::validate;

/// Directory under the storage root that receives migration files.
pub const MIGRATIONS_DIR: &str = "migrations";

const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// `YYYY_MM_DD_HHMMSS_<name>.php`
pub fn migration_file_name(base_name: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.php", at.format(TIMESTAMP_FORMAT), base_name)
}

/// `migration_<name>_YYYY_MM_DD_HHMMSS.php`, the name offered for downloads.
pub fn download_file_name(migration_name: &str, at: NaiveDateTime) -> String {
    format!("migration_{}_{}.php", migration_name, at.format(TIMESTAMP_FORMAT))
}

/// Write `script` under `<root>/migrations/` with a local-time prefix and
/// return the path relative to `root`. An existing file is overwritten.
pub fn save_to_file(script: &str, base_name: &str, root: &Path) -> Result<String, StoreError> {
    save_to_file_at(script, base_name, root, Local::now().naive_local())
}

pub fn save_to_file_at(
    script: &str,
    base_name: &str,
    root: &Path,
    at: NaiveDateTime,
) -> Result<String, StoreError> {
    validate::file_name(base_name)?;

    let file_name = migration_file_name(base_name, at);
    let dir = root.join(MIGRATIONS_DIR);
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join(&file_name), script)?;

    let relative = format!("{MIGRATIONS_DIR}/{file_name}");
    info!(path = %relative, root = %root.display(), "saved migration file");
    Ok(relative)
}
