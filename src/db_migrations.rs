use rusqlite::{Connection, Result};

use crate::repository::metadata_repository;

/// the schema version this build expects
static CURRENT_VERSION: u64 = 1;

/// handles upgrading the database schema between versions, one step at a time.
/// Version 1 is current, so there are no steps to run yet; the version row
/// still gets stamped so future upgrades know where they started
pub fn migrate_db(con: &Connection, version: u64) -> Result<()> {
    if version >= CURRENT_VERSION {
        return Ok(());
    }
    for applied in version..CURRENT_VERSION {
        log::info!("Migrating database from version {applied}...");
        // future migration steps match on `applied` here
        metadata_repository::set_version(applied + 1, con)?;
    }
    Ok(())
}
