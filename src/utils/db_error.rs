//! Helpers for classifying database errors.

/// Returns the violated constraint name when `e` is a unique violation.
///
/// `Some(None)` means a unique violation whose constraint the driver did not
/// report.
pub fn unique_violation(e: &sqlx::Error) -> Option<Option<&str>> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err.constraint())
}

/// Returns `true` when `e` is a unique violation of any constraint.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    unique_violation(e).is_some()
}
