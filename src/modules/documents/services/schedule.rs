use chrono::{Days, NaiveDate};

use crate::core::{AppError, Result};

/// MySQL DATE columns accept years 1000 through 9999
fn storable(date: NaiveDate) -> bool {
    NaiveDate::from_ymd_opt(1000, 1, 1).is_some_and(|min| date >= min)
        && NaiveDate::from_ymd_opt(9999, 12, 31).is_some_and(|max| date <= max)
}

fn check_storable(date: NaiveDate, label: &str) -> Result<()> {
    if !storable(date) {
        return Err(AppError::validation(format!(
            "{} must be between 1000-01-01 and 9999-12-31, got: {}",
            label, date
        )));
    }
    Ok(())
}

/// Resolve the closing date of a document (due date, valid-until date).
///
/// Uses `requested` when given, otherwise `issue_date + default_days`.
/// Both dates must be storable and the closing date cannot precede the
/// issue date.
pub fn closing_date(
    issue_date: NaiveDate,
    requested: Option<NaiveDate>,
    default_days: u32,
    label: &str,
) -> Result<NaiveDate> {
    check_storable(issue_date, "Issue date")?;

    let closing = match requested {
        Some(date) => date,
        None => issue_date
            .checked_add_days(Days::new(u64::from(default_days)))
            .ok_or_else(|| {
                AppError::validation(format!("{} is out of range", label))
            })?,
    };

    check_storable(closing, label)?;

    if closing < issue_date {
        return Err(AppError::validation(format!(
            "{} cannot be before issue date",
            label
        )));
    }

    Ok(closing)
}
