// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking-date window rules.
//!
//! A lesson may be booked from today (in the operating timezone) up to a
//! configurable number of months ahead, boundary inclusive. Month addition
//! clamps the day-of-month to the target month's length, so a booking made
//! on January 31 with a 3-month horizon allows dates through April 30.

use crate::error::DomainError;
use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use time::{Date, Month};

/// Default booking horizon in calendar months.
pub const DEFAULT_HORIZON_MONTHS: u32 = 3;

/// Adds a number of calendar months to a date, clamping the day to the
/// length of the target month.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the resulting year is
/// outside the representable range.
pub fn add_months(date: Date, months: u32) -> Result<Date, DomainError> {
    let zero_based = u32::from(u8::from(date.month())) - 1 + months;
    let year_offset = i32::try_from(zero_based / 12).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("adding {months} months to {date}"),
        }
    })?;
    let year = date.year().checked_add(year_offset).ok_or_else(|| {
        DomainError::DateArithmeticOverflow {
            operation: format!("adding {months} months to {date}"),
        }
    })?;

    let month_number = u8::try_from(zero_based % 12 + 1).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("adding {months} months to {date}"),
        }
    })?;
    let month = Month::try_from(month_number).map_err(|e| DomainError::DateArithmeticOverflow {
        operation: format!("resolving month while adding {months} months to {date}: {e}"),
    })?;

    let max_day = time::util::days_in_year_month(year, month);
    let day = date.day().min(max_day);

    Date::from_calendar_date(year, month, day).map_err(|e| DomainError::DateArithmeticOverflow {
        operation: format!("adding {months} months to {date}: {e}"),
    })
}

/// Validates a booking date against the booking window.
///
/// The date must not be before `today` and must not be more than
/// `horizon_months` calendar months after `today`. Both boundaries are
/// inclusive: booking for today and for `today + horizon` is allowed.
///
/// # Errors
///
/// Returns `DomainError::DateInPast` or `DomainError::DateBeyondHorizon`
/// when the date falls outside the window.
pub fn validate_booking_date(
    date: Date,
    today: Date,
    horizon_months: u32,
) -> Result<(), DomainError> {
    if date < today {
        return Err(DomainError::DateInPast { date, today });
    }

    let latest = add_months(today, horizon_months)?;
    if date > latest {
        return Err(DomainError::DateBeyondHorizon { date, latest });
    }

    Ok(())
}

/// Resolves "today" in the named operating timezone.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is not a recognized
/// IANA timezone, or `DomainError::DateArithmeticOverflow` if the civil
/// date cannot be represented.
pub fn today_in_timezone(timezone: &str) -> Result<Date, DomainError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;

    let now = Utc::now().with_timezone(&tz).date_naive();

    let month_number = u8::try_from(now.month()).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("resolving today in timezone {timezone}"),
        }
    })?;
    let month = Month::try_from(month_number).map_err(|e| DomainError::DateArithmeticOverflow {
        operation: format!("resolving today in timezone {timezone}: {e}"),
    })?;
    let day = u8::try_from(now.day()).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("resolving today in timezone {timezone}"),
    })?;

    Date::from_calendar_date(now.year(), month, day).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("resolving today in timezone {timezone}: {e}"),
        }
    })
}
