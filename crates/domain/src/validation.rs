// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates that the pickup location is non-blank.
///
/// # Errors
///
/// Returns `DomainError::EmptyPickupLocation` if the location is empty or
/// whitespace only.
pub fn validate_pickup_location(pickup: &str) -> Result<(), DomainError> {
    if pickup.trim().is_empty() {
        return Err(DomainError::EmptyPickupLocation);
    }
    Ok(())
}

/// Resolves the dropoff location, defaulting to the pickup location when
/// the dropoff is missing or blank.
///
/// The result is never empty as long as the pickup location is valid.
#[must_use]
pub fn resolve_dropoff_location(pickup: &str, dropoff: Option<&str>) -> String {
    match dropoff {
        Some(d) if !d.trim().is_empty() => d.trim().to_string(),
        _ => pickup.trim().to_string(),
    }
}

/// Parses a comma-separated skills tag list into individual tags.
///
/// Blank segments are dropped; surrounding whitespace is trimmed.
#[must_use]
pub fn parse_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Joins skill tags back into the comma-separated persistence form.
#[must_use]
pub fn join_skills(skills: &[String]) -> String {
    skills.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pickup_rejected() {
        assert!(validate_pickup_location("").is_err());
        assert!(validate_pickup_location("   ").is_err());
        assert!(validate_pickup_location("Main office").is_ok());
    }

    #[test]
    fn test_dropoff_defaults_to_pickup() {
        assert_eq!(resolve_dropoff_location("Main office", None), "Main office");
        assert_eq!(resolve_dropoff_location("Main office", Some("")), "Main office");
        assert_eq!(resolve_dropoff_location("Main office", Some("  ")), "Main office");
        assert_eq!(
            resolve_dropoff_location("Main office", Some("Train station")),
            "Train station"
        );
    }

    #[test]
    fn test_skills_round_trip() {
        let parsed = parse_skills("parallel parking, mirror checks,, lane changes ");
        assert_eq!(parsed, vec!["parallel parking", "mirror checks", "lane changes"]);
        assert_eq!(
            join_skills(&parsed),
            "parallel parking,mirror checks,lane changes"
        );
    }

    #[test]
    fn test_empty_skills() {
        assert!(parse_skills("").is_empty());
        assert!(parse_skills(" , ,").is_empty());
    }
}
