//! Due-time parsing for `remind add`.
//!
//! Accepted forms:
//! - RFC3339: `2026-03-01T12:00:00Z` (any offset, normalized to UTC)
//! - local date-time: `2026-03-01 12:00` (interpreted in local time)
//! - relative: `+30s`, `+10m`, `+2h`, `+1d` from now

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};

pub fn parse_due(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("empty due time"));
    }

    if let Some(rest) = trimmed.strip_prefix('+') {
        return parse_relative(rest, now);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
        return Local
            .from_local_datetime(&naive)
            .single()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| anyhow!("ambiguous local time: {trimmed}"));
    }

    Err(anyhow!(
        "unrecognized due time {trimmed:?}; use RFC3339, \"YYYY-MM-DD HH:MM\", or +<n>[smhd]"
    ))
}

fn parse_relative(rest: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let unit = rest
        .chars()
        .last()
        .ok_or_else(|| anyhow!("empty relative due time"))?;
    let digits = &rest[..rest.len() - unit.len_utf8()];
    let amount: i64 = digits
        .parse()
        .map_err(|_| anyhow!("invalid relative due time: +{rest}"))?;
    if amount < 0 {
        return Err(anyhow!("relative due time must be positive: +{rest}"));
    }
    let delta = match unit {
        's' => Duration::seconds(amount),
        'm' => Duration::minutes(amount),
        'h' => Duration::hours(amount),
        'd' => Duration::days(amount),
        other => return Err(anyhow!("unknown time unit {other:?} in +{rest}")),
    };
    Ok(now + delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339_utc() {
        let due = parse_due("2026-03-02T08:30:00Z", base()).unwrap();
        assert_eq!(due, Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let due = parse_due("2026-03-02T08:30:00+02:00", base()).unwrap();
        assert_eq!(due, Utc.with_ymd_and_hms(2026, 3, 2, 6, 30, 0).unwrap());
    }

    #[test]
    fn parses_relative_minutes() {
        let due = parse_due("+10m", base()).unwrap();
        assert_eq!(due, base() + Duration::minutes(10));
    }

    #[test]
    fn parses_relative_days() {
        let due = parse_due("+1d", base()).unwrap();
        assert_eq!(due, base() + Duration::days(1));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_due("soon", base()).is_err());
        assert!(parse_due("+10x", base()).is_err());
        assert!(parse_due("+m", base()).is_err());
        assert!(parse_due("", base()).is_err());
    }
}
