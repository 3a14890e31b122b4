use crate::stats::AuthorStat;
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

pub mod reporter;

pub use reporter::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "text" => OutputFormat::Text,
            _ => OutputFormat::Text,
        }
    }
}

/// `Name(Email), Count, HumanSpan(Y-M-D ~ Y-M-D)`
pub fn render_line(stat: &AuthorStat) -> String {
    format!(
        "{}({}), {}, {}({} ~ {})",
        stat.user.name,
        stat.user.email,
        stat.commit_count,
        human_span(stat.span),
        format_date(&stat.first_seen),
        format_date(&stat.last_seen)
    )
}

/// Unpadded `Year-Month-Day`.
pub fn format_date(at: &DateTime<Utc>) -> String {
    format!("{}-{}-{}", at.year(), at.month(), at.day())
}

/// Spans of a day or more read as `<d>d<h>h<m>m`; anything shorter uses the
/// compact elapsed form (`1h2m3s`, `45s`, `0s`).
pub fn human_span(span: Duration) -> String {
    let hours = span.num_hours();
    if hours < 24 {
        return elapsed(span);
    }

    format!(
        "{}d{}h{}m",
        hours / 24,
        hours % 24,
        span.num_minutes() % 60
    )
}

fn elapsed(span: Duration) -> String {
    const MICRO: u64 = 1_000;
    const MILLI: u64 = 1_000_000;
    const SECOND: u64 = 1_000_000_000;

    let nanos = span.num_nanoseconds().unwrap_or(i64::MAX);
    let sign = if nanos < 0 { "-" } else { "" };
    let n = nanos.unsigned_abs();

    if n == 0 {
        return "0s".to_string();
    }
    if n < MICRO {
        return format!("{sign}{n}ns");
    }
    if n < MILLI {
        return format!("{sign}{}µs", decimal(n, MICRO, 3));
    }
    if n < SECOND {
        return format!("{sign}{}ms", decimal(n, MILLI, 6));
    }

    let secs = n / SECOND;
    let h = secs / 3600;
    let m = (secs / 60) % 60;
    let s = decimal(n % (60 * SECOND), SECOND, 9);

    let mut out = sign.to_string();
    if h > 0 {
        out.push_str(&format!("{h}h"));
    }
    if h > 0 || m > 0 {
        out.push_str(&format!("{m}m"));
    }
    out.push_str(&format!("{s}s"));
    out
}

/// `value / unit` with the remainder as a fraction, trailing zeros dropped.
fn decimal(value: u64, unit: u64, digits: usize) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }

    let frac = format!("{frac:0digits$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub email: String,
    pub commit_count: usize,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub span_seconds: i64,
    pub span: String,
}

impl From<&AuthorStat> for ReportEntry {
    fn from(stat: &AuthorStat) -> Self {
        Self {
            name: stat.user.name.clone(),
            email: stat.user.email.clone(),
            commit_count: stat.commit_count,
            first_seen: stat.first_seen,
            last_seen: stat.last_seen,
            span_seconds: stat.span.num_seconds(),
            span: human_span(stat.span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::User;
    use chrono::TimeZone;

    #[test]
    fn test_short_spans() {
        assert_eq!(human_span(Duration::zero()), "0s");
        assert_eq!(human_span(Duration::seconds(45)), "45s");
        assert_eq!(human_span(Duration::minutes(5)), "5m0s");
        assert_eq!(human_span(Duration::seconds(3661)), "1h1m1s");
        assert_eq!(human_span(Duration::hours(23) + Duration::minutes(59)), "23h59m0s");
        assert_eq!(human_span(Duration::milliseconds(1500)), "1.5s");
    }

    #[test]
    fn test_sub_second_spans() {
        assert_eq!(human_span(Duration::nanoseconds(1)), "1ns");
        assert_eq!(human_span(Duration::microseconds(2)), "2µs");
        assert_eq!(human_span(Duration::microseconds(1500)), "1.5ms");
        assert_eq!(human_span(Duration::milliseconds(250)), "250ms");
    }

    #[test]
    fn test_day_spans() {
        assert_eq!(human_span(Duration::hours(24)), "1d0h0m");
        assert_eq!(human_span(Duration::days(9)), "9d0h0m");
        assert_eq!(
            human_span(Duration::days(2) + Duration::hours(3) + Duration::minutes(4) + Duration::seconds(59)),
            "2d3h4m"
        );
    }

    #[test]
    fn test_date_is_unpadded() {
        let at = Utc.with_ymd_and_hms(2017, 3, 7, 23, 59, 0).unwrap();
        assert_eq!(format_date(&at), "2017-3-7");
    }

    #[test]
    fn test_render_line() {
        let first_seen = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let last_seen = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let stat = AuthorStat {
            user: User::new("Alice", "alice@example.com"),
            commit_count: 2,
            first_seen,
            last_seen,
            span: last_seen - first_seen,
        };

        assert_eq!(
            render_line(&stat),
            "Alice(alice@example.com), 2, 9d0h0m(2024-1-1 ~ 2024-1-10)"
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from("html"), OutputFormat::Text);
    }
}
