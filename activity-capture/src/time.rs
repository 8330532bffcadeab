use time::OffsetDateTime;

pub trait TimeSource {
    /// Milliseconds since epoch.
    fn now_millis(&self) -> i64;
}

#[derive(Clone)]
pub struct SystemTime {}

impl TimeSource for SystemTime {
    fn now_millis(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

/// UTC calendar date (`YYYY-MM-DD`) for an epoch-millisecond timestamp.
/// Digest files are named after this, one file per project per day.
pub fn utc_date(millis: i64) -> String {
    let datetime = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);
    format!(
        "{:04}-{:02}-{:02}",
        datetime.year(),
        u8::from(datetime.month()),
        datetime.day()
    )
}

#[cfg(test)]
mod tests {
    use super::utc_date;

    #[test]
    fn formats_epoch_millis_as_utc_date() {
        // 2023-11-14T22:13:20Z
        assert_eq!(utc_date(1_700_000_000_000), "2023-11-14");
        assert_eq!(utc_date(0), "1970-01-01");
    }

    #[test]
    fn single_digit_components_are_zero_padded() {
        // 2024-02-03T00:00:00Z
        assert_eq!(utc_date(1_706_918_400_000), "2024-02-03");
    }
}
