use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 60 * 60).unwrap()
}

/// Tracklogs record UTC; the viewer displays JST.
pub fn utc_to_jst(time: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&time).with_timezone(&jst())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::utc_to_jst;

    #[test]
    fn converts_utc_to_jst() {
        let utc = NaiveDate::from_ymd_opt(2023, 5, 1)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        assert_eq!(
            utc_to_jst(utc).to_rfc3339(),
            "2023-05-01T10:30:00+09:00"
        );
    }
}
