use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::schema::TrackPoint;

#[derive(Debug, thiserror::Error)]
pub enum IgcError {
    #[error("no HFDTE header found in the tracklog")]
    MissingDateHeader,
    #[error("malformed HFDTE header: {0:?}")]
    InvalidDateHeader(String),
    #[error("malformed B record at line {line}: {reason}")]
    InvalidFix { line: usize, reason: &'static str },
    #[error("date overflow while handling midnight rollover")]
    DateOverflow,
}

/// A parsed IGC tracklog: the header date, the pilot declared in the
/// header (if any), and the valid GPS fixes in recording order.
#[derive(Clone, PartialEq, Debug)]
pub struct IgcFile {
    pub pilot: Option<String>,
    pub date: NaiveDate,
    pub fixes: Vec<TrackPoint>,
}

impl IgcFile {
    pub fn parse(text: &str) -> Result<Self, IgcError> {
        let mut pilot = None;
        let mut start_date = None;
        let mut current_date = None;
        let mut last_time: Option<NaiveTime> = None;
        let mut fixes = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if let Some(rest) = line.strip_prefix("HFDTE") {
                let date = parse_date_header(rest)
                    .ok_or_else(|| IgcError::InvalidDateHeader(line.to_owned()))?;
                start_date.get_or_insert(date);
                current_date = Some(date);
            } else if let Some(rest) = line.strip_prefix("HFPLT") {
                if let Some((_, name)) = rest.split_once(':') {
                    let name = name.trim();
                    if !name.is_empty() {
                        pilot = Some(name.to_owned());
                    }
                }
            } else if line.starts_with('B') {
                let mut date = current_date.ok_or(IgcError::MissingDateHeader)?;
                let Some(fix) = parse_b_record(line, index + 1)? else {
                    continue;
                };
                // Fix times are UTC time-of-day only; a decrease means the
                // recording crossed midnight.
                if last_time.is_some_and(|last| fix.time < last) {
                    date = date.succ_opt().ok_or(IgcError::DateOverflow)?;
                    current_date = Some(date);
                }
                last_time = Some(fix.time);
                fixes.push(TrackPoint {
                    time: NaiveDateTime::new(date, fix.time),
                    latitude: fix.latitude,
                    longitude: fix.longitude,
                    altitude: fix.altitude,
                });
            }
        }
        Ok(Self {
            pilot,
            date: start_date.ok_or(IgcError::MissingDateHeader)?,
            fixes,
        })
    }
}

struct RawFix {
    time: NaiveTime,
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

// Both `HFDTEDDMMYY` and the newer `HFDTEDATE:DDMMYY,NN` form are in the wild.
fn parse_date_header(rest: &str) -> Option<NaiveDate> {
    let digits = rest.strip_prefix("DATE:").unwrap_or(rest).get(..6)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day = digits[..2].parse().ok()?;
    let month = digits[2..4].parse().ok()?;
    let year = 2000 + digits[4..6].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// B HHMMSS DDMMmmm{N|S} DDDMMmmm{E|W} {A|V} PPPPP GGGGG
fn parse_b_record(line: &str, line_number: usize) -> Result<Option<RawFix>, IgcError> {
    let fix_error = |reason| IgcError::InvalidFix {
        line: line_number,
        reason,
    };
    if !line.is_ascii() {
        return Err(fix_error("non-ASCII byte in record"));
    }
    if line.len() < 35 {
        return Err(fix_error("record too short"));
    }
    match &line[24..25] {
        "A" => {}
        "V" => return Ok(None),
        _ => return Err(fix_error("unknown fix validity")),
    }
    let hour = line[1..3].parse().map_err(|_| fix_error("bad hour"))?;
    let minute = line[3..5].parse().map_err(|_| fix_error("bad minute"))?;
    let second = line[5..7].parse().map_err(|_| fix_error("bad second"))?;
    let time =
        NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| fix_error("time out of range"))?;
    let latitude =
        parse_angle(&line[7..14], line.as_bytes()[14] as char, 2).ok_or_else(|| fix_error("bad latitude"))?;
    let longitude = parse_angle(&line[15..23], line.as_bytes()[23] as char, 3)
        .ok_or_else(|| fix_error("bad longitude"))?;
    let pressure: f64 = line[25..30]
        .parse()
        .map_err(|_| fix_error("bad pressure altitude"))?;
    let gps: f64 = line[30..35]
        .parse()
        .map_err(|_| fix_error("bad GPS altitude"))?;
    // Loggers without a barometer record 00000 in the GPS field's
    // counterpart and vice versa; prefer GPS when it is present.
    let altitude = if gps != 0.0 { gps } else { pressure };
    Ok(Some(RawFix {
        time,
        latitude,
        longitude,
        altitude,
    }))
}

// Degrees followed by thousandths of minutes, e.g. 3531234 = 35 deg 31.234 min.
fn parse_angle(text: &str, hemisphere: char, degree_digits: usize) -> Option<f64> {
    let degrees: f64 = text.get(..degree_digits)?.parse().ok()?;
    let thousandths: f64 = text.get(degree_digits..)?.parse().ok()?;
    let value = degrees + thousandths / 1000.0 / 60.0;
    match hemisphere {
        'N' | 'E' => Some(value),
        'S' | 'W' => Some(-value),
        _ => None,
    }
}
