//! Birth-input validation and local-mean-time normalization.
//!
//! All pillar arithmetic runs on local mean time of the reference meridian:
//! civil time is first expressed at UTC+9, then a fixed 30-minute
//! correction is subtracted.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::city::CityResolver;
use crate::error::CalendarError;
use crate::lunar::LunarConverter;

/// Reference meridian offset from UTC, in minutes (UTC+9).
pub const REFERENCE_MERIDIAN_OFFSET_MIN: i64 = 9 * 60;

/// Fixed correction from reference-meridian civil time to local mean time.
pub const LMT_CORRECTION_MIN: i64 = 30;

/// Placeholder civil time used when the birth time is unknown.
const UNKNOWN_TIME_PLACEHOLDER: (u32, u32) = (12, 30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    Solar,
    Lunar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

/// Raw birth parameters of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthInput {
    pub calendar: CalendarType,
    /// Civil date, 8 numeric characters (YYYYMMDD).
    pub date: String,
    /// Civil time, 4 numeric characters (HHMM); ignored when
    /// `time_unknown` is set.
    pub time: String,
    pub gender: Gender,
    pub leap_month: bool,
    pub time_unknown: bool,
    pub overseas: bool,
    pub city: String,
}

/// Canonical normalized birth instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedBirth {
    /// Local mean time used for all pillar arithmetic.
    pub lmt: NaiveDateTime,
    /// Solar civil date (post lunar conversion, pre timezone shift).
    pub solar_date: NaiveDate,
    /// Civil hour/minute actually used (placeholder when time unknown).
    pub hour: u32,
    pub minute: u32,
    pub time_known: bool,
}

/// Shift a reference-meridian civil instant to local mean time.
pub fn to_local_mean_time(reference_civil: NaiveDateTime) -> NaiveDateTime {
    reference_civil - Duration::minutes(LMT_CORRECTION_MIN)
}

fn parse_fixed_digits<'a>(s: &'a str, len: usize, what: &str) -> Result<&'a str, CalendarError> {
    if s.len() != len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalendarError::InvalidInput(format!(
            "{what} must be {len} numeric characters, got {s:?}"
        )));
    }
    Ok(s)
}

fn parse_date(date: &str) -> Result<(i32, u32, u32), CalendarError> {
    let s = parse_fixed_digits(date, 8, "date")?;
    let year: i32 = s[0..4]
        .parse()
        .map_err(|_| CalendarError::InvalidInput("unparseable year".into()))?;
    let month: u32 = s[4..6]
        .parse()
        .map_err(|_| CalendarError::InvalidInput("unparseable month".into()))?;
    let day: u32 = s[6..8]
        .parse()
        .map_err(|_| CalendarError::InvalidInput("unparseable day".into()))?;
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidInput(format!(
            "month out of range: {month}"
        )));
    }
    if !(1..=31).contains(&day) {
        return Err(CalendarError::InvalidInput(format!(
            "day out of range: {day}"
        )));
    }
    Ok((year, month, day))
}

fn parse_time(input: &BirthInput) -> Result<(u32, u32), CalendarError> {
    if input.time_unknown {
        return Ok(UNKNOWN_TIME_PLACEHOLDER);
    }
    let s = parse_fixed_digits(&input.time, 4, "time")?;
    let hour: u32 = s[0..2]
        .parse()
        .map_err(|_| CalendarError::InvalidInput("unparseable hour".into()))?;
    let minute: u32 = s[2..4]
        .parse()
        .map_err(|_| CalendarError::InvalidInput("unparseable minute".into()))?;
    if hour > 23 {
        return Err(CalendarError::InvalidInput(format!(
            "hour out of range: {hour}"
        )));
    }
    if minute > 59 {
        return Err(CalendarError::InvalidInput(format!(
            "minute out of range: {minute}"
        )));
    }
    Ok((hour, minute))
}

/// Validate birth parameters and produce the canonical local-mean-time
/// instant.
///
/// Lunar dates go through `lunar` first; overseas births are shifted from
/// the city's fixed UTC offset to the reference meridian before the LMT
/// correction.
pub fn normalize_birth(
    input: &BirthInput,
    lunar: &dyn LunarConverter,
    cities: &dyn CityResolver,
) -> Result<NormalizedBirth, CalendarError> {
    let (year, month, day) = parse_date(&input.date)?;
    let (hour, minute) = parse_time(input)?;

    let solar_date = match input.calendar {
        CalendarType::Lunar => lunar
            .to_solar(year, month, day, input.leap_month)
            .ok_or(CalendarError::ConversionUnavailable)?,
        CalendarType::Solar => NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            CalendarError::InvalidInput(format!("no such calendar day: {year:04}-{month:02}-{day:02}"))
        })?,
    };

    let civil = solar_date
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| CalendarError::InvalidInput("time of day out of range".into()))?;

    let reference_civil = if input.overseas {
        if input.city.trim().is_empty() {
            return Err(CalendarError::InvalidInput(
                "overseas birth requires a city name".into(),
            ));
        }
        let offset_min = cities
            .utc_offset_minutes(&input.city)
            .ok_or_else(|| CalendarError::UnknownCity(input.city.clone()))?;
        // local civil -> UTC -> reference meridian.
        civil - Duration::minutes(offset_min) + Duration::minutes(REFERENCE_MERIDIAN_OFFSET_MIN)
    } else {
        civil
    };

    Ok(NormalizedBirth {
        lmt: to_local_mean_time(reference_civil),
        solar_date,
        hour,
        minute,
        time_known: !input.time_unknown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::StaticCityTable;
    use crate::lunar::{LunarTable, NoLunarSource};

    fn input(date: &str, time: &str) -> BirthInput {
        BirthInput {
            calendar: CalendarType::Solar,
            date: date.into(),
            time: time.into(),
            gender: Gender::Male,
            leap_month: false,
            time_unknown: false,
            overseas: false,
            city: String::new(),
        }
    }

    fn normalize(input: &BirthInput) -> Result<NormalizedBirth, CalendarError> {
        normalize_birth(input, &NoLunarSource, &StaticCityTable::default())
    }

    #[test]
    fn lmt_shifts_back_thirty_minutes() {
        let birth = normalize(&input("19900615", "1230")).unwrap();
        assert_eq!(
            birth.lmt,
            NaiveDate::from_ymd_opt(1990, 6, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
        assert!(birth.time_known);
    }

    #[test]
    fn early_civil_time_crosses_midnight_backward() {
        let birth = normalize(&input("19900615", "0010")).unwrap();
        assert_eq!(
            birth.lmt,
            NaiveDate::from_ymd_opt(1990, 6, 14)
                .unwrap()
                .and_hms_opt(23, 40, 0)
                .unwrap()
        );

        let birth = normalize(&input("19900615", "0005")).unwrap();
        assert_eq!(
            birth.lmt,
            NaiveDate::from_ymd_opt(1990, 6, 14)
                .unwrap()
                .and_hms_opt(23, 35, 0)
                .unwrap()
        );
    }

    #[test]
    fn malformed_date_is_invalid_input() {
        for bad in ["1990615", "19906154", "1990-6-15", "199006xx"] {
            let err = normalize(&input(bad, "1230")).unwrap_err();
            assert!(matches!(err, CalendarError::InvalidInput(_)), "{bad}");
        }
    }

    #[test]
    fn out_of_range_fields_are_invalid_input() {
        assert!(normalize(&input("19901315", "1230")).is_err()); // month 13
        assert!(normalize(&input("19900632", "1230")).is_err()); // day 32
        assert!(normalize(&input("19900615", "2460")).is_err()); // hour 24
        assert!(normalize(&input("19900615", "1260")).is_err()); // minute 60
        assert!(normalize(&input("19900231", "1200")).is_err()); // feb 31
    }

    #[test]
    fn unknown_time_uses_noon_placeholder() {
        let mut req = input("19900615", "9999");
        req.time_unknown = true;
        let birth = normalize(&req).unwrap();
        assert_eq!((birth.hour, birth.minute), (12, 30));
        assert!(!birth.time_known);
    }

    #[test]
    fn lunar_without_source_is_conversion_unavailable() {
        let mut req = input("19900501", "1230");
        req.calendar = CalendarType::Lunar;
        assert_eq!(
            normalize(&req).unwrap_err(),
            CalendarError::ConversionUnavailable
        );
    }

    #[test]
    fn lunar_table_supplies_solar_date() {
        let mut req = input("19900501", "1230");
        req.calendar = CalendarType::Lunar;
        let table = LunarTable::from_entries([(
            (1990, 5, 1, false),
            NaiveDate::from_ymd_opt(1990, 5, 24).unwrap(),
        )]);
        let birth = normalize_birth(&req, &table, &StaticCityTable::default()).unwrap();
        assert_eq!(birth.solar_date, NaiveDate::from_ymd_opt(1990, 5, 24).unwrap());
    }

    #[test]
    fn overseas_requires_resolvable_city() {
        let mut req = input("19900615", "1230");
        req.overseas = true;
        assert!(matches!(
            normalize(&req).unwrap_err(),
            CalendarError::InvalidInput(_)
        ));
        req.city = "atlantis".into();
        assert!(matches!(
            normalize(&req).unwrap_err(),
            CalendarError::UnknownCity(_)
        ));
    }

    #[test]
    fn overseas_shifts_to_reference_meridian() {
        // London (UTC+0) 03:00 -> reference meridian 12:00 -> LMT 11:30.
        let mut req = input("19900615", "0300");
        req.overseas = true;
        req.city = "london".into();
        let birth = normalize(&req).unwrap();
        assert_eq!(
            birth.lmt,
            NaiveDate::from_ymd_opt(1990, 6, 15)
                .unwrap()
                .and_hms_opt(11, 30, 0)
                .unwrap()
        );
    }
}
