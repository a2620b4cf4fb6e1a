//! City→timezone resolution seam for overseas births.
//!
//! Proper geocoding is an external concern; the engine needs only a fixed
//! UTC offset per city. The bundled table covers a handful of common
//! cities with their standard (non-DST) offsets.

/// City name→fixed UTC offset (minutes) lookup.
pub trait CityResolver: Send + Sync {
    /// Offset from UTC in minutes, or `None` for an unknown city.
    fn utc_offset_minutes(&self, city: &str) -> Option<i64>;
}

/// Small builtin table of standard offsets, matched case-insensitively.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCityTable;

const CITY_OFFSETS: [(&str, i64); 10] = [
    ("seoul", 9 * 60),
    ("tokyo", 9 * 60),
    ("beijing", 8 * 60),
    ("singapore", 8 * 60),
    ("london", 0),
    ("paris", 60),
    ("berlin", 60),
    ("new york", -5 * 60),
    ("los angeles", -8 * 60),
    ("sydney", 10 * 60),
];

impl CityResolver for StaticCityTable {
    fn utc_offset_minutes(&self, city: &str) -> Option<i64> {
        let needle = city.trim().to_ascii_lowercase();
        CITY_OFFSETS
            .iter()
            .find(|(name, _)| *name == needle)
            .map(|&(_, offset)| offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let table = StaticCityTable;
        assert_eq!(table.utc_offset_minutes("London"), Some(0));
        assert_eq!(table.utc_offset_minutes("  NEW YORK "), Some(-300));
    }

    #[test]
    fn unknown_city_is_none() {
        assert_eq!(StaticCityTable.utc_offset_minutes("atlantis"), None);
    }
}
