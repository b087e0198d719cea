use anyhow::{bail, Context, Result};
use std::fmt;

/// One band of a range table: an inclusive interval and its award.
///
/// `max: None` is the open-ended top band ("76+").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBand {
    pub min: u32,
    pub max: Option<u32>,
    pub points: f64,
}

impl RangeBand {
    pub const fn new(min: u32, max: Option<u32>, points: f64) -> Self {
        Self { min, max, points }
    }

    /// Parse a range expression and attach its points.
    ///
    /// Formats: "N-M" (inclusive both ends) or "N+" (N and above).
    pub fn parse(range: &str, points: f64) -> Result<Self> {
        let s = range.trim();
        if let Some(min) = s.strip_suffix('+') {
            let min: u32 = min
                .trim()
                .parse()
                .with_context(|| format!("Invalid range start in '{}'", s))?;
            Ok(RangeBand::new(min, None, points))
        } else if let Some((low, high)) = s.split_once('-') {
            let low: u32 = low
                .trim()
                .parse()
                .with_context(|| format!("Invalid range start in '{}'", s))?;
            let high: u32 = high
                .trim()
                .parse()
                .with_context(|| format!("Invalid range end in '{}'", s))?;
            if low > high {
                bail!("Range start exceeds end: {}", s);
            }
            Ok(RangeBand::new(low, Some(high), points))
        } else {
            bail!("Invalid range format (expected \"N-M\" or \"N+\"): {}", s)
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        if value < i64::from(self.min) {
            return false;
        }
        match self.max {
            Some(max) => value <= i64::from(max),
            None => true,
        }
    }

    pub fn overlaps(&self, other: &RangeBand) -> bool {
        let self_max = self.max.unwrap_or(u32::MAX);
        let other_max = other.max.unwrap_or(u32::MAX);
        self.min <= other_max && other.min <= self_max
    }
}

impl fmt::Display for RangeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}+", self.min),
        }
    }
}

/// Ordered list of bands, evaluated top-down; the first band containing the
/// value wins and awards are never summed across bands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeTable {
    bands: Vec<RangeBand>,
}

impl RangeTable {
    pub fn new(bands: Vec<RangeBand>) -> Self {
        Self { bands }
    }

    /// Parse `(range, points)` pairs in order.
    pub fn parse<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let bands = entries
            .into_iter()
            .map(|(range, points)| RangeBand::parse(range, points))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bands })
    }

    pub fn lookup(&self, value: i64) -> Option<&RangeBand> {
        self.bands.iter().find(|band| band.contains(value))
    }

    pub fn bands(&self) -> &[RangeBand] {
        &self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_between() {
        let band = RangeBand::parse("100-149", 2.0).unwrap();
        assert!(!band.contains(99));
        assert!(band.contains(100));
        assert!(band.contains(149));
        assert!(!band.contains(150));
        assert_eq!(band.points, 2.0);
    }

    #[test]
    fn test_parse_range_open_ended() {
        let band = RangeBand::parse("76+", 6.0).unwrap();
        assert!(!band.contains(75));
        assert!(band.contains(76));
        assert!(band.contains(10_000));
        assert_eq!(band.max, None);
    }

    #[test]
    fn test_parse_range_trims_whitespace() {
        let band = RangeBand::parse(" 0 - 5 ", 2.0).unwrap();
        assert_eq!(band, RangeBand::new(0, Some(5), 2.0));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert!(RangeBand::parse("abc", 1.0).is_err());
        assert!(RangeBand::parse("10", 1.0).is_err());
        assert!(RangeBand::parse("-5", 1.0).is_err());
        assert!(RangeBand::parse("x+", 1.0).is_err());
    }

    #[test]
    fn test_parse_range_rejects_inverted() {
        let err = RangeBand::parse("20-10", 1.0).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_negative_values_never_match() {
        let band = RangeBand::parse("0-5", 2.0).unwrap();
        assert!(!band.contains(-3));
    }

    #[test]
    fn test_display_matches_source_format() {
        assert_eq!(RangeBand::new(6, Some(10), 2.5).to_string(), "6-10");
        assert_eq!(RangeBand::new(80, None, 6.0).to_string(), "80+");
    }

    #[test]
    fn test_overlaps() {
        let a = RangeBand::new(0, Some(5), 1.0);
        let b = RangeBand::new(5, Some(10), 1.0);
        let c = RangeBand::new(6, Some(10), 1.0);
        let d = RangeBand::new(8, None, 1.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(c.overlaps(&d));
        assert!(d.overlaps(&RangeBand::new(1000, None, 1.0)));
    }

    #[test]
    fn test_table_first_match_wins() {
        let table = RangeTable::parse([("0-10", 1.0), ("5-20", 2.0)]).unwrap();
        assert_eq!(table.lookup(7).unwrap().points, 1.0);
        assert_eq!(table.lookup(15).unwrap().points, 2.0);
        assert!(table.lookup(21).is_none());
    }

    #[test]
    fn test_table_parse_propagates_errors() {
        assert!(RangeTable::parse([("0-10", 1.0), ("oops", 2.0)]).is_err());
    }
}
