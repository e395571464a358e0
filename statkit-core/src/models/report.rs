//! Reporting query types.
//!
//! Most reporting methods share the same `idSite` / `period` / `date`
//! triple plus a handful of optional filters. [`ReportQuery`] models that
//! shared shape once so each namespace method only adds what is specific
//! to it.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::params::{ParamValue, Params};
use crate::error::CoreError;
use crate::traits::ToParams;

/// Wire date format.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Period
// ============================================================================

/// Aggregation period of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One day.
    #[default]
    Day,
    /// One week.
    Week,
    /// One month.
    Month,
    /// One year.
    Year,
    /// An arbitrary range given by the date parameter.
    Range,
}

impl Period {
    /// Wire spelling of this period.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Range => "range",
        }
    }

    /// Returns all periods.
    pub fn all() -> &'static [Period] {
        &[Self::Day, Self::Week, Self::Month, Self::Year, Self::Range]
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .find(|p| p.as_str() == lower)
            .copied()
            .ok_or_else(|| CoreError::InvalidPeriod(s.to_string()))
    }
}

impl From<Period> for ParamValue {
    fn from(period: Period) -> Self {
        Self::Str(period.as_str().to_string())
    }
}

// ============================================================================
// Date Spec
// ============================================================================

/// The `date` parameter of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSpec {
    /// `today`
    Today,
    /// `yesterday`
    Yesterday,
    /// A single calendar date.
    Date(NaiveDate),
    /// `lastN`: the N most recent periods including the current one.
    Last(u32),
    /// `previousN`: the N periods before the current one.
    Previous(u32),
    /// `start,end`, inclusive.
    Range {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
}

impl DateSpec {
    /// Creates a date range, rejecting ranges that end before they start.
    pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::InvalidDate(format!(
                "range ends before it starts: {start},{end}"
            )));
        }
        Ok(Self::Range { start, end })
    }

    /// Returns true if this spec covers more than one period.
    pub fn is_multi_period(&self) -> bool {
        matches!(self, Self::Last(_) | Self::Previous(_) | Self::Range { .. })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDate(s.to_string()))
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::Yesterday => f.write_str("yesterday"),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Last(n) => write!(f, "last{n}"),
            Self::Previous(n) => write!(f, "previous{n}"),
            Self::Range { start, end } => write!(
                f,
                "{},{}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
        }
    }
}

impl FromStr for DateSpec {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();

        match lower.as_str() {
            "today" => return Ok(Self::Today),
            "yesterday" => return Ok(Self::Yesterday),
            _ => {}
        }

        if let Some(n) = lower.strip_prefix("last") {
            return n
                .parse()
                .map(Self::Last)
                .map_err(|_| CoreError::InvalidDate(s.to_string()));
        }

        if let Some(n) = lower.strip_prefix("previous") {
            return n
                .parse()
                .map(Self::Previous)
                .map_err(|_| CoreError::InvalidDate(s.to_string()));
        }

        if let Some((start, end)) = lower.split_once(',') {
            return Self::range(parse_date(start)?, parse_date(end)?);
        }

        parse_date(&lower).map(Self::Date)
    }
}

impl From<NaiveDate> for DateSpec {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateSpec> for ParamValue {
    fn from(date: DateSpec) -> Self {
        Self::Str(date.to_string())
    }
}

// ============================================================================
// Site Selector
// ============================================================================

/// Which sites a report covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteSelector {
    /// A single site.
    Single(u32),
    /// Several sites; sent as an array parameter.
    Many(Vec<u32>),
    /// Every site the credential can see.
    All,
}

impl From<u32> for SiteSelector {
    fn from(id: u32) -> Self {
        Self::Single(id)
    }
}

impl From<Vec<u32>> for SiteSelector {
    fn from(ids: Vec<u32>) -> Self {
        Self::Many(ids)
    }
}

impl From<&[u32]> for SiteSelector {
    fn from(ids: &[u32]) -> Self {
        Self::Many(ids.to_vec())
    }
}

impl FromStr for SiteSelector {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let ids = trimmed
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| CoreError::InvalidSiteSelector(s.to_string()))?;

        match ids.as_slice() {
            [] => Err(CoreError::InvalidSiteSelector(s.to_string())),
            [id] => Ok(Self::Single(*id)),
            _ => Ok(Self::Many(ids)),
        }
    }
}

impl From<SiteSelector> for ParamValue {
    fn from(selector: SiteSelector) -> Self {
        match selector {
            SiteSelector::Single(id) => Self::Int(i64::from(id)),
            SiteSelector::Many(ids) => ids.into(),
            SiteSelector::All => Self::Str("all".to_string()),
        }
    }
}

// ============================================================================
// Sort Order
// ============================================================================

/// Sort direction for `filter_sort_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

// ============================================================================
// Report Query
// ============================================================================

/// Parameters shared by reporting methods.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    /// Sites to report on. `None` lets the transport inject its default site.
    pub site: Option<SiteSelector>,
    /// Aggregation period.
    pub period: Period,
    /// Date or date range.
    pub date: DateSpec,
    /// Segment definition.
    pub segment: Option<String>,
    /// Include subtables inline.
    pub expanded: Option<bool>,
    /// Flatten hierarchical reports.
    pub flat: Option<bool>,
    /// Subtable to load.
    pub subtable: Option<u32>,
    /// Maximum rows (`-1` for all rows).
    pub limit: Option<i64>,
    /// Rows to skip.
    pub offset: Option<u32>,
    /// Row label pattern.
    pub pattern: Option<String>,
    /// Column the pattern applies to.
    pub pattern_column: Option<String>,
    /// Column to sort on and direction.
    pub sort: Option<(String, SortOrder)>,
    /// Columns to keep.
    pub show_columns: Vec<String>,
    /// Columns to drop.
    pub hide_columns: Vec<String>,
}

impl ReportQuery {
    /// Creates a query for the given period and date.
    pub fn new(period: Period, date: DateSpec) -> Self {
        Self {
            site: None,
            period,
            date,
            segment: None,
            expanded: None,
            flat: None,
            subtable: None,
            limit: None,
            offset: None,
            pattern: None,
            pattern_column: None,
            sort: None,
            show_columns: Vec::new(),
            hide_columns: Vec::new(),
        }
    }

    /// Today's daily report.
    pub fn today() -> Self {
        Self::new(Period::Day, DateSpec::Today)
    }

    /// Sets the sites to report on.
    #[must_use]
    pub fn site(mut self, site: impl Into<SiteSelector>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Sets the segment definition.
    #[must_use]
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    /// Requests subtables inline.
    #[must_use]
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    /// Requests a flattened report.
    #[must_use]
    pub fn flat(mut self, flat: bool) -> Self {
        self.flat = Some(flat);
        self
    }

    /// Loads a specific subtable.
    #[must_use]
    pub fn subtable(mut self, id: u32) -> Self {
        self.subtable = Some(id);
        self
    }

    /// Limits the number of rows.
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` rows.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Keeps rows whose label matches `pattern`.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Applies the pattern to `column` instead of the label.
    #[must_use]
    pub fn pattern_column(mut self, column: impl Into<String>) -> Self {
        self.pattern_column = Some(column.into());
        self
    }

    /// Sorts rows on `column`.
    #[must_use]
    pub fn sort_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((column.into(), order));
        self
    }

    /// Keeps only these columns.
    #[must_use]
    pub fn show_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.show_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Drops these columns.
    #[must_use]
    pub fn hide_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hide_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self::today()
    }
}

impl ToParams for ReportQuery {
    fn to_params(&self) -> Params {
        let (sort_column, sort_order) = match &self.sort {
            Some((column, order)) => (Some(column.clone()), Some(order.as_str())),
            None => (None, None),
        };

        Params::new()
            .with_opt("idSite", self.site.clone())
            .with("period", self.period)
            .with("date", self.date)
            .with_opt("segment", self.segment.clone())
            .with_opt("expanded", self.expanded)
            .with_opt("flat", self.flat)
            .with_opt("idSubtable", self.subtable)
            .with_opt("filter_limit", self.limit)
            .with_opt("filter_offset", self.offset)
            .with_opt("filter_pattern", self.pattern.clone())
            .with_opt("filter_column", self.pattern_column.clone())
            .with_opt("filter_sort_column", sort_column)
            .with_opt("filter_sort_order", sort_order)
            .with_opt(
                "showColumns",
                (!self.show_columns.is_empty()).then(|| self.show_columns.clone()),
            )
            .with_opt(
                "hideColumns",
                (!self.hide_columns.is_empty()).then(|| self.hide_columns.clone()),
            )
    }
}

// ============================================================================
// Tests
// ============================================================================
