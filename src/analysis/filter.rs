use serde::{Deserialize, Serialize};

use crate::domain::{DailyRecord, Season};
use crate::error::{GenerationError, GenerationResult};

/// Selection applied to the daily series before summarising or exporting.
///
/// The year range is inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFilter {
    pub start_year: i32,
    pub end_year: i32,
    pub season: Option<Season>,
    pub month: Option<u32>,
}

impl DailyFilter {
    pub fn years(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
            season: None,
            month: None,
        }
    }

    /// Filter spanning every year present in `records`.
    pub fn covering(records: &[DailyRecord]) -> Self {
        let start_year = records.first().map(|r| r.year).unwrap_or_default();
        let end_year = records.last().map(|r| r.year).unwrap_or(start_year);
        Self::years(start_year, end_year)
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn validate(&self) -> GenerationResult<()> {
        if self.start_year > self.end_year {
            return Err(GenerationError::invalid(format!(
                "start year {} is after end year {}",
                self.start_year, self.end_year
            )));
        }
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(GenerationError::invalid(format!(
                    "month must be within 1-12, got {month}"
                )));
            }
        }
        Ok(())
    }

    pub fn matches(&self, record: &DailyRecord) -> bool {
        (self.start_year..=self.end_year).contains(&record.year)
            && self.season.map_or(true, |season| record.season == season)
            && self.month.map_or(true, |month| record.month == month)
    }

    /// Copy the matching records, preserving order.
    pub fn apply(&self, records: &[DailyRecord]) -> GenerationResult<Vec<DailyRecord>> {
        self.validate()?;
        Ok(records.iter().filter(|r| self.matches(r)).cloned().collect())
    }

    /// Download name for the filtered table.
    pub fn export_file_name(&self) -> String {
        format!("campus_data_{}_{}.csv", self.start_year, self.end_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SeasonalDailySeriesGenerator, SeriesParams};

    fn series() -> Vec<DailyRecord> {
        SeasonalDailySeriesGenerator::new(Some(12))
            .generate(&SeriesParams::default())
            .unwrap()
    }

    #[test]
    fn test_year_range_inclusive() {
        let series = series();
        let filtered = DailyFilter::years(2016, 2017).apply(&series).unwrap();
        assert_eq!(filtered.len(), 366 + 365);
        assert!(filtered.iter().all(|r| r.year == 2016 || r.year == 2017));
    }

    #[test]
    fn test_season_and_month_filters() {
        let series = series();
        let monsoon = DailyFilter::years(2014, 2023)
            .with_season(Season::Monsoon)
            .apply(&series)
            .unwrap();
        assert!(monsoon.iter().all(|r| (6..=9).contains(&r.month)));

        let march = DailyFilter::years(2014, 2014).with_month(3).apply(&series).unwrap();
        assert_eq!(march.len(), 31);

        let empty = DailyFilter::years(2014, 2023)
            .with_season(Season::Winter)
            .with_month(7)
            .apply(&series)
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let series = series();
        assert!(DailyFilter::years(2020, 2019).apply(&series).is_err());
        assert!(DailyFilter::years(2014, 2023).with_month(13).apply(&series).is_err());
        assert!(DailyFilter::years(2014, 2023).with_month(0).apply(&series).is_err());
    }

    #[test]
    fn test_covering_and_file_name() {
        let filter = DailyFilter::covering(&series());
        assert_eq!(filter, DailyFilter::years(2014, 2023));
        assert_eq!(filter.export_file_name(), "campus_data_2014_2023.csv");
    }
}
