//! Maps the dashboard's selected mode onto generator calls.
//!
//! Nothing here knows about HTTP or rendering; the API layer picks a
//! [`ModeRequest`] and serialises the resulting [`DashboardView`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::analysis::{DailyFilter, HistoricalSummary, HistoricalTrends};
use crate::domain::{BuildingCatalog, DailyRecord, HourlyRecord, SensorSnapshot};
use crate::error::GenerationResult;
use crate::forecast::{PredictionParams, PredictionReport, SolarPredictor};
use crate::simulation::{
    component_seed, simulate_live, HourlyProfileGenerator, InstantaneousSensorSampler,
    LiveConditions, LiveParams, SeriesParams, Session, PREDICTION_STREAM, SENSOR_STREAM,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    Historical,
    Predictions,
    LiveSimulation,
    CampusOperations,
}

/// A mode together with the parameters its page exposes.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeRequest {
    /// `None` selects every year in the series
    Historical(Option<DailyFilter>),
    Predictions(PredictionParams),
    LiveSimulation(LiveParams),
    CampusOperations,
}

impl ModeRequest {
    pub fn mode(&self) -> Mode {
        match self {
            ModeRequest::Historical(_) => Mode::Historical,
            ModeRequest::Predictions(_) => Mode::Predictions,
            ModeRequest::LiveSimulation(_) => Mode::LiveSimulation,
            ModeRequest::CampusOperations => Mode::CampusOperations,
        }
    }
}

impl From<Mode> for ModeRequest {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Historical => ModeRequest::Historical(None),
            Mode::Predictions => ModeRequest::Predictions(PredictionParams::default()),
            Mode::LiveSimulation => ModeRequest::LiveSimulation(LiveParams::default()),
            Mode::CampusOperations => ModeRequest::CampusOperations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalView {
    pub filter: DailyFilter,
    pub summary: HistoricalSummary,
    pub trends: HistoricalTrends,
    pub records: Vec<DailyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampusView {
    pub hourly: Vec<HourlyRecord>,
    pub sensors: SensorSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "view", rename_all = "snake_case")]
pub enum DashboardView {
    Historical(HistoricalView),
    Predictions(PredictionReport),
    LiveSimulation(LiveConditions),
    CampusOperations(CampusView),
}

impl DashboardView {
    pub fn mode(&self) -> Mode {
        match self {
            DashboardView::Historical(_) => Mode::Historical,
            DashboardView::Predictions(_) => Mode::Predictions,
            DashboardView::LiveSimulation(_) => Mode::LiveSimulation,
            DashboardView::CampusOperations(_) => Mode::CampusOperations,
        }
    }
}

/// Generation settings shared by every session.
#[derive(Debug, Clone)]
pub struct Dashboard {
    series: SeriesParams,
    catalog: BuildingCatalog,
    solar_capacity_kw: f64,
}

impl Dashboard {
    pub fn new(
        series: SeriesParams,
        catalog: BuildingCatalog,
        solar_capacity_kw: f64,
    ) -> GenerationResult<Self> {
        series.end_date()?;
        // surfaces a bad capacity at startup rather than on the first request
        HourlyProfileGenerator::new(catalog.clone(), solar_capacity_kw, None)?;
        Ok(Self {
            series,
            catalog,
            solar_capacity_kw,
        })
    }

    pub fn series_params(&self) -> &SeriesParams {
        &self.series
    }

    pub fn catalog(&self) -> &BuildingCatalog {
        &self.catalog
    }

    pub fn history(&self, session: &Session) -> GenerationResult<std::sync::Arc<[DailyRecord]>> {
        session.daily(&self.series)
    }

    pub fn historical(
        &self,
        session: &Session,
        filter: Option<DailyFilter>,
    ) -> GenerationResult<HistoricalView> {
        let history = self.history(session)?;
        let filter = filter.unwrap_or_else(|| DailyFilter::covering(&history));
        let records = filter.apply(&history)?;
        let summary = HistoricalSummary::compute(&records, &history)?;
        let trends = HistoricalTrends::compute(&records);
        Ok(HistoricalView {
            filter,
            summary,
            trends,
            records,
        })
    }

    pub fn predictions(
        &self,
        session: &Session,
        now: NaiveDateTime,
        params: PredictionParams,
    ) -> GenerationResult<PredictionReport> {
        let history = self.history(session)?;
        SolarPredictor::new(component_seed(session.seed(), PREDICTION_STREAM)).predict(
            &history,
            now.date(),
            params,
        )
    }

    pub fn live(
        &self,
        session: &Session,
        now: NaiveDateTime,
        params: LiveParams,
    ) -> GenerationResult<LiveConditions> {
        let history = self.history(session)?;
        simulate_live(&history, now, params)
    }

    pub fn hourly(&self, session: &Session) -> GenerationResult<std::sync::Arc<[HourlyRecord]>> {
        session.hourly(|seed| {
            HourlyProfileGenerator::new(self.catalog.clone(), self.solar_capacity_kw, seed)
        })
    }

    pub fn sensors(&self, session: &Session, now: NaiveDateTime) -> SensorSnapshot {
        let seed = component_seed(session.seed(), SENSOR_STREAM);
        InstantaneousSensorSampler::new(self.solar_capacity_kw, seed).sample(now)
    }

    pub fn campus(&self, session: &Session, now: NaiveDateTime) -> GenerationResult<CampusView> {
        Ok(CampusView {
            hourly: self.hourly(session)?.to_vec(),
            sensors: self.sensors(session, now),
        })
    }

    /// Produce the view for `request`.
    pub fn render(
        &self,
        session: &Session,
        request: ModeRequest,
        now: NaiveDateTime,
    ) -> GenerationResult<DashboardView> {
        debug!(session = %session.id(), mode = %request.mode(), "rendering dashboard");
        let view = match request {
            ModeRequest::Historical(filter) => {
                DashboardView::Historical(self.historical(session, filter)?)
            }
            ModeRequest::Predictions(params) => {
                DashboardView::Predictions(self.predictions(session, now, params)?)
            }
            ModeRequest::LiveSimulation(params) => {
                DashboardView::LiveSimulation(self.live(session, now, params)?)
            }
            ModeRequest::CampusOperations => {
                DashboardView::CampusOperations(self.campus(session, now)?)
            }
        };
        Ok(view)
    }
}
