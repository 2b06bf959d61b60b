use crate::core::{Filters, Pipeline, StatsReport, TripTable};
use crate::utils::error::Result;
use crate::utils::monitor::SectionTimer;

/// The filtered table of one session iteration and its statistics.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub filters: Filters,
    pub table: TripTable,
    pub report: StatsReport,
}

pub struct StatsEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> StatsEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self, filters: &Filters) -> Result<Analysis> {
        let timer = SectionTimer::start("analysis");
        tracing::info!("📂 Loading trip data for {}", filters);

        let table = self.pipeline.extract(filters.city).await?;
        tracing::info!("Loaded {} trips", table.len());

        let table = self.pipeline.filter(table, filters).await?;
        tracing::info!("{} trips match the selected filters", table.len());

        let report = self.pipeline.summarize(&table).await?;
        tracing::debug!("Analysis finished in {:?}", timer.elapsed());

        Ok(Analysis {
            filters: *filters,
            table,
            report,
        })
    }
}
