use crate::domain::model::{City, Filters, OutputFormat, TripTable};
use crate::domain::report::StatsReport;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn city_file(&self, city: City) -> &str;
    fn page_size(&self) -> usize;
    fn output_format(&self) -> OutputFormat;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, city: City) -> Result<TripTable>;
    async fn filter(&self, table: TripTable, filters: &Filters) -> Result<TripTable>;
    async fn summarize(&self, table: &TripTable) -> Result<StatsReport>;
}
