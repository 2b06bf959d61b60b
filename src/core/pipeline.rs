use crate::core::{filter, loader, stats};
use crate::core::{City, ConfigProvider, Filters, Pipeline, StatsReport, Storage, TripTable};
use crate::utils::error::Result;

pub struct TripPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> TripPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TripPipeline<S, C> {
    async fn extract(&self, city: City) -> Result<TripTable> {
        let file = self.config.city_file(city);
        tracing::debug!("Reading {} trips from {}", city, file);

        let data = self.storage.read_file(file).await?;
        tracing::debug!("Read {} bytes", data.len());

        loader::parse_trips(&data)
    }

    async fn filter(&self, table: TripTable, filters: &Filters) -> Result<TripTable> {
        Ok(filter::apply(table, filters))
    }

    async fn summarize(&self, table: &TripTable) -> Result<StatsReport> {
        Ok(stats::summarize(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DayFilter, MonthFilter, OutputFormat};
    use crate::utils::error::BikeshareError;
    use chrono::Month;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| BikeshareError::DataFileNotFound {
                    path: path.to_string(),
                })
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn data_dir(&self) -> &str {
            "."
        }

        fn city_file(&self, city: City) -> &str {
            city.default_file()
        }

        fn page_size(&self) -> usize {
            5
        }

        fn output_format(&self) -> OutputFormat {
            OutputFormat::Text
        }
    }

    const CHICAGO: &str = "\
,Start Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-01-02 08:00:00,100,Clark St,State St,Subscriber,Male,1980.0
1,2017-03-02 09:00:00,200,Clark St,State St,Customer,Female,1990.0
";

    #[tokio::test]
    async fn test_extract_reads_city_file() {
        let storage = MockStorage::new();
        storage.put_file("chicago.csv", CHICAGO).await;
        let pipeline = TripPipeline::new(storage, TestConfig);

        let table = pipeline.extract(City::Chicago).await.unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.columns.gender);
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let pipeline = TripPipeline::new(MockStorage::new(), TestConfig);

        let err = pipeline.extract(City::Washington).await.unwrap_err();
        match err {
            BikeshareError::DataFileNotFound { path } => assert_eq!(path, "washington.csv"),
            other => panic!("expected DataFileNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_filter_then_summarize() {
        let storage = MockStorage::new();
        storage.put_file("chicago.csv", CHICAGO).await;
        let pipeline = TripPipeline::new(storage, TestConfig);

        let table = pipeline.extract(City::Chicago).await.unwrap();
        let filters = Filters::new(City::Chicago, MonthFilter::Only(Month::March), DayFilter::All);
        let table = pipeline.filter(table, &filters).await.unwrap();
        let report = pipeline.summarize(&table).await.unwrap();

        assert_eq!(report.trips, 1);
        assert_eq!(report.duration.value.total_seconds, 200.0);
        assert_eq!(report.time.value.unwrap().month.value, 3);
    }
}
