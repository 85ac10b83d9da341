//! Shared fixtures for publisher and driver tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use deid_model::{
    CatalogueSource, HashingConfig, PipelineConfig, StorageConfig, TableDescriptor,
    TableLocation, Tier, TierContainers,
};
use polars::prelude::*;

pub const SALT: &str = "pepper";

pub fn config() -> PipelineConfig {
    PipelineConfig::new(
        StorageConfig::new("acct", "acct.blob.core.windows.net", TierContainers::new("bronze", "silver", "gold")),
        HashingConfig::new("_hash", SALT),
        CatalogueSource::Url("http://catalogue.local/tables".to_string()),
    )
}

pub fn location(config: &PipelineConfig, tier: Tier, table_name: &str) -> TableLocation {
    config.storage.location(tier, table_name)
}

pub fn millis(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

pub fn datetime_column(name: &str, values: &[Option<i64>]) -> Column {
    Series::new(name.into(), values)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap()
        .into()
}

pub fn physical_millis(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    let physical = df.column(name).unwrap().cast(&DataType::Int64).unwrap();
    physical.i64().unwrap().into_iter().collect()
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Raw visits table: `{client_id, event_time, dob, notes}`.
pub fn raw_visits() -> DataFrame {
    DataFrame::new(vec![
        Series::new("client_id".into(), &[Some("C-001"), Some("C-002")]).into(),
        datetime_column(
            "event_time",
            &[
                Some(millis(2023, 5, 17, 14, 32, 9)),
                Some(millis(2023, 5, 18, 9, 5, 0)),
            ],
        ),
        datetime_column(
            "dob",
            &[
                Some(millis(1984, 11, 23, 0, 0, 0)),
                Some(millis(1990, 2, 14, 0, 0, 0)),
            ],
        ),
        Series::new("notes".into(), vec!["prefers mornings", "called twice"]).into(),
    ])
    .unwrap()
}

/// Descriptor documenting all four visit columns.
pub fn visits_descriptor() -> TableDescriptor {
    TableDescriptor::new()
        .with_client_id_columns(["client_id"])
        .with_datetime_columns(["event_time"])
        .with_date_of_birth_columns(["dob"])
        .with_free_text_columns(["notes"])
        .with_description("client_id", "Client identifier")
        .with_description("event_time", "Visit start")
        .with_description("dob", "Date of birth")
        .with_description("notes", "Clinician notes")
}
