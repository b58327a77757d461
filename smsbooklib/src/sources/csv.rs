//! CSV-выгрузка входящих: заголовки `_id,address,body,date`
//! (`date`: миллисекунды от эпохи, как в хранилище SMS).

use crate::{
    error::{Result, SmsBookError},
    model::RawRecord,
    traits::{MessageSource, SenderFilter},
};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

#[derive(serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "_id")]
    id: i64,
    address: String,
    body: String,
    date: String,
}

pub struct CsvInbox {
    path: PathBuf,
}

impl CsvInbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read_records<R: BufRead>(r: R, filter: &SenderFilter) -> Result<Vec<RawRecord>> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut out = Vec::new();

        for rec in rdr.deserialize::<CsvRow>() {
            let row = rec?;
            if !filter.accepts(&row.address) {
                continue;
            }
            let timestamp = row
                .date
                .trim()
                .parse::<i64>()
                .map_err(|e| SmsBookError::Parse(format!("date of sms {}: {e}", row.id)))?;
            out.push(RawRecord {
                id: row.id,
                sender: row.address,
                body: row.body,
                timestamp,
            });
        }
        Ok(out)
    }
}

impl MessageSource for CsvInbox {
    fn query(&self, filter: &SenderFilter) -> Result<Vec<RawRecord>> {
        let f = File::open(&self.path).map_err(|e| {
            SmsBookError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        Self::read_records(BufReader::new(f), filter)
    }
}
