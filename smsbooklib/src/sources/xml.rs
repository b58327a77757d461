//! XML в духе «SMS Backup & Restore»:
//! `<smses count="N"><sms _id="1" address="..." body="..." date="..." /></smses>`

use crate::{
    error::{Result, SmsBookError},
    model::RawRecord,
    traits::{MessageSource, SenderFilter},
};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

pub struct SmsBackupXml {
    path: PathBuf,
}

impl SmsBackupXml {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read_records<R: BufRead>(r: R, filter: &SenderFilter) -> Result<Vec<RawRecord>> {
        let mut reader = Reader::from_reader(r);
        reader.trim_text(true);

        let mut out = Vec::new();
        let mut buf = Vec::new();
        // порядковый номер: запасной идентификатор, если в бэкапе нет `_id`
        let mut ordinal: i64 = 0;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sms" => {
                    ordinal += 1;
                    let rec = parse_sms(&e, ordinal)?;
                    if filter.accepts(&rec.sender) {
                        out.push(rec);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml(e)),
                _ => {}
            }
            buf.clear();
        }
        Ok(out)
    }
}

impl MessageSource for SmsBackupXml {
    fn query(&self, filter: &SenderFilter) -> Result<Vec<RawRecord>> {
        let f = File::open(&self.path).map_err(|e| {
            SmsBookError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        Self::read_records(BufReader::new(f), filter)
    }
}

fn parse_sms(e: &BytesStart<'_>, ordinal: i64) -> Result<RawRecord> {
    let mut id: Option<i64> = None;
    let mut sender = String::new();
    let mut body = String::new();
    let mut date: Option<i64> = None;

    for a in e.attributes() {
        let a = a.map_err(xml)?;
        let value = a.unescape_value().map_err(xml)?;
        match a.key.as_ref() {
            b"_id" => {
                id = Some(value.trim().parse().map_err(|err| {
                    SmsBookError::Parse(format!("sms _id {value}: {err}"))
                })?)
            }
            b"address" => sender = value.into_owned(),
            b"body" => body = value.into_owned(),
            b"date" => {
                date = Some(value.trim().parse().map_err(|err| {
                    SmsBookError::Parse(format!("sms date {value}: {err}"))
                })?)
            }
            _ => {}
        }
    }

    let timestamp = date.ok_or_else(|| SmsBookError::Parse(format!("sms #{ordinal} has no date")))?;
    Ok(RawRecord {
        id: id.unwrap_or(ordinal),
        sender,
        body,
        timestamp,
    })
}

fn xml<E: std::fmt::Display>(e: E) -> SmsBookError {
    SmsBookError::Xml(e.to_string())
}
