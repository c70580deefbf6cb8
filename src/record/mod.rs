
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::point::{Hist, BUCKETS};

// label, thread, flops, bytes, read_bytes, write_bytes,
// src_file_start, src_file_end, line_start, line_end, hist
const FIELDS: usize = 11;

/// One delimited record, as written by [`Point::dump_csv`][crate::point::Point::dump_csv].
///
/// ```text
/// LABEL,THREAD,FLOPS,BYTES,READ_BYTES,WRITE_BYTES,SRC_START,SRC_END,LINE_START,LINE_END,{H0 H1 H2 H3 H4 H5 H6 H7 }
/// ```
///
/// # Examples
///
/// ```rust
/// use roofline::record::Record;
///
/// let record: Record = "loop1,3,10,500,200,300,a.c,a.c,10,20,{1 0 2 0 0 0 0 4 }\n"
///     .parse()
///     .unwrap();
///
/// assert_eq!(record.thread, 3);
/// assert_eq!(record.intensity(), Some(0.02));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub label: String,
    pub thread: u32,
    pub flops: u64,
    pub bytes: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub src_file_start: String,
    pub src_file_end: String,
    pub line_start: u32,
    pub line_end: u32,
    pub hist: [u64; BUCKETS],
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("expected 11 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid `{field}`: {source}")]
    Int {
        field: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("malformed histogram group: {0:?}")]
    Hist(String),
}

fn int<T>(field: &'static str, s: &str) -> Result<T, Error>
where
    T: FromStr<Err = ParseIntError>,
{
    s.parse().map_err(|source| Error::Int { field, source })
}

fn hist(s: &str) -> Result<[u64; BUCKETS], Error> {
    let malformed = || Error::Hist(s.to_owned());

    let inner = s
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(malformed)?;

    let mut buckets = ArrayVec::<u64, BUCKETS>::new();
    for n in inner.split_whitespace() {
        let n = n.parse().map_err(|_| malformed())?;
        buckets.try_push(n).map_err(|_| malformed())?;
    }
    buckets.into_inner().map_err(|_| malformed())
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.strip_suffix('\n').unwrap_or(line);

        let mut fields = ArrayVec::<&str, FIELDS>::new();
        for field in line.split(',') {
            if fields.try_push(field).is_err() {
                let found = line.split(',').count();
                tracing::debug!(found, "too many fields in delimited record");
                return Err(Error::FieldCount(found));
            }
        }
        let Ok(fields) = fields.into_inner() else {
            let found = line.split(',').count();
            tracing::debug!(found, "too few fields in delimited record");
            return Err(Error::FieldCount(found));
        };
        let [label, thread, flops, bytes, read_bytes, write_bytes, src_file_start, src_file_end, line_start, line_end, buckets] =
            fields;

        Ok(Self {
            label: label.to_owned(),
            thread: int("thread", thread)?,
            flops: int("flops", flops)?,
            bytes: int("bytes", bytes)?,
            read_bytes: int("read_bytes", read_bytes)?,
            write_bytes: int("write_bytes", write_bytes)?,
            src_file_start: src_file_start.to_owned(),
            src_file_end: src_file_end.to_owned(),
            line_start: int("line_start", line_start)?,
            line_end: int("line_end", line_end)?,
            hist: hist(buckets)?,
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{},{},{},{},{},{},{},{},{},{},{}",
            self.label,
            self.thread,
            self.flops,
            self.bytes,
            self.read_bytes,
            self.write_bytes,
            self.src_file_start,
            self.src_file_end,
            self.line_start,
            self.line_end,
            Hist::from(self.hist),
        )
    }
}

fn ratio(flops: u64, bytes: u64) -> Option<f64> {
    (bytes > 0).then(|| flops as f64 / bytes as f64)
}

impl Record {
    /// Arithmetic intensity in flops per byte, `None` if no byte was accessed.
    pub fn intensity(&self) -> Option<f64> {
        ratio(self.flops, self.bytes)
    }

    /// Flops per byte read.
    pub fn read_intensity(&self) -> Option<f64> {
        ratio(self.flops, self.read_bytes)
    }

    /// Flops per byte written.
    pub fn write_intensity(&self) -> Option<f64> {
        ratio(self.flops, self.write_bytes)
    }

    /// Number of accesses recorded in the histogram.
    pub fn accesses(&self) -> u64 {
        Hist::from(self.hist).count()
    }
}
