#[cfg(test)]
mod test;

use std::io::{Result, Write};

use arrayvec::ArrayString;

use crate::record::Record;
use crate::report::Opts;

mod hist;

pub use hist::*;

/// Capacity of the ROI label in bytes.
pub const LABEL_MAX: usize = 128;
/// Capacity of a source file path in bytes.
pub const SRC_FILE_MAX: usize = 512;

/// Counters of one region of interest on one thread.
///
/// A point is filled in by instrumentation callbacks: the region boundaries
/// set the label, source locations and timestamps, every traced floating-point
/// operation and memory access bumps the counters. Updates are plain integer
/// ops on inline storage, there is no locking and no heap allocation, so a
/// point must be owned by a single thread.
///
/// # Examples
///
/// ```rust
/// use roofline::point::Point;
/// use roofline::report::Opts;
///
/// let mut point = Point::new();
/// point.set_label("loop1");
/// point.update_fp_count(10);
/// point.update_bytes(8);
///
/// let mut out: Vec<u8> = vec![];
/// point.dump_csv(&mut out, "loop1", 0, &Opts::default()).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "loop1,0,10,8,0,0,,,0,0,{0 0 0 1 0 0 0 0 }\n",
/// );
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    label: ArrayString<LABEL_MAX>,
    src_file_start: ArrayString<SRC_FILE_MAX>,
    src_file_end: ArrayString<SRC_FILE_MAX>,
    line_start: u32,
    line_end: u32,

    start: f64,
    end: f64,

    flops: u64,
    bytes: u64,
    read_bytes: u64,
    write_bytes: u64,
    hist: Hist,
}

// Replaces the content of `dst`, cutting `src` at the last char boundary
// that fits into the capacity.
fn assign<const N: usize>(dst: &mut ArrayString<N>, src: &str) {
    let mut len = src.len().min(N);
    while !src.is_char_boundary(len) {
        len -= 1;
    }
    dst.clear();
    dst.push_str(&src[..len]);
}

impl Point {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set_label(&mut self, label: &str) {
        assign(&mut self.label, label);
    }

    #[inline]
    pub fn set_line_start(&mut self, line: u32) {
        self.line_start = line;
    }

    #[inline]
    pub fn set_line_end(&mut self, line: u32) {
        self.line_end = line;
    }

    #[inline]
    pub fn set_src_file_start(&mut self, path: &str) {
        assign(&mut self.src_file_start, path);
    }

    #[inline]
    pub fn set_src_file_end(&mut self, path: &str) {
        assign(&mut self.src_file_end, path);
    }

    #[inline]
    pub fn set_start(&mut self, time: f64) {
        self.start = time;
    }

    #[inline]
    pub fn set_end(&mut self, time: f64) {
        self.end = time;
    }

    /// Adds executed floating-point operations.
    ///
    /// The count is accumulated as unsigned, a negative `n` wraps the counter.
    #[inline]
    pub fn update_fp_count(&mut self, n: i32) {
        self.flops = self.flops.wrapping_add(n as u64);
    }

    /// Adds bytes read, without touching the total or the histogram.
    #[inline]
    pub fn update_read_bytes(&mut self, n: u64) {
        self.read_bytes = self.read_bytes.wrapping_add(n);
    }

    /// Adds bytes written, without touching the total or the histogram.
    #[inline]
    pub fn update_write_bytes(&mut self, n: u64) {
        self.write_bytes = self.write_bytes.wrapping_add(n);
    }

    /// Records one memory access of `n` bytes: adds to the total and bumps
    /// the access-size [histogram][Hist].
    ///
    /// This is independent of [`update_read_bytes`][Self::update_read_bytes]
    /// and [`update_write_bytes`][Self::update_write_bytes], calling both for
    /// the same access counts it in the total and in one direction.
    #[inline]
    pub fn update_bytes(&mut self, n: u64) {
        self.bytes = self.bytes.wrapping_add(n);
        self.hist.record(n);
    }

    pub fn get_label(&self) -> &str {
        &self.label
    }

    pub fn src_file_start(&self) -> &str {
        &self.src_file_start
    }

    pub fn src_file_end(&self) -> &str {
        &self.src_file_end
    }

    pub fn line_start(&self) -> u32 {
        self.line_start
    }

    pub fn line_end(&self) -> u32 {
        self.line_end
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn elapsed(&self) -> f64 {
        self.end - self.start
    }

    pub fn flops(&self) -> u64 {
        self.flops
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn read_bytes(&self) -> u64 {
        self.read_bytes
    }

    pub fn write_bytes(&self) -> u64 {
        self.write_bytes
    }

    pub fn hist(&self) -> &Hist {
        &self.hist
    }

    /// Prepares the point for the next activation of its region.
    ///
    /// Timestamps, label, source locations, flops and the total byte count
    /// are cleared. Directional byte counts and the histogram keep
    /// accumulating across activations.
    pub fn reset(&mut self) {
        self.start = 0.0;
        self.end = 0.0;
        self.label.clear();
        self.src_file_start.clear();
        self.src_file_end.clear();
        self.line_start = 0;
        self.line_end = 0;
        self.flops = 0;
        self.bytes = 0;
    }

    /// Snapshot of this point as it appears in a delimited record.
    pub fn record(&self, label: &str, thread: u32) -> Record {
        Record {
            label: label.to_owned(),
            thread,
            flops: self.flops,
            bytes: self.bytes,
            read_bytes: self.read_bytes,
            write_bytes: self.write_bytes,
            src_file_start: self.src_file_start.to_string(),
            src_file_end: self.src_file_end.to_string(),
            line_start: self.line_start,
            line_end: self.line_end,
            hist: *self.hist.buckets(),
        }
    }

    /// Writes the structured report of this point.
    ///
    /// `label` keys the opening tag and may differ from the point's own label.
    /// In timing mode only the elapsed time is written, otherwise the counters
    /// and source locations are, the histogram is never part of this report.
    pub fn dump_info<W>(&self, out: &mut W, label: &str, thread: u32, opts: &Opts) -> Result<()>
    where
        W: Write + ?Sized,
    {
        writeln!(out, "<point label=\"{}\">", label)?;
        if !opts.time_run {
            tracing::debug!(
                label,
                thread,
                flops = self.flops,
                bytes = self.bytes,
                "dumping point counters"
            );
            writeln!(out, "<flops>{}</flops>", self.flops)?;
            writeln!(out, "<bytes>{}</bytes>", self.bytes)?;
            writeln!(out, "<read_bytes>{}</read_bytes>", self.read_bytes)?;
            writeln!(out, "<write_bytes>{}</write_bytes>", self.write_bytes)?;
            writeln!(out, "<src_file_start>{}</src_file_start>", self.src_file_start)?;
            writeln!(out, "<src_file_end>{}</src_file_end>", self.src_file_end)?;
            writeln!(out, "<line_n_start>{}</line_n_start>", self.line_start)?;
            writeln!(out, "<line_n_end>{}</line_n_end>", self.line_end)?;
            writeln!(out, "<thread>{}</thread>", thread)?;
        } else {
            let elapsed = self.elapsed();
            tracing::debug!(
                label,
                thread,
                start = self.start,
                end = self.end,
                elapsed,
                "dumping point time"
            );
            writeln!(out, "<time>{:.6}</time>", elapsed)?;
        }
        writeln!(out, "</point>")?;
        Ok(())
    }

    /// Writes the delimited record of this point, nothing in timing mode.
    pub fn dump_csv<W>(&self, out: &mut W, label: &str, thread: u32, opts: &Opts) -> Result<()>
    where
        W: Write + ?Sized,
    {
        if opts.time_run {
            tracing::trace!(label, thread, "timing mode, skipping delimited record");
            return Ok(());
        }

        tracing::debug!(
            label,
            thread,
            flops = self.flops,
            bytes = self.bytes,
            "dumping point record"
        );
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            label,
            thread,
            self.flops,
            self.bytes,
            self.read_bytes,
            self.write_bytes,
            self.src_file_start,
            self.src_file_end,
            self.line_start,
            self.line_end,
            self.hist,
        )
    }
}
