
use std::io::{Result, Write};

use crate::point::Point;

/// Reporting options.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opts {
    /// Timing mode.
    ///
    /// Reports carry only the elapsed time of each region instead of its
    /// counters, and delimited records are not written at all.
    pub time_run: bool,

    /// Output format used by [`Reporter::dump`].
    pub format: Format,
}

/// Output format of a point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// Tagged report, see [`Point::dump_info`].
    #[default]
    Info,

    /// One comma-separated line per point, see [`Point::dump_csv`].
    Csv,
}

/// Reporting context.
///
/// Holds the options for the whole run so that every point of every thread
/// is written the same way.
///
/// # Examples
///
/// ```rust
/// use roofline::point::Point;
/// use roofline::report::{Opts, Reporter};
///
/// let mut opts = Opts::default();
/// opts.time_run = true;
/// let reporter = Reporter::new(opts);
///
/// let mut point = Point::new();
/// point.set_start(1.0);
/// point.set_end(2.5);
///
/// let mut out: Vec<u8> = vec![];
/// reporter.dump(&point, &mut out, "main", 0).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "<point label=\"main\">\n<time>1.500000</time>\n</point>\n",
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Reporter {
    opts: Opts,
}

impl Reporter {
    pub fn new(opts: Opts) -> Self {
        Self { opts }
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    pub fn dump<W>(&self, point: &Point, out: &mut W, label: &str, thread: u32) -> Result<()>
    where
        W: Write + ?Sized,
    {
        match self.opts.format {
            Format::Info => point.dump_info(out, label, thread, &self.opts),
            Format::Csv => point.dump_csv(out, label, thread, &self.opts),
        }
    }
}
