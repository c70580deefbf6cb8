//! Per-region-of-interest counters for roofline analysis.
//!
//! An instrumentation layer calls into a [`Point`][point::Point] at every traced
//! floating-point operation, memory access and region boundary. The point keeps
//! flop and byte counts, an access-size histogram and the source range of the
//! region, and writes them out as a tagged report or a delimited record once the
//! region is done.
//!
//! ## Example
//!
//! Count a small dot product region and report it.
//!
//! ```rust
//! use roofline::clock;
//! use roofline::point::Point;
//! use roofline::report::{Format, Opts, Reporter};
//!
//! let mut point = Point::new();
//! point.set_label("dot");
//! point.set_src_file_start("dot.c");
//! point.set_line_start(12);
//! point.set_start(clock::now().unwrap());
//!
//! let (a, b) = ([1.0_f64; 16], [2.0_f64; 16]);
//! let mut sum = 0.0;
//! for i in 0..16 {
//!     // What the instrumentation would report for `sum += a[i] * b[i]`.
//!     point.update_bytes(8);
//!     point.update_read_bytes(8);
//!     point.update_bytes(8);
//!     point.update_read_bytes(8);
//!     point.update_fp_count(2);
//!     sum += a[i] * b[i];
//! }
//! std::hint::black_box(sum);
//!
//! point.set_end(clock::now().unwrap());
//! point.set_src_file_end("dot.c");
//! point.set_line_end(18);
//!
//! let mut opts = Opts::default();
//! opts.format = Format::Csv;
//! let reporter = Reporter::new(opts);
//!
//! let mut out: Vec<u8> = vec![];
//! reporter.dump(&point, &mut out, point.get_label(), 0).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "dot,0,32,256,256,0,dot.c,dot.c,12,18,{0 0 0 32 0 0 0 0 }\n",
//! );
//! ```

pub mod clock;
mod ffi;
pub mod point;
pub mod record;
pub mod report;
