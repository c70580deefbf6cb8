
use std::io::Result;

use crate::ffi::syscall::clock_gettime;

/// Current monotonic time in seconds.
///
/// Timestamps from this clock are meant for [`Point::set_start`] and
/// [`Point::set_end`], only the difference between two of them is meaningful.
///
/// [`Point::set_start`]: crate::point::Point::set_start
/// [`Point::set_end`]: crate::point::Point::set_end
pub fn now() -> Result<f64> {
    let ts = clock_gettime(libc::CLOCK_MONOTONIC)?;
    Ok(ts.tv_sec as f64 + ts.tv_nsec as f64 / 1e9)
}
