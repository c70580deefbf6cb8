use std::io::{Error, Result};
use std::mem::MaybeUninit;

use libc::{clockid_t, timespec};

pub fn clock_gettime(clock: clockid_t) -> Result<timespec> {
    let mut ts = MaybeUninit::<timespec>::uninit();
    let result = unsafe { libc::clock_gettime(clock, ts.as_mut_ptr()) };
    if result != -1 {
        Ok(unsafe { ts.assume_init() })
    } else {
        Err(Error::last_os_error())
    }
}
