use std::fmt;

use crate::driver::GlDriver;

/// Upper bound on flags drained per call.
///
/// A lost context may report `GL_CONTEXT_LOST` on every poll; the bound keeps
/// the drain from spinning forever in that state.
const MAX_DRAIN: usize = 64;

/// Where a checked call was issued from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CallSite {
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self { function, file, line }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.function, self.file, self.line)
    }
}

/// A non-zero flag read from the driver error queue.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DriverError {
    pub code: u32,
}

impl DriverError {
    /// Symbolic GL name for the code, if it is a standard one.
    pub fn name(self) -> Option<&'static str> {
        Some(match self.code {
            0x0500 => "GL_INVALID_ENUM",
            0x0501 => "GL_INVALID_VALUE",
            0x0502 => "GL_INVALID_OPERATION",
            0x0503 => "GL_STACK_OVERFLOW",
            0x0504 => "GL_STACK_UNDERFLOW",
            0x0505 => "GL_OUT_OF_MEMORY",
            0x0506 => "GL_INVALID_FRAMEBUFFER_OPERATION",
            0x0507 => "GL_CONTEXT_LOST",
            _ => return None,
        })
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} [{:#06x}]", self.code),
            None => write!(f, "unknown GL error [{:#06x}]", self.code),
        }
    }
}

/// Discards pending error flags. Returns how many were drained.
pub fn clear_errors<D: GlDriver + ?Sized>(driver: &D) -> usize {
    let mut drained = 0;
    while drained < MAX_DRAIN && driver.get_error() != 0 {
        drained += 1;
    }
    drained
}

/// Polls the error queue once and logs a raised flag against `site`.
pub fn check_error<D: GlDriver + ?Sized>(driver: &D, site: CallSite) -> Option<DriverError> {
    match driver.get_error() {
        0 => None,
        code => {
            let err = DriverError { code };
            log::error!("OpenGL error {err} caused by {site}");
            Some(err)
        }
    }
}

/// Runs `call` between a drain and a single poll of the error queue.
///
/// Only a flag raised by `call` itself is returned (and logged).
pub fn checked_call<D, T>(
    driver: &D,
    site: CallSite,
    call: impl FnOnce(&D) -> T,
) -> (T, Option<DriverError>)
where
    D: GlDriver + ?Sized,
{
    clear_errors(driver);
    let value = call(driver);
    let err = check_error(driver, site);
    (value, err)
}

/// Logs a failed assertion and aborts the process.
pub fn fatal(site: CallSite, message: fmt::Arguments<'_>) -> ! {
    log::error!("fatal GL assertion at {site}: {message}");
    log::logger().flush();
    std::process::abort()
}
