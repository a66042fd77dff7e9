//! Error-check shim around driver calls.
//!
//! GL reports failures through a sticky error queue instead of return values.
//! [`gl_call!`](crate::gl_call) drains the queue before a call so stale flags from
//! unrelated earlier calls are not blamed on it, then polls once afterwards and
//! logs anything raised together with the call site. The caller never branches
//! on this; execution always continues.
//!
//! [`gl_assert!`](crate::gl_assert) is the one fatal check: it logs and aborts
//! the process when its condition does not hold.

mod check;

pub use check::{check_error, checked_call, clear_errors, fatal, CallSite, DriverError};

/// Wraps one driver method call with the error-check shim.
///
/// ```ignore
/// let id = gl_call!(ctx.driver(), create_buffer())?;
/// gl_call!(ctx.driver(), bind_buffer(BufferTarget::Array, Some(id)));
/// ```
#[macro_export]
macro_rules! gl_call {
    ($driver:expr, $method:ident ( $($arg:expr),* $(,)? )) => {{
        let site = $crate::debug::CallSite::new(stringify!($method), file!(), line!());
        $crate::debug::checked_call($driver, site, |d| d.$method($($arg),*)).0
    }};
}

/// Aborts the process when `cond` is false, logging the call site.
#[macro_export]
macro_rules! gl_assert {
    ($cond:expr $(,)?) => {
        $crate::gl_assert!($cond, "{}", stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::debug::fatal(
                $crate::debug::CallSite::new(stringify!($cond), file!(), line!()),
                format_args!($($arg)+),
            );
        }
    };
}
