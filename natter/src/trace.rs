//! Runtime flags and the trace hook.
//!
//! All of these are process-wide and meant to be set once during
//! startup, before any listen loop runs; afterwards they are read
//! with relaxed ordering and no further synchronization.

use core::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Syslog-flavored severity attached to every trace line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
  /// System is unusable
  Emergency = 0,
  /// Action must be taken immediately
  Alert = 1,
  /// Critical condition
  Critical = 2,
  /// Error condition
  Error = 3,
  /// Warning condition
  Warning = 4,
  /// Normal but significant
  Notice = 5,
  /// Informational
  Info = 6,
  /// Debug-level detail
  Debug = 7,
}

impl Severity {
  /// The numeric syslog level, emergency = 0 through debug = 7.
  pub fn level(self) -> u8 {
    self as u8
  }

  fn log_level(self) -> log::Level {
    match self {
      | Severity::Emergency | Severity::Alert | Severity::Critical | Severity::Error => {
        log::Level::Error
      },
      | Severity::Warning => log::Level::Warn,
      | Severity::Notice | Severity::Info => log::Level::Info,
      | Severity::Debug => log::Level::Debug,
    }
  }
}

static DEBUG: AtomicBool = AtomicBool::new(false);
static HEALTH_MONITOR: AtomicBool = AtomicBool::new(false);
static TRACER: OnceLock<Box<dyn Fn(Severity, fmt::Arguments) + Send + Sync>> = OnceLock::new();

/// Turn per-datagram debug traces on or off.
pub fn set_debug(enable: bool) {
  DEBUG.store(enable, Ordering::Relaxed);
}

pub(crate) fn debug_enabled() -> bool {
  DEBUG.load(Ordering::Relaxed)
}

/// Turn the `RUOK`/`IMOK` liveness probe on or off.
pub fn set_health_monitor(enable: bool) {
  HEALTH_MONITOR.store(enable, Ordering::Relaxed);
}

pub(crate) fn health_monitor_enabled() -> bool {
  HEALTH_MONITOR.load(Ordering::Relaxed)
}

/// Install a custom sink for trace lines.
///
/// Takes effect at most once; without one, lines go to the [`log`]
/// facade under the `natter` target at the nearest [`log::Level`].
pub fn set_tracer(tracer: impl Fn(Severity, fmt::Arguments) + Send + Sync + 'static) {
  let _ = TRACER.set(Box::new(tracer));
}

pub(crate) fn emit(severity: Severity, args: fmt::Arguments) {
  match TRACER.get() {
    | Some(tracer) => tracer(severity, args),
    | None => log::log!(target: "natter", severity.log_level(), "{}", args),
  }
}

/// Trace at [`Severity::Info`].
pub fn info(args: fmt::Arguments) {
  emit(Severity::Info, args);
}

/// Trace at [`Severity::Error`].
pub fn error(args: fmt::Arguments) {
  emit(Severity::Error, args);
}
