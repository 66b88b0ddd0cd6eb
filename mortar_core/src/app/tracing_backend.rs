// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! A default [`tracing`] setup for programs built on Mortar.
//!
//! Console output is compact, stamped with UTC wall-clock time, and filtered by
//! the `MORTAR_LOG` environment variable (falling back to `RUST_LOG`). Without
//! either, debug builds show [`DEBUG`](tracing::Level::DEBUG) and release
//! builds show [`INFO`](tracing::Level::INFO).
//!
//! Debug builds also write every event, unfiltered, to a `mortar-*.log` file in
//! the temporary directory. The per-pass span output selected by
//! [`TraceConfig`](super::TraceConfig) is most useful read from that file.
//!
//! An already installed subscriber is never replaced.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

/// Environment variable holding Mortar's log filter directives.
pub const LOG_ENV_VAR: &str = "MORTAR_LOG";

// Hours to milliseconds; the `Z` marks the time as UTC.
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour repr:24]:[minute]:[second].[subsecond digits:3]Z");

/// Builds the default subscriber, using `default_level` when no filter is set
/// in the environment.
///
/// Problems that don't prevent logging, such as a malformed filter or an
/// unwritable log file, are returned alongside the subscriber so they can be
/// logged once it is installed.
pub fn default_tracing_subscriber(
    default_level: LevelFilter,
) -> (impl Subscriber, Option<Box<dyn Error>>) {
    let (env_filter, mut err) = env_filter(default_level);
    let timer = UtcTime::new(TIME_FORMAT);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_timer(timer.clone())
        .with_target(false)
        .with_filter(env_filter);

    let file_layer = if cfg!(debug_assertions) {
        let path = log_file_path();
        match File::create(&path) {
            Ok(file) => {
                #[allow(clippy::print_stderr, reason = "No subscriber is installed yet")]
                {
                    eprintln!("Mortar: full log at {}", path.display());
                }
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_timer(timer)
                        .with_writer(file)
                        .with_ansi(false),
                )
            }
            Err(file_err) => {
                err = Some(format!("cannot create log file {}: {file_err}", path.display()).into());
                None
            }
        }
    } else {
        None
    };

    let registry = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer);
    (registry, err)
}

fn env_filter(default_level: LevelFilter) -> (EnvFilter, Option<Box<dyn Error>>) {
    let var = if std::env::var_os(LOG_ENV_VAR).is_some() {
        LOG_ENV_VAR
    } else {
        "RUST_LOG"
    };
    let builder = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(var);
    let err = builder
        .from_env()
        .err()
        .map(|err| format!("invalid {var} directives: {err:#}").into());
    (builder.from_env_lossy(), err)
}

fn log_file_path() -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("mortar-{stamp:016}.log"))
}

/// Returned when a global tracing subscriber is already installed.
#[derive(Debug)]
pub struct TracingSubscriberHasBeenSetError;

impl fmt::Display for TracingSubscriberHasBeenSetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.pad("a global tracing subscriber is already installed")
    }
}

impl Error for TracingSubscriberHasBeenSetError {}

fn install(default_level: LevelFilter) -> Result<(), TracingSubscriberHasBeenSetError> {
    // `has_been_set` is doc(hidden) but `tracing` itself relies on it.
    if tracing_core::dispatcher::has_been_set() {
        return Err(TracingSubscriberHasBeenSetError);
    }
    let (subscriber, err) = default_tracing_subscriber(default_level);
    // Only fails if a subscriber was installed since the check above.
    let _ = tracing::subscriber::set_global_default(subscriber);
    if let Some(err) = err {
        tracing::error!("Logging set up with a recoverable error: {err}");
    }
    Ok(())
}

/// Installs the default subscriber for tests.
///
/// The console only shows warnings and errors unless the environment says
/// otherwise. Calling this more than once returns an error, which tests usually
/// ignore.
pub fn try_init_test_tracing() -> Result<(), TracingSubscriberHasBeenSetError> {
    install(LevelFilter::WARN)
}

/// Installs the default subscriber for an application.
pub fn try_init_tracing() -> Result<(), TracingSubscriberHasBeenSetError> {
    // DEBUG logs tree edits and capture changes; INFO only lifecycle events.
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    install(default_level)
}
