// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! The [`Ui`] context object and the collaborators it is built from.

mod platform;
mod queue;
mod theme;
mod trace_config;
mod tracing_backend;
mod ui;

pub use platform::{HeadlessPlatform, Platform};
pub use theme::{EmptyTheme, Theme};
pub use trace_config::TraceConfig;
pub use tracing_backend::{
    LOG_ENV_VAR, TracingSubscriberHasBeenSetError, default_tracing_subscriber,
    try_init_test_tracing, try_init_tracing,
};
pub use ui::{AncestorOrder, TextIconLayout, Ui, UiOptions};

pub(crate) use queue::{Envelope, MessageQueue};
pub(crate) use ui::InputState;
