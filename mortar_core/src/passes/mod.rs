// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! The operations of [`Ui`](crate::app::Ui), grouped by concern.
//!
//! - `mutate`: creating, destroying and re-parenting widgets, and tree queries.
//! - `event`: handler chain dispatch, signals, and the message queue.
//! - `paint`: the damage engine.
//! - `update`: state flags, pointer capture, focus and hover.
//! - `layout`: geometry and text properties.
//!
//! This file includes utility functions used by multiple passes.

use tracing::span::EnteredSpan;

use crate::core::WidgetState;

pub(crate) mod event;
pub(crate) mod layout;
pub(crate) mod mutate;
pub(crate) mod paint;
pub(crate) mod update;

#[must_use = "Span will be immediately closed if dropped"]
pub(crate) fn enter_span_if(enabled: bool, state: &WidgetState) -> Option<EnteredSpan> {
    enabled.then(|| enter_span(state))
}

#[must_use = "Span will be immediately closed if dropped"]
pub(crate) fn enter_span(state: &WidgetState) -> EnteredSpan {
    state.trace_span.clone().entered()
}
