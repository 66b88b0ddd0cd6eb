// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::rc::Rc;

use cursor_icon::CursorIcon;
use kurbo::Vec2;
use mortar_core::app::Platform;
use mortar_region::Region;

/// A call made by the core into the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    /// [`Platform::show_pointer`].
    ShowPointer,
    /// [`Platform::hide_pointer`].
    HidePointer,
    /// [`Platform::set_cursor`].
    SetCursor(CursorIcon),
    /// [`Platform::capture_input`].
    CaptureInput,
    /// [`Platform::release_input`].
    ReleaseInput,
    /// [`Platform::move_region`].
    MoveRegion {
        /// The pixels moved, before the move.
        region: Region,
        /// How far they moved.
        delta: Vec2,
    },
}

/// The calls received by a [`RecordingPlatform`], shared with the test.
#[derive(Debug, Clone, Default)]
pub struct PlatformLog(Rc<RefCell<Vec<PlatformCall>>>);

impl PlatformLog {
    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.0.borrow().clone()
    }

    /// Returns all calls so far and empties the log.
    pub fn take(&self) -> Vec<PlatformCall> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// The last cursor set, if any.
    pub fn cursor(&self) -> Option<CursorIcon> {
        self.0.borrow().iter().rev().find_map(|call| match call {
            PlatformCall::SetCursor(cursor) => Some(*cursor),
            _ => None,
        })
    }

    fn push(&self, call: PlatformCall) {
        self.0.borrow_mut().push(call);
    }
}

/// A headless [`Platform`] that logs every call.
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    log: PlatformLog,
}

impl RecordingPlatform {
    /// Create a platform logging to `log`.
    pub fn new(log: &PlatformLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Platform for RecordingPlatform {
    fn show_pointer(&mut self) {
        self.log.push(PlatformCall::ShowPointer);
    }

    fn hide_pointer(&mut self) {
        self.log.push(PlatformCall::HidePointer);
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.log.push(PlatformCall::SetCursor(cursor));
    }

    fn capture_input(&mut self) {
        self.log.push(PlatformCall::CaptureInput);
    }

    fn release_input(&mut self) {
        self.log.push(PlatformCall::ReleaseInput);
    }

    fn move_region(&mut self, region: &Region, delta: Vec2) {
        self.log.push(PlatformCall::MoveRegion {
            region: region.clone(),
            delta,
        });
    }
}
