// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

/// Which of Mortar's high-volume traces are enabled.
///
/// Dispatch runs for every message and the damage engine for every visible
/// widget after any change, so including them in traces adds noise and makes
/// everything slow. They default to off, and can be turned on with the
/// `MORTAR_TRACE` environment variable: a comma-separated list of `dispatch`,
/// `damage` and `tree`, or `all`.
///
/// Using the usual `tracing` filters for this would also hide the spans of the
/// handlers running inside dispatch, which is rarely what you want.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceConfig {
    /// Enter each widget's span while its handler chain runs, and log every message.
    pub dispatch: bool,
    /// Log the drawable and dirty regions computed for each widget.
    pub damage: bool,
    /// Log each tree edit at trace level.
    pub tree: bool,
}

impl TraceConfig {
    /// Reads the `MORTAR_TRACE` environment variable.
    ///
    /// If it isn't set, all traces are off.
    pub fn from_env() -> Self {
        match std::env::var("MORTAR_TRACE") {
            Ok(value) => Self::parse(&value),
            Err(std::env::VarError::NotPresent) => Self::unit(false),
            Err(std::env::VarError::NotUnicode(value)) => {
                tracing::error!(
                    ?value,
                    "Couldn't parse `MORTAR_TRACE` environment variable: Not valid UTF-8",
                );
                Self::unit(false)
            }
        }
    }

    /// Parses a `MORTAR_TRACE` value.
    ///
    /// Unknown names are logged and ignored.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Self::unit(false);
        }
        if value.eq_ignore_ascii_case("all") {
            return Self::unit(true);
        }

        let mut result = Self::unit(false);
        let mut show_help = false;
        let mut supported = [
            ("dispatch", &mut result.dispatch),
            ("damage", &mut result.damage),
            ("tree", &mut result.tree),
        ];
        for name in value.split(',').map(str::trim) {
            if name.eq_ignore_ascii_case("all") {
                tracing::warn!("`MORTAR_TRACE=all` cannot be meaningfully combined with other traces");
                return Self::unit(true);
            }
            if let Some((_, enabled)) = supported
                .iter_mut()
                .find(|(trace_name, _)| trace_name.eq_ignore_ascii_case(name))
            {
                if **enabled {
                    tracing::warn!(trace = name, "MORTAR_TRACE: Enabled the same trace twice");
                }
                **enabled = true;
            } else {
                tracing::warn!(trace = name, "MORTAR_TRACE: Unknown trace");
                show_help = true;
            }
        }
        if show_help {
            let supported_str = supported
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                "Supported traces for the `MORTAR_TRACE` environment variable are {supported_str}"
            );
        }
        result
    }

    /// A `TraceConfig` where all the fields have the same `value`.
    pub const fn unit(value: bool) -> Self {
        Self {
            dispatch: value,
            damage: value,
            tree: value,
        }
    }
}
