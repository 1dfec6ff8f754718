// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::buffer_states::{mode::SetMode, modes::ReportMode};
use core::fmt;

/// Autowrap Mode (DECAWM) ?7
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub enum Decawm {
    #[default]
    NoAutowrap,
    Autowrap,
    Query,
}

impl Decawm {
    #[must_use]
    pub const fn new(mode: &SetMode) -> Self {
        match mode {
            SetMode::DecSet => Self::Autowrap,
            SetMode::DecRst => Self::NoAutowrap,
            SetMode::DecQuery => Self::Query,
        }
    }
}

impl ReportMode for Decawm {
    fn report(&self, override_mode: Option<SetMode>) -> String {
        override_mode.map_or_else(
            || match self {
                Self::NoAutowrap => String::from("\x1b[?7;2$y"),
                Self::Autowrap => String::from("\x1b[?7;1$y"),
                Self::Query => String::from("\x1b[?7;0$y"),
            },
            |override_mode| match override_mode {
                SetMode::DecSet => String::from("\x1b[?7;1$y"),
                SetMode::DecRst => String::from("\x1b[?7;2$y"),
                SetMode::DecQuery => String::from("\x1b[?7;0$y"),
            },
        )
    }
}

impl fmt::Display for Decawm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAutowrap => write!(f, "Autowrap Mode (DECAWM) Off"),
            Self::Autowrap => write!(f, "Autowrap Mode (DECAWM) On"),
            Self::Query => write!(f, "Autowrap Mode (DECAWM) Query"),
        }
    }
}
