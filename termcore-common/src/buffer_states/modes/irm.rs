// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use core::fmt;

use crate::buffer_states::{mode::SetMode, modes::ReportMode};

/// Insert/Replace Mode (IRM) 4. Tracked so a program probing it back via
/// DECRQM sees the flag it set; printing does not consult it (see
/// `ModeState::insert_mode`).
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub enum Irm {
    Insert,
    #[default]
    Replace,
    Query,
}

impl ReportMode for Irm {
    fn report(&self, override_mode: Option<SetMode>) -> String {
        override_mode.map_or_else(
            || match self {
                Self::Insert => String::from("\x1b[4;1$y"),
                Self::Replace => String::from("\x1b[4;2$y"),
                Self::Query => String::from("\x1b[4;0$y"),
            },
            |override_mode| match override_mode {
                SetMode::DecSet => String::from("\x1b[4;1$y"),
                SetMode::DecRst => String::from("\x1b[4;2$y"),
                SetMode::DecQuery => String::from("\x1b[4;0$y"),
            },
        )
    }
}

impl Irm {
    #[must_use]
    pub const fn new(mode: &SetMode) -> Self {
        match mode {
            SetMode::DecSet => Self::Insert,
            SetMode::DecRst => Self::Replace,
            SetMode::DecQuery => Self::Query,
        }
    }
}

impl fmt::Display for Irm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "Insert Mode (IRM)"),
            Self::Replace => write!(f, "Replace Mode (IRM)"),
            Self::Query => write!(f, "Query Insert Mode (IRM)"),
        }
    }
}
