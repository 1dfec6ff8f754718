// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use core::fmt;

use crate::buffer_states::{mode::SetMode, modes::ReportMode};

/// Alternate Screen, switch only, no clear (`?47`).
///
/// Unlike `XtExtscrn` (`?1049`), entering this mode does not clear the
/// alternate buffer and does not save the cursor; the alternate buffer
/// keeps whatever content it held from a previous visit.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub enum AltScreenBasic {
    #[default]
    Primary,
    Alternate,
    Query,
}

impl AltScreenBasic {
    #[must_use]
    pub const fn new(mode: &SetMode) -> Self {
        match mode {
            SetMode::DecSet => Self::Alternate,
            SetMode::DecRst => Self::Primary,
            SetMode::DecQuery => Self::Query,
        }
    }
}

impl ReportMode for AltScreenBasic {
    fn report(&self, override_mode: Option<SetMode>) -> String {
        override_mode.map_or_else(
            || match self {
                Self::Primary => String::from("\x1b[?47;2$y"),
                Self::Alternate => String::from("\x1b[?47;1$y"),
                Self::Query => String::from("\x1b[?47;0$y"),
            },
            |override_mode| match override_mode {
                SetMode::DecSet => String::from("\x1b[?47;1$y"),
                SetMode::DecRst => String::from("\x1b[?47;2$y"),
                SetMode::DecQuery => String::from("\x1b[?47;0$y"),
            },
        )
    }
}

impl fmt::Display for AltScreenBasic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("XT_ALTSCRN_BASIC (RESET) Primary Screen"),
            Self::Alternate => f.write_str("XT_ALTSCRN_BASIC (SET) Alternate Screen"),
            Self::Query => f.write_str("XT_ALTSCRN_BASIC (QUERY)"),
        }
    }
}

/// Alternate Screen with cursor save (`?1047`).
///
/// Entering saves the cursor position and switches; leaving restores the
/// cursor. Unlike `?1049` the alternate buffer is not cleared on entry.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub enum AltScreenSaveCursor {
    #[default]
    Primary,
    Alternate,
    Query,
}

impl AltScreenSaveCursor {
    #[must_use]
    pub const fn new(mode: &SetMode) -> Self {
        match mode {
            SetMode::DecSet => Self::Alternate,
            SetMode::DecRst => Self::Primary,
            SetMode::DecQuery => Self::Query,
        }
    }
}

impl ReportMode for AltScreenSaveCursor {
    fn report(&self, override_mode: Option<SetMode>) -> String {
        override_mode.map_or_else(
            || match self {
                Self::Primary => String::from("\x1b[?1047;2$y"),
                Self::Alternate => String::from("\x1b[?1047;1$y"),
                Self::Query => String::from("\x1b[?1047;0$y"),
            },
            |override_mode| match override_mode {
                SetMode::DecSet => String::from("\x1b[?1047;1$y"),
                SetMode::DecRst => String::from("\x1b[?1047;2$y"),
                SetMode::DecQuery => String::from("\x1b[?1047;0$y"),
            },
        )
    }
}

impl fmt::Display for AltScreenSaveCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("XT_ALTSCRN_SAVECURSOR (RESET) Primary Screen"),
            Self::Alternate => f.write_str("XT_ALTSCRN_SAVECURSOR (SET) Alternate Screen"),
            Self::Query => f.write_str("XT_ALTSCRN_SAVECURSOR (QUERY)"),
        }
    }
}
