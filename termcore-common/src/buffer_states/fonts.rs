// Copyright (C) 2024-2025 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FontDecorations {
    Italic,
    Underline,
    DoubleUnderline,
    CurlyUnderline,
    DottedUnderline,
    DashedUnderline,
    Faint,
    Strikethrough,
    SlowBlink,
    RapidBlink,
    Hidden,
    Overline,
}

impl FontDecorations {
    /// True for any of the underline-family variants; used by callers that
    /// need to clear "some underline" without enumerating every style.
    #[must_use]
    pub const fn is_underline(&self) -> bool {
        matches!(
            self,
            Self::Underline | Self::DoubleUnderline | Self::CurlyUnderline
                | Self::DottedUnderline | Self::DashedUnderline
        )
    }
}
