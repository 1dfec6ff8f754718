// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::buffer_states::cursor::ReverseVideo;
use crate::buffer_states::format_tag::FormatTag;
use crate::buffer_states::fonts::{FontDecorations, FontWeight};
use crate::colors::TerminalColor;
use tracing::warn;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum SelectGraphicRendition {
    #[default]
    NoOp, // added to allow default construction
    // NOTE: Non-exhaustive list
    Reset,
    Bold,
    Italic,
    Underline,
    DoubleUnderline,
    CurlyUnderline,
    DottedUnderline,
    DashedUnderline,
    Faint,
    ReverseVideo,
    ResetReverseVideo,
    ResetBold,
    NormalIntensity,
    NotUnderlined,
    NotItalic,
    Strikethrough,
    NotStrikethrough,
    Foreground(TerminalColor),
    Background(TerminalColor),
    Unknown(usize),
    UnderlineColor(TerminalColor),
    // We ignore these attributes
    Conceal,
    Revealed,
    PrimaryFont,
    AlternativeFont1,
    AlternativeFont2,
    AlternativeFont3,
    AlternativeFont4,
    AlternativeFont5,
    AlternativeFont6,
    AlternativeFont7,
    AlternativeFont8,
    AlternativeFont9,
    FontFranktur,
    SlowBlink,
    FastBlink,
    NotBlinking,
    ProportionalSpacing,
    DisableProportionalSpacing,
    Framed,
    Encircled,
    Overlined,
    NotFramedOrEncircled,
    NotOverlined,
    IdeogramUnderline,
    IdeogramDoubleUnderline,
    IdeogramOverline,
    IdeogramDoubleOverline,
    IdeogramStress,
    IdeogramAttributes,
    Superscript,
    Subscript,
    NeitherSuperscriptNorSubscript,
}

impl SelectGraphicRendition {
    #[allow(clippy::too_many_lines)]
    pub fn from_usize(val: usize) -> Self {
        match val {
            0 => Self::Reset,
            1 => Self::Bold,
            2 => Self::Faint,
            3 => Self::Italic,
            4 => Self::Underline,
            5 => Self::SlowBlink,
            6 => Self::FastBlink,
            7 => Self::ReverseVideo,
            8 => Self::Conceal,
            9 => Self::Strikethrough,
            10 => Self::PrimaryFont,
            11 => Self::AlternativeFont1,
            12 => Self::AlternativeFont2,
            13 => Self::AlternativeFont3,
            14 => Self::AlternativeFont4,
            15 => Self::AlternativeFont5,
            16 => Self::AlternativeFont6,
            17 => Self::AlternativeFont7,
            18 => Self::AlternativeFont8,
            19 => Self::AlternativeFont9,
            20 => Self::FontFranktur,
            // xterm historically reused 21 for "reset bold"; ECMA-48 and this
            // parser treat it as the documented double-underline attribute.
            21 => Self::DoubleUnderline,
            22 => Self::NormalIntensity,
            23 => Self::NotItalic,
            24 => Self::NotUnderlined,
            25 => Self::NotBlinking,
            26 => Self::ProportionalSpacing,
            27 => Self::ResetReverseVideo,
            28 => Self::Revealed,
            29 => Self::NotStrikethrough,
            30 => Self::Foreground(TerminalColor::Black),
            31 => Self::Foreground(TerminalColor::Red),
            32 => Self::Foreground(TerminalColor::Green),
            33 => Self::Foreground(TerminalColor::Yellow),
            34 => Self::Foreground(TerminalColor::Blue),
            35 => Self::Foreground(TerminalColor::Magenta),
            36 => Self::Foreground(TerminalColor::Cyan),
            37 => Self::Foreground(TerminalColor::White),
            38 => {
                error!(
                    "This is a custom foreground color. We shouldn't end up here! Setting custom foreground color to default"
                );
                Self::Foreground(TerminalColor::Default)
            }
            39 => Self::Foreground(TerminalColor::Default),
            40 => Self::Background(TerminalColor::Black),
            41 => Self::Background(TerminalColor::Red),
            42 => Self::Background(TerminalColor::Green),
            43 => Self::Background(TerminalColor::Yellow),
            44 => Self::Background(TerminalColor::Blue),
            45 => Self::Background(TerminalColor::Magenta),
            46 => Self::Background(TerminalColor::Cyan),
            47 => Self::Background(TerminalColor::White),
            48 => {
                error!(
                    "This is a custom background color. We shouldn't end up here! Setting custom background color to default"
                );
                Self::Background(TerminalColor::DefaultBackground)
            }
            49 => Self::Background(TerminalColor::DefaultBackground),
            50 => Self::DisableProportionalSpacing,
            51 => Self::Framed,
            52 => Self::Encircled,
            53 => Self::Overlined,
            54 => Self::NotFramedOrEncircled,
            55 => Self::NotOverlined,
            58 => {
                error!(
                    "This is a custom underline color. We shouldn't end up here! Setting custom underline color to default"
                );
                Self::UnderlineColor(TerminalColor::DefaultUnderlineColor)
            }
            59 => Self::UnderlineColor(TerminalColor::DefaultUnderlineColor),
            60 => Self::IdeogramUnderline,
            61 => Self::IdeogramDoubleUnderline,
            62 => Self::IdeogramOverline,
            63 => Self::IdeogramDoubleOverline,
            64 => Self::IdeogramStress,
            65 => Self::IdeogramAttributes,
            73 => Self::Superscript,
            74 => Self::Subscript,
            75 => Self::NeitherSuperscriptNorSubscript,
            90 => Self::Foreground(TerminalColor::BrightBlack),
            91 => Self::Foreground(TerminalColor::BrightRed),
            92 => Self::Foreground(TerminalColor::BrightGreen),
            93 => Self::Foreground(TerminalColor::BrightYellow),
            94 => Self::Foreground(TerminalColor::BrightBlue),
            95 => Self::Foreground(TerminalColor::BrightMagenta),
            96 => Self::Foreground(TerminalColor::BrightCyan),
            97 => Self::Foreground(TerminalColor::BrightWhite),
            100 => Self::Background(TerminalColor::BrightBlack),
            101 => Self::Background(TerminalColor::BrightRed),
            102 => Self::Background(TerminalColor::BrightGreen),
            103 => Self::Background(TerminalColor::BrightYellow),
            104 => Self::Background(TerminalColor::BrightBlue),
            105 => Self::Background(TerminalColor::BrightMagenta),
            106 => Self::Background(TerminalColor::BrightCyan),
            107 => Self::Background(TerminalColor::BrightWhite),
            _ => Self::Unknown(val),
        }
    }

    /// Create a new `SelectGraphicRendition` from a `usize` and three `usize` values representing
    /// the red, green and blue components of a custom color.
    ///
    /// # Errors
    /// Will return an error if any of the `usize` values are greater than `u8::MAX`.
    pub fn from_usize_color(val: usize, r: usize, g: usize, b: usize) -> Result<Self> {
        let r = u8::try_from(r)?;
        let g = u8::try_from(g)?;
        let b = u8::try_from(b)?;

        match val {
            38 => Ok(Self::Foreground(TerminalColor::Custom(r, g, b))),
            48 => Ok(Self::Background(TerminalColor::Custom(r, g, b))),
            58 => Ok(Self::UnderlineColor(TerminalColor::Custom(r, g, b))),
            _ => Ok(Self::Unknown(val)),
        }
    }

    /// Map the colon sub-parameter of `4:n` (extended underline style) to an
    /// attribute. `4:0` clears the underline, `4:1` is the plain case also
    /// reachable via bare `4`.
    #[must_use]
    pub fn from_underline_style(style: usize) -> Self {
        match style {
            0 => Self::NotUnderlined,
            1 => Self::Underline,
            2 => Self::DoubleUnderline,
            3 => Self::CurlyUnderline,
            4 => Self::DottedUnderline,
            5 => Self::DashedUnderline,
            _ => Self::Unknown(style),
        }
    }

    /// Apply this attribute to a cell format tag, mutating colors, weight,
    /// and decorations in place. Attributes xterm records but leaves to the
    /// renderer (font selection, ideogram, super/subscript, blink cadence
    /// beyond on/off, framing) are consumed here without changing `tag`.
    #[allow(clippy::too_many_lines)]
    pub fn apply_to(&self, tag: &mut FormatTag) {
        fn add(tag: &mut FormatTag, d: FontDecorations) {
            if !tag.font_decorations.contains(&d) {
                tag.font_decorations.push(d);
            }
        }
        fn remove(tag: &mut FormatTag, pred: impl Fn(&FontDecorations) -> bool) {
            tag.font_decorations.retain(|d| !pred(d));
        }

        match self {
            Self::NoOp => {}
            Self::Reset => {
                let protected = tag.protected;
                *tag = Self::default_tag_keeping_protection(protected);
            }
            Self::Bold => tag.font_weight = FontWeight::Bold,
            Self::ResetBold | Self::NormalIntensity => tag.font_weight = FontWeight::Normal,
            Self::Faint => add(tag, FontDecorations::Faint),
            Self::Italic => add(tag, FontDecorations::Italic),
            Self::NotItalic => remove(tag, |d| matches!(d, FontDecorations::Italic)),
            Self::Underline => add(tag, FontDecorations::Underline),
            Self::DoubleUnderline => add(tag, FontDecorations::DoubleUnderline),
            Self::CurlyUnderline => add(tag, FontDecorations::CurlyUnderline),
            Self::DottedUnderline => add(tag, FontDecorations::DottedUnderline),
            Self::DashedUnderline => add(tag, FontDecorations::DashedUnderline),
            Self::NotUnderlined => remove(tag, FontDecorations::is_underline),
            Self::Strikethrough => add(tag, FontDecorations::Strikethrough),
            Self::NotStrikethrough => {
                remove(tag, |d| matches!(d, FontDecorations::Strikethrough));
            }
            Self::SlowBlink => add(tag, FontDecorations::SlowBlink),
            Self::FastBlink => add(tag, FontDecorations::RapidBlink),
            Self::NotBlinking => remove(tag, |d| {
                matches!(d, FontDecorations::SlowBlink | FontDecorations::RapidBlink)
            }),
            Self::Conceal => add(tag, FontDecorations::Hidden),
            Self::Revealed => remove(tag, |d| matches!(d, FontDecorations::Hidden)),
            Self::Overlined => add(tag, FontDecorations::Overline),
            Self::NotOverlined => remove(tag, |d| matches!(d, FontDecorations::Overline)),
            Self::ReverseVideo => tag.colors.reverse_video = ReverseVideo::On,
            Self::ResetReverseVideo => tag.colors.reverse_video = ReverseVideo::Off,
            Self::Foreground(c) => tag.colors.color = *c,
            Self::Background(c) => tag.colors.background_color = *c,
            Self::UnderlineColor(c) => tag.colors.underline_color = *c,
            // Recorded-but-unrendered: font selection, ideogram attributes,
            // super/subscript, framing. Warn-and-drop, matching unknown SGR.
            Self::Unknown(_)
            | Self::PrimaryFont
            | Self::AlternativeFont1
            | Self::AlternativeFont2
            | Self::AlternativeFont3
            | Self::AlternativeFont4
            | Self::AlternativeFont5
            | Self::AlternativeFont6
            | Self::AlternativeFont7
            | Self::AlternativeFont8
            | Self::AlternativeFont9
            | Self::FontFranktur
            | Self::ProportionalSpacing
            | Self::DisableProportionalSpacing
            | Self::Framed
            | Self::Encircled
            | Self::NotFramedOrEncircled
            | Self::IdeogramUnderline
            | Self::IdeogramDoubleUnderline
            | Self::IdeogramOverline
            | Self::IdeogramDoubleOverline
            | Self::IdeogramStress
            | Self::IdeogramAttributes
            | Self::Superscript
            | Self::Subscript
            | Self::NeitherSuperscriptNorSubscript => {
                warn!("Unhandled sgr: {:?}", self);
            }
        }
    }

    fn default_tag_keeping_protection(protected: bool) -> FormatTag {
        FormatTag {
            protected,
            ..FormatTag::default()
        }
    }
}

/// Lets `TerminalOutput`'s generic `Sgr` payload be applied to a format tag
/// without the consumer knowing which concrete SGR type it is parameterized
/// over. The `()` impl exists so generic-only tests can instantiate
/// `TerminalOutput<(), ...>` without pulling in real SGR handling.
pub trait ApplySgr {
    fn apply_to(&self, tag: &mut FormatTag);
}

impl ApplySgr for SelectGraphicRendition {
    fn apply_to(&self, tag: &mut FormatTag) {
        Self::apply_to(self, tag);
    }
}

impl ApplySgr for () {
    fn apply_to(&self, _tag: &mut FormatTag) {}
}
