// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt;

use crate::buffer_states::modes::{
    ReportMode, allow_column_mode_switch::AllowColumnModeSwitch,
    alt_screen::{AltScreenBasic, AltScreenSaveCursor}, decarm::Decarm, decawm::Decawm,
    decckm::Decckm, deccolm::Deccolm, decom::Decom, decsclm::Decsclm, decscnm::Decscnm,
    dectcem::Dectcem, grapheme::GraphemeClustering, irm::Irm, lnm::Lnm, mouse::MouseTrack,
    reverse_wrap_around::ReverseWrapAround, rl_bracket::RlBracket,
    sync_updates::SynchronizedUpdates, theme::Theming, unknown::UnknownMode, xtcblink::XtCBlink,
    xtextscrn::XtExtscrn, xtmsewin::XtMseWin,
};

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Eq, PartialEq, Default, Clone, Copy)]
pub enum SetMode {
    DecSet,
    #[default]
    DecRst,
    DecQuery,
}

impl fmt::Display for SetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecSet => write!(f, "Mode Set"),
            Self::DecRst => write!(f, "Mode Reset"),
            Self::DecQuery => write!(f, "Mode Query"),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Default)]
pub struct TerminalModes {
    pub cursor_key: Decckm,
    pub bracketed_paste: RlBracket,
    pub focus_reporting: XtMseWin,
    pub cursor_blinking: XtCBlink,
    pub mouse_tracking: MouseTrack,
    pub synchronized_updates: SynchronizedUpdates,
    pub invert_screen: Decscnm,
    pub repeat_keys: Decarm,
    pub reverse_wrap_around: ReverseWrapAround,
    pub line_feed_mode: Lnm,
}

#[derive(Eq, PartialEq, Debug, Default, Clone)]
pub enum Mode {
    #[default]
    NoOp,
    // Cursor keys mode
    // https://vt100.net/docs/vt100-ug/chapter3.html
    AllowColumnModeSwitch(AllowColumnModeSwitch),
    Decckm(Decckm),
    Decawm(Decawm),
    Dectem(Dectcem),
    Deccolm(Deccolm),
    Decsclm(Decsclm),
    Decscnm(Decscnm),
    Decom(Decom),
    Decarm(Decarm),
    LineFeedMode(Lnm),
    InsertMode(Irm),
    XtCBlink(XtCBlink),
    XtExtscrn(XtExtscrn),
    /// `?47` — switch buffers only; no clear, no cursor save.
    AltScreenBasic(AltScreenBasic),
    /// `?1047` — save cursor, switch; exit restores cursor. No clear.
    AltScreenSaveCursor(AltScreenSaveCursor),
    XtMseWin(XtMseWin),
    BracketedPaste(RlBracket),
    MouseMode(MouseTrack),
    ReverseWrapAround(ReverseWrapAround),
    SynchronizedUpdates(SynchronizedUpdates),
    GraphemeClustering(GraphemeClustering),
    Theming(Theming),
    UnknownQuery(Vec<u8>),
    Unknown(UnknownMode),
}

impl Mode {
    #[must_use]
    pub fn terminal_mode_from_params(params: &[u8], mode: &SetMode) -> Self {
        match params {
            // https://vt100.net/docs/vt510-rm/DECCKM.html
            b"?1" => Self::Decckm(Decckm::new(mode)),
            b"?3" => Self::Deccolm(Deccolm::new(mode)),
            b"?4" => Self::Decsclm(Decsclm::new(mode)),
            b"?5" => Self::Decscnm(Decscnm::new(mode)),
            b"?6" => Self::Decom(Decom::new(mode)),
            b"?7" => Self::Decawm(Decawm::new(mode)),
            b"?8" => Self::Decarm(Decarm::new(mode)),
            b"4" => Self::InsertMode(Irm::new(mode)),
            // TODO: Implement this
            b"?9" => {
                if mode == &SetMode::DecSet {
                    Self::MouseMode(MouseTrack::XtMsex10)
                } else if mode == &SetMode::DecRst {
                    Self::MouseMode(MouseTrack::NoTracking)
                } else {
                    Self::MouseMode(MouseTrack::Query(9))
                }
            }
            b"?12" => Self::XtCBlink(XtCBlink::new(mode)),
            b"20" => Self::LineFeedMode(Lnm::new(mode)),
            b"?25" => Self::Dectem(Dectcem::new(mode)),
            b"?40" => Self::AllowColumnModeSwitch(AllowColumnModeSwitch::new(mode)),
            b"?45" => Self::ReverseWrapAround(ReverseWrapAround::new(mode)),
            b"?1000" => {
                if mode == &SetMode::DecSet {
                    Self::MouseMode(MouseTrack::XtMseX11)
                } else if mode == &SetMode::DecRst {
                    Self::MouseMode(MouseTrack::NoTracking)
                } else {
                    Self::MouseMode(MouseTrack::Query(1000))
                }
            }
            b"?1002" => {
                if mode == &SetMode::DecSet {
                    Self::MouseMode(MouseTrack::XtMseBtn)
                } else if mode == &SetMode::DecRst {
                    Self::MouseMode(MouseTrack::NoTracking)
                } else {
                    Self::MouseMode(MouseTrack::Query(1002))
                }
            }
            b"?1003" => {
                if mode == &SetMode::DecSet {
                    Self::MouseMode(MouseTrack::XtMseAny)
                } else if mode == &SetMode::DecRst {
                    Self::MouseMode(MouseTrack::NoTracking)
                } else {
                    Self::MouseMode(MouseTrack::Query(1003))
                }
            }
            b"?1004" => Self::XtMseWin(XtMseWin::new(mode)),
            // TODO: Implement this
            b"?1005" => {
                if mode == &SetMode::DecSet {
                    Self::MouseMode(MouseTrack::XtMseUtf)
                } else if mode == &SetMode::DecRst {
                    Self::MouseMode(MouseTrack::NoTracking)
                } else {
                    Self::MouseMode(MouseTrack::Query(1005))
                }
            }
            // TODO: Implement this
            b"?1006" => {
                if mode == &SetMode::DecSet {
                    Self::MouseMode(MouseTrack::XtMseSgr)
                } else if mode == &SetMode::DecRst {
                    Self::MouseMode(MouseTrack::NoTracking)
                } else {
                    Self::MouseMode(MouseTrack::Query(1006))
                }
            }
            // For now, we'll ignore this. Reading documentation it seems like this is
            // a pretty terrible format to use for mouse tracking.
            // From the documentation:
            // However, CSI M  can be mistaken for DL (delete lines), while
            //   the highlight tracking CSI T  can be mistaken for SD (scroll
            //   down), and the Window manipulation controls.  For these
            //   reasons, the 1015 control is not recommended; it is not an
            //  improvement over 1006.
            // b"?1015" => {
            //     if mode == &SetMode::DecSet {
            //         Self::MouseMode(MouseTrack::XtMseUrXvt)
            //     } else if mode == &SetMode::DecRst {
            //         Self::MouseMode(MouseTrack::NoTracking)
            //     } else {
            //         Self::MouseMode(MouseTrack::Query(1015))
            //     }
            // }
            // TODO: Implement this
            b"?1016" => {
                if mode == &SetMode::DecSet {
                    Self::MouseMode(MouseTrack::XtMseSgrPixels)
                } else if mode == &SetMode::DecRst {
                    Self::MouseMode(MouseTrack::NoTracking)
                } else {
                    Self::MouseMode(MouseTrack::Query(1016))
                }
            }
            b"?47" => Self::AltScreenBasic(AltScreenBasic::new(mode)),
            b"?1047" => Self::AltScreenSaveCursor(AltScreenSaveCursor::new(mode)),
            b"?1049" => Self::XtExtscrn(XtExtscrn::new(mode)),
            b"?2004" => Self::BracketedPaste(RlBracket::new(mode)),
            b"?2026" => Self::SynchronizedUpdates(SynchronizedUpdates::new(mode)),
            b"?2027" => {
                // Grapheme Clustering Mode
                Self::GraphemeClustering(GraphemeClustering::new(mode))
            }
            b"?2031" => {
                // Theming Mode
                Self::Theming(Theming::new(mode))
            }
            _ => {
                let output_params = params
                    .to_vec()
                    .iter()
                    .skip(usize::from(params.first().unwrap_or(&b'?') == &b'?'))
                    .copied()
                    .collect::<Vec<u8>>();

                if mode == &SetMode::DecQuery {
                    Self::UnknownQuery(output_params)
                } else {
                    Self::Unknown(UnknownMode::new(&output_params, *mode))
                }
            }
        }
    }
}

impl Mode {
    /// `true` if this value resulted from a DECRQM query (`CSI ? Pm $ p`)
    /// rather than a set/reset, i.e. it carries no state change and a
    /// caller should answer it with `report(None)` instead of applying it.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        match self {
            Self::Decckm(m) => matches!(m, Decckm::Query),
            Self::Decawm(m) => matches!(m, Decawm::Query),
            Self::Dectem(m) => matches!(m, Dectcem::Query),
            Self::Decom(m) => matches!(m, Decom::Query),
            Self::Decarm(m) => matches!(m, Decarm::Query),
            Self::Deccolm(m) => matches!(m, Deccolm::Query),
            Self::Decsclm(m) => matches!(m, Decsclm::Query),
            Self::Decscnm(m) => matches!(m, Decscnm::Query),
            Self::LineFeedMode(m) => matches!(m, Lnm::Query),
            Self::InsertMode(m) => matches!(m, Irm::Query),
            Self::BracketedPaste(m) => matches!(m, RlBracket::Query),
            Self::GraphemeClustering(m) => matches!(m, GraphemeClustering::Query),
            Self::AltScreenBasic(m) => matches!(m, AltScreenBasic::Query),
            Self::AltScreenSaveCursor(m) => matches!(m, AltScreenSaveCursor::Query),
            Self::XtExtscrn(m) => matches!(m, XtExtscrn::Query),
            Self::XtCBlink(m) => matches!(m, XtCBlink::Query),
            Self::XtMseWin(m) => matches!(m, XtMseWin::Query),
            Self::MouseMode(m) => matches!(m, MouseTrack::Query(_)),
            Self::ReverseWrapAround(m) => matches!(m, ReverseWrapAround::Query),
            Self::SynchronizedUpdates(m) => matches!(m, SynchronizedUpdates::Query),
            Self::Theming(m) => matches!(m, Theming::Query),
            Self::AllowColumnModeSwitch(m) => matches!(m, AllowColumnModeSwitch::Query),
            Self::UnknownQuery(_) => true,
            Self::NoOp | Self::Unknown(_) => false,
        }
    }
}

impl ReportMode for Mode {
    fn report(&self, override_mode: Option<SetMode>) -> String {
        match self {
            Self::NoOp => "NoOp".into(),
            Self::AllowColumnModeSwitch(allow_column_mode_switch) => {
                allow_column_mode_switch.report(override_mode)
            }
            Self::Decarm(decarm) => decarm.report(override_mode),
            Self::Decckm(decckm) => decckm.report(override_mode),
            Self::Decom(decom) => decom.report(override_mode),
            Self::Deccolm(deccolm) => deccolm.report(override_mode),
            Self::Decsclm(decsclm) => decsclm.report(override_mode),
            Self::Decawm(decawm) => decawm.report(override_mode),
            Self::Dectem(dectem) => dectem.report(override_mode),
            Self::Decscnm(decscnm) => decscnm.report(override_mode),
            Self::LineFeedMode(lnm) => lnm.report(override_mode),
            Self::InsertMode(irm) => irm.report(override_mode),
            Self::XtCBlink(xt_cblink) => xt_cblink.report(override_mode),
            Self::XtExtscrn(xt_extscrn) => xt_extscrn.report(override_mode),
            Self::AltScreenBasic(alt_screen_basic) => alt_screen_basic.report(override_mode),
            Self::AltScreenSaveCursor(alt_screen_save_cursor) => {
                alt_screen_save_cursor.report(override_mode)
            }
            Self::XtMseWin(xt_mse_win) => xt_mse_win.report(override_mode),
            Self::BracketedPaste(rl_bracket) => rl_bracket.report(override_mode),
            Self::MouseMode(mouse_mode) => mouse_mode.report(override_mode),
            Self::ReverseWrapAround(reverse_wrap_around) => {
                reverse_wrap_around.report(override_mode)
            }
            Self::SynchronizedUpdates(sync_updates) => sync_updates.report(override_mode),
            Self::GraphemeClustering(grapheme_clustering) => {
                grapheme_clustering.report(override_mode)
            }
            Self::Theming(theming) => theming.report(override_mode),
            Self::Unknown(mode) => mode.report(override_mode),
            Self::UnknownQuery(v) => {
                // convert each digit to a char
                let digits = v.iter().map(|&x| x as char).collect::<String>();
                format!("\x1b[?{digits};0$y")
            }
        }
    }
}

/// Side effect a mode message has on buffer selection, beyond the plain
/// flag flips `ModeState` tracks directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    None,
    /// `?47`/`?1047` entry: switch buffers, no clear, no fresh cursor save.
    EnterAltScreenPreserve,
    /// `?1049` entry: save cursor, switch, clear.
    EnterAltScreenClear,
    /// Any alt-screen mode's reset: leave alternate, restore primary.
    LeaveAltScreen,
    /// DECOM toggled: home the cursor within the (possibly new) origin.
    HomeCursor,
    /// DECAWM toggled: push the new autowrap flag down into the buffer's
    /// own wrap-pending discipline.
    SetAutowrap(bool),
}

/// Boolean mode flags a handler needs to consult while processing data and
/// other escape sequences (autowrap, origin addressing, cursor visibility,
/// UTF-8 vs charset-translated text, application cursor keys, bracketed
/// paste). Buffer-switching modes are reported via `ModeAction` instead,
/// since they require calling back into the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeState {
    pub autowrap: bool,
    pub origin_mode: bool,
    pub cursor_visible: bool,
    /// Mode 2027. `true` bypasses charset translation (plain UTF-8); `false`
    /// routes printable bytes through the G0/G1 charset table.
    pub utf8_mode: bool,
    pub application_cursor_keys: bool,
    pub bracketed_paste: bool,
    /// IRM (CSI 4 h/l). Tracked for DECRQM round-trips only; `insert_text`
    /// does not consult it (see Open Questions in DESIGN.md).
    pub insert_mode: bool,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            autowrap: true,
            origin_mode: false,
            cursor_visible: true,
            utf8_mode: true,
            application_cursor_keys: false,
            bracketed_paste: false,
            insert_mode: false,
        }
    }
}

/// Lets `TerminalOutput`'s generic `Mode` payload update terminal flags
/// without the consumer knowing which concrete mode type it is
/// parameterized over (mirrors `sgr::ApplySgr`).
pub trait ApplyMode {
    fn apply(&self, state: &mut ModeState) -> ModeAction;
}

impl ApplyMode for Mode {
    fn apply(&self, state: &mut ModeState) -> ModeAction {
        match self {
            Self::Decawm(m) => match m {
                Decawm::Query => ModeAction::None,
                _ => {
                    state.autowrap = matches!(m, Decawm::Autowrap);
                    ModeAction::SetAutowrap(state.autowrap)
                }
            },
            Self::Decom(m) => match m {
                Decom::Query => ModeAction::None,
                _ => {
                    state.origin_mode = matches!(m, Decom::OriginMode);
                    ModeAction::HomeCursor
                }
            },
            Self::Dectem(m) => {
                if !matches!(m, Dectcem::Query) {
                    state.cursor_visible = matches!(m, Dectcem::Show);
                }
                ModeAction::None
            }
            Self::Decckm(m) => {
                if !matches!(m, Decckm::Query) {
                    state.application_cursor_keys = matches!(m, Decckm::Application);
                }
                ModeAction::None
            }
            Self::BracketedPaste(m) => {
                if !matches!(m, RlBracket::Query) {
                    state.bracketed_paste = matches!(m, RlBracket::Enabled);
                }
                ModeAction::None
            }
            Self::GraphemeClustering(m) => {
                if !matches!(m, GraphemeClustering::Query) {
                    state.utf8_mode = matches!(m, GraphemeClustering::Unicode);
                }
                ModeAction::None
            }
            Self::InsertMode(m) => {
                if !matches!(m, Irm::Query) {
                    state.insert_mode = matches!(m, Irm::Insert);
                }
                ModeAction::None
            }
            Self::AltScreenBasic(m) => match m {
                AltScreenBasic::Alternate => ModeAction::EnterAltScreenPreserve,
                AltScreenBasic::Primary => ModeAction::LeaveAltScreen,
                AltScreenBasic::Query => ModeAction::None,
            },
            Self::AltScreenSaveCursor(m) => match m {
                AltScreenSaveCursor::Alternate => ModeAction::EnterAltScreenPreserve,
                AltScreenSaveCursor::Primary => ModeAction::LeaveAltScreen,
                AltScreenSaveCursor::Query => ModeAction::None,
            },
            Self::XtExtscrn(m) => match m {
                XtExtscrn::Alternate => ModeAction::EnterAltScreenClear,
                XtExtscrn::Primary => ModeAction::LeaveAltScreen,
                XtExtscrn::Query => ModeAction::None,
            },
            _ => ModeAction::None,
        }
    }
}

impl ApplyMode for () {
    fn apply(&self, _state: &mut ModeState) -> ModeAction {
        ModeAction::None
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOp => write!(f, "NoOp"),
            Self::AllowColumnModeSwitch(allow_column_mode_switch) => {
                write!(f, "{allow_column_mode_switch}")
            }
            Self::Decarm(decarm) => write!(f, "{decarm}"),
            Self::Decckm(decckm) => write!(f, "{decckm}"),
            Self::Decawm(decawm) => write!(f, "{decawm}"),
            Self::Decom(decom) => write!(f, "{decom}"),
            Self::Dectem(dectem) => write!(f, "{dectem}"),
            Self::Decscnm(decscnm) => write!(f, "{decscnm}"),
            Self::Decsclm(decsclm) => write!(f, "{decsclm}"),
            Self::Deccolm(deccolm) => write!(f, "{deccolm}"),
            Self::LineFeedMode(lnm) => write!(f, "{lnm}"),
            Self::InsertMode(irm) => write!(f, "{irm}"),
            Self::XtCBlink(xt_cblink) => write!(f, "{xt_cblink}"),
            Self::MouseMode(mouse_mode) => write!(f, "{mouse_mode}"),
            Self::XtMseWin(xt_mse_win) => write!(f, "{xt_mse_win}"),
            Self::XtExtscrn(xt_extscrn) => write!(f, "{xt_extscrn}"),
            Self::AltScreenBasic(alt_screen_basic) => write!(f, "{alt_screen_basic}"),
            Self::AltScreenSaveCursor(alt_screen_save_cursor) => {
                write!(f, "{alt_screen_save_cursor}")
            }
            Self::BracketedPaste(bracketed_paste) => write!(f, "{bracketed_paste}"),
            Self::ReverseWrapAround(reverse_wrap_around) => write!(f, "{reverse_wrap_around}"),
            Self::SynchronizedUpdates(sync_updates) => write!(f, "{sync_updates}"),
            Self::GraphemeClustering(grapheme_clustering) => write!(f, "{grapheme_clustering}"),
            Self::Theming(theming) => write!(f, "{theming}"),
            Self::Unknown(params) => write!(f, "{params}"),
            Self::UnknownQuery(v) => write!(f, "Unknown Query({v:?})"),
        }
    }
}
