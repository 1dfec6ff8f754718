// Copyright (C) 2024-2025 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use termcore_common::buffer_states::{
    format_tag::FormatTag,
    line_draw::{ApplyCharsetDesignation, dec_special_graphics_substitute},
    mode::{ApplyMode, ModeAction, ModeState},
    osc::ApplyOsc,
    terminal_output::{EraseMode, TerminalOutput},
    tchar::TChar,
};
use termcore_common::cursor::CursorVisualStyle;
use termcore_common::sgr::ApplySgr;

use crate::buffer::Buffer;

/// Cursor + styling snapshot taken by DECSC/CSI s, restored by DECRC/CSI u.
///
/// The parser emits the same `SaveCursor`/`RestoreCursor` messages for both
/// entry points (`ESC 7`/`ESC 8` and `CSI s`/`CSI u`), so a single slot is
/// shared between them rather than keeping two independent ones.
#[derive(Clone)]
struct SavedCursor {
    x: usize,
    y: usize,
    format: FormatTag,
    gl_invoked_g1: bool,
    g0_dec_special: bool,
    g1_dec_special: bool,
}

/// High-level handler that processes terminal output commands and applies them to a buffer.
///
/// This is the main entry point for integrating the buffer with a terminal emulator.
/// It receives parsed terminal sequences (via a TerminalOutput-like enum) and updates
/// the buffer state accordingly.
pub struct TerminalHandler {
    buffer: Buffer,
    current_format: FormatTag,
    modes: ModeState,
    saved_cursor: Option<SavedCursor>,
    /// `true` once G0 has DEC Special Graphics designated to it (`ESC ( 0`).
    g0_dec_special: bool,
    /// `true` once G1 has DEC Special Graphics designated to it. The parser
    /// only ever emits the plain `CharsetG1` designation today, so this
    /// stays `false` in practice; the flag exists for when that's fixed.
    g1_dec_special: bool,
    /// SI/SO: which of G0 (`false`) or G1 (`true`) is invoked into GL.
    gl_invoked_g1: bool,
    bell_rung: bool,
    application_keypad: bool,
    cursor_style: CursorVisualStyle,
    /// Remembered so RIS (`hard_reset`) can rebuild the buffer with the
    /// same cap it was created with instead of silently falling back to
    /// `Buffer::new`'s default.
    scrollback_limit: usize,
}

impl TerminalHandler {
    /// Create a new terminal handler with the specified dimensions
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_scrollback_limit(width, height, crate::buffer::DEFAULT_SCROLLBACK_LIMIT)
    }

    /// Create a new terminal handler with an explicit scrollback cap.
    #[must_use]
    pub fn with_scrollback_limit(width: usize, height: usize, scrollback_limit: usize) -> Self {
        Self {
            buffer: Buffer::with_scrollback_limit(width, height, scrollback_limit),
            current_format: FormatTag::default(),
            modes: ModeState::default(),
            saved_cursor: None,
            g0_dec_special: false,
            g1_dec_special: false,
            gl_invoked_g1: false,
            bell_rung: false,
            application_keypad: false,
            cursor_style: CursorVisualStyle::default(),
            scrollback_limit,
        }
    }

    /// Get a reference to the underlying buffer
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Get a mutable reference to the underlying buffer
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Current mode flags (autowrap, origin mode, cursor visibility, UTF-8
    /// bypass, application cursor keys, bracketed paste).
    #[must_use]
    pub const fn modes(&self) -> &ModeState {
        &self.modes
    }

    /// `true` if a bell (BEL) has rung since the last call, clearing the flag.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_rung)
    }

    /// `true` if the keypad is currently in application mode (DECKPAM/DECKPNM).
    #[must_use]
    pub const fn application_keypad(&self) -> bool {
        self.application_keypad
    }

    /// Current cursor shape set by DECSCUSR (`CSI Ps SP q`).
    #[must_use]
    pub const fn cursor_style(&self) -> &CursorVisualStyle {
        &self.cursor_style
    }

    /// RIS (ESC c): full reset. Clears both screen buffers and scrollback,
    /// and reinitializes every piece of tracked state to its default.
    pub fn hard_reset(&mut self, width: usize, height: usize) {
        self.buffer = Buffer::with_scrollback_limit(width, height, self.scrollback_limit);
        self.current_format = FormatTag::default();
        self.modes = ModeState::default();
        self.saved_cursor = None;
        self.g0_dec_special = false;
        self.g1_dec_special = false;
        self.gl_invoked_g1 = false;
        self.bell_rung = false;
        self.application_keypad = false;
        self.cursor_style = CursorVisualStyle::default();
    }

    /// DECSTR: soft reset. Restores default modes, full-screen scroll
    /// region, default tab stops, visible cursor homed at the origin,
    /// default SGR, and unprotected cells, without touching screen content
    /// or scrollback.
    pub fn soft_reset(&mut self) {
        self.modes = ModeState::default();
        self.saved_cursor = None;
        self.buffer.set_scroll_region(0, 0); // also homes the cursor
        self.buffer.reset_tab_stops();
        self.buffer.set_character_protection(false);
        self.buffer.set_autowrap(true);
        self.set_format(FormatTag::default());
    }

    /// Handle raw data bytes - convert to TChar and insert
    pub fn handle_data(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        let translated = self.charset_translate(data);

        if let Ok(text) = TChar::from_vec(&translated) {
            self.buffer.insert_text(&text);
        }
    }

    /// Substitute DEC Special Graphics glyphs for bytes `0x60..=0x7e` when
    /// the invoked charset calls for it. Bypassed entirely in UTF-8 mode,
    /// and a no-op when the invoked G-set is plain ASCII.
    fn charset_translate(&self, data: &[u8]) -> Vec<u8> {
        if self.modes.utf8_mode || !self.dec_special_graphics_invoked() {
            return data.to_vec();
        }

        let mut out = Vec::with_capacity(data.len());
        let mut char_buf = [0_u8; 4];
        for &b in data {
            if let Some(c) = dec_special_graphics_substitute(b) {
                out.extend_from_slice(c.encode_utf8(&mut char_buf).as_bytes());
            } else {
                out.push(b);
            }
        }
        out
    }

    const fn dec_special_graphics_invoked(&self) -> bool {
        if self.gl_invoked_g1 {
            self.g1_dec_special
        } else {
            self.g0_dec_special
        }
    }

    /// Handle newline (LF)
    pub fn handle_newline(&mut self) {
        self.buffer.handle_lf();
    }

    /// Handle carriage return (CR)
    pub fn handle_carriage_return(&mut self) {
        self.buffer.handle_cr();
    }

    /// Handle backspace
    pub fn handle_backspace(&mut self) {
        self.buffer.handle_backspace();
    }

    /// Handle cursor position (CUP, HVP)
    /// x and y are typically 1-indexed from the parser, so we subtract 1.
    /// Under DECOM, the row is additionally relative to the scroll region's
    /// top margin rather than the whole screen.
    pub fn handle_cursor_pos(&mut self, x: Option<usize>, y: Option<usize>) {
        let x_zero = x.map(|v| v.saturating_sub(1));
        let mut y_zero = y.map(|v| v.saturating_sub(1));
        if self.modes.origin_mode {
            let (top, bottom) = self.buffer.scroll_region();
            y_zero = Some(y_zero.unwrap_or(0).min(bottom - top) + top);
        }
        self.buffer.set_cursor_pos(x_zero, y_zero);
    }

    /// Home the cursor to the origin: (0,0) normally, or the scroll
    /// region's top-left corner when DECOM is on. Triggered by toggling
    /// origin mode itself.
    fn home_cursor_for_origin(&mut self) {
        if self.modes.origin_mode {
            let (top, _bottom) = self.buffer.scroll_region();
            self.buffer.set_cursor_pos(Some(0), Some(top));
        } else {
            self.buffer.set_cursor_pos(Some(0), Some(0));
        }
    }

    /// Handle relative cursor movement
    pub fn handle_cursor_relative(&mut self, dx: i32, dy: i32) {
        self.buffer.move_cursor_relative(dx, dy);
    }

    /// Handle cursor up (CUU)
    pub fn handle_cursor_up(&mut self, n: usize) {
        self.buffer.move_cursor_relative(0, -(n as i32));
    }

    /// Handle cursor down (CUD)
    pub fn handle_cursor_down(&mut self, n: usize) {
        self.buffer.move_cursor_relative(0, n as i32);
    }

    /// Handle cursor forward (CUF)
    pub fn handle_cursor_forward(&mut self, n: usize) {
        self.buffer.move_cursor_relative(n as i32, 0);
    }

    /// Handle cursor backward (CUB)
    pub fn handle_cursor_backward(&mut self, n: usize) {
        self.buffer.move_cursor_relative(-(n as i32), 0);
    }

    /// Handle erase in display (ED)
    pub fn handle_erase_in_display(&mut self, mode: usize) {
        match mode {
            0 => self.buffer.erase_to_end_of_display(),
            1 => self.buffer.erase_to_beginning_of_display(),
            2 => self.buffer.erase_display(),
            3 => self.buffer.erase_scrollback(),
            _ => {} // Unknown mode, ignore
        }
    }

    /// Handle erase in line (EL)
    pub fn handle_erase_in_line(&mut self, mode: usize) {
        match mode {
            0 => self.buffer.erase_line_to_end(),
            1 => self.buffer.erase_line_to_beginning(),
            2 => self.buffer.erase_line(),
            _ => {} // Unknown mode, ignore
        }
    }

    /// Handle selective erase in display (DECSED)
    fn handle_selective_erase_in_display(&mut self, mode: EraseMode) {
        match mode {
            EraseMode::ToEnd => self.buffer.erase_to_end_of_display_selective(),
            EraseMode::ToBeginning => self.buffer.erase_to_beginning_of_display_selective(),
            EraseMode::All => self.buffer.erase_display_selective(),
            // No selective variant of "erase scrollback" exists: scrollback
            // rows carry no live protected cells, so plain eviction applies.
            EraseMode::Scrollback => self.buffer.erase_scrollback(),
        }
    }

    /// Handle selective erase in line (DECSEL)
    fn handle_selective_erase_in_line(&mut self, mode: EraseMode) {
        match mode {
            EraseMode::ToEnd => self.buffer.erase_line_to_end_selective(),
            EraseMode::ToBeginning => self.buffer.erase_line_to_beginning_selective(),
            EraseMode::All | EraseMode::Scrollback => self.buffer.erase_line_selective(),
        }
    }

    /// Handle insert lines (IL)
    pub fn handle_insert_lines(&mut self, n: usize) {
        self.buffer.insert_lines(n);
    }

    /// Handle delete lines (DL)
    pub fn handle_delete_lines(&mut self, n: usize) {
        self.buffer.delete_lines(n);
    }

    /// Handle insert spaces (ICH)
    pub fn handle_insert_spaces(&mut self, n: usize) {
        self.buffer.insert_spaces(n);
    }

    /// Handle set top and bottom margins (DECSTBM)
    ///
    /// `top`/`bottom` are the 1-indexed values straight off the wire;
    /// `Buffer::set_scroll_region` does its own conversion to 0-based rows.
    pub fn handle_set_scroll_region(&mut self, top: usize, bottom: usize) {
        self.buffer.set_scroll_region(top, bottom);
    }

    /// Handle index (IND)
    pub fn handle_index(&mut self) {
        self.buffer.handle_ind();
    }

    /// Handle reverse index (RI)
    pub fn handle_reverse_index(&mut self) {
        self.buffer.handle_ri();
    }

    /// Handle next line (NEL)
    pub fn handle_next_line(&mut self) {
        self.buffer.handle_nel();
    }

    /// Apply an SGR attribute to the running format tag used for subsequent writes.
    fn handle_sgr<SGR: ApplySgr>(&mut self, sgr: &SGR) {
        let mut tag = self.current_format.clone();
        sgr.apply_to(&mut tag);
        self.set_format(tag);
    }

    /// Apply a mode set/reset/query message to terminal flags and, for
    /// alternate-screen modes, the buffer selection.
    fn handle_mode<MODE: ApplyMode>(&mut self, mode: &MODE) {
        match mode.apply(&mut self.modes) {
            ModeAction::None => {}
            ModeAction::EnterAltScreenPreserve => self.buffer.enter_alternate_preserve(),
            ModeAction::EnterAltScreenClear => self.buffer.enter_alternate(),
            ModeAction::LeaveAltScreen => self.buffer.leave_alternate(),
            ModeAction::HomeCursor => self.home_cursor_for_origin(),
            ModeAction::SetAutowrap(enabled) => self.buffer.set_autowrap(enabled),
        }
    }

    /// Apply an OSC message's effect on cell styling (only OSC 8 hyperlinks
    /// reach the buffer layer; title/icon/clipboard are the host's job).
    fn handle_osc<OSC: ApplyOsc>(&mut self, osc: &OSC) {
        if let Some(url) = osc.hyperlink() {
            let mut tag = self.current_format.clone();
            tag.url = url;
            self.set_format(tag);
        }
    }

    /// Update format tag directly
    pub fn set_format(&mut self, format: FormatTag) {
        self.current_format = format.clone();
        self.buffer.set_format(format);
    }

    /// Handle entering alternate screen
    pub fn handle_enter_alternate(&mut self) {
        self.buffer.enter_alternate();
    }

    /// Handle leaving alternate screen
    pub fn handle_leave_alternate(&mut self) {
        self.buffer.leave_alternate();
    }

    /// Handle resize
    pub fn handle_resize(&mut self, width: usize, height: usize) {
        self.buffer.set_size(width, height);
    }

    /// Handle scroll back (user scrolling)
    pub fn handle_scroll_back(&mut self, lines: usize) {
        self.buffer.scroll_back(lines);
    }

    /// Handle scroll forward (user scrolling)
    pub fn handle_scroll_forward(&mut self, lines: usize) {
        self.buffer.scroll_forward(lines);
    }

    /// Handle scroll to bottom
    pub fn handle_scroll_to_bottom(&mut self) {
        self.buffer.scroll_to_bottom();
    }

    /// DECSC/CSI s — snapshot cursor position, running format, and charset state.
    fn handle_save_cursor(&mut self) {
        let pos = self.buffer.get_cursor().pos;
        self.saved_cursor = Some(SavedCursor {
            x: pos.x,
            y: pos.y,
            format: self.current_format.clone(),
            gl_invoked_g1: self.gl_invoked_g1,
            g0_dec_special: self.g0_dec_special,
            g1_dec_special: self.g1_dec_special,
        });
    }

    /// DECRC/CSI u — restore a prior save, or home to (0,0) with default
    /// style if nothing was saved yet.
    fn handle_restore_cursor(&mut self) {
        match self.saved_cursor.clone() {
            Some(saved) => {
                self.buffer.set_cursor_pos(Some(saved.x), Some(saved.y));
                self.set_format(saved.format);
                self.gl_invoked_g1 = saved.gl_invoked_g1;
                self.g0_dec_special = saved.g0_dec_special;
                self.g1_dec_special = saved.g1_dec_special;
            }
            None => {
                self.buffer.set_cursor_pos(Some(0), Some(0));
                self.set_format(FormatTag::default());
                self.gl_invoked_g1 = false;
                self.g0_dec_special = false;
                self.g1_dec_special = false;
            }
        }
    }

    /// Process an array of TerminalOutput commands
    ///
    /// This is the main entry point for integrating with the parser.
    /// It dispatches each TerminalOutput variant to the appropriate handler method.
    pub fn process_outputs<SGR, MODE, OSC, DECSG>(
        &mut self,
        outputs: &[TerminalOutput<SGR, MODE, OSC, DECSG>],
    ) where
        SGR: std::fmt::Debug + ApplySgr,
        MODE: std::fmt::Debug + ApplyMode,
        OSC: std::fmt::Debug + ApplyOsc,
        DECSG: std::fmt::Debug + ApplyCharsetDesignation,
    {
        for output in outputs {
            self.process_output(output);
        }
    }

    /// Process a single TerminalOutput command
    #[allow(clippy::too_many_lines)]
    fn process_output<SGR, MODE, OSC, DECSG>(
        &mut self,
        output: &TerminalOutput<SGR, MODE, OSC, DECSG>,
    ) where
        SGR: std::fmt::Debug + ApplySgr,
        MODE: std::fmt::Debug + ApplyMode,
        OSC: std::fmt::Debug + ApplyOsc,
        DECSG: std::fmt::Debug + ApplyCharsetDesignation,
    {
        match output {
            TerminalOutput::Data(bytes) => {
                self.handle_data(bytes);
            }
            TerminalOutput::Newline => {
                self.handle_newline();
            }
            TerminalOutput::CarriageReturn => {
                self.handle_carriage_return();
            }
            TerminalOutput::Backspace => {
                self.handle_backspace();
            }
            TerminalOutput::SetCursorPos { x, y } => {
                self.handle_cursor_pos(*x, *y);
            }
            TerminalOutput::SetCursorPosRel { x, y } => {
                let dx = x.unwrap_or(0);
                let dy = y.unwrap_or(0);
                self.handle_cursor_relative(dx, dy);
            }
            TerminalOutput::ClearDisplayfromCursortoEndofDisplay => {
                self.handle_erase_in_display(0);
            }
            TerminalOutput::ClearDisplayfromStartofDisplaytoCursor => {
                self.handle_erase_in_display(1);
            }
            TerminalOutput::ClearDisplay => {
                self.handle_erase_in_display(2);
            }
            TerminalOutput::ClearScrollbackandDisplay => {
                self.handle_erase_in_display(3);
            }
            TerminalOutput::ClearLineForwards => {
                self.handle_erase_in_line(0);
            }
            TerminalOutput::ClearLineBackwards => {
                self.handle_erase_in_line(1);
            }
            TerminalOutput::ClearLine => {
                self.handle_erase_in_line(2);
            }
            TerminalOutput::SelectiveEraseDisplay(mode) => {
                self.handle_selective_erase_in_display(*mode);
            }
            TerminalOutput::SelectiveEraseLine(mode) => {
                self.handle_selective_erase_in_line(*mode);
            }
            TerminalOutput::InsertLines(n) => {
                self.handle_insert_lines(*n);
            }
            TerminalOutput::Delete(n) => {
                self.handle_delete_lines(*n);
            }
            TerminalOutput::InsertSpaces(n) => {
                self.handle_insert_spaces(*n);
            }
            TerminalOutput::Erase(n) => {
                self.buffer.erase_chars(*n);
            }
            TerminalOutput::SetTopAndBottomMargins {
                top_margin,
                bottom_margin,
            } => {
                self.handle_set_scroll_region(*top_margin, *bottom_margin);
            }
            TerminalOutput::Index => self.handle_index(),
            TerminalOutput::ReverseIndex => self.handle_reverse_index(),
            TerminalOutput::NextLine => self.handle_next_line(),
            TerminalOutput::ScrollUp(n) => self.buffer.scroll_up_in_region(*n),
            TerminalOutput::ScrollDown(n) => self.buffer.scroll_down_in_region(*n),
            TerminalOutput::HorizontalTab => self.buffer.handle_tab(),
            TerminalOutput::HorizontalTabSet => self.buffer.set_tab_stop_at_cursor(),
            TerminalOutput::ClearTabStop { all } => {
                if *all {
                    self.buffer.clear_all_tab_stops();
                } else {
                    self.buffer.clear_tab_stop_at_cursor();
                }
            }
            TerminalOutput::CursorForwardTabulation(n) => {
                self.buffer.cursor_forward_tabulation(*n);
            }
            TerminalOutput::CursorBackwardTabulation(n) => {
                self.buffer.cursor_backward_tabulation(*n);
            }
            TerminalOutput::CharacterProtection(on) => {
                self.buffer.set_character_protection(*on);
            }
            TerminalOutput::Sgr(sgr) => self.handle_sgr(sgr),
            TerminalOutput::Mode(mode) => self.handle_mode(mode),
            TerminalOutput::OscResponse(osc) => self.handle_osc(osc),
            TerminalOutput::SaveCursor => self.handle_save_cursor(),
            TerminalOutput::RestoreCursor => self.handle_restore_cursor(),
            TerminalOutput::Bell => self.bell_rung = true,
            TerminalOutput::ApplicationKeypadMode => self.application_keypad = true,
            TerminalOutput::NormalKeypadMode => self.application_keypad = false,
            TerminalOutput::ShiftIn => self.gl_invoked_g1 = false,
            TerminalOutput::ShiftOut => self.gl_invoked_g1 = true,
            TerminalOutput::DecSpecialGraphics(decsg) => {
                // Designation into G0 via `ESC ( 0`/`ESC ( B`. The parser
                // only ever emits this for the G0 slot today.
                self.g0_dec_special = decsg.designates_special();
            }
            TerminalOutput::CharsetG0 => self.g0_dec_special = false,
            TerminalOutput::CharsetG1 => self.g1_dec_special = false,
            // G2/G3 designation and GL/GR invocation beyond SI/SO, and the
            // national-replacement charsets, are recorded but not mapped:
            // minimum support is ASCII + DEC Special Graphics on G0/G1.
            TerminalOutput::CharsetG2
            | TerminalOutput::CharsetG2AsGR
            | TerminalOutput::CharsetG2AsGL
            | TerminalOutput::CharsetG3
            | TerminalOutput::CharsetG3AsGR
            | TerminalOutput::CharsetG3AsGL
            | TerminalOutput::CharsetG1AsGR
            | TerminalOutput::DecSpecial
            | TerminalOutput::CharsetUK
            | TerminalOutput::CharsetUS
            | TerminalOutput::CharsetUSASCII
            | TerminalOutput::CharsetDutch
            | TerminalOutput::CharsetFinnish
            | TerminalOutput::CharsetFrench
            | TerminalOutput::CharsetFrenchCanadian
            | TerminalOutput::CharsetGerman
            | TerminalOutput::CharsetItalian
            | TerminalOutput::CharsetNorwegianDanish
            | TerminalOutput::CharsetSpanish
            | TerminalOutput::CharsetSwedish
            | TerminalOutput::CharsetSwiss
            | TerminalOutput::CharsetDefault
            | TerminalOutput::CharsetUTF8 => {}
            TerminalOutput::CursorToLowerLeftCorner
            | TerminalOutput::ResetDevice
            | TerminalOutput::MemoryLock
            | TerminalOutput::MemoryUnlock
            | TerminalOutput::EightBitControl
            | TerminalOutput::SevenBitControl
            | TerminalOutput::AnsiConformanceLevelOne
            | TerminalOutput::AnsiConformanceLevelTwo
            | TerminalOutput::AnsiConformanceLevelThree
            | TerminalOutput::DoubleLineHeightTop
            | TerminalOutput::DoubleLineHeightBottom
            | TerminalOutput::SingleWidthLine
            | TerminalOutput::DoubleWidthLine
            | TerminalOutput::ScreenAlignmentTest => {
                // Recorded for protocol completeness; the buffer/grid model
                // has no behavior tied to these beyond what ED/resize cover.
            }
            // Reports, device queries, and control-string payloads are
            // answered by the embedding host, which owns the response sink;
            // this layer only mutates the grid, so they're no-ops here.
            TerminalOutput::CursorVisualStyle(style) => {
                self.cursor_style = style.clone();
            }
            TerminalOutput::CursorReport
            | TerminalOutput::DeviceStatusReport
            | TerminalOutput::WindowManipulation(_)
            | TerminalOutput::RequestDeviceAttributes
            | TerminalOutput::DeviceControlString(_)
            | TerminalOutput::ApplicationProgramCommand(_)
            | TerminalOutput::RequestDeviceNameAndVersion
            | TerminalOutput::RequestSecondaryDeviceAttributes { .. }
            | TerminalOutput::RequestXtVersion => {}
            TerminalOutput::Invalid | TerminalOutput::Skipped => {}
            // Catch-all for any future variants added to the non-exhaustive enum
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_creation() {
        let handler = TerminalHandler::new(80, 24);
        assert_eq!(handler.buffer().get_cursor().pos.x, 0);
        assert_eq!(handler.buffer().get_cursor().pos.y, 0);
    }

    #[test]
    fn test_handle_data() {
        let mut handler = TerminalHandler::new(80, 24);
        handler.handle_data(b"Hello");

        assert_eq!(handler.buffer().get_cursor().pos.x, 5);
        assert_eq!(handler.buffer().get_cursor().pos.y, 0);
    }

    #[test]
    fn test_handle_newline() {
        let mut handler = TerminalHandler::new(80, 24);
        handler.handle_data(b"Hello");
        handler.handle_newline();

        assert_eq!(handler.buffer().get_cursor().pos.y, 1);
    }

    #[test]
    fn test_handle_cursor_movement() {
        let mut handler = TerminalHandler::new(80, 24);

        // Move to position (10, 5) - parser sends 1-indexed
        handler.handle_cursor_pos(Some(11), Some(6));
        assert_eq!(handler.buffer().get_cursor().pos.x, 10);
        assert_eq!(handler.buffer().get_cursor().pos.y, 5);

        // Move right 5
        handler.handle_cursor_forward(5);
        assert_eq!(handler.buffer().get_cursor().pos.x, 15);

        // Move up 2
        handler.handle_cursor_up(2);
        assert_eq!(handler.buffer().get_cursor().pos.y, 3);
    }

    #[test]
    fn test_handle_erase_operations() {
        let mut handler = TerminalHandler::new(10, 5);

        // Fill with data
        handler.handle_data(b"Line1");
        handler.handle_newline();
        handler.handle_data(b"Line2");
        handler.handle_newline();
        handler.handle_data(b"Line3");

        // Move cursor to middle
        handler.handle_cursor_pos(Some(1), Some(2));

        // Erase to end of line
        handler.handle_erase_in_line(0);

        // The line should be partially cleared
        let rows = handler.buffer().visible_rows();
        assert!(rows.len() >= 2);
    }

    #[test]
    fn test_handle_insert_delete_lines() {
        let mut handler = TerminalHandler::new(10, 5);

        handler.handle_data(b"Line1");
        handler.handle_newline();
        handler.handle_data(b"Line2");

        // Go back to first line
        handler.handle_cursor_pos(Some(1), Some(1));

        // Insert a line
        handler.handle_insert_lines(1);

        let rows = handler.buffer().visible_rows();
        // Should have inserted a blank line, pushing content down
        assert!(rows.len() >= 2);
    }

    #[test]
    fn test_handle_scroll_region() {
        let mut handler = TerminalHandler::new(80, 24);

        // Set scroll region from line 5 to line 20 (1-indexed from parser)
        handler.handle_set_scroll_region(5, 20);

        // Buffer should have scroll region set (converted to 0-indexed)
        // This is hard to verify without exposing scroll region state,
        // but at least verify it doesn't panic
    }

    #[test]
    fn test_alternate_buffer() {
        let mut handler = TerminalHandler::new(80, 24);

        handler.handle_data(b"Primary");
        handler.handle_enter_alternate();
        handler.handle_data(b"Alternate");

        // Verify we're in alternate buffer
        handler.handle_leave_alternate();

        // Should restore primary buffer
        // (exact verification requires exposing buffer state)
    }

    #[test]
    fn test_backspace() {
        let mut handler = TerminalHandler::new(80, 24);

        handler.handle_data(b"Hello");
        assert_eq!(handler.buffer().get_cursor().pos.x, 5);

        handler.handle_backspace();
        assert_eq!(handler.buffer().get_cursor().pos.x, 4);
    }

    #[test]
    fn test_process_outputs() {
        use termcore_common::buffer_states::terminal_output::TerminalOutput;

        let mut handler = TerminalHandler::new(80, 24);

        let outputs = vec![
            TerminalOutput::<(), (), (), ()>::Data(b"Hello".to_vec()),
            TerminalOutput::<(), (), (), ()>::Newline,
            TerminalOutput::<(), (), (), ()>::CarriageReturn,
            TerminalOutput::<(), (), (), ()>::Data(b"World".to_vec()),
        ];

        handler.process_outputs(&outputs);

        assert_eq!(handler.buffer().get_cursor().pos.y, 1);
        assert_eq!(handler.buffer().get_cursor().pos.x, 5);
    }

    #[test]
    fn test_process_cursor_movements() {
        use termcore_common::buffer_states::terminal_output::TerminalOutput;

        let mut handler = TerminalHandler::new(80, 24);

        let outputs = vec![
            TerminalOutput::<(), (), (), ()>::SetCursorPos {
                x: Some(11),
                y: Some(6),
            },
            TerminalOutput::<(), (), (), ()>::Data(b"Test".to_vec()),
        ];

        handler.process_outputs(&outputs);

        assert_eq!(handler.buffer().get_cursor().pos.x, 14); // 10 + 4
        assert_eq!(handler.buffer().get_cursor().pos.y, 5); // 5 (0-indexed)
    }

    #[test]
    fn test_process_erase_operations() {
        use termcore_common::buffer_states::terminal_output::TerminalOutput;

        let mut handler = TerminalHandler::new(80, 24);

        let outputs = vec![
            TerminalOutput::<(), (), (), ()>::Data(b"Line 1".to_vec()),
            TerminalOutput::<(), (), (), ()>::Newline,
            TerminalOutput::<(), (), (), ()>::CarriageReturn,
            TerminalOutput::<(), (), (), ()>::Data(b"Line 2".to_vec()),
            TerminalOutput::<(), (), (), ()>::ClearDisplay,
        ];

        handler.process_outputs(&outputs);

        // Screen should be cleared
        let visible = handler.buffer().visible_rows();
        assert_eq!(visible.len(), 24);
    }

    #[test]
    fn test_save_restore_cursor_roundtrip() {
        use termcore_common::buffer_states::terminal_output::TerminalOutput;

        let mut handler = TerminalHandler::new(80, 24);
        let outputs = vec![
            TerminalOutput::<(), (), (), ()>::SetCursorPos {
                x: Some(10),
                y: Some(10),
            },
            TerminalOutput::<(), (), (), ()>::SaveCursor,
            TerminalOutput::<(), (), (), ()>::SetCursorPos { x: Some(1), y: Some(1) },
            TerminalOutput::<(), (), (), ()>::RestoreCursor,
        ];
        handler.process_outputs(&outputs);

        assert_eq!(handler.buffer().get_cursor().pos.x, 9);
        assert_eq!(handler.buffer().get_cursor().pos.y, 9);
    }

    #[test]
    fn test_restore_cursor_without_save_homes_to_origin() {
        use termcore_common::buffer_states::terminal_output::TerminalOutput;

        let mut handler = TerminalHandler::new(80, 24);
        let outputs = vec![
            TerminalOutput::<(), (), (), ()>::SetCursorPos {
                x: Some(10),
                y: Some(10),
            },
            TerminalOutput::<(), (), (), ()>::RestoreCursor,
        ];
        handler.process_outputs(&outputs);

        assert_eq!(handler.buffer().get_cursor().pos.x, 0);
        assert_eq!(handler.buffer().get_cursor().pos.y, 0);
    }

    #[test]
    fn test_bell_flag() {
        use termcore_common::buffer_states::terminal_output::TerminalOutput;

        let mut handler = TerminalHandler::new(80, 24);
        handler.process_outputs(&[TerminalOutput::<(), (), (), ()>::Bell]);
        assert!(handler.take_bell());
        assert!(!handler.take_bell());
    }

    #[test]
    fn test_tab_stops() {
        use termcore_common::buffer_states::terminal_output::TerminalOutput;

        let mut handler = TerminalHandler::new(80, 24);
        handler.process_outputs(&[TerminalOutput::<(), (), (), ()>::HorizontalTab]);
        assert_eq!(handler.buffer().get_cursor().pos.x, 8);

        handler.process_outputs(&[TerminalOutput::<(), (), (), ()>::HorizontalTabSet]);
        handler.handle_cursor_pos(Some(1), Some(1));
        handler.process_outputs(&[TerminalOutput::<(), (), (), ()>::CursorForwardTabulation(1)]);
        assert_eq!(handler.buffer().get_cursor().pos.x, 8);
    }
}
