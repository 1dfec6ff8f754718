// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The public, embeddable facade: one [`Terminal`] owns a parser, a
//! [`TerminalHandler`], and the bits of state that live above the grid
//! (window/icon title, the title stack, pending device-query responses,
//! and host observer callbacks). Everything else in this crate exists to
//! make this type possible.

use base64::Engine as _;

use termcore_buffer::terminal_handler::TerminalHandler;
use termcore_common::buffer_states::{
    cursor::CursorPos,
    format_tag::FormatTag,
    mode::Mode,
    osc::{AnsiOscInternalType, AnsiOscType},
    terminal_output::TerminalOutput,
    url::Url,
    window_manipulation::WindowManipulation,
};
use termcore_common::cursor::CursorVisualStyle;

use crate::ansi::AnsiParser;

/// Tunables that aren't part of the screen's dimensions. `Default` matches
/// common xterm behavior.
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// How many entries OSC 22/23 (`SaveWindowTitleToStack`/
    /// `RestoreWindowTitleFromStack`) may hold before pushes are dropped.
    pub title_stack_capacity: usize,
    /// Upper bound on a decoded OSC 52 clipboard payload. Caps the
    /// allocation a single escape sequence can force; oversized payloads
    /// are discarded rather than truncated.
    pub max_clipboard_payload_bytes: usize,
    /// Reply body for OSC 10 (foreground color) queries, xterm `rgb:` form.
    pub default_foreground: String,
    /// Reply body for OSC 11 (background color) queries, xterm `rgb:` form.
    pub default_background: String,
    /// `Pv` field of the DA2/XTVERSION replies.
    pub secondary_device_attributes_version: usize,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            title_stack_capacity: 16,
            max_clipboard_payload_bytes: 1024 * 1024,
            default_foreground: String::from("rgb:ffff/ffff/ffff"),
            default_background: String::from("rgb:0000/0000/0000"),
            secondary_device_attributes_version: 1,
        }
    }
}

/// One visible cell: its rendered text (empty for a wide-character
/// continuation cell) and the style it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotCell {
    pub text: String,
    pub tag: FormatTag,
}

/// A read-only view of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<SnapshotCell>>,
    pub cursor: CursorPos,
    pub cursor_visible: bool,
    pub cursor_style: CursorVisualStyle,
    pub alternate_screen_active: bool,
    pub application_keypad: bool,
    pub window_title: String,
    pub icon_name: String,
}

type UpdateObserver = Box<dyn FnMut(&Snapshot)>;
type BellObserver = Box<dyn FnMut()>;
type TextObserver = Box<dyn FnMut(&str)>;
type ClipboardObserver = Box<dyn FnMut(&str, Vec<u8>)>;
type HyperlinkObserver = Box<dyn FnMut(Option<&Url>)>;
type ResponseSink = Box<dyn FnMut(&[u8])>;

/// Headless VT100/ECMA-48/xterm terminal core: feed it bytes, read back a
/// [`Snapshot`], and drain whatever device-query responses it queued.
///
/// There is exactly one implementation of this surface, so it's a plain
/// struct rather than a trait — nothing in this crate benefits from
/// dynamic dispatch over "the terminal".
pub struct Terminal {
    parser: AnsiParser,
    handler: TerminalHandler,
    options: TerminalOptions,
    /// Trailing bytes of the last `write_bytes` call that didn't form a
    /// complete UTF-8 sequence, carried over so a multi-byte character
    /// split across two calls isn't silently dropped.
    pending_utf8: Vec<u8>,
    pending_responses: Vec<u8>,
    response_sink: Option<ResponseSink>,
    window_title: String,
    icon_name: String,
    title_stack: Vec<String>,
    on_update: Option<UpdateObserver>,
    on_bell: Option<BellObserver>,
    on_title_change: Option<TextObserver>,
    on_icon_change: Option<TextObserver>,
    on_clipboard_request: Option<ClipboardObserver>,
    on_hyperlink_change: Option<HyperlinkObserver>,
    on_dec_mode_change: Option<TextObserver>,
}

impl Terminal {
    /// Create a terminal with `cols` by `rows` visible cells and up to
    /// `scrollback_max` lines of history.
    #[must_use]
    pub fn new(cols: usize, rows: usize, scrollback_max: usize, options: TerminalOptions) -> Self {
        Self {
            parser: AnsiParser::new(),
            handler: TerminalHandler::with_scrollback_limit(cols, rows, scrollback_max),
            options,
            pending_utf8: Vec::new(),
            pending_responses: Vec::new(),
            response_sink: None,
            window_title: String::new(),
            icon_name: String::new(),
            title_stack: Vec::new(),
            on_update: None,
            on_bell: None,
            on_title_change: None,
            on_icon_change: None,
            on_clipboard_request: None,
            on_hyperlink_change: None,
            on_dec_mode_change: None,
        }
    }

    pub fn on_update(&mut self, f: impl FnMut(&Snapshot) + 'static) {
        self.on_update = Some(Box::new(f));
    }

    pub fn on_bell(&mut self, f: impl FnMut() + 'static) {
        self.on_bell = Some(Box::new(f));
    }

    pub fn on_title_change(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_title_change = Some(Box::new(f));
    }

    pub fn on_icon_change(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_icon_change = Some(Box::new(f));
    }

    pub fn on_clipboard_request(&mut self, f: impl FnMut(&str, Vec<u8>) + 'static) {
        self.on_clipboard_request = Some(Box::new(f));
    }

    pub fn on_hyperlink_change(&mut self, f: impl FnMut(Option<&Url>) + 'static) {
        self.on_hyperlink_change = Some(Box::new(f));
    }

    /// Fires with a human-readable description whenever a DEC private or
    /// ANSI mode is actually set/reset (not for DECRQM queries, which only
    /// produce a response and no state change).
    pub fn on_dec_mode_change(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_dec_mode_change = Some(Box::new(f));
    }

    /// Redirect device-query responses (DA1/DA2, DSR/CPR, DECRQSS, window
    /// reports...) to a sink instead of accumulating them for
    /// [`Self::take_pending_responses`].
    pub fn set_response_sink(&mut self, f: impl FnMut(&[u8]) + 'static) {
        self.response_sink = Some(Box::new(f));
    }

    /// Drain and return bytes queued for the host to write back to the
    /// program (empty if a response sink is installed, since those bytes
    /// never accumulate here).
    pub fn take_pending_responses(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.pending_responses)
    }

    fn push_response(&mut self, text: &str) {
        self.push_response_bytes(text.as_bytes());
    }

    fn push_response_bytes(&mut self, bytes: &[u8]) {
        if let Some(sink) = self.response_sink.as_mut() {
            sink(bytes);
        } else {
            self.pending_responses.extend_from_slice(bytes);
        }
    }

    /// Feed raw program output through the parser and apply it to the
    /// screen. Emits at most one [`Self::on_update`] notification, only if
    /// something actually changed.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let mut input = std::mem::take(&mut self.pending_utf8);
        input.extend_from_slice(bytes);
        let carry_len = incomplete_utf8_tail_len(&input);
        let carry_at = input.len() - carry_len;
        self.pending_utf8 = input[carry_at..].to_vec();
        input.truncate(carry_at);

        let outputs = self.parser.push(&input);
        if outputs.is_empty() {
            return;
        }

        self.handler.process_outputs(&outputs);

        let mut changed = false;
        for output in &outputs {
            if self.dispatch_facade_level(output) {
                changed = true;
            }
        }

        if self.handler.take_bell() {
            changed = true;
            if let Some(cb) = self.on_bell.as_mut() {
                cb();
            }
        }

        if changed {
            let snapshot = self.snapshot();
            if let Some(cb) = self.on_update.as_mut() {
                cb(&snapshot);
            }
        }
    }

    /// Handle the facade-owned side effects of one parsed output: device
    /// queries/responses, title/icon/clipboard, window manipulation, and
    /// RIS. Returns whether this output should count towards firing
    /// `on_update`.
    fn dispatch_facade_level(&mut self, output: &TerminalOutput) -> bool {
        match output {
            TerminalOutput::ResetDevice => {
                let (width, height) = (self.handler.buffer().width(), self.handler.buffer().height());
                self.handler.hard_reset(width, height);
                self.window_title.clear();
                self.icon_name.clear();
                self.title_stack.clear();
                true
            }
            TerminalOutput::OscResponse(osc) => self.handle_osc(osc),
            TerminalOutput::WindowManipulation(wm) => self.handle_window_manipulation(wm),
            TerminalOutput::Mode(mode) => self.handle_mode_query(mode),
            TerminalOutput::RequestDeviceAttributes => {
                self.push_response("\x1b[?1;2c");
                false
            }
            TerminalOutput::RequestXtVersion
            | TerminalOutput::RequestSecondaryDeviceAttributes { .. } => {
                let version = self.options.secondary_device_attributes_version;
                self.push_response(&format!("\x1b[>0;{version};0c"));
                false
            }
            TerminalOutput::RequestDeviceNameAndVersion => {
                let version = self.options.secondary_device_attributes_version;
                self.push_response(&format!("\x1bP>|termcore {version}\x1b\\"));
                false
            }
            TerminalOutput::DeviceStatusReport => {
                self.push_response("\x1b[0n");
                false
            }
            TerminalOutput::CursorReport => {
                let report = self.cursor_report();
                self.push_response(&report);
                false
            }
            TerminalOutput::DeviceControlString(raw) => {
                self.handle_device_control_string(raw);
                false
            }
            TerminalOutput::Invalid | TerminalOutput::Skipped => false,
            _ => true,
        }
    }

    fn handle_osc(&mut self, osc: &AnsiOscType) -> bool {
        match osc {
            AnsiOscType::SetWindowAndIconTitle(title) => {
                self.window_title = title.clone();
                self.icon_name = title.clone();
                self.fire_title_change();
                self.fire_icon_change();
                true
            }
            AnsiOscType::SetTitleBar(title) => {
                self.window_title = title.clone();
                self.fire_title_change();
                true
            }
            AnsiOscType::SetIconName(name) => {
                self.icon_name = name.clone();
                self.fire_icon_change();
                true
            }
            AnsiOscType::RequestColorQueryForeground(inner) => {
                if matches!(inner, AnsiOscInternalType::Query) {
                    let rgb = self.options.default_foreground.clone();
                    self.push_response(&format!("\x1b]10;{rgb}\x07"));
                }
                false
            }
            AnsiOscType::RequestColorQueryBackground(inner) => {
                if matches!(inner, AnsiOscInternalType::Query) {
                    let rgb = self.options.default_background.clone();
                    self.push_response(&format!("\x1b]11;{rgb}\x07"));
                }
                false
            }
            AnsiOscType::Clipboard { selection, payload } => {
                self.handle_clipboard(selection, payload);
                false
            }
            AnsiOscType::Url(_) => {
                if let Some(cb) = self.on_hyperlink_change.as_mut() {
                    let url = osc.hyperlink().flatten();
                    cb(url.as_ref());
                }
                true
            }
            AnsiOscType::NoOp
            | AnsiOscType::Ftcs(_)
            | AnsiOscType::RemoteHost(_)
            | AnsiOscType::ResetCursorColor
            | AnsiOscType::ITerm2 => false,
        }
    }

    fn handle_clipboard(&mut self, selection: &str, payload: &AnsiOscInternalType) {
        let AnsiOscInternalType::String(encoded) = payload else {
            // A bare query (or an unparsed token) has no program-supplied
            // clipboard content to hand off; answering it truthfully would
            // require the host's actual clipboard, which this core doesn't own.
            return;
        };

        match base64::engine::general_purpose::STANDARD.decode(encoded.as_bytes()) {
            Ok(bytes) if bytes.len() <= self.options.max_clipboard_payload_bytes => {
                if let Some(cb) = self.on_clipboard_request.as_mut() {
                    cb(selection, bytes);
                }
            }
            Ok(bytes) => {
                warn!(
                    "OSC 52 clipboard payload ({} bytes) exceeds cap ({}); discarding",
                    bytes.len(),
                    self.options.max_clipboard_payload_bytes
                );
            }
            Err(e) => {
                warn!("OSC 52 clipboard payload is not valid base64: {e}");
            }
        }
    }

    fn handle_window_manipulation(&mut self, wm: &WindowManipulation) -> bool {
        match wm {
            WindowManipulation::ReportTerminalSizeInCharacters => {
                let cols = self.handler.buffer().width();
                let rows = self.handler.buffer().height();
                self.push_response(&format!("\x1b[8;{rows};{cols}t"));
                false
            }
            WindowManipulation::SaveWindowTitleToStack => {
                if self.title_stack.len() < self.options.title_stack_capacity {
                    self.title_stack.push(self.window_title.clone());
                } else {
                    warn!("window title stack is full; dropping push");
                }
                false
            }
            WindowManipulation::RestoreWindowTitleFromStack => {
                if let Some(title) = self.title_stack.pop() {
                    self.window_title = title;
                    self.fire_title_change();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// DECRQM replies. Set/reset mode messages were already applied to
    /// `ModeState` by `TerminalHandler::process_outputs`; this only reports.
    fn handle_mode_query(&mut self, mode: &Mode) -> bool {
        use termcore_common::buffer_states::modes::ReportMode;

        if mode.is_query() {
            let report = mode.report(None);
            self.push_response(&report);
            false
        } else {
            if let Some(cb) = self.on_dec_mode_change.as_mut() {
                cb(&mode.to_string());
            }
            true
        }
    }

    /// DECRQSS (`DCS $ q <setting> ST`). Only SGR (`m`) and DECSTBM (`r`)
    /// settings are recognized; anything else gets the "invalid request"
    /// reply per the xterm convention.
    fn handle_device_control_string(&mut self, raw: &[u8]) {
        let body = raw
            .strip_suffix(b"\x1b\\")
            .or_else(|| raw.strip_suffix(b"\x07"))
            .unwrap_or(raw);

        let Some(setting) = body.strip_prefix(b"$q") else {
            return;
        };

        let reply = match setting {
            b"m" => {
                let tag = self.handler.buffer().current_format();
                format!("\x1bP1$r{}m\x1b\\", sgr_params_for(tag))
            }
            b"r" => {
                let (top, bottom) = self.handler.buffer().scroll_region();
                format!("\x1bP1$r{};{}r\x1b\\", top + 1, bottom + 1)
            }
            _ => String::from("\x1bP0$r\x1b\\"),
        };
        self.push_response(&reply);
    }

    fn cursor_report(&self) -> String {
        let cursor = self.handler.buffer().get_cursor();
        let (top, bottom) = self.handler.buffer().scroll_region();
        let row = if self.handler.modes().origin_mode {
            cursor.pos.y.saturating_sub(top).min(bottom - top) + 1
        } else {
            cursor.pos.y + 1
        };
        let col = cursor.pos.x + 1;
        format!("\x1b[{row};{col}R")
    }

    fn fire_title_change(&mut self) {
        if let Some(cb) = self.on_title_change.as_mut() {
            cb(&self.window_title);
        }
    }

    fn fire_icon_change(&mut self) {
        if let Some(cb) = self.on_icon_change.as_mut() {
            cb(&self.icon_name);
        }
    }

    /// Resize the visible grid, reflowing existing content to the new width.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.handler.buffer_mut().set_size(cols, rows);
    }

    /// RIS: full reset of screen content, scrollback, and every tracked mode.
    pub fn reset(&mut self) {
        let (width, height) = (self.handler.buffer().width(), self.handler.buffer().height());
        self.handler.hard_reset(width, height);
        self.window_title.clear();
        self.icon_name.clear();
        self.title_stack.clear();
    }

    /// DECSTR: soft reset. Leaves screen content and scrollback untouched.
    pub fn soft_reset(&mut self) {
        self.handler.soft_reset();
    }

    /// A row of scrollback, oldest-first-when-counting-from-zero-at-the-
    /// boundary-with-visible; `age` 0 is the line immediately above row 0
    /// of the visible grid. `None` past the available history.
    #[must_use]
    pub fn scrollback_row(&self, age: usize) -> Option<Vec<SnapshotCell>> {
        self.handler.buffer().scrollback_row(age).map(snapshot_row)
    }

    #[must_use]
    pub fn scrollback_len(&self) -> usize {
        self.handler.buffer().scrollback_len()
    }

    /// Build a full snapshot of the visible grid and cursor/title state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let buffer = self.handler.buffer();
        let rows = buffer
            .visible_rows()
            .iter()
            .map(snapshot_row)
            .collect::<Vec<_>>();

        Snapshot {
            width: buffer.width(),
            height: buffer.height(),
            rows,
            cursor: buffer.get_cursor().pos,
            cursor_visible: self.handler.modes().cursor_visible,
            cursor_style: self.handler.cursor_style().clone(),
            alternate_screen_active: matches!(
                buffer.kind(),
                termcore_common::buffer_states::buffer_type::BufferType::Alternate
            ),
            application_keypad: self.handler.application_keypad(),
            window_title: self.window_title.clone(),
            icon_name: self.icon_name.clone(),
        }
    }
}

fn snapshot_row(row: &termcore_buffer::row::Row) -> Vec<SnapshotCell> {
    (0..row.get_row_width())
        .map(|col| {
            let cell = row.resolve_cell(col);
            SnapshotCell {
                text: cell.into_utf8(),
                tag: cell.tag().clone(),
            }
        })
        .collect()
}

/// Builds the `Pm` parameter string DECRQSS echoes back for an SGR query.
/// Kept deliberately minimal: colors and the attributes this crate tracks.
fn sgr_params_for(tag: &FormatTag) -> String {
    use termcore_common::buffer_states::fonts::FontWeight;

    let mut params = vec![String::from("0")];
    if matches!(tag.font_weight, FontWeight::Bold) {
        params.push(String::from("1"));
    }
    for decoration in &tag.font_decorations {
        params.push(format!("{decoration:?}"));
    }
    params.join(";")
}

/// Length of the trailing byte run in `data` that is the start of a
/// multi-byte UTF-8 sequence but doesn't yet have all its continuation
/// bytes. Zero if `data` ends on a complete character (or is ASCII, or
/// the tail bytes are simply invalid rather than merely incomplete).
fn incomplete_utf8_tail_len(data: &[u8]) -> usize {
    let len = data.len();
    for back in 1..=3.min(len) {
        let byte = data[len - back];
        let expected = match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => continue,
        };
        return if expected > back { back } else { 0 };
    }
    0
}
