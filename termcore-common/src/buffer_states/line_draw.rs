// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#[derive(Eq, PartialEq, Debug, Default, Clone)]
pub enum DecSpecialGraphics {
    Replace,
    #[default]
    DontReplace,
}

/// Lets `TerminalOutput`'s generic `DecSpecialGraphics` payload update G0's
/// designation without the consumer knowing the concrete type (mirrors
/// `sgr::ApplySgr`).
pub trait ApplyCharsetDesignation {
    fn designates_special(&self) -> bool;
}

impl ApplyCharsetDesignation for DecSpecialGraphics {
    fn designates_special(&self) -> bool {
        matches!(self, Self::Replace)
    }
}

impl ApplyCharsetDesignation for () {
    fn designates_special(&self) -> bool {
        false
    }
}

/// Maps an ASCII byte in `0x60..=0x7e` to its DEC Special Graphics glyph
/// (the VT100 line-drawing charset). Returns `None` outside that range,
/// meaning the byte passes through unchanged.
#[must_use]
pub const fn dec_special_graphics_substitute(b: u8) -> Option<char> {
    Some(match b {
        0x60 => '\u{25c6}', // ` -> diamond
        b'a' => '\u{2592}', // checkerboard
        b'b' => '\u{2409}', // HT symbol
        b'c' => '\u{240c}', // FF symbol
        b'd' => '\u{240d}', // CR symbol
        b'e' => '\u{240a}', // LF symbol
        b'f' => '\u{00b0}', // degree
        b'g' => '\u{00b1}', // plus-minus
        b'h' => '\u{2424}', // NL symbol
        b'i' => '\u{240b}', // VT symbol
        b'j' => '\u{2518}', // bottom-right corner
        b'k' => '\u{2510}', // top-right corner
        b'l' => '\u{250c}', // top-left corner
        b'm' => '\u{2514}', // bottom-left corner
        b'n' => '\u{253c}', // crossing lines
        b'o' => '\u{23ba}', // scan line 1
        b'p' => '\u{23bb}', // scan line 3
        b'q' => '\u{2500}', // horizontal line
        b'r' => '\u{23bc}', // scan line 7
        b's' => '\u{23bd}', // scan line 9
        b't' => '\u{251c}', // left tee
        b'u' => '\u{2524}', // right tee
        b'v' => '\u{2534}', // bottom tee
        b'w' => '\u{252c}', // top tee
        b'x' => '\u{2502}', // vertical line
        b'y' => '\u{2264}', // less-or-equal
        b'z' => '\u{2265}', // greater-or-equal
        b'{' => '\u{03c0}', // pi
        b'|' => '\u{2260}', // not-equal
        b'}' => '\u{00a3}', // pound sterling
        b'~' => '\u{00b7}', // middle dot
        _ => return None,
    })
}
