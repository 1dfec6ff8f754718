// Copyright (C) 2024-2025 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

pub mod buffer_type;
pub mod cursor;
pub mod error;
pub mod fonts;
pub mod format_tag;
pub mod line_draw;
pub mod line_wrap;
pub mod mode;
pub mod modes;
pub mod osc;
pub mod tchar;
pub mod terminal_output;
pub mod url;
pub mod window_manipulation;
