// Copyright (C) 2024-2025 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use termcore_common::buffer_states::{
    buffer_type::BufferType, cursor::CursorState, format_tag::FormatTag, line_wrap::LineWrap,
    tchar::TChar,
};

use crate::{
    cell::Cell,
    response::InsertResponse,
    row::{Row, RowJoin, RowOrigin},
};

pub struct Buffer {
    /// All rows in this buffer: scrollback + visible region.
    /// In the primary buffer, this grows until `scrollback_limit` is hit.
    /// In the alternate buffer, this always has exactly `height` rows.
    rows: Vec<Row>,

    /// Width and height of the terminal grid.
    width: usize,
    height: usize,

    /// Current cursor position (row, col).
    cursor: CursorState,

    /// How far the user has scrolled back.
    ///
    /// 0 = bottom (normal live terminal mode)
    /// >0 = viewing older content
    scroll_offset: usize,

    /// Maximum number of scrollback lines allowed.
    ///
    /// For example:
    ///  - height = 40
    ///  - `scrollback_limit` = 1000
    ///    Means `rows.len()` will be at most 1040.
    scrollback_limit: usize,

    /// Whether this is the primary or alternate buffer mode.
    ///
    /// Primary:
    ///   - Has scrollback
    ///   - Writing while scrolled back resets `scroll_offset`
    ///
    /// Alternate:
    ///   - No scrollback
    ///   - Switching back restores primary buffer's saved state
    kind: BufferType,

    /// Saved primary buffer content, cursor, `scroll_offset`,
    /// used when switching to and from alternate buffer.
    saved_primary: Option<SavedPrimaryState>,

    /// Saved alternate buffer content, cursor, `scroll_offset`, used by
    /// [`Buffer::enter_alternate_preserve`] (DEC modes 47/1047) so the
    /// alternate screen's content survives repeated enter/leave cycles
    /// instead of always starting blank.
    saved_alternate: Option<SavedPrimaryState>,

    /// Current format tag to apply to inserted text.
    current_tag: FormatTag,

    /// LMN mode
    lnm_enabled: bool,

    /// Preserve the scrollback anchor when resizing
    preserve_scrollback_anchor: bool,

    /// DECSTBM top and bottom margins, 0-indexed, inclusive.
    /// When disabled, the region is full-screen: [0, height-1]
    scroll_region_top: usize,
    scroll_region_bottom: usize,

    /// Column indices (0-based) with a tab stop set. Defaults to every 8th
    /// column. `HTS`/`TBC` mutate this; `CHT`/`CBT`/`HT` consult it.
    tab_stops: std::collections::BTreeSet<usize>,
}

/// Default tab stops: every 8th column starting at 0, up to `width`.
fn default_tab_stops(width: usize) -> std::collections::BTreeSet<usize> {
    (0..width).step_by(8).collect()
}

/// Scrollback cap used by [`Buffer::new`] when no explicit limit is given.
pub const DEFAULT_SCROLLBACK_LIMIT: usize = 4000;

/// Everything we need to restore when leaving alternate buffer.
#[derive(Debug, Clone)]
pub struct SavedPrimaryState {
    pub rows: Vec<Row>,
    pub cursor: CursorState,
    pub scroll_offset: usize,
    pub scroll_region_top: usize,
    pub scroll_region_bottom: usize,
}

impl Buffer {
    /// Creates a new Buffer with the specified width and height.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let rows = vec![Row::new(width)];

        Self {
            rows,
            width,
            height,
            cursor: CursorState::default(),
            current_tag: FormatTag::default(),
            scroll_offset: 0,
            scrollback_limit: DEFAULT_SCROLLBACK_LIMIT,
            kind: BufferType::Primary,
            saved_primary: None,
            saved_alternate: None,
            lnm_enabled: false,
            preserve_scrollback_anchor: false,
            scroll_region_top: 0,
            scroll_region_bottom: height - 1,
            tab_stops: default_tab_stops(width),
        }
    }

    /// Creates a new Buffer with an explicit scrollback cap instead of the
    /// default of 4000 lines.
    #[must_use]
    pub fn with_scrollback_limit(width: usize, height: usize, scrollback_limit: usize) -> Self {
        Self {
            scrollback_limit,
            ..Self::new(width, height)
        }
    }

    /// Internal consistency checks for debug builds.
    ///
    /// This is called from most mutating entry points. In release builds
    /// it compiles down to a no-op.
    #[cfg(debug_assertions)]
    fn debug_assert_invariants(&self) {
        // If there are no rows at all, we expect a fully reset buffer state.
        if self.rows.is_empty() {
            debug_assert_eq!(self.cursor.pos.y, 0, "empty buffer must keep cursor.y at 0");
            debug_assert_eq!(self.cursor.pos.x, 0, "empty buffer must keep cursor.x at 0");
            debug_assert_eq!(
                self.scroll_offset, 0,
                "empty buffer must have zero scroll_offset"
            );
            return;
        }

        // Cursor Y must always point at an existing row.
        debug_assert!(
            self.cursor.pos.y < self.rows.len(),
            "cursor.pos.y {} out of bounds for rows.len() {}",
            self.cursor.pos.y,
            self.rows.len()
        );

        // Cursor X must be within [0, width) if width > 0.
        if self.width == 0 {
            debug_assert_eq!(
                self.cursor.pos.x, 0,
                "width=0 buffer must keep cursor.x at 0"
            );
        } else {
            debug_assert!(
                self.cursor.pos.x < self.width,
                "cursor.pos.x {} out of bounds for width {}",
                self.cursor.pos.x,
                self.width
            );

            if self.cursor.wrap_pending {
                debug_assert_eq!(
                    self.cursor.pos.x,
                    self.width - 1,
                    "wrap_pending requires cursor.pos.x at the last column"
                );
            }
        }

        // Scrollback invariants by buffer kind.
        match self.kind {
            BufferType::Primary => {
                // Primary buffer: rows must never exceed height + scrollback_limit.
                let max_rows = self.height + self.scrollback_limit;
                debug_assert!(
                    self.rows.len() <= max_rows,
                    "primary buffer has {} rows but max_rows is {} (height={} + scrollback_limit={})",
                    self.rows.len(),
                    max_rows,
                    self.height,
                    self.scrollback_limit
                );
            }
            BufferType::Alternate => {
                // Alternate buffer: fixed-size, no scrollback.
                debug_assert_eq!(
                    self.rows.len(),
                    self.height,
                    "alternate buffer must have exactly `height` rows (got rows.len()={}, height={})",
                    self.rows.len(),
                    self.height
                );
                debug_assert_eq!(
                    self.scroll_offset, 0,
                    "alternate buffer must never have a scroll_offset (got {})",
                    self.scroll_offset
                );
            }
        }

        // Scroll offset must always be within [0, max_scroll_offset].
        let max_off = self.max_scroll_offset();
        debug_assert!(
            self.scroll_offset <= max_off,
            "scroll_offset {} exceeds max_scroll_offset {}",
            self.scroll_offset,
            max_off
        );

        // Scroll region (DECSTBM) invariants: screen-relative.
        if self.height > 0 {
            debug_assert!(
                self.scroll_region_top <= self.scroll_region_bottom,
                "scroll_region_top {} must be <= scroll_region_bottom {}",
                self.scroll_region_top,
                self.scroll_region_bottom
            );
            debug_assert!(
                self.scroll_region_bottom < self.height,
                "scroll_region_bottom {} must be < height {}",
                self.scroll_region_bottom,
                self.height
            );
        }
    }

    // In release builds this is a no-op, so we can call it freely.
    #[cfg(not(debug_assertions))]
    #[inline]
    fn debug_assert_invariants(&self) {}

    fn push_row(&mut self, origin: RowOrigin, join: RowJoin) {
        let row = Row::new_with_origin(self.width, origin, join);
        self.rows.push(row);
    }

    fn push_row_with_kind(&mut self, origin: RowOrigin, join: RowJoin) {
        self.rows
            .push(Row::new_with_origin(self.width, origin, join));
    }

    #[must_use]
    pub const fn get_rows(&self) -> &Vec<Row> {
        &self.rows
    }

    #[must_use]
    pub const fn get_cursor(&self) -> &CursorState {
        &self.cursor
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn kind(&self) -> BufferType {
        self.kind
    }

    /// Number of rows currently retired to scrollback (primary buffer only).
    #[must_use]
    pub fn scrollback_len(&self) -> usize {
        self.rows.len().saturating_sub(self.height)
    }

    /// A scrollback row by age, 0 = most recently retired. `None` if out of range.
    #[must_use]
    pub fn scrollback_row(&self, age: usize) -> Option<&Row> {
        let len = self.scrollback_len();
        if age >= len {
            return None;
        }
        self.rows.get(len - 1 - age)
    }

    /// Get the rows that should be *visually displayed* in the GUI.
    ///
    /// Contract:
    /// - Returns a contiguous slice of `self.rows`.
    /// - `visible_rows().len() <= self.height`.
    /// - When `self.rows.len() <= self.height`, the slice is the entire buffer.
    /// - When `scroll_offset == 0`, the slice is the last `height` rows
    ///   (the live bottom).
    /// - When `scroll_offset > 0`, the slice is shifted upwards into
    ///   scrollback, clamped so it never goes before the oldest row.
    /// - Never allocates; always borrows from `self.rows`.
    #[must_use]
    pub fn visible_rows(&self) -> &[Row] {
        if self.rows.is_empty() {
            return &[];
        }

        let total = self.rows.len();
        let h = self.height;

        // Clamp scroll_offset within bounds.
        let max_offset = self.max_scroll_offset();
        let offset = self.scroll_offset.min(max_offset);

        let start = total.saturating_sub(h + offset);
        let end = start + h;

        &self.rows[start.min(total)..end.min(total)]
    }

    pub fn insert_text(&mut self, text: &[TChar]) {
        // If we're in the primary buffer and the user has scrolled back,
        // jump back to the live bottom view when new output arrives.
        if self.kind == BufferType::Primary && self.scroll_offset > 0 {
            self.scroll_offset = 0;
        }

        if text.is_empty() {
            return;
        }

        let mut remaining = text.to_vec();
        let mut row_idx = self.cursor.pos.y;
        let mut col = self.cursor.pos.x;

        // A previous call filled the row exactly and deferred the wrap.
        // Resolve it now, before the next glyph is written, so `cursor.pos.x`
        // only ever reads `width` transiently inside this function.
        if self.cursor.wrap_pending {
            self.cursor.wrap_pending = false;
            row_idx += 1;
            col = 0;

            if row_idx >= self.rows.len() {
                self.push_row(RowOrigin::SoftWrap, RowJoin::ContinueLogicalLine);
            } else {
                let row = &mut self.rows[row_idx];
                row.origin = RowOrigin::SoftWrap;
                row.join = RowJoin::ContinueLogicalLine;
                row.clear();
            }

            self.cursor.pos.y = row_idx;
        }

        // FIX #3: first write into row 0 turns it into a real logical line
        if row_idx == 0 && self.rows[0].origin == RowOrigin::ScrollFill {
            let row = &mut self.rows[0];
            row.origin = RowOrigin::HardBreak;
            row.join = RowJoin::NewLogicalLine;
        }

        loop {
            // ┌─────────────────────────────────────────────┐
            // │ PRE-WRAP: if we're already at/past width,   │
            // │ move to the next row as a soft-wrap row.    │
            // └─────────────────────────────────────────────┘
            if col >= self.width {
                row_idx += 1;
                col = 0;

                if row_idx >= self.rows.len() {
                    // brand new soft-wrap continuation row
                    self.push_row(RowOrigin::SoftWrap, RowJoin::ContinueLogicalLine);
                } else {
                    // reuse existing row as a soft-wrap continuation
                    let row = &mut self.rows[row_idx];
                    row.origin = RowOrigin::SoftWrap;
                    row.join = RowJoin::ContinueLogicalLine;
                    row.clear();
                }

                self.cursor.pos.y = row_idx;
            }

            // ┌─────────────────────────────────────────────┐
            // │ Ensure the target row exists.               │
            // │ If we got here without PRE-WRAP, it's a     │
            // │ normal new logical line. If col == 0 and    │
            // │ row_idx > 0, we are in a wrap continuation. │
            // └─────────────────────────────────────────────┘
            if row_idx >= self.rows.len() {
                let is_wrap_continuation = col == 0 && row_idx > 0;

                let origin = if is_wrap_continuation {
                    RowOrigin::SoftWrap
                } else {
                    RowOrigin::HardBreak
                };

                let join = if is_wrap_continuation {
                    RowJoin::ContinueLogicalLine
                } else {
                    RowJoin::NewLogicalLine
                };

                self.rows
                    .push(Row::new_with_origin(self.width, origin, join));
            }

            // clone tag here to avoid long-lived borrows of &self
            let tag = self.current_tag.clone();

            // ┌─────────────────────────────────────────────┐
            // │ Try to insert into this row.                │
            // └─────────────────────────────────────────────┘
            match self.rows[row_idx].insert_text(col, &remaining, &tag) {
                InsertResponse::Consumed(final_col) => {
                    // All text fit on this row. If it filled the row exactly,
                    // keep cursor.x on the last column and defer the wrap
                    // instead of letting it run off the right margin.
                    if final_col >= self.width {
                        self.cursor.pos.x = self.width.saturating_sub(1);
                        self.cursor.wrap_pending = self.cursor.line_wrap_mode == LineWrap::Wrap;
                    } else {
                        self.cursor.pos.x = final_col;
                        self.cursor.wrap_pending = false;
                    }
                    self.cursor.pos.y = row_idx;

                    self.enforce_scrollback_limit();
                    return;
                }

                InsertResponse::Leftover { data, final_col } => {
                    // This row filled; some data remains. The wrap below is
                    // about to happen for real, so there's nothing to defer.
                    self.cursor.pos.x = final_col.min(self.width.saturating_sub(1));
                    self.cursor.pos.y = row_idx;
                    self.cursor.wrap_pending = false;

                    // DECAWM off: pin the cursor at the right margin and keep
                    // overwriting the last cell instead of wrapping.
                    if self.cursor.line_wrap_mode == LineWrap::NoWrap {
                        if let Some(last) = data.last() {
                            let tag = self.current_tag.clone();
                            let last_col = self.width.saturating_sub(1);
                            self.rows[row_idx].insert_text(last_col, &[last.clone()], &tag);
                            self.cursor.pos.x = last_col;
                        }
                        self.enforce_scrollback_limit();
                        return;
                    }

                    remaining = data;

                    // Move to next row for continuation.
                    row_idx += 1;
                    col = 0;

                    // POST-WRAP: we now know a wrap actually occurred.
                    if row_idx >= self.rows.len() {
                        // brand new continuation
                        self.push_row(RowOrigin::SoftWrap, RowJoin::ContinueLogicalLine);
                    } else {
                        // reuse existing row as continuation
                        let row = &mut self.rows[row_idx];
                        row.origin = RowOrigin::SoftWrap;
                        row.join = RowJoin::ContinueLogicalLine;
                        row.clear();
                    }

                    self.cursor.pos.y = row_idx;
                    // `col` stays 0; next loop iteration writes at start of continuation row.
                }
            }
        }
    }

    /// Resize the terminal buffer.
    /// Reflows lines when width changes.
    /// Adjusts scrollback when height changes.
    pub fn set_size(&mut self, new_width: usize, new_height: usize) {
        let old_width = self.width;
        let width_changed = new_width != self.width;
        let height_changed = new_height != self.height;

        if !width_changed && !height_changed {
            return;
        }

        // ---- WIDTH CHANGE → REFLOW ----
        if width_changed {
            self.reflow_to_width(new_width);
        }

        // ---- HEIGHT CHANGE → GROW/SHRINK SCREEN ----
        if height_changed {
            self.resize_height(new_height);

            // Clamp scroll region to new size (screen-relative).
            self.scroll_region_bottom = self.scroll_region_bottom.min(new_height.saturating_sub(1));

            if self.scroll_region_top >= self.scroll_region_bottom {
                self.reset_scroll_region_to_full();
            }
        }

        // Update buffer scalars
        self.width = new_width;
        self.height = new_height;

        // Tab stops beyond the new width are meaningless; columns newly
        // exposed by a widening resize get the default every-8 stops.
        if width_changed {
            self.tab_stops.retain(|&c| c < new_width);
            for c in (0..new_width).step_by(8).filter(|&c| c >= old_width) {
                self.tab_stops.insert(c);
            }
        }

        // Ensure every row's max_width matches the new buffer width
        if width_changed {
            for row in &mut self.rows {
                row.set_max_width(new_width);
            }
        }

        // Always clamp cursor after size change
        self.clamp_cursor_after_resize();
        self.debug_assert_invariants();
    }

    #[allow(clippy::too_many_lines)]
    pub fn reflow_to_width(&mut self, new_width: usize) {
        if new_width == 0 || self.rows.is_empty() || new_width == self.width {
            // Nothing to do
            return;
        }

        // Take ownership of the old rows
        let old_rows = std::mem::take(&mut self.rows);

        // 1) Group rows into logical lines based on RowJoin
        let mut logical_lines: Vec<Vec<Row>> = Vec::new();
        let mut current_line: Vec<Row> = Vec::new();

        for row in old_rows {
            if row.join == RowJoin::NewLogicalLine && !current_line.is_empty() {
                logical_lines.push(current_line);
                current_line = Vec::new();
            }
            current_line.push(row);
        }
        if !current_line.is_empty() {
            logical_lines.push(current_line);
        }

        // 2) For each logical line, flatten its cells and re-wrap
        let mut new_rows: Vec<Row> = Vec::new();

        for line in logical_lines {
            // Determine origin for the first row of this logical line.
            let first_origin = line.first().map_or(RowOrigin::HardBreak, |r| r.origin);

            // Flatten all rows in this logical line into a single Vec<Cell>
            let mut flat_cells: Vec<Cell> = Vec::new();
            for row in &line {
                flat_cells.extend(row.get_characters().iter().cloned());
            }

            if flat_cells.is_empty() {
                // Empty logical line → keep a single empty row
                new_rows.push(Row::new_with_origin(
                    new_width,
                    first_origin,
                    RowJoin::NewLogicalLine,
                ));
                continue;
            }

            let mut idx = 0;
            let mut col = 0;
            let mut cur_cells: Vec<Cell> = Vec::new();
            let mut is_first_row_for_line = true;

            while idx < flat_cells.len() {
                let cell = &flat_cells[idx];

                if cell.is_head() {
                    let w = cell.display_width().max(1);

                    // If this glyph doesn't fit on the current row (and we already have content),
                    // flush the current row and start a new one.
                    if col + w > new_width && col > 0 {
                        let origin = if is_first_row_for_line {
                            first_origin
                        } else {
                            RowOrigin::SoftWrap
                        };
                        let join = if is_first_row_for_line {
                            RowJoin::NewLogicalLine
                        } else {
                            RowJoin::ContinueLogicalLine
                        };

                        new_rows.push(Row::from_cells(new_width, origin, join, cur_cells));

                        cur_cells = Vec::new();
                        col = 0;
                        is_first_row_for_line = false;
                    }

                    // Now place this glyph (head + continuations) onto the row.
                    cur_cells.push(cell.clone());
                    idx += 1;

                    let mut consumed = 1;
                    while consumed < w
                        && idx < flat_cells.len()
                        && flat_cells[idx].is_continuation()
                    {
                        cur_cells.push(flat_cells[idx].clone());
                        idx += 1;
                        consumed += 1;
                    }

                    col += w.min(new_width);
                } else {
                    // Stray continuation (should be rare): treat as width 1 column.
                    if col + 1 > new_width && col > 0 {
                        let origin = if is_first_row_for_line {
                            first_origin
                        } else {
                            RowOrigin::SoftWrap
                        };
                        let join = if is_first_row_for_line {
                            RowJoin::NewLogicalLine
                        } else {
                            RowJoin::ContinueLogicalLine
                        };

                        new_rows.push(Row::from_cells(new_width, origin, join, cur_cells));

                        cur_cells = Vec::new();
                        col = 0;
                        is_first_row_for_line = false;
                    }

                    cur_cells.push(cell.clone());
                    idx += 1;
                    col += 1;
                }
            }

            // Flush any remaining cells as the final row of this logical line.
            if !cur_cells.is_empty() {
                let origin = if is_first_row_for_line {
                    first_origin
                } else {
                    RowOrigin::SoftWrap
                };
                let join = if is_first_row_for_line {
                    RowJoin::NewLogicalLine
                } else {
                    RowJoin::ContinueLogicalLine
                };

                new_rows.push(Row::from_cells(new_width, origin, join, cur_cells));
            }
        }

        // 3) Install the new rows and update width
        self.rows = new_rows;
        self.width = new_width;

        // 4) Reset scroll offset; ensure cursor is in bounds.
        self.scroll_offset = 0;

        if self.cursor.pos.y >= self.rows.len() {
            if self.rows.is_empty() {
                self.cursor.pos.y = 0;
            } else {
                self.cursor.pos.y = self.rows.len() - 1;
            }
            self.cursor.pos.x = 0;
        } else {
            // Clamp X to the new width
            if self.cursor.pos.x >= self.width {
                self.cursor.pos.x = self.width.saturating_sub(1);
            }
        }

        self.cursor.wrap_pending = false;
    }

    fn resize_height(&mut self, new_height: usize) {
        let old_height = self.height;

        if new_height > old_height {
            // Grow: add blank rows at the bottom
            let grow = new_height - old_height;
            for _ in 0..grow {
                self.rows.push(Row::new(self.width));
            }
        } else if new_height < old_height {
            // If cursor is above the bottom of the new visible window, clamp it.
            if self.cursor.pos.y >= new_height {
                self.cursor.pos.y = new_height.saturating_sub(1);
            }
        }

        if self.preserve_scrollback_anchor {
            // IMPORTANT: use new_height, not self.height (which is still old here)
            let max_offset = if self.rows.len() > new_height {
                self.rows.len() - new_height
            } else {
                0
            };
            self.scroll_offset = self.scroll_offset.min(max_offset);
        } else {
            // xterm-style
            self.scroll_offset = 0;
        }
    }

    const fn clamp_cursor_after_resize(&mut self) {
        // Clamp Y
        if self.cursor.pos.y >= self.rows.len() {
            self.cursor.pos.y = self.rows.len().saturating_sub(1);
        }

        // Clamp X
        if self.cursor.pos.x >= self.width {
            self.cursor.pos.x = self.width.saturating_sub(1);
        }

        if self.rows.is_empty() {
            self.cursor.pos.x = 0;
            self.cursor.pos.y = 0;
        }

        self.cursor.wrap_pending = false;
    }

    fn enforce_scrollback_limit(&mut self) {
        // Only primary buffer keeps scrollback.
        if self.kind == BufferType::Alternate {
            return;
        }

        let max_rows = self.height + self.scrollback_limit;

        // Nothing to trim, but still make sure scroll_offset is not insane
        if self.rows.len() <= max_rows {
            let max_offset = self.max_scroll_offset();
            if self.scroll_offset > max_offset {
                self.scroll_offset = max_offset;
            }
            return;
        }

        // Number of rows to drop from the top of the scrollback.
        let overflow = self.rows.len() - max_rows;

        // --- Adjust scroll_offset BEFORE modifying the rows ---
        //
        // If the user is scrolled back into the area we're about to delete,
        // reduce their offset by the number of deleted rows. If that wipes
        // out all their scrollback, snap them to live view.
        if self.scroll_offset > 0 {
            if self.scroll_offset > overflow {
                self.scroll_offset -= overflow;
            } else {
                self.scroll_offset = 0;
            }
        }

        // --- Drop the oldest rows ---
        self.rows.drain(0..overflow);

        // --- Adjust cursor row index ---
        //
        // Cursor is always measured relative to self.rows, so subtract
        // `overflow` from its y-coordinate when possible.
        if self.cursor.pos.y >= overflow {
            self.cursor.pos.y -= overflow;
        } else {
            self.cursor.pos.y = 0;
        }

        // Finally, clamp scroll_offset to the new max_scroll_offset().
        let max_offset = self.max_scroll_offset();
        if self.scroll_offset > max_offset {
            self.scroll_offset = max_offset;
        }

        self.debug_assert_invariants();
    }

    /// Handle ANSI Backspace (BS, 0x08).
    ///
    /// Semantics (ECMA-48, VT100):
    /// - Move cursor left by one cell.
    /// - If the cell to the left is a continuation cell of a wide glyph,
    ///   skip left until the glyph head.
    /// - If cursor is at column 0, do nothing.
    /// - Never moves vertically and never deletes characters.
    pub fn handle_backspace(&mut self) {
        // Backspace is a purely local operation. Do NOT perform scrollback
        // enforcement or invariants after this function.

        if self.cursor.pos.x == 0 {
            return;
        }

        let row_idx = self.cursor.pos.y;

        if row_idx >= self.rows.len() {
            return;
        }

        let row = &self.rows[row_idx];

        let mut new_x = self.cursor.pos.x - 1;

        // Skip left over continuation cells of a wide glyph
        while new_x > 0 {
            if let Some(cell) = row.get_char_at(new_x) {
                if !cell.is_continuation() {
                    break;
                }
            } else {
                break;
            }
            new_x -= 1;
        }

        self.cursor.pos.x = new_x;
        self.cursor.wrap_pending = false;

        // This MUST be the only post-condition for backspace.
        debug_assert!(self.cursor.pos.y < self.rows.len());
        debug_assert!(self.cursor.pos.x < self.width);
    }

    pub fn handle_lf(&mut self) {
        self.cursor.wrap_pending = false;

        match self.kind {
            BufferType::Primary => {
                // Reset scrollback if output arrives while scrolled back
                if self.scroll_offset > 0 {
                    self.scroll_offset = 0;
                }

                // LNM: CR implied
                if self.lnm_enabled {
                    self.cursor.pos.x = 0;
                }

                let sy = self.cursor_screen_y();

                // --- DECSTBM applies ONLY when:
                //     - region is not full screen
                //     - not scrolled back (already ensured above)
                if self.scroll_region_top == 0 && self.scroll_region_bottom == self.height - 1 {
                    //
                    // FAST PATH: FULL-SCREEN REGION
                    //
                    self.cursor.pos.y += 1;

                    if self.cursor.pos.y >= self.rows.len() {
                        self.rows.push(Row::new_with_origin(
                            self.width,
                            RowOrigin::HardBreak,
                            RowJoin::NewLogicalLine,
                        ));
                    } else {
                        let row = &mut self.rows[self.cursor.pos.y];
                        row.origin = RowOrigin::HardBreak;
                        row.join = RowJoin::NewLogicalLine;
                        row.clear();
                    }

                    self.enforce_scrollback_limit();
                    self.debug_assert_invariants();
                    return;
                }

                //
                // PARTIAL REGION (true DECSTBM behavior)
                //
                if sy >= self.scroll_region_top && sy <= self.scroll_region_bottom {
                    if sy < self.scroll_region_bottom {
                        // Move cursor down inside region
                        self.cursor.pos.y += 1;
                    } else {
                        // At bottom margin → scroll region UP
                        self.scroll_region_up_primary();
                        // cursor stays in place
                    }
                } else {
                    // Outside DECSTBM → just move down with no scrolling
                    if self.cursor.pos.y + 1 < self.rows.len() {
                        self.cursor.pos.y += 1;
                    } else {
                        self.rows.push(Row::new_with_origin(
                            self.width,
                            RowOrigin::HardBreak,
                            RowJoin::NewLogicalLine,
                        ));
                        self.cursor.pos.y = self.rows.len() - 1;
                    }
                }

                self.enforce_scrollback_limit();
                self.debug_assert_invariants();
            }

            BufferType::Alternate => {
                // (keep your existing Alternate LF unchanged)
                if self.lnm_enabled {
                    self.cursor.pos.x = 0;
                }

                let y = self.cursor.pos.y;

                if y >= self.scroll_region_top && y <= self.scroll_region_bottom {
                    if y < self.scroll_region_bottom {
                        if self.cursor.pos.y + 1 < self.height {
                            self.cursor.pos.y += 1;
                        }
                    } else {
                        self.scroll_slice_up(self.scroll_region_top, self.scroll_region_bottom);
                    }
                } else if self.cursor.pos.y + 1 < self.height {
                    self.cursor.pos.y += 1;
                }

                self.debug_assert_invariants();
            }
        }
    }

    pub const fn handle_cr(&mut self) {
        self.cursor.pos.x = 0;
        self.cursor.wrap_pending = false;
    }

    /// IND – Index (move down, scroll within DECSTBM region).
    /// Same as LF, but *does not* honor LNM (no implicit CR).
    pub fn handle_ind(&mut self) {
        // Temporarily disable LNM so `handle_lf` won't do CR.
        let old_lnm = self.lnm_enabled;
        self.lnm_enabled = false;
        self.handle_lf();
        self.lnm_enabled = old_lnm;
    }

    /// NEL – Next Line (CR + LF with scrolling in DECSTBM region).
    pub fn handle_nel(&mut self) {
        // Explicit CR then LF – this is allowed to honor LNM.
        self.handle_cr();
        self.handle_lf();
    }

    /// RI – Reverse Index.
    /// Move the cursor up; at the top margin of DECSTBM region,
    /// scroll the region down by one line (blank line at top).
    pub fn handle_ri(&mut self) {
        self.cursor.wrap_pending = false;

        match self.kind {
            BufferType::Primary => {
                let sy = self.cursor_screen_y();

                // FULL-SCREEN REGION → RI never scrolls
                if self.scroll_region_top == 0 && self.scroll_region_bottom == self.height - 1 {
                    if self.cursor.pos.y > 0 {
                        self.cursor.pos.y -= 1;
                    }
                    self.debug_assert_invariants();
                    return;
                }

                // PARTIAL DECSTBM
                if sy >= self.scroll_region_top && sy <= self.scroll_region_bottom {
                    if sy > self.scroll_region_top {
                        // move up inside region
                        self.cursor.pos.y -= 1;
                    } else {
                        // at top → scroll region DOWN
                        self.scroll_region_down_primary();
                    }
                } else {
                    // outside region → never scroll
                    if self.cursor.pos.y > 0 {
                        self.cursor.pos.y -= 1;
                    }
                }

                self.debug_assert_invariants();
            }

            BufferType::Alternate => {
                // (unchanged)
                let y = self.cursor.pos.y;

                if y >= self.scroll_region_top && y <= self.scroll_region_bottom {
                    if y > self.scroll_region_top {
                        self.cursor.pos.y -= 1;
                    } else {
                        self.scroll_slice_down(self.scroll_region_top, self.scroll_region_bottom);
                    }
                } else if self.cursor.pos.y > 0 {
                    self.cursor.pos.y -= 1;
                }
                self.debug_assert_invariants();
            }
        }
    }

    /// IL – Insert Lines within DECSTBM region.
    /// Insert `n` blank lines at the cursor row, shifting lines down and
    /// discarding at the bottom of the region.
    pub fn insert_lines(&mut self, n: usize) {
        if n == 0 {
            return;
        }

        match self.kind {
            BufferType::Alternate => {
                // leave as-is
                let y = self.cursor.pos.y;
                if y < self.scroll_region_top || y > self.scroll_region_bottom {
                    return;
                }

                let max_lines = self.scroll_region_bottom.saturating_sub(y) + 1;
                let count = n.min(max_lines);

                for _ in 0..count {
                    self.scroll_slice_down(y, self.scroll_region_bottom);
                }

                self.debug_assert_invariants();
            }

            BufferType::Primary => {
                if self.scroll_offset > 0 {
                    return;
                }

                let sy = self.cursor_screen_y();
                if sy < self.scroll_region_top || sy > self.scroll_region_bottom {
                    return;
                }

                let (t, b) = self.scroll_region_rows();
                let offset = sy - self.scroll_region_top;
                let row = t + offset;

                let count = n.min(b - row + 1);
                for _ in 0..count {
                    self.scroll_slice_down(row, b);
                }

                self.debug_assert_invariants();
            }
        }
    }

    /// DL – Delete Lines within DECSTBM region.
    /// Delete `n` lines at the cursor row, shifting lines up and
    /// inserting blanks at the bottom of the region.
    pub fn delete_lines(&mut self, n: usize) {
        if n == 0 {
            return;
        }

        match self.kind {
            BufferType::Alternate => {
                let y = self.cursor.pos.y;
                if y < self.scroll_region_top || y > self.scroll_region_bottom {
                    return;
                }

                let max_lines = self.scroll_region_bottom.saturating_sub(y) + 1;
                let count = n.min(max_lines);

                for _ in 0..count {
                    self.scroll_slice_up(y, self.scroll_region_bottom);
                }

                self.debug_assert_invariants();
            }

            BufferType::Primary => {
                if self.scroll_offset > 0 {
                    return;
                }

                let sy = self.cursor_screen_y();
                if sy < self.scroll_region_top || sy > self.scroll_region_bottom {
                    return;
                }

                let (t, b) = self.scroll_region_rows();
                let offset = sy - self.scroll_region_top;
                let row = t + offset;

                let count = n.min(b - row + 1);
                for _ in 0..count {
                    self.scroll_slice_up(row, b);
                }

                self.debug_assert_invariants();
            }
        }
    }

    /// Implements ICH – Insert Characters (spaces).
    pub fn insert_spaces(&mut self, n: usize) {
        let row = self.cursor.pos.y;
        let col = self.cursor.pos.x;

        if row >= self.rows.len() {
            return;
        }

        let tag = self.current_tag.clone();
        self.rows[row].insert_spaces_at(col, n, &tag);

        // Cursor does NOT move for ICH
    }

    const fn reset_scroll_region_to_full(&mut self) {
        self.scroll_region_top = 0;
        self.scroll_region_bottom = self.height.saturating_sub(1);
    }

    /// Set DECSTBM scroll region (1-based inclusive).
    /// If invalid, resets to full screen.
    /// `top`/`bottom` are 1-based, straight off the wire; 0 means "omitted",
    /// which defaults to the first/last row respectively.
    pub const fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = if top == 0 { 1 } else { top };
        let bottom = if bottom == 0 { self.height } else { bottom };

        // Convert to 0-based.
        let top = top - 1;
        let bottom = bottom - 1;

        // Validate
        if top >= bottom || bottom >= self.height {
            self.reset_scroll_region_to_full();
            return;
        }

        self.scroll_region_top = top;
        self.scroll_region_bottom = bottom;

        // xterm behavior: move cursor to row 0 of region
        self.cursor.pos.y = self.scroll_region_top;
        self.cursor.pos.x = 0;
    }

    /// Current scroll region as 0-based, inclusive `(top, bottom)`.
    #[must_use]
    pub const fn scroll_region(&self) -> (usize, usize) {
        (self.scroll_region_top, self.scroll_region_bottom)
    }

    /// Index in `rows` of the first visible line.
    /// This is the same start index used by `visible_rows()`.
    fn visible_window_start(&self) -> usize {
        if self.rows.is_empty() || self.height == 0 {
            return 0;
        }

        let total = self.rows.len();
        let h = self.height.min(total);
        let offset = self.scroll_offset.min(self.max_scroll_offset());

        total.saturating_sub(h + offset)
    }

    /// Cursor Y expressed in "screen coordinates" (0..height-1).
    /// If the buffer is shorter than the height, we just return the raw Y.
    fn cursor_screen_y(&self) -> usize {
        if self.rows.is_empty() || self.height == 0 {
            return 0;
        }

        let start = self.visible_window_start();
        self.cursor.pos.y.saturating_sub(start)
    }

    #[inline]
    fn at_scroll_region_bottom(&self) -> bool {
        if self.height == 0 {
            return false;
        }
        self.cursor_screen_y() == self.scroll_region_bottom
    }

    #[inline]
    fn at_scroll_region_top(&self) -> bool {
        if self.height == 0 {
            return false;
        }
        self.cursor_screen_y() == self.scroll_region_top
    }

    /// Convert DECSTBM region (screen coords) into buffer row indices (rows[])
    fn scroll_region_rows(&self) -> (usize, usize) {
        let start = self.visible_window_start();
        let top = start + self.scroll_region_top;
        let bottom = start + self.scroll_region_bottom;
        let max = self.rows.len().saturating_sub(1);
        (top.min(max), bottom.min(max))
    }

    /// Scroll DECSTBM region UP by 1 (primary buffer)
    fn scroll_region_up_primary(&mut self) {
        let (t, b) = self.scroll_region_rows();
        if t < b {
            self.scroll_slice_up(t, b);
        }
    }

    /// Scroll DECSTBM region DOWN by 1 (primary buffer)
    fn scroll_region_down_primary(&mut self) {
        let (t, b) = self.scroll_region_rows();
        if t < b {
            self.scroll_slice_down(t, b);
        }
    }

    /// Scroll a contiguous vertical slice [first, last] UP by one line.
    /// Rows outside that range are untouched. New bottom line is blank.
    fn scroll_slice_up(&mut self, first: usize, last: usize) {
        if first >= last {
            return;
        }
        if last >= self.rows.len() {
            return;
        }

        for row_idx in first..last {
            let next = self.rows[row_idx + 1].clone();
            self.rows[row_idx] = next;
        }

        self.rows[last] = Row::new(self.width);
    }

    /// Scroll a contiguous vertical slice [first, last] DOWN by one line.
    /// Rows outside that range are untouched. New top line is blank.
    fn scroll_slice_down(&mut self, first: usize, last: usize) {
        if first >= last {
            return;
        }
        if last >= self.rows.len() {
            return;
        }

        for row_idx in (first + 1..=last).rev() {
            let prev = self.rows[row_idx - 1].clone();
            self.rows[row_idx] = prev;
        }

        self.rows[first] = Row::new(self.width);
    }

    /// SU — scroll the current scroll region up by `n` lines (cursor unmoved).
    /// Unlike the bottom-of-region LF scroll, this never appends to scrollback.
    pub fn scroll_up_in_region(&mut self, n: usize) {
        for _ in 0..n {
            self.scroll_region_up_primary();
        }
    }

    /// SD — scroll the current scroll region down by `n` lines (cursor unmoved).
    pub fn scroll_down_in_region(&mut self, n: usize) {
        for _ in 0..n {
            self.scroll_region_down_primary();
        }
    }

    // ----------------------------------------------------------
    // Scrollback: only valid in the PRIMARY buffer
    // ----------------------------------------------------------

    /// How many lines above the live bottom we can scroll.
    const fn max_scroll_offset(&self) -> usize {
        if self.rows.len() <= self.height {
            0
        } else {
            self.rows.len() - self.height
        }
    }

    /// Scroll upward (`lines > 0`) in the primary buffer.
    pub fn scroll_back(&mut self, lines: usize) {
        if self.kind != BufferType::Primary {
            return; // Alternate buffer: no scrollback
        }

        let max = self.max_scroll_offset();
        if max == 0 {
            return;
        }

        self.scroll_offset = (self.scroll_offset + lines).min(max);

        self.debug_assert_invariants();
    }

    /// Scroll downward (`lines > 0`) toward the live bottom.
    pub fn scroll_forward(&mut self, lines: usize) {
        if self.kind != BufferType::Primary {
            return;
        }

        if self.scroll_offset == 0 {
            return;
        }

        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.debug_assert_invariants();
    }

    /// Jump back to the live view (row = last row).
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
        self.debug_assert_invariants();
    }

    pub fn scroll_up(&mut self) {
        // remove topmost row
        self.rows.remove(0);

        // add a new empty row at the bottom
        self.rows.push(Row::new(self.width));

        // DO NOT move the cursor in alternate buffer
        if self.kind == BufferType::Primary {
            // primary buffer uses scrollback: move cursor with the visible window
            if self.cursor.pos.y > 0 {
                self.cursor.pos.y -= 1;
            }
        }
    }

    /// Switch from the primary buffer to the alternate screen, clearing it.
    ///
    /// - Saves current rows, cursor, and `scroll_offset`.
    /// - Replaces contents with a fresh empty screen (height rows).
    /// - Disables scrollback semantics for the alternate screen.
    ///
    /// This is DEC mode 1049's entry behavior. For 47/1047, which switch
    /// without clearing, use [`Buffer::enter_alternate_preserve`].
    pub fn enter_alternate(&mut self) {
        self.enter_alternate_inner(true);
    }

    /// Switch from the primary buffer to the alternate screen without
    /// clearing it: if a previous visit to the alternate screen left
    /// content behind, that content reappears instead of a blank screen.
    ///
    /// This is DEC modes 47 and 1047's entry behavior.
    pub fn enter_alternate_preserve(&mut self) {
        self.enter_alternate_inner(false);
    }

    fn enter_alternate_inner(&mut self, clear: bool) {
        // If we're already in the alternate buffer, do nothing.
        if self.kind == BufferType::Alternate {
            return;
        }

        // Save primary state (rows + cursor + scroll_offset).
        let saved = SavedPrimaryState {
            rows: self.rows.clone(),
            cursor: self.cursor.clone(),
            scroll_offset: self.scroll_offset,
            scroll_region_top: self.scroll_region_top,
            scroll_region_bottom: self.scroll_region_bottom,
        };
        self.saved_primary = Some(saved);

        // Switch to alternate buffer.
        self.kind = BufferType::Alternate;

        if clear {
            self.rows = vec![Row::new(self.width); self.height];
            self.cursor = CursorState::default();
        } else if let Some(previous) = self.saved_alternate.take() {
            self.rows = previous.rows;
            self.cursor = previous.cursor;
            self.scroll_region_top = previous.scroll_region_top;
            self.scroll_region_bottom = previous.scroll_region_bottom;
        } else {
            // First visit to the alternate screen: nothing to restore yet.
            self.rows = vec![Row::new(self.width); self.height];
            self.cursor = CursorState::default();
        }

        self.scroll_offset = 0;

        if clear {
            self.reset_scroll_region_to_full();
        }

        self.debug_assert_invariants();
    }

    /// Leave the alternate screen and restore the primary buffer, if any was saved.
    ///
    /// The alternate buffer's current content is snapshotted into
    /// `saved_alternate` first, so a later `enter_alternate_preserve` call
    /// sees it again.
    pub fn leave_alternate(&mut self) {
        // If we're not in alternate, nothing to do.
        if self.kind != BufferType::Alternate {
            return;
        }

        self.saved_alternate = Some(SavedPrimaryState {
            rows: self.rows.clone(),
            cursor: self.cursor.clone(),
            scroll_offset: self.scroll_offset,
            scroll_region_top: self.scroll_region_top,
            scroll_region_bottom: self.scroll_region_bottom,
        });

        if let Some(saved) = self.saved_primary.take() {
            // Restore saved primary state.
            self.rows = saved.rows;
            self.cursor = saved.cursor;
            self.scroll_offset = saved.scroll_offset;
            self.scroll_region_top = saved.scroll_region_top;
            self.scroll_region_bottom = saved.scroll_region_bottom;
        }

        self.kind = BufferType::Primary;

        self.debug_assert_invariants();
    }

    /// Borrow the cursor state mutably, for callers (SGR, DECSCUSR, save/restore)
    /// that need to update attributes attached to the cursor directly.
    pub const fn cursor_mut(&mut self) -> &mut CursorState {
        &mut self.cursor
    }

    /// Set the format tag applied to subsequently-inserted text (SGR).
    pub fn set_format(&mut self, format: FormatTag) {
        self.current_tag = format;
    }

    /// The format tag currently applied to newly-inserted text.
    #[must_use]
    pub const fn current_format(&self) -> &FormatTag {
        &self.current_tag
    }

    /// DECAWM: whether a run past the right margin wraps to the next line.
    pub const fn set_autowrap(&mut self, enabled: bool) {
        self.cursor.line_wrap_mode = if enabled {
            LineWrap::Wrap
        } else {
            LineWrap::NoWrap
        };
    }

    /// CUP/HVP: absolute cursor positioning (both 0-indexed here; the
    /// handler layer converts from the wire's 1-indexed parameters).
    /// Unlike scrolling operations, this addresses the whole screen, not
    /// just a DECSTBM region, and grows the row store to cover the target
    /// row the same way line-feeding does.
    pub fn set_cursor_pos(&mut self, x: Option<usize>, y: Option<usize>) {
        self.cursor.wrap_pending = false;

        if let Some(y) = y {
            let max_y = self.height.saturating_sub(1);
            let clamped = y.min(max_y);
            let start = self.visible_window_start();
            let target = start + clamped;

            while self.rows.len() <= target {
                self.rows.push(Row::new(self.width));
            }

            self.cursor.pos.y = target;
        }

        if let Some(x) = x {
            self.cursor.pos.x = x.min(self.width.saturating_sub(1));
        }

        self.enforce_scrollback_limit();
        self.debug_assert_invariants();
    }

    /// CUU/CUD/CUF/CUB: cursor-relative movement, clamped to the visible
    /// screen. Unlike IND/RI/NEL, these never scroll the buffer, they just
    /// stop at the screen edge.
    pub fn move_cursor_relative(&mut self, dx: i32, dy: i32) {
        self.cursor.wrap_pending = false;

        if dx != 0 {
            let new_x = (self.cursor.pos.x as i32 + dx).max(0);
            #[allow(clippy::cast_sign_loss)]
            let new_x = new_x as usize;
            self.cursor.pos.x = new_x.min(self.width.saturating_sub(1));
        }

        if dy != 0 {
            let start = self.visible_window_start();
            #[allow(clippy::cast_possible_wrap)]
            let max_y = (start + self.height.saturating_sub(1)) as i32;
            #[allow(clippy::cast_possible_wrap)]
            let current = self.cursor.pos.y as i32;
            #[allow(clippy::cast_possible_wrap)]
            let floor = start as i32;

            let new_y = (current + dy).clamp(floor, max_y);
            #[allow(clippy::cast_sign_loss)]
            let new_y = new_y as usize;

            while self.rows.len() <= new_y {
                self.rows.push(Row::new(self.width));
            }

            self.cursor.pos.y = new_y;
        }

        self.enforce_scrollback_limit();
        self.debug_assert_invariants();
    }

    /// EL 0 — erase from the cursor to the end of the current line.
    pub fn erase_line_to_end(&mut self) {
        let row = self.cursor.pos.y;
        if row >= self.rows.len() {
            return;
        }
        let col = self.cursor.pos.x;
        let tag = self.current_tag.clone();
        let width = self.width;
        self.rows[row].erase_range(col, width, &tag);
    }

    /// EL 1 — erase from the start of the line to (and including) the cursor.
    pub fn erase_line_to_beginning(&mut self) {
        let row = self.cursor.pos.y;
        if row >= self.rows.len() {
            return;
        }
        let col = self.cursor.pos.x;
        let tag = self.current_tag.clone();
        self.rows[row].erase_range(0, col + 1, &tag);
    }

    /// EL 2 — erase the entire current line.
    pub fn erase_line(&mut self) {
        let row = self.cursor.pos.y;
        if row >= self.rows.len() {
            return;
        }
        let tag = self.current_tag.clone();
        let width = self.width;
        self.rows[row].erase_range(0, width, &tag);
    }

    /// ECH — erase N cells starting at the cursor, without shifting
    /// surrounding text (unlike DCH, which closes the gap).
    pub fn erase_chars(&mut self, n: usize) {
        let row = self.cursor.pos.y;
        if row >= self.rows.len() {
            return;
        }
        let col = self.cursor.pos.x;
        let tag = self.current_tag.clone();
        let end = col.saturating_add(n).min(self.width);
        self.rows[row].erase_range(col, end, &tag);
    }

    /// ED 0 — erase from the cursor to the end of the display.
    pub fn erase_to_end_of_display(&mut self) {
        self.erase_line_to_end();

        let row = self.cursor.pos.y;
        let tag = self.current_tag.clone();
        let width = self.width;
        let end = self.rows.len();

        for r in (row + 1)..end {
            self.rows[r].erase_range(0, width, &tag);
        }
    }

    /// ED 1 — erase from the start of the display to the cursor.
    pub fn erase_to_beginning_of_display(&mut self) {
        self.erase_line_to_beginning();

        let row = self.cursor.pos.y;
        let tag = self.current_tag.clone();
        let width = self.width;
        let start = self.visible_window_start();

        for r in start..row.min(self.rows.len()) {
            self.rows[r].erase_range(0, width, &tag);
        }
    }

    /// ED 2 — erase the entire visible display. Scrollback is left intact.
    pub fn erase_display(&mut self) {
        let tag = self.current_tag.clone();
        let width = self.width;
        let start = self.visible_window_start();
        let end = self.rows.len();

        for r in start..end {
            self.rows[r].erase_range(0, width, &tag);
        }
    }

    /// ED 3 — erase scrollback history, keeping only the live screen.
    pub fn erase_scrollback(&mut self) {
        if self.kind != BufferType::Primary {
            return;
        }

        let start = self.visible_window_start();
        if start == 0 {
            return;
        }

        self.rows.drain(0..start);
        self.cursor.pos.y = self.cursor.pos.y.saturating_sub(start);
        self.scroll_offset = 0;

        self.debug_assert_invariants();
    }

    /// DECSCA — toggle the protected attribute applied to subsequently-written cells.
    pub fn set_character_protection(&mut self, protected: bool) {
        self.current_tag.protected = protected;
    }

    /// HTS — set a tab stop at the current cursor column.
    pub fn set_tab_stop_at_cursor(&mut self) {
        self.tab_stops.insert(self.cursor.pos.x);
    }

    /// TBC 0 — clear the tab stop at the current cursor column.
    pub fn clear_tab_stop_at_cursor(&mut self) {
        self.tab_stops.remove(&self.cursor.pos.x);
    }

    /// TBC 3 — clear every tab stop.
    pub fn clear_all_tab_stops(&mut self) {
        self.tab_stops.clear();
    }

    /// DECSTR soft reset: restore the default every-8-columns tab stops.
    pub fn reset_tab_stops(&mut self) {
        self.tab_stops = default_tab_stops(self.width);
    }

    /// Next tab stop strictly after `from`, or `width - 1` if none remain.
    fn next_tab_stop(&self, from: usize) -> usize {
        self.tab_stops
            .range((from + 1)..)
            .next()
            .copied()
            .unwrap_or_else(|| self.width.saturating_sub(1))
    }

    /// Next tab stop strictly before `from`, or `0` if none remain.
    fn prev_tab_stop(&self, from: usize) -> usize {
        self.tab_stops
            .range(..from)
            .next_back()
            .copied()
            .unwrap_or(0)
    }

    /// HT — advance the cursor to the next tab stop, or the last column.
    pub fn handle_tab(&mut self) {
        self.cursor.pos.x = self.next_tab_stop(self.cursor.pos.x).min(self.width.saturating_sub(1));
        self.cursor.wrap_pending = false;
    }

    /// CHT — move the cursor forward `n` tab stops (clamped to the last column).
    pub fn cursor_forward_tabulation(&mut self, n: usize) {
        self.cursor.wrap_pending = false;

        for _ in 0..n.max(1) {
            let next = self.next_tab_stop(self.cursor.pos.x);
            if next <= self.cursor.pos.x {
                self.cursor.pos.x = self.width.saturating_sub(1);
                break;
            }
            self.cursor.pos.x = next;
        }
    }

    /// CBT — move the cursor backward `n` tab stops (clamped to column 0).
    pub fn cursor_backward_tabulation(&mut self, n: usize) {
        self.cursor.wrap_pending = false;

        for _ in 0..n.max(1) {
            if self.cursor.pos.x == 0 {
                break;
            }
            self.cursor.pos.x = self.prev_tab_stop(self.cursor.pos.x);
        }
    }

    /// DECSEL 0 — selective erase from the cursor to the end of the current line.
    pub fn erase_line_to_end_selective(&mut self) {
        let row = self.cursor.pos.y;
        if row >= self.rows.len() {
            return;
        }
        let col = self.cursor.pos.x;
        let tag = self.current_tag.clone();
        let width = self.width;
        self.rows[row].erase_range_selective(col, width, &tag);
    }

    /// DECSEL 1 — selective erase from the start of the line to the cursor.
    pub fn erase_line_to_beginning_selective(&mut self) {
        let row = self.cursor.pos.y;
        if row >= self.rows.len() {
            return;
        }
        let col = self.cursor.pos.x;
        let tag = self.current_tag.clone();
        self.rows[row].erase_range_selective(0, col + 1, &tag);
    }

    /// DECSEL 2 — selective erase of the entire current line.
    pub fn erase_line_selective(&mut self) {
        let row = self.cursor.pos.y;
        if row >= self.rows.len() {
            return;
        }
        let tag = self.current_tag.clone();
        let width = self.width;
        self.rows[row].erase_range_selective(0, width, &tag);
    }

    /// DECSED 0 — selective erase from the cursor to the end of the display.
    pub fn erase_to_end_of_display_selective(&mut self) {
        self.erase_line_to_end_selective();

        let row = self.cursor.pos.y;
        let tag = self.current_tag.clone();
        let width = self.width;
        let end = self.rows.len();

        for r in (row + 1)..end {
            self.rows[r].erase_range_selective(0, width, &tag);
        }
    }

    /// DECSED 1 — selective erase from the start of the display to the cursor.
    pub fn erase_to_beginning_of_display_selective(&mut self) {
        self.erase_line_to_beginning_selective();

        let row = self.cursor.pos.y;
        let tag = self.current_tag.clone();
        let width = self.width;
        let start = self.visible_window_start();

        for r in start..row.min(self.rows.len()) {
            self.rows[r].erase_range_selective(0, width, &tag);
        }
    }

    /// DECSED 2 — selective erase of the entire visible display.
    pub fn erase_display_selective(&mut self) {
        let tag = self.current_tag.clone();
        let width = self.width;
        let start = self.visible_window_start();
        let end = self.rows.len();

        for r in start..end {
            self.rows[r].erase_range_selective(0, width, &tag);
        }
    }
}

// tests

// ============================================================================
// Unit Tests for Buffer
// ============================================================================

#[cfg(test)]
mod basic_tests {
    use super::*;
    use crate::row::Row;
    use termcore_common::buffer_states::buffer_type::BufferType;
    use termcore_common::buffer_states::tchar::TChar;

    fn ascii(c: char) -> TChar {
        TChar::Ascii(c as u8)
    }

    // ────────────────────────────────────────────────────────────────
    // PRIMARY BUFFER TESTS
    // ────────────────────────────────────────────────────────────────

    #[test]
    fn primary_lf_adds_new_row_no_scroll_yet() {
        let mut buf = Buffer::new(5, 3);

        buf.handle_lf();
        assert_eq!(buf.cursor.pos.y, 1);
        assert_eq!(buf.rows.len(), 2);
    }

    #[test]
    fn primary_lf_accumulates_scrollback() {
        let mut buf = Buffer::new(5, 3);

        for _ in 0..6 {
            buf.handle_lf();
        }

        // initial row + 6 new rows = 7
        assert_eq!(buf.rows.len(), 7);
        assert_eq!(buf.cursor.pos.y, 6);
    }

    #[test]
    fn primary_lf_respects_scrollback_limit() {
        let mut buf = Buffer::new(5, 3);
        buf.scrollback_limit = 2; // very small

        for _ in 0..10 {
            buf.handle_lf();
        }

        // should now be height (3) + limit (2) = 5 rows
        assert_eq!(buf.rows.len(), 5);
        assert_eq!(buf.cursor.pos.y, buf.rows.len() - 1);
    }

    #[test]
    fn primary_insert_text_resets_scroll_offset() {
        let mut buf = Buffer::new(10, 5);
        buf.scroll_offset = 3; // simulate user scrollback

        buf.insert_text(&[ascii('A')]);

        assert_eq!(buf.scroll_offset, 0);
    }

    // ────────────────────────────────────────────────────────────────
    // ALTERNATE BUFFER TESTS
    // ────────────────────────────────────────────────────────────────

    #[test]
    fn alt_buffer_has_no_scrollback() {
        let mut buf = Buffer::new(5, 3);
        buf.enter_alternate();

        assert_eq!(buf.rows.len(), 3);
        assert_eq!(buf.kind, BufferType::Alternate);
    }

    #[test]
    fn alt_buffer_lf_scrolls_screen() {
        let mut buf = Buffer::new(5, 3);
        buf.enter_alternate();

        buf.handle_lf();
        buf.handle_lf();
        assert_eq!(buf.cursor.pos.y, 2);

        // now at bottom → should scroll
        buf.handle_lf();
        assert_eq!(buf.cursor.pos.y, 2);
        assert_eq!(buf.rows.len(), 3);
    }

    #[test]
    fn leaving_alt_restores_primary() {
        let mut buf = Buffer::new(6, 4);

        // create scrollback + move cursor
        buf.handle_lf();
        buf.handle_lf();
        let saved_y = buf.cursor.pos.y;
        let saved_rows = buf.rows.len();

        // Enter alternate buffer via API
        buf.enter_alternate();

        // Do some things in alternate screen (optional)
        buf.handle_lf();

        // Leave alternate, restoring primary
        buf.leave_alternate();

        assert_eq!(buf.kind, BufferType::Primary);
        assert_eq!(buf.rows.len(), saved_rows);
        assert_eq!(buf.cursor.pos.y, saved_y);
    }

    #[test]
    fn scrollback_no_effect_when_no_history() {
        let mut buf = Buffer::new(5, 3);

        buf.scroll_back(10);
        assert_eq!(buf.scroll_offset, 0);
    }

    #[test]
    fn scrollback_clamps_to_max_offset() {
        let mut buf = Buffer::new(5, 3);

        // Add many lines
        for _ in 0..10 {
            buf.handle_lf();
        }

        let max = buf.rows.len() - buf.height;
        buf.scroll_back(999);

        assert_eq!(buf.scroll_offset, max);
    }

    #[test]
    fn scroll_forward_clamps_to_zero() {
        let mut buf = Buffer::new(5, 3);

        for _ in 0..10 {
            buf.handle_lf();
        }

        buf.scroll_back(5); // scroll up some amount
        buf.scroll_forward(999); // scroll down more than enough

        assert_eq!(buf.scroll_offset, 0);
    }

    #[test]
    fn scroll_to_bottom_resets_offset() {
        let mut buf = Buffer::new(5, 3);

        for _ in 0..10 {
            buf.handle_lf();
        }

        buf.scroll_back(5);
        assert!(buf.scroll_offset > 0);

        buf.scroll_to_bottom();

        assert_eq!(buf.scroll_offset, 0);
    }

    #[test]
    fn no_scrollback_in_alternate_buffer() {
        let mut buf = Buffer::new(5, 3);
        buf.enter_alternate();

        for _ in 0..10 {
            buf.handle_lf(); // scrolls but no scrollback
        }

        buf.scroll_back(10);
        assert_eq!(buf.scroll_offset, 0);

        buf.scroll_forward(10);
        assert_eq!(buf.scroll_offset, 0);
    }

    #[test]
    fn insert_text_resets_scrollback() {
        let mut buf = Buffer::new(10, 5);

        for _ in 0..20 {
            buf.handle_lf();
        }

        buf.scroll_back(5);
        assert!(buf.scroll_offset > 0);

        buf.insert_text(&[TChar::Ascii(b'A')]);

        assert_eq!(buf.scroll_offset, 0);
    }
}













#[cfg(test)]
mod scroll_up_scrollback_tests {
    use super::*;

    #[test]
    fn scroll_up_shifts_cursor_and_keeps_scrollback_consistent() {
        let mut b = Buffer::new(10, 3);

        // populate 6 rows
        for _ in 0..5 {
            b.handle_lf();
        }

        b.cursor.pos.y = 2;

        b.scroll_up(); // remove row 0

        assert_eq!(b.rows.len(), 6);
        assert_eq!(b.cursor.pos.y, 1, "cursor must shift downward by 1");
        assert_eq!(b.scroll_offset, 0);
    }

    #[test]
    fn scroll_up_does_not_break_scrollback_offset() {
        let mut b = Buffer::new(10, 3);

        for _ in 0..20 {
            b.handle_lf();
        }

        b.scroll_back(5);

        b.scroll_up(); // remove row 0
        assert_eq!(b.scroll_offset, 5, "scroll_offset must not change");
    }
}
