// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ansi::{ParserOutcome, parse_param_as};
use crate::error::ParserFailures;
use termcore_common::buffer_states::terminal_output::TerminalOutput;

/// Scroll Up
///
/// SU scrolls the content of the current scroll region up by Pn lines,
/// discarding lines scrolled off the top and blanking lines at the bottom.
///
/// ESC [ Pn S
/// # Errors
/// Will return an error if the parameter is not a valid number
pub fn ansi_parser_inner_csi_finished_su(
    params: &[u8],
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    let Ok(param) = parse_param_as::<usize>(params) else {
        return ParserOutcome::InvalidParserFailure(ParserFailures::UnhandledSUCommand(format!(
            "{params:?}"
        )));
    };

    output.push(TerminalOutput::ScrollUp(match param {
        Some(0) | None => 1,
        Some(n) => n,
    }));

    ParserOutcome::Finished
}

/// Scroll Down
///
/// SD scrolls the content of the current scroll region down by Pn lines,
/// discarding lines scrolled off the bottom and blanking lines at the top.
///
/// ESC [ Pn T
/// # Errors
/// Will return an error if the parameter is not a valid number
pub fn ansi_parser_inner_csi_finished_sd(
    params: &[u8],
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    let Ok(param) = parse_param_as::<usize>(params) else {
        return ParserOutcome::InvalidParserFailure(ParserFailures::UnhandledSDCommand(format!(
            "{params:?}"
        )));
    };

    output.push(TerminalOutput::ScrollDown(match param {
        Some(0) | None => 1,
        Some(n) => n,
    }));

    ParserOutcome::Finished
}
