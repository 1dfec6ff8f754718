// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ansi::{ParserOutcome, parse_param_as};
use crate::error::ParserFailures;
use termcore_common::buffer_states::terminal_output::TerminalOutput;

/// Cursor Forward Tabulation
///
/// CHT moves the cursor forward Pn tab stops.
///
/// ESC [ Pn I
/// # Errors
/// Will return an error if the parameter is not a valid number
pub fn ansi_parser_inner_csi_finished_cht(
    params: &[u8],
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    let Ok(param) = parse_param_as::<usize>(params) else {
        return ParserOutcome::InvalidParserFailure(ParserFailures::UnhandledCHTCommand(format!(
            "{params:?}"
        )));
    };

    output.push(TerminalOutput::CursorForwardTabulation(match param {
        Some(0) | None => 1,
        Some(n) => n,
    }));

    ParserOutcome::Finished
}

/// Cursor Backward Tabulation
///
/// CBT moves the cursor backward Pn tab stops.
///
/// ESC [ Pn Z
/// # Errors
/// Will return an error if the parameter is not a valid number
pub fn ansi_parser_inner_csi_finished_cbt(
    params: &[u8],
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    let Ok(param) = parse_param_as::<usize>(params) else {
        return ParserOutcome::InvalidParserFailure(ParserFailures::UnhandledCBTCommand(format!(
            "{params:?}"
        )));
    };

    output.push(TerminalOutput::CursorBackwardTabulation(match param {
        Some(0) | None => 1,
        Some(n) => n,
    }));

    ParserOutcome::Finished
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_moves_one_stop() {
        let mut out = Vec::new();
        ansi_parser_inner_csi_finished_cht(b"", &mut out);
        assert_eq!(out, vec![TerminalOutput::CursorForwardTabulation(1)]);

        let mut out = Vec::new();
        ansi_parser_inner_csi_finished_cbt(b"", &mut out);
        assert_eq!(out, vec![TerminalOutput::CursorBackwardTabulation(1)]);
    }
}
