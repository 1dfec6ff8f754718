// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ansi::{ParserOutcome, parse_param_as};
use crate::error::ParserFailures;
use termcore_common::buffer_states::terminal_output::TerminalOutput;

/// Select Character Protection Attribute
///
/// DECSCA marks subsequently written cells as protected (1) or unprotected
/// (0, 2), which DECSED/DECSEL then respect.
///
/// ESC [ Pn " q
/// # Errors
/// Will return an error if the parameter is not a valid number
pub fn ansi_parser_inner_csi_finished_decsca(
    params: &[u8],
    output: &mut Vec<TerminalOutput>,
) -> ParserOutcome {
    let Ok(param) = parse_param_as::<usize>(params) else {
        return ParserOutcome::InvalidParserFailure(ParserFailures::UnhandledDECSCACommand(
            format!("{params:?}"),
        ));
    };

    match param.unwrap_or(0) {
        0 | 2 => output.push(TerminalOutput::CharacterProtection(false)),
        1 => output.push(TerminalOutput::CharacterProtection(true)),
        v => {
            warn!("Unsupported DECSCA command ({v})");
            output.push(TerminalOutput::Invalid);
        }
    }

    ParserOutcome::Finished
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clears_protection() {
        let mut out = Vec::new();
        ansi_parser_inner_csi_finished_decsca(b"", &mut out);
        assert_eq!(out, vec![TerminalOutput::CharacterProtection(false)]);
    }

    #[test]
    fn mode_one_sets_protection() {
        let mut out = Vec::new();
        ansi_parser_inner_csi_finished_decsca(b"1", &mut out);
        assert_eq!(out, vec![TerminalOutput::CharacterProtection(true)]);
    }
}
