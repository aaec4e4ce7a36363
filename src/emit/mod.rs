use crate::parser::{Declaration, DeclarationKind, Token, TranslationUnit};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::io::Write;
use tracing::debug;

/// Corrective action applied to a declaration's token range before printing.
///
/// Front ends report ragged extents for a few declaration shapes; each known
/// shape gets one entry here, keyed by declaration kind and a predicate over
/// the final token. Keeping the fixups in one table isolates front-end
/// quirks from the selection logic and lets each action be tested against
/// synthetic token sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fixup {
    /// The extent covers one extraneous token past the declaration
    DropLast,
    /// The extent is a partial fragment duplicating a sibling declaration;
    /// emit nothing
    Suppress,
    /// The final token is a misparsed trailing attribute; print a bare
    /// statement terminator in its place
    SubstituteTerminator,
}

/// The trailing-attribute keyword some front ends leave dangling at the end
/// of a typedef's extent
const ATTRIBUTE_KEYWORD: &str = "__attribute__";

fn fixup_for(decl: &Declaration, last: &str) -> Option<Fixup> {
    match decl.kind {
        // A function definition's extent may cover the unrelated token that
        // follows it; the definition itself always ends at its closing
        // brace. A definition ending the file reports a clean extent, so
        // never strip a closing brace.
        DeclarationKind::Function if decl.is_definition && last != "}" => Some(Fixup::DropLast),

        // In `typedef struct {...} name;` the tag and the typedef arrive as
        // overlapping siblings; only the sibling ending in `;` or `}` is the
        // complete one, the other is a fragment to drop.
        DeclarationKind::Struct | DeclarationKind::Union | DeclarationKind::Enum
            if last != ";" && last != "}" =>
        {
            Some(Fixup::Suppress)
        }

        DeclarationKind::Typedef if last == ATTRIBUTE_KEYWORD => {
            Some(Fixup::SubstituteTerminator)
        }

        _ => None,
    }
}

/// Writes selected declarations to the output sink, token by token.
///
/// Tokens are printed verbatim, newline-separated; original whitespace is
/// not preserved. Output streams straight to the sink as each declaration
/// is processed.
pub struct Emitter<W: Write> {
    sink: W,
}

impl<W: Write> Emitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Tokenize a declaration's extent and print it, corrected
    pub fn emit(&mut self, unit: &TranslationUnit, decl: &Declaration) -> Result<()> {
        let tokens = unit.tokenize(&decl.extent);
        self.emit_tokens(decl, &tokens)
    }

    /// Print an already-tokenized declaration
    pub fn emit_tokens(&mut self, decl: &Declaration, tokens: &[Token]) -> Result<()> {
        let Some(last) = tokens.last() else {
            return Ok(());
        };

        match fixup_for(decl, last.spelling()) {
            Some(Fixup::Suppress) => {
                debug!("suppressing fragment {}", decl.display());
                Ok(())
            }
            Some(Fixup::DropLast) => self.write_tokens(&tokens[..tokens.len() - 1]),
            Some(Fixup::SubstituteTerminator) => {
                self.write_tokens(&tokens[..tokens.len() - 1])?;
                write!(self.sink, "; ")
                    .into_diagnostic()
                    .wrap_err("failed to write output")
            }
            None => self.write_tokens(tokens),
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink
            .flush()
            .into_diagnostic()
            .wrap_err("failed to flush output")
    }

    /// Consume the emitter and return the sink
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_tokens(&mut self, tokens: &[Token]) -> Result<()> {
        for token in tokens {
            writeln!(self.sink, "{}", token.spelling())
                .into_diagnostic()
                .wrap_err("failed to write output")?;
        }
        Ok(())
    }
}
