use crate::parser::{Declaration, DeclarationKind};
use crate::symbols::SymbolSet;

/// The fate of one top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Hand the declaration to the emitter
    Emit,
    /// A function outside the closed keep-set
    SkipUnkept,
    /// A name the user asked never to emit
    SkipBlacklisted,
}

impl Verdict {
    pub fn should_emit(&self) -> bool {
        matches!(self, Verdict::Emit)
    }
}

/// Decides, per top-level declaration, whether it belongs in the output.
///
/// Three checks in order, short-circuiting: functions outside the closed
/// keep-set are skipped; anything blacklisted is skipped; everything else is
/// emitted. Non-function declarations bypass the first check entirely — the
/// keep-set only prunes functions.
pub struct Selector<'a> {
    keep: &'a SymbolSet,
    blacklist: &'a SymbolSet,
}

impl<'a> Selector<'a> {
    pub fn new(keep: &'a SymbolSet, blacklist: &'a SymbolSet) -> Self {
        Self { keep, blacklist }
    }

    pub fn verdict(&self, decl: &Declaration) -> Verdict {
        if decl.kind == DeclarationKind::Function && !self.keep.contains(&decl.name) {
            return Verdict::SkipUnkept;
        }
        if self.blacklist.contains(&decl.name) {
            return Verdict::SkipBlacklisted;
        }
        Verdict::Emit
    }
}
