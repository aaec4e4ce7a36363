mod c;
mod common;
mod declaration;

pub use c::{CParser, TranslationUnit};
pub use declaration::{
    CallSite, Declaration, DeclarationKind, FrontEndError, Location, Token, TokenRange,
};
