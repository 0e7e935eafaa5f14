//! Languages and translated UI strings.

mod lang;
mod messages;

pub use lang::Lang;
pub use messages::Translator;
