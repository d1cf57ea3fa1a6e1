//! Domain models for the pronto-ficha system.

mod intake;
mod record;
mod ticket;

pub use intake::*;
pub use record::*;
pub use ticket::*;
