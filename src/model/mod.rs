mod attributes;
mod record;
mod team;

pub use attributes::*;
pub use record::*;
pub use team::*;
