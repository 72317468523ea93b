//! Chimeric sequence assembly and translation.

pub mod assemble;
pub mod translate;

pub use assemble::{fragments, splice};
pub use translate::{molecular_weight, translate, CodonTable, Translation};
