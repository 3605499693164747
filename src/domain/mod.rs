pub mod hash;
pub mod track;
