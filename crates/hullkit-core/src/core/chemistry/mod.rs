//! Chemical identity: element symbols, formulas and the ordered element list of a
//! chemical system. Formula parsing follows the usual notation (`Ce2Co17B`,
//! `Ca(OH)2`, `Fe0.5Ni0.5`).

pub mod element;
pub mod formula;
pub mod system;
