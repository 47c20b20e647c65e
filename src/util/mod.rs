pub mod dna;
pub mod quality;
