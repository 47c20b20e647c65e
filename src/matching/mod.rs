pub mod boyer_moore;
pub mod naive;

pub use boyer_moore::{boyer_moore, BoyerMoore};
pub use naive::{exact_match, exact_match_with_rc, naive_approximate, naive_match, MatchStats};
