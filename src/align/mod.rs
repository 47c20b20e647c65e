pub mod approx;
pub mod edit;

pub use approx::{
    approximate_match, approximate_match_subseq, approximate_match_with_index,
    approximate_match_with_subseq_index, kmer_seed_length, subseq_seed_params, ApproxHits,
};
pub use edit::{edit_distance, edit_distance_with_buf, EditBuffer};
