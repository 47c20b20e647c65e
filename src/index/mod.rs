pub mod kmer;
pub mod subseq;
