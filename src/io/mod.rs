pub mod fasta;
pub mod fastq;
