use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use seqmatch::align::{self, ApproxHits};
use seqmatch::assembly;
use seqmatch::index::kmer::KmerIndex;
use seqmatch::index::subseq::SubseqIndex;
use seqmatch::io::{fasta, fastq};
use seqmatch::matching;
use seqmatch::util::{dna, quality};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "seqmatch", author, version, about = "DNA string matching and greedy read assembly", arg_required_else_help = true)]
struct Cli {
    /// Verbose logging (DEBUG); RUST_LOG overrides
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Naive exact matching
    Exact {
        /// Reference FASTA file
        reference: String,
        #[arg(required = true)]
        patterns: Vec<String>,
        /// Also match the reverse complement of each pattern
        #[arg(long)]
        rc: bool,
    },
    /// Boyer-Moore matching, compared against the naive scan
    Bm {
        reference: String,
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// Pigeonhole approximate matching (Hamming distance)
    Approx {
        reference: String,
        #[arg(required = true)]
        patterns: Vec<String>,
        /// Maximum number of mismatches
        #[arg(short = 'n', long = "mismatches", default_value_t = 2)]
        mismatches: usize,
        /// Use a spaced-subsequence index with this interval
        #[arg(long)]
        ival: Option<usize>,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Semi-global edit distance between a pattern and the reference
    Edit {
        reference: String,
        pattern: String,
    },
    /// Overlap graph statistics of a read set
    Overlap {
        /// Reads FASTQ file
        reads: String,
        /// Minimum overlap length
        #[arg(short, long, default_value_t = 30)]
        k: usize,
    },
    /// Greedy shortest-common-superstring assembly
    Assemble {
        reads: String,
        /// Minimum overlap length
        #[arg(short, long, conflicts_with = "expect_len")]
        k: Option<usize>,
        /// Largest k to try when scanning for the expected length
        #[arg(long = "k-max", requires = "expect_len")]
        k_max: Option<usize>,
        /// Smallest k to try when scanning for the expected length
        #[arg(long = "k-min", default_value_t = 1)]
        k_min: usize,
        /// Expected genome length; tries k from k-max down to k-min
        #[arg(long = "expect-len", requires = "k_max")]
        expect_len: Option<usize>,
        /// Output FASTA path (stdout if omitted)
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Sequencing cycle with the lowest total quality
    Quality {
        reads: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Exact { reference, patterns, rc } => run_exact(&reference, &patterns, rc),
        Commands::Bm { reference, patterns } => run_bm(&reference, &patterns),
        Commands::Approx { reference, patterns, mismatches, ival, threads } => {
            run_approx(&reference, &patterns, mismatches, ival, threads)
        }
        Commands::Edit { reference, pattern } => run_edit(&reference, &pattern),
        Commands::Overlap { reads, k } => run_overlap(&reads, k),
        Commands::Assemble { reads, k, k_max, k_min, expect_len, out } => {
            run_assemble(&reads, k, k_max.zip(expect_len).map(|(hi, len)| (hi, k_min, len)), out.as_deref())
        }
        Commands::Quality { reads } => run_quality(&reads),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_reference(path: &str) -> Result<Vec<u8>> {
    let genome = dna::normalize_seq(&fasta::read_genome(path)?);
    info!(reference = path, len = genome.len(), "reference loaded");
    Ok(genome)
}

fn run_exact(reference: &str, patterns: &[String], rc: bool) -> Result<()> {
    let genome = load_reference(reference)?;
    for pat in patterns {
        let p = dna::normalize_seq(pat.as_bytes());
        let hits = if rc {
            matching::exact_match_with_rc(&p, &genome)
        } else {
            matching::exact_match(&p, &genome)
        };
        match hits.first() {
            Some(first) => println!("{}\t{}\t{}", pat, hits.len(), first),
            None => println!("{}\t0\t-", pat),
        }
    }
    Ok(())
}

fn run_bm(reference: &str, patterns: &[String]) -> Result<()> {
    let genome = load_reference(reference)?;
    println!("pattern\tmethod\toffsets\tcomparisons\talignments");
    for pat in patterns {
        let p = dna::normalize_seq(pat.as_bytes());
        let naive = matching::naive_match(&p, &genome);
        let bm = matching::boyer_moore(&p, &genome)?;
        for (method, stats) in [("naive", &naive), ("boyer-moore", &bm)] {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                pat,
                method,
                join_offsets(&stats.offsets),
                stats.comparisons,
                stats.alignments
            );
        }
    }
    Ok(())
}

/// 按种子参数分组建索引，各模式串在线程池中共享只读索引并行匹配。
fn run_approx(
    reference: &str,
    patterns: &[String],
    mismatches: usize,
    ival: Option<usize>,
    threads: usize,
) -> Result<()> {
    let genome = load_reference(reference)?;
    let pats: Vec<Vec<u8>> = patterns.iter().map(|p| dna::normalize_seq(p.as_bytes())).collect();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads.max(1)).build()?;

    // 退化模式串（空或长于参考）没有种子，结果为空
    let results: Vec<ApproxHits> = match ival {
        None => {
            let mut seeds = Vec::with_capacity(pats.len());
            let mut indexes = BTreeMap::new();
            for (pat, p) in patterns.iter().zip(&pats) {
                let seed = align::kmer_seed_length(p, &genome, mismatches)
                    .map_err(|e| anyhow::anyhow!("pattern '{}': {}", pat, e))?;
                if let Some(k) = seed {
                    if !indexes.contains_key(&k) {
                        indexes.insert(k, KmerIndex::new(&genome, k)?);
                    }
                }
                seeds.push(seed);
            }
            info!(indexes = indexes.len(), threads, "k-mer indexes built");
            pool.install(|| {
                pats.par_iter()
                    .zip(seeds.par_iter())
                    .map(|(p, seed)| match seed.and_then(|k| indexes.get(&k)) {
                        Some(index) => align::approximate_match_with_index(p, &genome, mismatches, index),
                        None => ApproxHits::default(),
                    })
                    .collect()
            })
        }
        Some(ival) => {
            let mut seeds = Vec::with_capacity(pats.len());
            let mut indexes = BTreeMap::new();
            for (pat, p) in patterns.iter().zip(&pats) {
                let seed = align::subseq_seed_params(p, &genome, mismatches, ival)
                    .map_err(|e| anyhow::anyhow!("pattern '{}': {}", pat, e))?;
                if let Some(params) = seed {
                    if !indexes.contains_key(&params.k) {
                        indexes.insert(params.k, SubseqIndex::new(&genome, params)?);
                    }
                }
                seeds.push(seed.map(|params| params.k));
            }
            info!(indexes = indexes.len(), ival, threads, "subsequence indexes built");
            pool.install(|| {
                pats.par_iter()
                    .zip(seeds.par_iter())
                    .map(|(p, seed)| match seed.and_then(|k| indexes.get(&k)) {
                        Some(index) => align::approximate_match_with_subseq_index(p, &genome, mismatches, index),
                        None => ApproxHits::default(),
                    })
                    .collect()
            })
        }
    };

    println!("pattern\tmatches\tindex_hits\toffsets");
    for (pat, hits) in patterns.iter().zip(&results) {
        println!("{}\t{}\t{}\t{}", pat, hits.offsets.len(), hits.index_hits, join_offsets(&hits.offsets));
    }
    Ok(())
}

fn run_edit(reference: &str, pattern: &str) -> Result<()> {
    let genome = load_reference(reference)?;
    let p = dna::normalize_seq(pattern.as_bytes());
    println!("{}", align::edit_distance(&p, &genome));
    Ok(())
}

fn run_overlap(reads_path: &str, k: usize) -> Result<()> {
    let (reads, _) = fastq::read_fastq(reads_path)?;
    info!(reads = reads.len(), k, "building overlap graph");
    let graph = assembly::overlap_graph(&reads, k)?;
    println!("edges\t{}", graph.edge_count());
    println!("nodes_with_outgoing\t{}", graph.nodes_with_outgoing());
    Ok(())
}

fn run_assemble(
    reads_path: &str,
    k: Option<usize>,
    scan: Option<(usize, usize, usize)>,
    out_path: Option<&str>,
) -> Result<()> {
    let (reads, _) = fastq::read_fastq(reads_path)?;
    info!(reads = reads.len(), "assembling");
    let (k, genome) = match (k, scan) {
        (Some(k), _) => (k, assembly::greedy_scs(reads, k)?),
        (None, Some((k_max, k_min, expect_len))) => {
            match assembly::assemble_to_length(&reads, (k_min..=k_max).rev(), expect_len)? {
                Some(found) => found,
                None => anyhow::bail!("no k in {}..={} assembles to length {}", k_min, k_max, expect_len),
            }
        }
        (None, None) => anyhow::bail!("either -k or --k-max with --expect-len is required"),
    };
    info!(
        k,
        len = genome.len(),
        a = dna::count_base(&genome, b'A'),
        c = dna::count_base(&genome, b'C'),
        g = dna::count_base(&genome, b'G'),
        t = dna::count_base(&genome, b'T'),
        "assembly finished"
    );

    let mut writer: Box<dyn Write> = match out_path {
        Some(path) => {
            let fh = std::fs::File::create(path)
                .map_err(|e| anyhow::anyhow!("cannot create output file '{}': {}", path, e))?;
            Box::new(std::io::BufWriter::new(fh))
        }
        None => Box::new(std::io::BufWriter::new(std::io::stdout().lock())),
    };
    writeln!(writer, ">contig k={} len={}", k, genome.len())?;
    for line in genome.chunks(70) {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn run_quality(reads_path: &str) -> Result<()> {
    let (_, quals) = fastq::read_fastq(reads_path)?;
    match quality::lowest_quality_cycle(&quals) {
        Some(cycle) => println!("{}", cycle),
        None => anyhow::bail!("FASTQ file '{}' contains no quality data", reads_path),
    }
    Ok(())
}

fn join_offsets(offsets: &[usize]) -> String {
    if offsets.is_empty() {
        return "-".to_string();
    }
    offsets.iter().map(usize::to_string).collect::<Vec<_>>().join(",")
}
