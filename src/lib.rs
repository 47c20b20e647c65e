//! # seqmatch
//!
//! DNA 序列（字母表 {A,C,G,T,N}）上的精确 / 近似匹配与贪心组装。
//!
//! - **精确匹配**：朴素扫描（含反向互补）与 Boyer–Moore（坏字符 + 强好后缀规则）
//! - **索引**：有序 k-mer 索引与间隔子序列索引，二分查找
//! - **近似匹配**：鸽巢原理分段种子 + 失配数核对；半全局编辑距离
//! - **组装**：重叠图与贪心最短公共超串
//!
//! ## 快速示例
//!
//! ```rust
//! use seqmatch::align::approximate_match;
//! use seqmatch::assembly::greedy_scs;
//! use seqmatch::matching::BoyerMoore;
//!
//! let genome = b"GCTAGCTCTACGAGTCTAAGCTAGCTAGCT";
//!
//! // 预处理一次，可扫描多条文本
//! let bm = BoyerMoore::new(b"GCTAGC").unwrap();
//! assert_eq!(bm.scan(genome).offsets, vec![0, 19, 23]);
//!
//! // 至多 1 个失配
//! let hits = approximate_match(b"GCTCGC", genome, 1).unwrap();
//! assert!(hits.offsets.contains(&0));
//!
//! let reads = vec![b"CT".to_vec(), b"TGGA".to_vec()];
//! assert_eq!(greedy_scs(reads, 1).unwrap(), b"CTGGA");
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — FASTA / FASTQ 读取
//! - [`util`] — 反向互补、质量值等工具函数
//! - [`matching`] — 朴素匹配与 Boyer–Moore
//! - [`index`] — k-mer 索引与间隔子序列索引
//! - [`align`] — 鸽巢近似匹配与编辑距离
//! - [`assembly`] — 重叠图与贪心组装

pub mod align;
pub mod assembly;
pub mod error;
pub mod index;
pub mod io;
pub mod matching;
pub mod util;

pub use error::{Error, Result};
