//! 基于鸽巢原理的近似匹配。
//!
//! 把模式串 P 切成 n+1 段：任何失配数 <= n 的对齐中至少有一段完全匹配。
//! 每段作为种子在索引中精确查找，再把候选扩展回整条 P 逐位核对。

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::index::kmer::KmerIndex;
use crate::index::subseq::{SubseqIndex, SubseqParams};

/// 近似匹配结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApproxHits {
    /// 核对通过的起始偏移（升序，去重）
    pub offsets: Vec<usize>,
    /// 检查过的索引命中总数（仅用于分析）
    pub index_hits: usize,
}

/// 只核对 `skip` 区间之外的位置；失配超过 `max_mismatches` 即放弃。
fn verify(p: &[u8], window: &[u8], skip: std::ops::Range<usize>, max_mismatches: usize) -> bool {
    let mut mismatches = 0usize;
    for (j, (a, b)) in p.iter().zip(window).enumerate() {
        if skip.contains(&j) {
            continue;
        }
        if a != b {
            mismatches += 1;
            if mismatches > max_mismatches {
                return false;
            }
        }
    }
    true
}

/// 空模式串、空文本、模式长于文本：结果为空。
fn is_degenerate(p: &[u8], t: &[u8]) -> bool {
    p.is_empty() || t.is_empty() || p.len() > t.len()
}

/// n+1 段的分段长度 floor(|P| / (n+1))；分段为 0 时拒绝。
fn segment_length(p: &[u8], max_mismatches: usize) -> Result<usize> {
    let parts = max_mismatches
        .checked_add(1)
        .ok_or_else(|| Error::InvalidParameter("mismatch budget overflows".into()))?;
    if parts > p.len() {
        return Err(Error::InvalidParameter(format!(
            "{} segments requested for a pattern of length {}",
            parts,
            p.len()
        )));
    }
    Ok(p.len() / parts)
}

/// k-mer 变体的段长 floor(|P|/(n+1))。
/// 退化输入（空模式串、空文本、模式长于文本）返回 `Ok(None)`，对应空结果。
pub fn kmer_seed_length(p: &[u8], t: &[u8], max_mismatches: usize) -> Result<Option<usize>> {
    if is_degenerate(p, t) {
        return Ok(None);
    }
    segment_length(p, max_mismatches).map(Some)
}

/// 间隔子序列变体的种子参数：k = floor(|P|/(n+1))，间隔 `ival`。
///
/// 第 i 个种子从 P 的位置 i 开始（i = 0..=n）。`ival` 必须 >= n+1：
/// 这样各种子互不相交，失配数 <= n 的对齐里至少有一个种子完全匹配；
/// 更小的间隔会让种子重叠而漏掉匹配，因此直接拒绝。
/// 退化输入返回 `Ok(None)`。
pub fn subseq_seed_params(
    p: &[u8],
    t: &[u8],
    max_mismatches: usize,
    ival: usize,
) -> Result<Option<SubseqParams>> {
    if ival == 0 {
        return Err(Error::InvalidParameter("subsequence interval must be at least 1".into()));
    }
    if ival <= max_mismatches {
        return Err(Error::InvalidParameter(format!(
            "interval {} is below {}: the seeds would overlap",
            ival,
            max_mismatches.saturating_add(1)
        )));
    }
    if is_degenerate(p, t) {
        return Ok(None);
    }
    let k = segment_length(p, max_mismatches)?;
    let params = SubseqParams { k, ival };
    let span = params.checked_span()?;
    // segment_length 保证 |P| >= n+1
    if span > p.len() - max_mismatches {
        return Err(Error::InvalidParameter(format!(
            "seed span {} starting at offset {} exceeds pattern length {}",
            span,
            max_mismatches,
            p.len()
        )));
    }
    Ok(Some(params))
}

/// 连续 k-mer 索引版本：段长 L = floor(|P|/(n+1))，第 i 段从 i*L 开始，最后一段吸收余数。
pub fn approximate_match(p: &[u8], t: &[u8], max_mismatches: usize) -> Result<ApproxHits> {
    let Some(seg) = kmer_seed_length(p, t, max_mismatches)? else {
        return Ok(ApproxHits::default());
    };
    let index = KmerIndex::new(t, seg)?;
    Ok(approximate_match_with_index(p, t, max_mismatches, &index))
}

/// 使用预先建好的 k-mer 索引；段长取索引的 k，P 按 k 切段（至多 n+1 段）。
/// 只有 (n+1)·k <= |P| 时结果才完整。索引只读，可在多次调用（或多个线程）间共享。
pub fn approximate_match_with_index(
    p: &[u8],
    t: &[u8],
    max_mismatches: usize,
    index: &KmerIndex,
) -> ApproxHits {
    let mut result = ApproxHits::default();
    if is_degenerate(p, t) {
        return result;
    }
    let seg = index.k();
    let parts = max_mismatches.saturating_add(1).min(p.len() / seg);

    let mut matches = BTreeSet::new();
    for i in 0..parts {
        let start = i * seg;
        let end = start + seg;
        for m in index.query(&p[start..end]) {
            result.index_hits += 1;
            if m < start || m - start + p.len() > t.len() {
                continue;
            }
            let begin = m - start;
            if verify(p, &t[begin..begin + p.len()], start..end, max_mismatches) {
                matches.insert(begin);
            }
        }
    }
    result.offsets = matches.into_iter().collect();
    result
}

/// 间隔子序列索引版本，种子参数见 [`subseq_seed_params`]。
pub fn approximate_match_subseq(
    p: &[u8],
    t: &[u8],
    max_mismatches: usize,
    ival: usize,
) -> Result<ApproxHits> {
    let Some(params) = subseq_seed_params(p, t, max_mismatches, ival)? else {
        return Ok(ApproxHits::default());
    };
    let index = SubseqIndex::new(t, params)?;
    Ok(approximate_match_with_subseq_index(p, t, max_mismatches, &index))
}

/// 使用预先建好的间隔子序列索引；跨度放不进 P 的种子不参与查询。
/// 只有索引间隔 >= n+1 时结果才完整。
pub fn approximate_match_with_subseq_index(
    p: &[u8],
    t: &[u8],
    max_mismatches: usize,
    index: &SubseqIndex,
) -> ApproxHits {
    let mut result = ApproxHits::default();
    if is_degenerate(p, t) {
        return result;
    }
    let span = index.span();

    let mut matches = BTreeSet::new();
    for start in 0..=max_mismatches {
        if span > p.len().saturating_sub(start) {
            break;
        }
        for m in index.query(&p[start..]) {
            result.index_hits += 1;
            if m < start || m - start + p.len() > t.len() {
                continue;
            }
            let begin = m - start;
            if verify(p, &t[begin..begin + p.len()], 0..0, max_mismatches) {
                matches.insert(begin);
            }
        }
    }
    result.offsets = matches.into_iter().collect();
    result
}
