use crate::error::{Error, Result};

/// `a` 的后缀与 `b` 的前缀之间长度至少为 `min_length` 的最长重叠；没有则返回 0。
///
/// 从左到右在 `a` 中查找 `b` 的前 `min_length` 个字符，第一个能使 `a[start..]`
/// 成为 `b` 前缀的位置即给出最长重叠 `|a| - start`。`min_length` 为 0 时按 1 处理。
pub fn overlap(a: &[u8], b: &[u8], min_length: usize) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let seed = &b[..min_length.max(1).min(b.len())];
    let mut start = 0usize;
    while start + seed.len() <= a.len() {
        let Some(hit) = a[start..].windows(seed.len()).position(|w| w == seed) else {
            return 0;
        };
        start += hit;
        if b.starts_with(&a[start..]) {
            return a.len() - start;
        }
        start += 1;
    }
    0
}

pub(crate) fn check_min_overlap(k: usize) -> Result<()> {
    if k == 0 {
        return Err(Error::InvalidParameter("minimum overlap k must be at least 1".into()));
    }
    Ok(())
}

/// read 集合上的 k-mer 索引：有序 (k-mer, read 下标) 表，同一 read 在同一 k-mer 下只出现一次。
#[derive(Debug, Clone)]
pub struct ReadKmerIndex {
    k: usize,
    entries: Vec<(Vec<u8>, usize)>,
}

impl ReadKmerIndex {
    /// 只为迭代器给出的 (下标, read) 建索引，已删除的 read 由调用方跳过。
    pub fn build<'a, I>(reads: I, k: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, &'a [u8])>,
    {
        check_min_overlap(k)?;
        Ok(Self::collect(reads, k))
    }

    /// 调用方已保证 k >= 1
    pub(crate) fn collect<'a, I>(reads: I, k: usize) -> Self
    where
        I: IntoIterator<Item = (usize, &'a [u8])>,
    {
        let mut entries = Vec::new();
        for (id, read) in reads {
            for kmer in read.windows(k) {
                entries.push((kmer.to_vec(), id));
            }
        }
        entries.sort_unstable();
        entries.dedup();
        Self { k, entries }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// 含有该 k-mer 的 read 下标（升序）
    pub fn reads_containing<'s>(&'s self, kmer: &'s [u8]) -> impl Iterator<Item = usize> + 's {
        let first = self.entries.partition_point(|(key, _)| key.as_slice() < kmer);
        self.entries[first..]
            .iter()
            .take_while(move |(key, _)| key.as_slice() == kmer)
            .map(|&(_, id)| id)
    }

    /// 可能与 `read` 后缀重叠的候选：以 `read` 末尾 k 个字符为键的 read。
    /// 短于 k 的 read 没有候选。
    pub fn candidates<'s>(&'s self, read: &'s [u8]) -> impl Iterator<Item = usize> + 's {
        // 空键不会命中任何条目
        let suffix: &[u8] = if read.len() >= self.k { &read[read.len() - self.k..] } else { &[] };
        self.reads_containing(suffix)
    }
}

/// 有向重叠边：`from` 的后缀与 `to` 的前缀重叠 `len` 个字符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEdge {
    pub from: usize,
    pub to: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapGraph {
    /// 按 (from, to) 升序排列
    pub edges: Vec<OverlapEdge>,
}

impl OverlapGraph {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 至少有一条出边的 read 数
    pub fn nodes_with_outgoing(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for e in &self.edges {
            if last != Some(e.from) {
                count += 1;
                last = Some(e.from);
            }
        }
        count
    }
}

/// 构建 read 之间的重叠图。read 按下标区分：内容相同的两条 read 也是不同节点。
pub fn overlap_graph<R: AsRef<[u8]>>(reads: &[R], k: usize) -> Result<OverlapGraph> {
    let index = ReadKmerIndex::build(reads.iter().map(R::as_ref).enumerate(), k)?;
    let mut edges = Vec::new();
    for (from, read) in reads.iter().enumerate() {
        let read = read.as_ref();
        for to in index.candidates(read) {
            if to == from {
                continue;
            }
            let len = overlap(read, reads[to].as_ref(), k);
            if len > 0 {
                edges.push(OverlapEdge { from, to, len });
            }
        }
    }
    Ok(OverlapGraph { edges })
}
