use crate::error::{Error, Result};

/// 排序索引中的一项：在 `offset` 处抽取的键（k-mer 或间隔子序列）。
/// 排序按 (key, offset) 字典序。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct IndexEntry {
    pub key: Vec<u8>,
    pub offset: usize,
}

/// 在有序索引中查找键等于 `key` 的连续区间，返回其偏移。
/// 二分定位到第一个 >= (key, -inf) 的位置，再线性收集。
pub(crate) fn lookup(entries: &[IndexEntry], key: &[u8]) -> Vec<usize> {
    let first = entries.partition_point(|e| e.key.as_slice() < key);
    entries[first..]
        .iter()
        .take_while(|e| e.key == key)
        .map(|e| e.offset)
        .collect()
}

/// 文本上所有长度为 k 的子串的有序索引。
#[derive(Debug, Clone)]
pub struct KmerIndex {
    k: usize,
    entries: Vec<IndexEntry>,
}

impl KmerIndex {
    pub fn new(text: &[u8], k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidParameter("k-mer length must be at least 1".into()));
        }
        let mut entries: Vec<IndexEntry> = text
            .windows(k)
            .enumerate()
            .map(|(offset, kmer)| IndexEntry { key: kmer.to_vec(), offset })
            .collect();
        entries.sort_unstable();
        Ok(Self { k, entries })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// 返回文本中与 `p` 的前 k 个字符完全相同的所有偏移（升序）。
    /// `p` 短于 k 时没有命中。
    pub fn query(&self, p: &[u8]) -> Vec<usize> {
        if p.len() < self.k {
            return Vec::new();
        }
        lookup(&self.entries, &p[..self.k])
    }
}
