use crate::error::{Error, Result};

use super::kmer::{lookup, IndexEntry};

/// 间隔种子参数：每个子序列取 k 个字符，相邻字符间隔 ival（1 即连续）。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubseqParams {
    pub k: usize,
    pub ival: usize,
}

impl SubseqParams {
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter("subsequence length k must be at least 1".into()));
        }
        if self.ival == 0 {
            return Err(Error::InvalidParameter("subsequence interval must be at least 1".into()));
        }
        self.checked_span()?;
        Ok(())
    }

    /// 一个子序列在文本上覆盖的跨度：1 + ival * (k - 1)；溢出时返回 None。
    #[inline]
    pub fn span(&self) -> Option<usize> {
        self.ival.checked_mul(self.k.saturating_sub(1))?.checked_add(1)
    }

    pub(crate) fn checked_span(&self) -> Result<usize> {
        self.span().ok_or_else(|| {
            Error::InvalidParameter(format!(
                "subsequence span overflows (k = {}, interval = {})",
                self.k, self.ival
            ))
        })
    }

    /// 从 `seq[offset..]` 抽取一个间隔子序列；跨度越界时返回 None。
    pub fn extract(&self, seq: &[u8], offset: usize) -> Option<Vec<u8>> {
        let end = offset.checked_add(self.span()?)?;
        if self.k == 0 || self.ival == 0 || end > seq.len() {
            return None;
        }
        Some(seq[offset..end].iter().step_by(self.ival).copied().collect())
    }
}

/// 间隔子序列的有序索引，用于容错种子。
///
/// 查询只使用模式串从 0 开始的第一个子序列，不是通用的子串索引。
#[derive(Debug, Clone)]
pub struct SubseqIndex {
    params: SubseqParams,
    span: usize,
    entries: Vec<IndexEntry>,
}

impl SubseqIndex {
    pub fn new(text: &[u8], params: SubseqParams) -> Result<Self> {
        params.validate()?;
        let span = params.checked_span()?;
        let n = (text.len() + 1).saturating_sub(span);
        let mut entries = Vec::with_capacity(n);
        for offset in 0..n {
            if let Some(key) = params.extract(text, offset) {
                entries.push(IndexEntry { key, offset });
            }
        }
        entries.sort_unstable();
        Ok(Self { params, span, entries })
    }

    pub fn params(&self) -> SubseqParams {
        self.params
    }

    /// 每个子序列在文本上覆盖的跨度
    pub fn span(&self) -> usize {
        self.span
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// 用 `p` 的第一个间隔子序列查询；`p` 短于跨度时没有命中。
    pub fn query(&self, p: &[u8]) -> Vec<usize> {
        match self.params.extract(p, 0) {
            Some(key) => lookup(&self.entries, &key),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &[u8], offset: usize) -> IndexEntry {
        IndexEntry { key: key.to_vec(), offset }
    }

    #[test]
    fn every_other_base() {
        let idx = SubseqIndex::new(b"ATATAT", SubseqParams { k: 2, ival: 2 }).unwrap();
        assert_eq!(
            idx.entries(),
            &[entry(b"AA", 0), entry(b"AA", 2), entry(b"TT", 1), entry(b"TT", 3)]
        );
    }

    #[test]
    fn query_uses_first_subsequence() {
        let idx = SubseqIndex::new(b"ATATAT", SubseqParams { k: 2, ival: 2 }).unwrap();
        // "AxA" 的第一个子序列是 "AA"
        assert_eq!(idx.query(b"AGA"), vec![0, 2]);
        assert_eq!(idx.query(b"TCTGG"), vec![1, 3]);
        assert!(idx.query(b"AT").is_empty());
    }

    #[test]
    fn ival_one_is_plain_kmer() {
        let p = SubseqParams { k: 3, ival: 1 };
        assert_eq!(p.span(), Some(3));
        let idx = SubseqIndex::new(b"ACGTACG", p).unwrap();
        assert_eq!(idx.span(), 3);
        assert_eq!(idx.query(b"ACG"), vec![0, 4]);
    }

    #[test]
    fn keys_match_text() {
        let text = b"GATTACAGATTACAGG";
        let p = SubseqParams { k: 3, ival: 3 };
        let idx = SubseqIndex::new(text, p).unwrap();
        assert_eq!(idx.entries().len(), text.len() - 7 + 1);
        for e in idx.entries() {
            let expected = [text[e.offset], text[e.offset + 3], text[e.offset + 6]];
            assert_eq!(e.key.as_slice(), &expected);
        }
    }

    #[test]
    fn invalid_params() {
        assert!(SubseqIndex::new(b"ACGT", SubseqParams { k: 0, ival: 1 }).is_err());
        assert!(SubseqIndex::new(b"ACGT", SubseqParams { k: 2, ival: 0 }).is_err());
    }

    #[test]
    fn huge_interval_is_rejected() {
        let p = SubseqParams { k: 3, ival: 1usize << 63 };
        assert_eq!(p.span(), None);
        assert!(matches!(p.validate(), Err(Error::InvalidParameter(_))));
        assert!(matches!(SubseqIndex::new(b"ACGTACGT", p), Err(Error::InvalidParameter(_))));
        assert_eq!(p.extract(b"ACGTACGT", 0), None);
        // k = 1 时跨度与间隔无关
        assert_eq!(SubseqParams { k: 1, ival: usize::MAX }.span(), Some(1));
    }

    #[test]
    fn span_longer_than_text() {
        let idx = SubseqIndex::new(b"ACG", SubseqParams { k: 3, ival: 2 }).unwrap();
        assert!(idx.entries().is_empty());
    }
}
