use crate::util::dna;

/// 匹配结果及计数（字符比较次数、尝试的对齐次数）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub offsets: Vec<usize>,
    pub comparisons: u64,
    pub alignments: u64,
}

/// 朴素逐位置精确匹配，从左到右比较，遇到第一个失配即放弃该对齐。
pub fn naive_match(p: &[u8], t: &[u8]) -> MatchStats {
    let mut stats = MatchStats::default();
    if p.is_empty() || p.len() > t.len() {
        return stats;
    }
    for i in 0..=t.len() - p.len() {
        stats.alignments += 1;
        let mut matched = true;
        for j in 0..p.len() {
            stats.comparisons += 1;
            if t[i + j] != p[j] {
                matched = false;
                break;
            }
        }
        if matched {
            stats.offsets.push(i);
        }
    }
    stats
}

/// 精确匹配的所有起始偏移（升序）
pub fn exact_match(p: &[u8], t: &[u8]) -> Vec<usize> {
    naive_match(p, t).offsets
}

/// 同时匹配 `p` 及其反向互补；同一偏移只记录一次（回文序列两条链都命中时也一样）。
pub fn exact_match_with_rc(p: &[u8], t: &[u8]) -> Vec<usize> {
    if p.is_empty() || p.len() > t.len() {
        return Vec::new();
    }
    let rc = dna::revcomp(p);
    (0..=t.len() - p.len())
        .filter(|&i| {
            let window = &t[i..i + p.len()];
            window == p || window == rc.as_slice()
        })
        .collect()
}

/// 失配数（Hamming 距离）不超过 `max_mismatches` 的所有对齐位置；
/// 逐位比较，超过上限立即放弃。
pub fn naive_approximate(p: &[u8], t: &[u8], max_mismatches: usize) -> Vec<usize> {
    if p.is_empty() || p.len() > t.len() {
        return Vec::new();
    }
    (0..=t.len() - p.len())
        .filter(|&i| within_mismatches(p, &t[i..i + p.len()], max_mismatches))
        .collect()
}

fn within_mismatches(a: &[u8], b: &[u8], max_mismatches: usize) -> bool {
    let mut mismatches = 0usize;
    for (x, y) in a.iter().zip(b) {
        if x != y {
            mismatches += 1;
            if mismatches > max_mismatches {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_short_pattern() {
        assert_eq!(exact_match(b"AG", b"AGCAGAGT"), vec![0, 3, 5]);
    }

    #[test]
    fn naive_counts() {
        // 3 次对齐：AAA@0 全部匹配，后两次各比较 3 次
        let s = naive_match(b"AAA", b"AAAAA");
        assert_eq!(s.offsets, vec![0, 1, 2]);
        assert_eq!(s.alignments, 3);
        assert_eq!(s.comparisons, 9);

        let s = naive_match(b"CT", b"AAAA");
        assert!(s.offsets.is_empty());
        assert_eq!(s.alignments, 3);
        assert_eq!(s.comparisons, 3);
    }

    #[test]
    fn degenerate_inputs_are_empty() {
        assert!(exact_match(b"", b"ACGT").is_empty());
        assert!(exact_match(b"ACGT", b"").is_empty());
        assert!(exact_match(b"ACGTA", b"ACGT").is_empty());
        assert_eq!(naive_match(b"ACGTA", b"ACGT").alignments, 0);
    }

    #[test]
    fn rc_aware_match() {
        // AGGT 的反向互补是 ACCT
        let t = b"TTAGGTCCACCTAA";
        assert_eq!(exact_match_with_rc(b"AGGT", t), vec![2, 8]);
    }

    #[test]
    fn rc_palindrome_counted_once() {
        // TTAA 是自身的反向互补
        assert_eq!(exact_match_with_rc(b"TTAA", b"CTTAAGTTAA"), vec![1, 6]);
    }

    #[test]
    fn approximate_within_budget() {
        let t = b"ACGTTACGAACGTACG";
        assert_eq!(naive_approximate(b"ACGT", t, 0), vec![0, 9]);
        let hits = naive_approximate(b"ACGT", t, 1);
        assert!(hits.contains(&5));
        for &i in &hits {
            let mm = b"ACGT".iter().zip(&t[i..i + 4]).filter(|(a, b)| a != b).count();
            assert!(mm <= 1);
        }
    }
}
