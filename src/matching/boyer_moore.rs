//! Boyer–Moore 精确匹配。
//!
//! 预处理一次模式串，得到：
//! - 坏字符表：`bad_char[j][c]` = P[0..j) 中字符 c 最右出现位置 + 1（0 表示未出现）
//! - 强好后缀表 L'（`big_l_prime`）与 l'（`small_l_prime`），由 N 数组（反向 Z 数组）导出
//! - 完全匹配后的位移：|P| - l'[1]

use crate::error::{Error, Result};
use crate::util::dna::{self, SIGMA};

use super::naive::MatchStats;

/// Z 数组：z[i] = s 与 s[i..] 的最长公共前缀长度（z[0] = |s|）。
pub fn z_array(s: &[u8]) -> Vec<usize> {
    let n = s.len();
    let mut z = vec![0usize; n];
    if n == 0 {
        return z;
    }
    z[0] = n;
    // [l, r) 为目前右端最远的 Z-box
    let (mut l, mut r) = (0usize, 0usize);
    for i in 1..n {
        let mut len = if i < r { (r - i).min(z[i - l]) } else { 0 };
        while i + len < n && s[len] == s[i + len] {
            len += 1;
        }
        z[i] = len;
        if i + len > r {
            l = i;
            r = i + len;
        }
    }
    z
}

/// N 数组：n[j] = s[..=j] 与 s 的最长公共后缀长度。
pub fn n_array(s: &[u8]) -> Vec<usize> {
    let rev: Vec<u8> = s.iter().rev().copied().collect();
    let mut z = z_array(&rev);
    z.reverse();
    z
}

/// L'[i]：P[i..] 在 P 中另一处出现（且前一字符不同）时，该出现的最大结束位置 + 1；否则 0。
fn big_l_prime_array(n: &[usize]) -> Vec<usize> {
    let m = n.len();
    let mut lp = vec![0usize; m];
    for j in 0..m.saturating_sub(1) {
        if n[j] == 0 {
            continue;
        }
        let i = m - n[j];
        lp[i] = j + 1;
    }
    lp
}

/// l'[i]：P[i..] 的后缀中同时是 P 前缀的最长者的长度。
fn small_l_prime_array(n: &[usize]) -> Vec<usize> {
    let m = n.len();
    let mut slp = vec![0usize; m];
    for i in 0..m {
        if n[i] == i + 1 {
            slp[m - i - 1] = i + 1;
        }
    }
    for i in (0..m.saturating_sub(1)).rev() {
        if slp[i] == 0 {
            slp[i] = slp[i + 1];
        }
    }
    slp
}

/// 预处理后的模式串；可对多条文本反复扫描。
#[derive(Debug, Clone)]
pub struct BoyerMoore {
    pattern: Vec<u8>,
    bad_char: Vec<[usize; SIGMA]>,
    big_l_prime: Vec<usize>,
    small_l_prime: Vec<usize>,
}

impl BoyerMoore {
    /// 模式串必须只含 {A,C,G,T,N}（大写）。空模式串合法，扫描结果为空。
    pub fn new(pattern: &[u8]) -> Result<Self> {
        let mut bad_char = Vec::with_capacity(pattern.len());
        let mut next = [0usize; SIGMA];
        for (pos, &base) in pattern.iter().enumerate() {
            let ci = dna::base_index(base).ok_or(Error::InvalidBase { pos, base })?;
            bad_char.push(next);
            next[ci] = pos + 1;
        }
        let n = n_array(pattern);
        Ok(Self {
            pattern: pattern.to_vec(),
            bad_char,
            big_l_prime: big_l_prime_array(&n),
            small_l_prime: small_l_prime_array(&n),
        })
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// 在模式位置 `i` 处遇到文本字符 `c` 失配时，坏字符规则给出的位移。
    /// c 不在 P[0..i) 中（或不在字母表内）时越过该位置：i + 1。
    pub fn bad_character_rule(&self, i: usize, c: u8) -> usize {
        let last = dna::base_index(c).map_or(0, |ci| self.bad_char[i][ci]);
        // last 为最右出现位置 + 1
        i + 1 - last
    }

    /// 在模式位置 `i` 处失配时，好后缀规则给出的位移（P[i+1..] 已匹配）。
    pub fn good_suffix_rule(&self, i: usize) -> usize {
        let m = self.pattern.len();
        if i + 1 >= m {
            return 0;
        }
        let i = i + 1;
        if self.big_l_prime[i] > 0 {
            m - self.big_l_prime[i]
        } else {
            m - self.small_l_prime[i]
        }
    }

    /// 完全匹配之后的位移，取决于 P 的最宽 border。
    pub fn match_skip(&self) -> usize {
        let m = self.pattern.len();
        if m < 2 {
            return 1;
        }
        m - self.small_l_prime[1]
    }

    /// 在文本中扫描所有出现位置，并统计字符比较与对齐次数。
    pub fn scan(&self, t: &[u8]) -> MatchStats {
        let p = &self.pattern;
        let m = p.len();
        let mut stats = MatchStats::default();
        if m == 0 || m > t.len() {
            return stats;
        }
        let mut i = 0usize;
        while i + m <= t.len() {
            stats.alignments += 1;
            let mut shift = 1usize;
            let mut mismatched = false;
            for j in (0..m).rev() {
                stats.comparisons += 1;
                if p[j] != t[i + j] {
                    let skip_bc = self.bad_character_rule(j, t[i + j]);
                    let skip_gs = self.good_suffix_rule(j);
                    shift = shift.max(skip_bc).max(skip_gs);
                    mismatched = true;
                    break;
                }
            }
            if !mismatched {
                stats.offsets.push(i);
                shift = shift.max(self.match_skip());
            }
            i += shift;
        }
        stats
    }
}

/// 一次性预处理并扫描
pub fn boyer_moore(p: &[u8], t: &[u8]) -> Result<MatchStats> {
    Ok(BoyerMoore::new(p)?.scan(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::naive::naive_match;

    #[test]
    fn z_array_basic() {
        assert_eq!(z_array(b"AAAAA"), vec![5, 4, 3, 2, 1]);
        assert_eq!(z_array(b"ACACAG"), vec![6, 0, 3, 0, 1, 0]);
        assert!(z_array(b"").is_empty());
    }

    #[test]
    fn n_array_is_reversed_z() {
        assert_eq!(n_array(b"ACTA"), vec![1, 0, 0, 4]);
    }

    #[test]
    fn bad_character_shift() {
        let bm = BoyerMoore::new(b"TCAA").unwrap();
        assert_eq!(bm.bad_character_rule(2, b'T'), 2);
        assert_eq!(bm.bad_character_rule(3, b'C'), 2);
        // G 不在模式中，越过失配位置
        assert_eq!(bm.bad_character_rule(3, b'G'), 4);
    }

    #[test]
    fn good_suffix_shift() {
        let bm = BoyerMoore::new(b"ACTA").unwrap();
        assert_eq!(bm.good_suffix_rule(0), 3);
        assert_eq!(bm.good_suffix_rule(3), 0);
    }

    #[test]
    fn match_skip_uses_border() {
        assert_eq!(BoyerMoore::new(b"ACAC").unwrap().match_skip(), 2);
        assert_eq!(BoyerMoore::new(b"ACGT").unwrap().match_skip(), 4);
        assert_eq!(BoyerMoore::new(b"A").unwrap().match_skip(), 1);
    }

    #[test]
    fn scan_finds_all_occurrences() {
        let t = b"GCTAGCTCTACGAGTCTAAGCTAGCTAGCT";
        let patterns: [&[u8]; 5] = [b"GCTAGC", b"CTA", b"T", b"AGCTAGCT", b"GGGG"];
        for p in patterns {
            let bm = BoyerMoore::new(p).unwrap();
            assert_eq!(bm.scan(t).offsets, naive_match(p, t).offsets, "pattern {:?}", p);
        }
    }

    #[test]
    fn scan_overlapping_occurrences() {
        let stats = boyer_moore(b"AA", b"AAAA").unwrap();
        assert_eq!(stats.offsets, vec![0, 1, 2]);
    }

    #[test]
    fn fewer_alignments_and_comparisons_than_naive() {
        let t: Vec<u8> = b"ACGTTGCA".iter().cycle().take(400).copied().collect();
        let p = b"TTGCAACGTTGCAACG";
        let bm = boyer_moore(p, &t).unwrap();
        let naive = naive_match(p, &t);
        assert_eq!(bm.offsets, naive.offsets);
        assert!(bm.alignments < naive.alignments);
        assert!(bm.comparisons < naive.comparisons);
        assert_eq!((bm.alignments, bm.comparisons), (50, 770));
        assert_eq!((naive.alignments, naive.comparisons), (385, 1153));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(boyer_moore(b"", b"ACGT").unwrap().offsets.is_empty());
        assert!(boyer_moore(b"ACGTA", b"ACGT").unwrap().offsets.is_empty());
        assert!(boyer_moore(b"ACGT", b"").unwrap().offsets.is_empty());
    }

    #[test]
    fn text_with_foreign_bytes() {
        let stats = boyer_moore(b"ACG", b"xxACGyACG").unwrap();
        assert_eq!(stats.offsets, vec![2, 6]);
    }

    #[test]
    fn rejects_lowercase_pattern() {
        assert_eq!(
            BoyerMoore::new(b"ACgT").unwrap_err(),
            Error::InvalidBase { pos: 2, base: b'g' }
        );
    }
}
