/// Phred+33 编码的质量字符转换为质量值
#[inline]
pub fn phred33_to_q(qual: u8) -> u32 {
    qual.saturating_sub(33) as u32
}

/// 按测序循环（read 内位置）累加质量值。
/// 结果长度为最长质量串的长度，较短的质量串只贡献其覆盖的位置。
pub fn per_cycle_totals<Q: AsRef<[u8]>>(quals: &[Q]) -> Vec<u64> {
    let width = quals.iter().map(|q| q.as_ref().len()).max().unwrap_or(0);
    let mut total = vec![0u64; width];
    for q in quals {
        for (i, &phred) in q.as_ref().iter().enumerate() {
            total[i] += phred33_to_q(phred) as u64;
        }
    }
    total
}

/// 总质量最低的循环位置；并列时取最靠前者，没有数据返回 None。
pub fn lowest_quality_cycle<Q: AsRef<[u8]>>(quals: &[Q]) -> Option<usize> {
    let total = per_cycle_totals(quals);
    let mut best: Option<(usize, u64)> = None;
    for (i, &t) in total.iter().enumerate() {
        if best.map_or(true, |(_, bt)| t < bt) {
            best = Some((i, t));
        }
    }
    best.map(|(i, _)| i)
}
