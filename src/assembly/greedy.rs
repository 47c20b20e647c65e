//! 贪心最短公共超串（SCS）组装。
//!
//! 每一步在当前 read 集合上重建重叠索引，找出重叠最长的一对 (A, B)，
//! 用 `A + B[len..]` 替换两者；直到没有任何一对的重叠 >= k。
//! 这是近似算法，得到的是一个公共超串而不一定是最短的。

use tracing::debug;

use crate::error::Result;

use super::overlap::{check_min_overlap, overlap, ReadKmerIndex};

/// read 集合的槽位表。删除的 read 留下空槽，合并结果追加到末尾，
/// 所以槽位顺序就是集合的顺序。read 以槽位区分而不是以内容区分。
#[derive(Debug, Clone, Default)]
pub struct ReadSet {
    slots: Vec<Option<Vec<u8>>>,
    live: usize,
}

impl ReadSet {
    pub fn new<I: IntoIterator<Item = Vec<u8>>>(reads: I) -> Self {
        let slots: Vec<Option<Vec<u8>>> = reads.into_iter().map(Some).collect();
        let live = slots.len();
        Self { slots, live }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, id: usize) -> Option<&[u8]> {
        self.slots.get(id).and_then(|s| s.as_deref())
    }

    /// 按槽位顺序遍历存活的 read
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[u8])> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, s)| s.as_deref().map(|r| (id, r)))
    }

    fn push(&mut self, read: Vec<u8>) -> usize {
        self.slots.push(Some(read));
        self.live += 1;
        self.slots.len() - 1
    }

    /// 用 `a + b[len..]` 替换槽位 a、b，合并结果追加到末尾并返回其槽位。
    /// a、b 必须是两个不同的存活槽位，否则集合不变并返回 None。
    pub fn merge(&mut self, a: usize, b: usize, len: usize) -> Option<usize> {
        if a == b || self.get(a).is_none() || self.get(b).is_none() {
            return None;
        }
        let mut merged = self.slots[a].take().unwrap_or_default();
        let tail = self.slots[b].take().unwrap_or_default();
        self.live -= 2;
        merged.extend_from_slice(tail.get(len..).unwrap_or_default());
        Some(self.push(merged))
    }

    /// 按集合顺序拼接所有存活 read
    pub fn concat(&self) -> Vec<u8> {
        let total = self.iter().map(|(_, r)| r.len()).sum();
        let mut out = Vec::with_capacity(total);
        for (_, r) in self.iter() {
            out.extend_from_slice(r);
        }
        out
    }

    pub fn into_reads(self) -> Vec<Vec<u8>> {
        self.slots.into_iter().flatten().collect()
    }
}

/// 一对 read 及其重叠长度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestOverlap {
    pub a: usize,
    pub b: usize,
    pub len: usize,
}

/// 找出重叠最长（且 >= k）的一对 read；没有则返回 None。
/// 并列时保留先遇到的：A 按槽位升序，B 按槽位升序。
pub fn pick_maximal_overlap(reads: &ReadSet, k: usize) -> Result<Option<BestOverlap>> {
    check_min_overlap(k)?;
    Ok(best_pair(reads, k))
}

fn best_pair(reads: &ReadSet, k: usize) -> Option<BestOverlap> {
    let index = ReadKmerIndex::collect(reads.iter(), k);
    let mut best: Option<BestOverlap> = None;
    for (a, ra) in reads.iter() {
        for b in index.candidates(ra) {
            if a == b {
                continue;
            }
            let Some(rb) = reads.get(b) else { continue };
            let len = overlap(ra, rb, k);
            if len > best.map_or(0, |o| o.len) {
                best = Some(BestOverlap { a, b, len });
            }
        }
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    /// 可能还有重叠 >= k 的 read 对
    Running,
    /// 没有任何一对 read 的重叠 >= k
    Done,
}

/// 贪心组装器：唯一的状态就是独占的 read 集合。
#[derive(Debug)]
pub struct GreedyAssembler {
    reads: ReadSet,
    k: usize,
    state: AssemblyState,
    merges: usize,
}

impl GreedyAssembler {
    pub fn new<I: IntoIterator<Item = Vec<u8>>>(reads: I, k: usize) -> Result<Self> {
        check_min_overlap(k)?;
        Ok(Self { reads: ReadSet::new(reads), k, state: AssemblyState::Running, merges: 0 })
    }

    pub fn state(&self) -> AssemblyState {
        self.state
    }

    pub fn reads(&self) -> &ReadSet {
        &self.reads
    }

    pub fn merges(&self) -> usize {
        self.merges
    }

    /// 执行一次合并；找不到重叠 >= k 的 read 对时进入 Done。
    pub fn step(&mut self) -> AssemblyState {
        if self.state == AssemblyState::Done {
            return self.state;
        }
        let Some(best) = best_pair(&self.reads, self.k) else {
            debug!(merges = self.merges, reads = self.reads.len(), "no overlap >= {}, done", self.k);
            self.state = AssemblyState::Done;
            return self.state;
        };
        let Some(id) = self.reads.merge(best.a, best.b, best.len) else {
            self.state = AssemblyState::Done;
            return self.state;
        };
        self.merges += 1;
        debug!(a = best.a, b = best.b, overlap = best.len, merged = id, reads = self.reads.len(), "merged reads");
        self.state
    }

    /// 反复合并直到 Done，返回按集合顺序拼接的结果。
    pub fn run(mut self) -> Vec<u8> {
        while self.step() == AssemblyState::Running {}
        self.reads.concat()
    }
}

/// 贪心 SCS：消耗 read 集合，返回组装出的序列。
pub fn greedy_scs<I: IntoIterator<Item = Vec<u8>>>(reads: I, k: usize) -> Result<Vec<u8>> {
    Ok(GreedyAssembler::new(reads, k)?.run())
}

/// 依次尝试 `ks` 中的每个最小重叠，返回第一个组装长度恰为 `expected_len` 的 (k, 序列)。
pub fn assemble_to_length<I>(reads: &[Vec<u8>], ks: I, expected_len: usize) -> Result<Option<(usize, Vec<u8>)>>
where
    I: IntoIterator<Item = usize>,
{
    for k in ks {
        let genome = greedy_scs(reads.iter().cloned(), k)?;
        debug!(k, len = genome.len(), "greedy assembly attempt");
        if genome.len() == expected_len {
            return Ok(Some((k, genome)));
        }
    }
    Ok(None)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn read_set() -> impl Strategy<Value = Vec<Vec<u8>>> {
        proptest::collection::vec(
            proptest::collection::vec(proptest::sample::select(&b"ACGT"[..]), 3..12),
            1..8,
        )
    }

    proptest! {
        #[test]
        fn terminates_without_remaining_overlaps(rs in read_set(), k in 1usize..4) {
            let total: usize = rs.iter().map(Vec::len).sum();
            let mut asm = GreedyAssembler::new(rs.clone(), k).unwrap();
            let mut steps = 0;
            while asm.step() == AssemblyState::Running {
                steps += 1;
                prop_assert!(steps < rs.len());
            }
            let left: Vec<&[u8]> = asm.reads().iter().map(|(_, r)| r).collect();
            for (i, a) in left.iter().enumerate() {
                for (j, b) in left.iter().enumerate() {
                    if i != j {
                        prop_assert!(overlap(a, b, k) < k);
                    }
                }
            }
            prop_assert!(asm.reads().concat().len() <= total);
        }
    }
}
