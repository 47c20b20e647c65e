//! 演示如何在 library 模式下使用 seqmatch：精确 / 近似匹配与贪心组装。
//!
//! 运行方式：
//! ```bash
//! cargo run --example assemble_reads
//! ```

use seqmatch::align;
use seqmatch::assembly::{self, AssemblyState, GreedyAssembler};
use seqmatch::matching::{self, BoyerMoore};
use seqmatch::util::dna;

fn main() -> seqmatch::Result<()> {
    // 1. 参考序列
    let genome = b"ACGTACGTAGCTGATCGTAGCTAGCTAGCTGATCGTAGCTAGCTAGCTGAT";
    println!("参考序列: {}", String::from_utf8_lossy(genome));
    println!("参考长度: {} bp", genome.len());

    // 2. Boyer–Moore 与朴素匹配对比
    let pattern = b"GCTAGCTAG";
    let bm = BoyerMoore::new(pattern)?;
    let fast = bm.scan(genome);
    let slow = matching::naive_match(pattern, genome);
    println!("\n精确匹配 '{}': {:?}", String::from_utf8_lossy(pattern), fast.offsets);
    println!("  Boyer–Moore: 对齐 {} 次, 比较 {} 次", fast.alignments, fast.comparisons);
    println!("  朴素扫描:    对齐 {} 次, 比较 {} 次", slow.alignments, slow.comparisons);

    // 3. 反向互补
    let rc = dna::revcomp(b"TCGATCAGC");
    println!("\n反向互补 TCGATCAGC -> {}", String::from_utf8_lossy(&rc));
    println!("  含反向互补的匹配: {:?}", matching::exact_match_with_rc(b"TCGATCAGC", genome));

    // 4. 鸽巢近似匹配与编辑距离
    let noisy = b"GCTGATCCTAGCTAG"; // 一个错配
    let hits = align::approximate_match(noisy, genome, 2)?;
    println!("\n近似匹配（<= 2 个错配）: {:?}，索引命中 {} 次", hits.offsets, hits.index_hits);
    let gapped = b"GCTGATGTAGCTAG"; // 一个缺失
    println!("半全局编辑距离: {}", align::edit_distance(gapped, genome));

    // 5. 切成重叠 read，逐步贪心组装
    let reads: Vec<Vec<u8>> = (0..genome.len() - 15).step_by(6).map(|i| genome[i..i + 16].to_vec()).collect();
    let graph = assembly::overlap_graph(&reads, 6)?;
    println!("\n{} 条 read，重叠图 {} 条边", reads.len(), graph.edge_count());

    let mut asm = GreedyAssembler::new(reads, 6)?;
    while asm.step() == AssemblyState::Running {
        println!("  合并 {} 次后剩余 {} 条 read", asm.merges(), asm.reads().len());
    }
    let contig = asm.reads().concat();
    println!("组装结果（{} bp）: {}", contig.len(), String::from_utf8_lossy(&contig));

    println!("\n完成！");
    Ok(())
}
