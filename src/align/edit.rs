/// 半全局编辑距离：把 P 变为 T 的某个子串所需的最少插入/删除/替换次数。
/// P 必须全部参与比对，T 两端的空缺不计分。
pub fn edit_distance(p: &[u8], t: &[u8]) -> usize {
    edit_distance_with_buf(p, t, &mut EditBuffer::new())
}

/// DP 矩阵缓冲区，可跨调用复用
#[derive(Debug, Default)]
pub struct EditBuffer {
    d: Vec<usize>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self { d: Vec::new() }
    }

    fn resize(&mut self, size: usize) {
        self.d.clear();
        self.d.resize(size, 0);
    }
}

/// 完整 (|P|+1) x (|T|+1) 矩阵，行优先展平：D[i][j] = d[i * cols + j]。
pub fn edit_distance_with_buf(p: &[u8], t: &[u8], buf: &mut EditBuffer) -> usize {
    let m = p.len();
    let n = t.len();
    if m == 0 {
        return 0;
    }

    let cols = n + 1;
    buf.resize((m + 1) * cols);
    let d = &mut buf.d;

    // 第 0 行全为 0：比对可以从 T 的任意位置开始
    for i in 1..=m {
        d[i * cols] = i;
    }

    for i in 1..=m {
        for j in 1..=n {
            let hor = d[i * cols + j - 1] + 1;
            let ver = d[(i - 1) * cols + j] + 1;
            let diag = d[(i - 1) * cols + j - 1] + usize::from(p[i - 1] != t[j - 1]);
            d[i * cols + j] = hor.min(ver).min(diag);
        }
    }

    // 最后一行取最小值：比对可以在 T 的任意位置结束
    d[m * cols..].iter().copied().min().unwrap_or(m)
}
