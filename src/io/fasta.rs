use anyhow::{anyhow, Result};
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

/// 逐条读取 FASTA 记录；序列行会去掉空白并转为大写。
pub struct FastaReader<R: BufRead> {
    reader: R,
    line: String,
    pending_id: Option<String>,
    eof: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new(), pending_id: None, eof: false }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        let n = self.reader.read_line(&mut self.line)?;
        if n == 0 {
            self.eof = true;
        }
        Ok(n > 0)
    }

    fn header_id(line: &str) -> String {
        line[1..].split_whitespace().next().unwrap_or("").to_string()
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        let id = match self.pending_id.take() {
            Some(id) => id,
            None => loop {
                if self.eof || !self.read_line()? {
                    return Ok(None);
                }
                if self.line.starts_with('>') {
                    break Self::header_id(&self.line);
                }
                if !self.line.trim().is_empty() {
                    return Err(anyhow!("sequence data before first FASTA header"));
                }
            },
        };

        let mut seq = Vec::new();
        while !self.eof && self.read_line()? {
            if self.line.starts_with('>') {
                self.pending_id = Some(Self::header_id(&self.line));
                break;
            }
            seq.extend(
                self.line
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }
        Ok(Some(FastaRecord { id, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// 读取整个 FASTA 文件并把所有记录首尾相接为一条参考序列（标题行丢弃）。
pub fn read_genome<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open reference FASTA '{}': {}", path.display(), e))?;
    let genome = concat_records(std::io::BufReader::new(fh))?;
    if genome.is_empty() {
        anyhow::bail!("FASTA file '{}' contains no sequence", path.display());
    }
    Ok(genome)
}

fn concat_records<R: BufRead>(reader: R) -> Result<Vec<u8>> {
    let mut genome = Vec::new();
    for rec in FastaReader::new(reader) {
        genome.extend_from_slice(&rec?.seq);
    }
    Ok(genome)
}
