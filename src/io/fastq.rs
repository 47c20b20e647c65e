use anyhow::{anyhow, bail, Result};
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct FastqRecord {
    pub id: String,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

/// 四行一组的 FASTQ 读取器（不支持序列折行）。
pub struct FastqReader<R: BufRead> {
    reader: R,
    line: String,
    line_no: usize,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new(), line_no: 0 }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        let n = self.reader.read_line(&mut self.line)?;
        self.line_no += 1;
        Ok(n > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        // skip blank lines between records / at EOF
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            if !self.line.trim().is_empty() {
                break;
            }
        }
        if !self.line.starts_with('@') {
            bail!("line {}: FASTQ header not starting with '@'", self.line_no);
        }
        let id = self.line[1..].split_whitespace().next().unwrap_or("").to_string();

        if !self.read_line()? {
            bail!("line {}: unexpected EOF after header", self.line_no);
        }
        let seq = self.line.trim_end().as_bytes().to_ascii_uppercase();

        if !self.read_line()? || !self.line.starts_with('+') {
            bail!("line {}: missing '+' line", self.line_no);
        }

        if !self.read_line()? {
            bail!("line {}: missing quality line", self.line_no);
        }
        let qual = self.line.trim_end().as_bytes().to_vec();
        if qual.len() != seq.len() {
            bail!("line {}: seq/qual length mismatch ({} vs {})", self.line_no, seq.len(), qual.len());
        }

        Ok(Some(FastqRecord { id, seq, qual }))
    }
}

impl<R: BufRead> Iterator for FastqReader<R> {
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// 读取 FASTQ 文件，返回按顺序对应的序列列表与质量串列表。
pub fn read_fastq<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<u8>>, Vec<Vec<u8>>)> {
    let path = path.as_ref();
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open reads FASTQ '{}': {}", path.display(), e))?;
    split_records(std::io::BufReader::new(fh))
        .map_err(|e| anyhow!("while reading '{}': {}", path.display(), e))
}

fn split_records<R: BufRead>(reader: R) -> Result<(Vec<Vec<u8>>, Vec<Vec<u8>>)> {
    let mut seqs = Vec::new();
    let mut quals = Vec::new();
    for rec in FastqReader::new(reader) {
        let rec = rec?;
        seqs.push(rec.seq);
        quals.push(rec.qual);
    }
    Ok((seqs, quals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_records() {
        let data = b"@r1 extra\nACGT\n+\nIIII\n@r2\nttA\n+r2\n#I!\n";
        let recs: Vec<FastqRecord> = FastqReader::new(Cursor::new(&data[..]))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, "r1");
        assert_eq!(recs[0].seq, b"ACGT");
        assert_eq!(recs[0].qual, b"IIII");
        assert_eq!(recs[1].seq, b"TTA");
        assert_eq!(recs[1].qual, b"#I!");
    }

    #[test]
    fn split_keeps_order() {
        let data = b"@a\nAC\n+\nII\n\n@b\nGT\n+\n##\n\n";
        let (seqs, quals) = split_records(Cursor::new(&data[..])).unwrap();
        assert_eq!(seqs, vec![b"AC".to_vec(), b"GT".to_vec()]);
        assert_eq!(quals, vec![b"II".to_vec(), b"##".to_vec()]);
    }

    #[test]
    fn length_mismatch_is_error() {
        let data = b"@a\nACG\n+\nII\n";
        assert!(FastqReader::new(Cursor::new(&data[..])).next_record().is_err());
    }

    #[test]
    fn missing_plus_is_error() {
        let data = b"@a\nACG\nIII\n";
        assert!(FastqReader::new(Cursor::new(&data[..])).next_record().is_err());
    }
}
