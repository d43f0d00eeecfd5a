use crate::core::error::{DecodeError, ErrorPosition};
use crate::core::model::Base;
use memchr::memchr2;
use std::io::BufRead;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastqRecord {
    pub id: String,
    pub seq: Vec<Base>,
    pub qual: Vec<u8>,
}

impl FastqRecord {
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
}

/// Streaming decoder for four-line FASTQ records.
///
/// Each call to [`FastqReader::next_record`] consumes exactly the lines of one
/// record and hands back an owned [`FastqRecord`]. Line buffers are reused
/// between calls.
pub struct FastqReader<R> {
    inner: R,
    phred_offset: u8,
    line_no: u64,
    header: Vec<u8>,
    seq: Vec<u8>,
    sep: Vec<u8>,
    qual: Vec<u8>,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(inner: R, phred_offset: u8) -> Self {
        Self {
            inner,
            phred_offset,
            line_no: 0,
            header: Vec::with_capacity(256),
            seq: Vec::with_capacity(1024),
            sep: Vec::with_capacity(256),
            qual: Vec::with_capacity(1024),
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.line_no
    }

    /// Returns `Ok(None)` once the stream is exhausted at a record boundary.
    pub fn next_record(&mut self) -> Result<Option<FastqRecord>, DecodeError> {
        loop {
            if !read_line(&mut self.inner, &mut self.header, &mut self.line_no)? {
                return Ok(None);
            }
            if !self.header.is_empty() {
                break;
            }
        }

        if self.header[0] != b'@' {
            return Err(DecodeError::Malformed {
                position: ErrorPosition {
                    line: self.line_no,
                    id: None,
                },
                msg: format!(
                    "expected '@' at start of record but found '{}'",
                    escape(self.header[0])
                ),
            });
        }
        let name = &self.header[1..];
        let end = memchr2(b' ', b'\t', name).unwrap_or(name.len());
        let id = String::from_utf8_lossy(&name[..end]).into_owned();

        if !read_line(&mut self.inner, &mut self.seq, &mut self.line_no)? {
            return Err(self.truncated(&id, "sequence"));
        }
        let mut seq = Vec::with_capacity(self.seq.len());
        for &b in &self.seq {
            match Base::from_byte(b) {
                Some(base) => seq.push(base),
                None => {
                    return Err(DecodeError::InvalidSymbol {
                        position: self.position(&id),
                        found: escape(b),
                    });
                }
            }
        }

        if !read_line(&mut self.inner, &mut self.sep, &mut self.line_no)? {
            return Err(self.truncated(&id, "separator"));
        }
        if self.sep.first() != Some(&b'+') {
            let found = self
                .sep
                .first()
                .map_or_else(|| "end of line".to_string(), |&b| escape(b));
            return Err(DecodeError::Malformed {
                position: self.position(&id),
                msg: format!("expected '+' separator but found '{found}'"),
            });
        }

        if !read_line(&mut self.inner, &mut self.qual, &mut self.line_no)? {
            return Err(self.truncated(&id, "quality"));
        }
        if self.qual.len() != seq.len() {
            return Err(DecodeError::LengthMismatch {
                position: self.position(&id),
                seq_len: seq.len(),
                qual_len: self.qual.len(),
            });
        }
        let mut qual = Vec::with_capacity(self.qual.len());
        for &b in &self.qual {
            match b.checked_sub(self.phred_offset) {
                Some(q) => qual.push(q),
                None => {
                    return Err(DecodeError::QualityOutOfRange {
                        position: self.position(&id),
                        found: escape(b),
                        offset: self.phred_offset,
                    });
                }
            }
        }

        Ok(Some(FastqRecord { id, seq, qual }))
    }

    fn position(&self, id: &str) -> ErrorPosition {
        ErrorPosition {
            line: self.line_no,
            id: Some(id.to_string()),
        }
    }

    fn truncated(&self, id: &str, missing: &str) -> DecodeError {
        DecodeError::Malformed {
            position: self.position(id),
            msg: format!("truncated record, missing {missing} line"),
        }
    }
}

/// Reads one line into `buf` without its terminator. Returns `false` at end of stream.
fn read_line<R: BufRead>(
    inner: &mut R,
    buf: &mut Vec<u8>,
    line_no: &mut u64,
) -> Result<bool, DecodeError> {
    buf.clear();
    let n = inner
        .read_until(b'\n', buf)
        .map_err(|source| DecodeError::Io {
            line: *line_no + 1,
            source,
        })?;
    if n == 0 {
        return Ok(false);
    }
    *line_no += 1;
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(true)
}

fn escape(b: u8) -> String {
    (b as char).escape_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &[u8]) -> FastqReader<&[u8]> {
        FastqReader::new(data, 33)
    }

    #[test]
    fn decodes_single_record() {
        let mut r = reader(b"@read1 some description\nACGT\n+\n????\n");
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.id, "read1");
        assert_eq!(rec.seq, vec![Base::A, Base::C, Base::G, Base::T]);
        assert_eq!(rec.qual, vec![30, 30, 30, 30]);
        assert_eq!(rec.len(), 4);
        assert!(r.next_record().unwrap().is_none());
        assert_eq!(r.lines_read(), 4);
    }

    #[test]
    fn decodes_consecutive_records() {
        let mut r = reader(b"@a\nAC\n+a\n!I\n@b\tx\nN\n+\n#\n");
        let a = r.next_record().unwrap().unwrap();
        assert_eq!(a.id, "a");
        assert_eq!(a.qual, vec![0, 40]);
        let b = r.next_record().unwrap().unwrap();
        assert_eq!(b.id, "b");
        assert_eq!(b.seq, vec![Base::N]);
        assert_eq!(b.qual, vec![2]);
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn empty_stream_is_end_of_stream() {
        assert!(reader(b"").next_record().unwrap().is_none());
        assert!(reader(b"\n\n").next_record().unwrap().is_none());
    }

    #[test]
    fn last_line_may_lack_newline_and_crlf_is_stripped() {
        let mut r = reader(b"@r\r\nAC\r\n+\r\nII");
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.id, "r");
        assert_eq!(rec.seq, vec![Base::A, Base::C]);
        assert_eq!(rec.qual, vec![40, 40]);
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn lowercase_bases_are_accepted() {
        let rec = reader(b"@r\nacgtn\n+\nIIIII\n")
            .next_record()
            .unwrap()
            .unwrap();
        assert_eq!(rec.seq, vec![Base::A, Base::C, Base::G, Base::T, Base::N]);
    }

    #[test]
    fn zero_length_record() {
        let rec = reader(b"@empty\n\n+\n\n").next_record().unwrap().unwrap();
        assert_eq!(rec.len(), 0);
        assert!(rec.qual.is_empty());
    }

    #[test]
    fn rejects_unknown_symbol() {
        let err = reader(b"@r1\nACXT\n+\nIIII\n").next_record().unwrap_err();
        match err {
            DecodeError::InvalidSymbol { position, found } => {
                assert_eq!(found, "X");
                assert_eq!(position.line, 2);
                assert_eq!(position.id.as_deref(), Some("r1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = reader(b"@r1\nACGT\n+\nIII\n").next_record().unwrap_err();
        match err {
            DecodeError::LengthMismatch {
                position,
                seq_len,
                qual_len,
            } => {
                assert_eq!((seq_len, qual_len), (4, 3));
                assert_eq!(position.line, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_header_marker() {
        let err = reader(b">r1\nACGT\n").next_record().unwrap_err();
        assert!(err.to_string().starts_with("line 1: expected '@'"));
        match err {
            DecodeError::Malformed { position, .. } => assert!(position.id.is_none()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_separator() {
        let err = reader(b"@r1\nACGT\n-\nIIII\n").next_record().unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
        assert!(err.to_string().contains("record 'r1' at line 3"));
    }

    #[test]
    fn rejects_truncated_records() {
        let inputs: [&[u8]; 3] = [b"@r1\n", b"@r1\nACGT\n", b"@r1\nACGT\n+\n"];
        for data in inputs {
            let err = reader(data).next_record().unwrap_err();
            assert!(
                err.to_string().contains("truncated record"),
                "input {:?} gave {err}",
                String::from_utf8_lossy(data)
            );
        }
    }

    #[test]
    fn rejects_quality_below_offset() {
        let mut r = FastqReader::new(&b"@r1\nAC\n+\nI?\n"[..], 64);
        let err = r.next_record().unwrap_err();
        match err {
            DecodeError::QualityOutOfRange { found, offset, .. } => {
                assert_eq!(found, "?");
                assert_eq!(offset, 64);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_after_valid_records_reports_its_own_line() {
        let mut r = reader(b"@ok\nA\n+\nI\n@bad\nA\n+\nII\n");
        assert!(r.next_record().unwrap().is_some());
        let err = r.next_record().unwrap_err();
        match err {
            DecodeError::LengthMismatch { position, .. } => {
                assert_eq!(position.line, 8);
                assert_eq!(position.id.as_deref(), Some("bad"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
