/// Maps byte offsets to 1-based line/column positions for a single source file.
pub struct LineIndex {
    /// Byte offset of the start of each line. line_starts[0] == 0 always.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    fn line_slot(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        }
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> u32 {
        (self.line_slot(offset) + 1) as u32
    }

    /// 1-based (line, column) of `offset`; columns count bytes.
    pub fn position(&self, offset: usize) -> (u32, u32) {
        let slot = self.line_slot(offset);
        let col = offset.saturating_sub(self.line_starts[slot]);
        ((slot + 1) as u32, (col + 1) as u32)
    }
}
