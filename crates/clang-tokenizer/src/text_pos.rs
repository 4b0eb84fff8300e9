/// Fast mapping from byte offsets to Clang-style positions.
///
/// Lines and columns are 1-based and columns count bytes, matching what the
/// compiler front-end reports for AST nodes.
pub(crate) struct LineIndex {
    line_starts: Box<[usize]>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let mut starts = Vec::with_capacity(source.len() / 40 + 1);
        starts.push(0usize);
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        Self {
            line_starts: starts.into_boxed_slice(),
        }
    }

    pub(crate) fn line_col(
        &self,
        byte_offset: usize,
    ) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&byte_offset) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        };
        let col = byte_offset.saturating_sub(self.line_starts[line]);
        (line as u32 + 1, col as u32 + 1)
    }
}
