//! Debug trace of the traversal: one line per visited node, indented one
//! space per depth level, root at depth 1.

#[derive(Debug, Default)]
pub struct DebugTrace {
    enabled: bool,
    depth: usize,
    lines: Vec<String>,
}

impl DebugTrace {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn enter(&mut self, kind: &str) {
        self.depth += 1;
        self.record(self.depth, kind);
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// A node inspected by its parent's rule without being dispatched.
    pub fn leaf(&mut self, kind: &str) {
        self.record(self.depth + 1, kind);
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn record(&mut self, depth: usize, kind: &str) {
        if self.enabled {
            let mut line = " ".repeat(depth);
            line.push_str(kind);
            self.lines.push(line);
        }
    }
}
