//! Stack dump parser: the line-classification state machine.
//!
//! The input is an arbitrary preamble followed by repeated blocks, each a
//! header line, some frame lines, and a terminating sample count:
//!
//! ```text
//! worker_3:
//! 0x7fff20331d00 `read_bytes+0x10
//! main
//! 42
//! ```
//!
//! Everything before the first header is discarded. Inside a block,
//! classification runs in fixed priority order: count line, then header,
//! then frame. A header-shaped line between blocks separates them and must
//! never be read as a frame.

/// One finished block: the frame names in encountered order plus the
/// sample count from the terminator line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackBlock {
    /// Extracted symbol names, outermost first as they appeared
    pub frames: Vec<String>,

    /// Value of the terminating count line
    pub count: i64,
}

/// Parser states: everything up to the first header is preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SkippingPreamble,
    ReadingStack,
}

/// Line-oriented state machine over a stack dump.
///
/// Feed raw lines one at a time with [`feed_line`](Self::feed_line); a
/// [`StackBlock`] comes back whenever a count line terminates the frames
/// read since the previous block. Frames still pending when the input runs
/// out belong to an unterminated block and are dropped by the caller.
#[derive(Debug)]
pub struct StackTraceParser {
    state: State,
    pending: Vec<String>,
}

impl StackTraceParser {
    pub fn new() -> Self {
        Self {
            state: State::SkippingPreamble,
            pending: Vec::new(),
        }
    }

    /// Consume one raw input line.
    ///
    /// Returns a completed block when `line` is the count terminator for
    /// the current pending frames, `None` for every other line kind.
    pub fn feed_line(&mut self, line: &str) -> Option<StackBlock> {
        let line = line.trim();

        match self.state {
            State::SkippingPreamble => {
                if is_stack_header(line) {
                    self.state = State::ReadingStack;
                }
                None
            }
            State::ReadingStack => {
                if let Ok(count) = line.parse::<i64>() {
                    let frames = std::mem::take(&mut self.pending);
                    Some(StackBlock { frames, count })
                } else if is_stack_header(line) {
                    // Separator between blocks; contributes no frame.
                    None
                } else {
                    self.pending.push(extract_symbol(line).to_string());
                    None
                }
            }
        }
    }

    /// Number of frames read since the last completed block.
    ///
    /// Nonzero at end of input means the trailing block had no count line;
    /// such a block is discarded, never emitted.
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }
}

impl Default for StackTraceParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A block header is one or more non-whitespace characters immediately
/// followed by a colon and nothing else (after trimming), e.g. `worker_3:`.
fn is_stack_header(line: &str) -> bool {
    match line.strip_suffix(':') {
        Some(name) => !name.is_empty() && !name.chars().any(char::is_whitespace),
        None => false,
    }
}

/// Extract the symbol name from a frame line.
///
/// Frames like ``0x1234 `myFunc+0x10`` carry the symbol between a backtick
/// and the offset suffix: the name is whatever follows the first backtick,
/// up to the next `+`. A line without a backtick is the symbol name
/// verbatim.
fn extract_symbol(line: &str) -> &str {
    match line.split_once('`') {
        Some((_, after)) => match after.split_once('+') {
            Some((symbol, _)) => symbol,
            None => after,
        },
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed_all(input: &str) -> Vec<StackBlock> {
        let mut parser = StackTraceParser::new();
        input
            .lines()
            .filter_map(|line| parser.feed_line(line))
            .collect()
    }

    #[test]
    fn test_header_detection() {
        assert!(is_stack_header("worker_3:"));
        assert!(is_stack_header("main.exe:"));
        assert!(is_stack_header("a:b:"));

        assert!(!is_stack_header(""));
        assert!(!is_stack_header(":"));
        assert!(!is_stack_header("worker 3:"));
        assert!(!is_stack_header("worker_3"));
        assert!(!is_stack_header("key: value"));
    }

    #[test]
    fn test_extract_symbol_with_backtick_and_offset() {
        assert_eq!(extract_symbol("0x1234 `myFunc+0x10"), "myFunc");
        assert_eq!(extract_symbol("mod`sym+0x1f"), "sym");
    }

    #[test]
    fn test_extract_symbol_with_backtick_no_offset() {
        assert_eq!(extract_symbol("mod`sym"), "sym");
    }

    #[test]
    fn test_extract_symbol_splits_on_first_plus_only() {
        assert_eq!(extract_symbol("mod`operator+ +0x4"), "operator");
    }

    #[test]
    fn test_extract_symbol_plain_line() {
        assert_eq!(extract_symbol("plainFunc"), "plainFunc");
        assert_eq!(extract_symbol("a b c"), "a b c");
    }

    #[test]
    fn test_preamble_is_discarded() {
        // Counts and frame-shaped lines before the first header must not
        // produce blocks or pending frames.
        let blocks = feed_all("garbage\n17\nfuncA\n");
        assert_eq!(blocks.len(), 0);
    }

    #[test]
    fn test_no_header_means_no_blocks() {
        let blocks = feed_all("funcA\nfuncB\n3\n");
        assert_eq!(blocks.len(), 0);
    }

    #[test]
    fn test_single_block() {
        let blocks = feed_all("worker_1:\nfuncA\nfuncB\n3\n");
        assert_eq!(
            blocks,
            vec![StackBlock {
                frames: vec!["funcA".to_string(), "funcB".to_string()],
                count: 3,
            }]
        );
    }

    #[test]
    fn test_header_between_blocks_is_a_separator() {
        let blocks = feed_all("worker_1:\nfuncA\n3\nworker_2:\nfuncB\n2\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].frames, vec!["funcA"]);
        assert_eq!(blocks[0].count, 3);
        assert_eq!(blocks[1].frames, vec!["funcB"]);
        assert_eq!(blocks[1].count, 2);
    }

    #[test]
    fn test_negative_and_signed_counts() {
        let blocks = feed_all("t:\nfuncA\n-5\nfuncB\n+7\n");
        assert_eq!(blocks[0].count, -5);
        assert_eq!(blocks[1].count, 7);
    }

    #[test]
    fn test_non_decimal_numbers_are_frames() {
        // Hex, floats, and overflowing integers all fail the count parse
        // and fall through to the frame rule.
        let blocks = feed_all("t:\n0x10\n3.5\n99999999999999999999999\n2\n");
        assert_eq!(
            blocks[0].frames,
            vec!["0x10", "3.5", "99999999999999999999999"]
        );
        assert_eq!(blocks[0].count, 2);
    }

    #[test]
    fn test_count_directly_after_header_emits_empty_block() {
        let blocks = feed_all("t:\n4\n");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].frames.is_empty());
        assert_eq!(blocks[0].count, 4);
    }

    #[test]
    fn test_blank_line_inside_block_is_an_unnamed_frame() {
        // No emptiness check in the frame rule: a blank line between
        // frames is recorded as a frame with an empty name.
        let blocks = feed_all("t:\nfuncA\n\n1\n");
        assert_eq!(blocks[0].frames, vec!["funcA", ""]);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let blocks = feed_all("t:\n   funcA\t\n  2 \n");
        assert_eq!(blocks[0].frames, vec!["funcA"]);
        assert_eq!(blocks[0].count, 2);
    }

    #[test]
    fn test_trailing_block_without_count_is_dropped() {
        let mut parser = StackTraceParser::new();
        let blocks: Vec<StackBlock> = "t:\nfuncA\n2\nfuncC\n"
            .lines()
            .filter_map(|line| parser.feed_line(line))
            .collect();

        assert_eq!(blocks.len(), 1);
        assert_eq!(parser.pending_frames(), 1);
    }

    #[test]
    fn test_empty_input() {
        let blocks = feed_all("");
        assert_eq!(blocks.len(), 0);
    }
}
