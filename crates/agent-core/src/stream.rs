//! Reasoning-Segment Filtering
//!
//! Some models interleave private deliberation between `<think>` and
//! `</think>` markers with the visible answer. `strip_reasoning` removes
//! every paired span from a complete response; `StreamState` is the state
//! machine that guarantees streamed output never leaks a reasoning span,
//! even partially or split across deltas.

/// Start marker of an internal-reasoning segment
pub const REASONING_OPEN: &str = "<think>";

/// End marker of an internal-reasoning segment
pub const REASONING_CLOSE: &str = "</think>";

/// Remove every paired `<think>...</think>` span (non-greedy, multiline)
/// and trim the result. An unterminated open marker is left in place; only
/// delimited spans count as reasoning.
pub fn strip_reasoning(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(REASONING_OPEN) {
        let after = &rest[start + REASONING_OPEN.len()..];
        match after.find(REASONING_CLOSE) {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = &after[end + REASONING_CLOSE.len()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out.trim().to_string()
}

/// Phase of the streaming accumulator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamPhase {
    /// Accumulating; nothing deliverable yet
    Idle,
    /// An open marker has been seen without its close; buffer is withheld
    InsideReasoning,
    /// A deliverable answer has been produced; stream consumption stops
    Ready,
}

/// Accumulation state for one streaming call.
///
/// Deltas are appended to a buffer. While the buffer holds an unmatched open
/// marker the state is `InsideReasoning` and nothing is delivered. When the
/// matching close marker arrives the full span is stripped. The first time
/// the buffer is non-empty outside a reasoning span, the trimmed buffer is
/// returned once and the state becomes terminal.
#[derive(Debug, Default)]
pub struct StreamState {
    buffer: String,
    phase: Option<StreamPhase>,
}

impl StreamState {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            phase: Some(StreamPhase::Idle),
        }
    }

    /// Current phase
    pub fn phase(&self) -> StreamPhase {
        self.phase.unwrap_or(StreamPhase::Idle)
    }

    /// Whether a deliverable answer has already been produced
    pub fn is_ready(&self) -> bool {
        self.phase() == StreamPhase::Ready
    }

    /// Feed one delta. Returns the deliverable answer the first time the
    /// buffer, net of any reasoning span, has visible content.
    pub fn observe(&mut self, delta: &str) -> Option<String> {
        if self.is_ready() {
            return None;
        }

        self.buffer.push_str(delta);

        // Markers may be split across deltas, so the buffer is the unit of
        // inspection, not the delta.
        match self.buffer.find(REASONING_OPEN) {
            Some(open) if self.buffer[open + REASONING_OPEN.len()..].contains(REASONING_CLOSE) => {
                self.buffer = strip_reasoning(&self.buffer);
                self.phase = Some(if self.buffer.contains(REASONING_OPEN) {
                    StreamPhase::InsideReasoning
                } else {
                    StreamPhase::Idle
                });
            }
            Some(_) => {
                self.phase = Some(StreamPhase::InsideReasoning);
            }
            None => {}
        }

        // A tail like "<thi" may still grow into an open marker with the
        // next delta; delivery waits until that is no longer possible.
        if self.phase() != StreamPhase::InsideReasoning && !ends_with_open_prefix(&self.buffer) {
            let visible = self.buffer.trim();
            if !visible.is_empty() {
                let answer = visible.to_string();
                self.phase = Some(StreamPhase::Ready);
                self.buffer.clear();
                return Some(answer);
            }
        }

        None
    }
}

/// True if the buffer's tail is a proper prefix of the open marker
fn ends_with_open_prefix(buffer: &str) -> bool {
    (1..REASONING_OPEN.len()).any(|n| buffer.ends_with(&REASONING_OPEN[..n]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_single_span() {
        let text = "<think>private deliberation</think>The answer is 4.";
        assert_eq!(strip_reasoning(text), "The answer is 4.");
    }

    #[test]
    fn test_strip_multiple_spans() {
        let text = "<think>a</think>first<think>b\nmultiline</think> second";
        assert_eq!(strip_reasoning(text), "first second");
    }

    #[test]
    fn test_strip_no_span() {
        assert_eq!(strip_reasoning("  plain text  "), "plain text");
    }

    #[test]
    fn test_strip_unterminated_span_left_in_place() {
        let text = "answer <think>never closed";
        assert_eq!(strip_reasoning(text), "answer <think>never closed");
    }

    #[test]
    fn test_stream_hides_reasoning() {
        let mut state = StreamState::new();
        assert_eq!(state.observe("<think>"), None);
        assert_eq!(state.observe("hidden"), None);
        assert_eq!(state.observe("</think>"), None);
        assert_eq!(state.observe("visible answer"), Some("visible answer".into()));
        assert!(state.is_ready());
    }

    #[test]
    fn test_stream_marker_split_across_deltas() {
        let mut state = StreamState::new();
        assert_eq!(state.observe("<thi"), None);
        assert_eq!(state.observe("nk>secret</th"), None);
        assert_eq!(state.observe("ink>"), None);
        assert_eq!(state.observe("ok"), Some("ok".into()));
    }

    #[test]
    fn test_stream_plain_text_delivers_first_visible() {
        let mut state = StreamState::new();
        assert_eq!(state.observe("  \n"), None);
        assert_eq!(state.observe("hello"), Some("hello".into()));
        // Terminal: further deltas are ignored
        assert_eq!(state.observe(" world"), None);
    }

    #[test]
    fn test_stream_unterminated_reasoning_never_delivers() {
        let mut state = StreamState::new();
        assert_eq!(state.observe("<think>still going"), None);
        assert_eq!(state.observe(" and going"), None);
        assert_eq!(state.phase(), StreamPhase::InsideReasoning);
        assert!(!state.is_ready());
    }

    #[test]
    fn test_partial_open_marker_withheld() {
        let mut state = StreamState::new();
        // "<thi" could still become "<think>"; nothing is deliverable yet.
        assert_eq!(state.observe("<thi"), None);
        assert_eq!(state.observe("nk>secret</think>"), None);
        assert_eq!(state.observe("answer"), Some("answer".into()));
    }

    #[test]
    fn test_marker_fragment_resolving_to_plain_text() {
        let mut state = StreamState::new();
        assert_eq!(state.observe("<th"), None);
        // Once the tail can no longer extend into a marker it is ordinary
        // text and delivers as-is.
        assert_eq!(state.observe("ree wishes"), Some("<three wishes".into()));
    }

    #[test]
    fn test_stream_text_before_reasoning() {
        let mut state = StreamState::new();
        // Visible text arriving before any marker is deliverable immediately.
        assert_eq!(state.observe("result"), Some("result".into()));
    }
}
