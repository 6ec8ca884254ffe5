//! Record demarcation and `data:` extraction.

/// Terminator separating two SSE records.
pub const RECORD_BOUNDARY: &str = "\n\n";

/// Field prefix of the only SSE field this crate reads.
pub const DATA_PREFIX: &str = "data:";

/// Decoded text not yet resolved into a complete record.
///
/// Text is appended at the back; complete records are taken off the front.
/// Whatever remains is always the suffix after the last boundary found.
#[derive(Debug, Default)]
pub struct RecordBuffer {
    text: String,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Take the next complete raw record off the front, without its boundary.
    ///
    /// The search always starts at the front of what is left, so a boundary
    /// that straddled two pushes is found once both are in.
    pub fn next_record(&mut self) -> Option<String> {
        let end = self.text.find(RECORD_BOUNDARY)?;
        let record = self.text[..end].to_string();
        self.text.drain(..end + RECORD_BOUNDARY.len());
        Some(record)
    }

    /// Text still waiting for a boundary.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Drop whatever is left, returning how many bytes were discarded.
    pub fn discard(&mut self) -> usize {
        let len = self.text.len();
        self.text.clear();
        len
    }
}

/// Extract the event payload from one raw record.
///
/// Keeps only lines starting with `data:`, strips the prefix and surrounding
/// whitespace, and joins what is left with `\n`. Returns `None` when the
/// record has no `data:` line at all (comments, keep-alives, blank records).
pub fn extract_data(record: &str) -> Option<String> {
    let lines: Vec<&str> = record
        .split('\n')
        .filter_map(|line| line.strip_prefix(DATA_PREFIX))
        .map(str::trim)
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record() {
        let mut buffer = RecordBuffer::new();
        buffer.push_str("data: hello\n\n");
        assert_eq!(buffer.next_record(), Some("data: hello".to_string()));
        assert_eq!(buffer.next_record(), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_several_records_in_one_push() {
        let mut buffer = RecordBuffer::new();
        buffer.push_str("data: 1\n\ndata: 2\n\n: ping\n\ndata: 3");
        assert_eq!(buffer.next_record().as_deref(), Some("data: 1"));
        assert_eq!(buffer.next_record().as_deref(), Some("data: 2"));
        assert_eq!(buffer.next_record().as_deref(), Some(": ping"));
        assert_eq!(buffer.next_record(), None);
        assert_eq!(buffer.as_str(), "data: 3");
    }

    #[test]
    fn test_boundary_split_across_pushes() {
        let mut buffer = RecordBuffer::new();
        buffer.push_str("data: x\n");
        assert_eq!(buffer.next_record(), None);
        buffer.push_str("\ndata: y");
        assert_eq!(buffer.next_record().as_deref(), Some("data: x"));
        assert_eq!(buffer.as_str(), "data: y");
    }

    #[test]
    fn test_empty_record_between_boundaries() {
        let mut buffer = RecordBuffer::new();
        buffer.push_str("\n\n\n\n");
        assert_eq!(buffer.next_record().as_deref(), Some(""));
        assert_eq!(buffer.next_record().as_deref(), Some(""));
        assert_eq!(buffer.next_record(), None);
    }

    #[test]
    fn test_triple_newline_leaves_leading_newline() {
        let mut buffer = RecordBuffer::new();
        buffer.push_str("data: a\n\n\ndata: b\n\n");
        assert_eq!(buffer.next_record().as_deref(), Some("data: a"));
        assert_eq!(buffer.next_record().as_deref(), Some("\ndata: b"));
    }

    #[test]
    fn test_discard() {
        let mut buffer = RecordBuffer::new();
        buffer.push_str("data: never terminated");
        assert_eq!(buffer.len(), 22);
        assert_eq!(buffer.discard(), 22);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_extract_single_line() {
        assert_eq!(extract_data("data: hello"), Some("hello".to_string()));
        assert_eq!(extract_data("data:hello"), Some("hello".to_string()));
        assert_eq!(extract_data("data:   padded  "), Some("padded".to_string()));
    }

    #[test]
    fn test_extract_multi_line_joined() {
        assert_eq!(
            extract_data("data: A\ndata: B"),
            Some("A\nB".to_string())
        );
    }

    #[test]
    fn test_extract_filters_other_fields_in_order() {
        let record = "id: 7\ndata: first\nevent: delta\n: comment\ndata: second\nretry: 10";
        assert_eq!(extract_data(record), Some("first\nsecond".to_string()));
    }

    #[test]
    fn test_extract_no_data_lines() {
        assert_eq!(extract_data(""), None);
        assert_eq!(extract_data(": keep-alive"), None);
        assert_eq!(extract_data("event: ping\nid: 3"), None);
    }

    #[test]
    fn test_extract_prefix_must_start_line() {
        assert_eq!(extract_data(" data: indented"), None);
        assert_eq!(extract_data("DATA: upper"), None);
    }

    #[test]
    fn test_extract_empty_payload_still_counts() {
        assert_eq!(extract_data("data:"), Some(String::new()));
        assert_eq!(extract_data("data:\ndata: x"), Some("\nx".to_string()));
    }

    #[test]
    fn test_extract_strips_carriage_return() {
        assert_eq!(extract_data("data: crlf\r"), Some("crlf".to_string()));
    }
}
