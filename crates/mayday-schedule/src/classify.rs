//! Plan-kind detection from the response's flag line.

use crate::types::PlanKind;

/// Outcome of inspecting the flag line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// `None` when the first non-empty line is neither "yes" nor "no".
    pub kind: Option<PlanKind>,
    /// Index of the first line after the flag line (0 when there is no flag).
    pub body_line: usize,
    /// Byte offset of `body_line` in the raw response.
    body_offset: usize,
}

impl Classification {
    /// The text passed on to the section splitter.
    pub fn body<'a>(&self, raw: &'a str) -> &'a str {
        raw.get(self.body_offset..).unwrap_or("")
    }
}

/// Inspect the first non-empty line, case-insensitively.
pub fn classify(raw: &str) -> Classification {
    let mut offset = 0;

    for (index, line) in raw.split_inclusive('\n').enumerate() {
        let next_offset = offset + line.len();
        let trimmed = line.trim();
        if trimmed.is_empty() {
            offset = next_offset;
            continue;
        }

        let lower = trimmed.to_lowercase();
        let kind = if lower.starts_with("yes") {
            Some(PlanKind::MultiDay)
        } else if lower.starts_with("no") {
            Some(PlanKind::SingleDay)
        } else {
            None
        };

        return match kind {
            Some(kind) => Classification {
                kind: Some(kind),
                body_line: index + 1,
                body_offset: next_offset,
            },
            None => unflagged(),
        };
    }

    unflagged()
}

fn unflagged() -> Classification {
    Classification {
        kind: None,
        body_line: 0,
        body_offset: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_is_multi_day() {
        let raw = "Yes\nTask Analysis:\nx\nScheduling Plan:\n";
        let c = classify(raw);
        assert_eq!(c.kind, Some(PlanKind::MultiDay));
        assert_eq!(c.body_line, 1);
        assert!(c.body(raw).starts_with("Task Analysis:"));
    }

    #[test]
    fn test_no_is_single_day_case_insensitive() {
        let c = classify("NO.\nTask Analysis:");
        assert_eq!(c.kind, Some(PlanKind::SingleDay));
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let raw = "\n   \n  yes, several days\nrest";
        let c = classify(raw);
        assert_eq!(c.kind, Some(PlanKind::MultiDay));
        assert_eq!(c.body_line, 3);
        assert_eq!(c.body(raw), "rest");
    }

    #[test]
    fn test_missing_flag_keeps_whole_body() {
        let raw = "Task Analysis:\nshort\nScheduling Plan:\n";
        let c = classify(raw);
        assert_eq!(c.kind, None);
        assert_eq!(c.body_line, 0);
        assert_eq!(c.body(raw), raw);
    }

    #[test]
    fn test_empty_input() {
        let c = classify("");
        assert_eq!(c.kind, None);
        assert_eq!(c.body(""), "");
    }

    #[test]
    fn test_flag_on_last_line_leaves_empty_body() {
        let raw = "Yes";
        let c = classify(raw);
        assert_eq!(c.kind, Some(PlanKind::MultiDay));
        assert_eq!(c.body(raw), "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let raw = "No\r\nTask Analysis:\r\n";
        let c = classify(raw);
        assert_eq!(c.kind, Some(PlanKind::SingleDay));
        assert_eq!(c.body(raw), "Task Analysis:\r\n");
    }
}
