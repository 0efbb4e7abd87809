use std::sync::LazyLock;

use regex::Regex;

use crate::node::{Document, Node};

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,3})\s+").unwrap());
static TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*]\s*\[([ xX])\]\s*(.+)$").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.*)$").unwrap());

/// A line classifier; returns `None` when the line is not its kind.
type Matcher = fn(&str) -> Option<Node>;

/// Tried in order, first match wins. Paragraph is the fallback.
const MATCHERS: &[Matcher] = &[match_heading, match_task, match_bullet];

/// Parse generated text into a document, one node per non-blank line.
///
/// Never fails: anything the stricter matchers reject becomes a paragraph.
pub fn parse(text: &str) -> Document {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter_map(classify)
        .collect()
}

fn classify(line: &str) -> Option<Node> {
    if let Some(node) = MATCHERS.iter().find_map(|matcher| matcher(line)) {
        return Some(node);
    }
    if line.trim().is_empty() {
        return None;
    }
    Some(Node::Paragraph {
        text: line.trim().to_string(),
    })
}

fn match_heading(line: &str) -> Option<Node> {
    let caps = HEADING_RE.captures(line)?;
    let marker = caps.get(1)?;
    let whole = caps.get(0)?;
    Some(Node::Heading {
        level: marker.as_str().len() as u8,
        text: line[whole.end()..].trim().to_string(),
    })
}

fn match_task(line: &str) -> Option<Node> {
    let caps = TASK_RE.captures(line)?;
    let indent = caps.get(1).map_or(0, |m| m.as_str().chars().count());
    let mark = caps.get(2).map_or("", |m| m.as_str());
    let content = caps.get(3).map_or("", |m| m.as_str());
    Some(Node::Task {
        depth: indent / 2,
        checked: mark.eq_ignore_ascii_case("x"),
        content: content.trim().to_string(),
    })
}

fn match_bullet(line: &str) -> Option<Node> {
    let caps = BULLET_RE.captures(line)?;
    Some(Node::Bullet {
        text: caps.get(1).map_or("", |m| m.as_str()).trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(depth: usize, checked: bool, content: &str) -> Node {
        Node::Task {
            depth,
            checked,
            content: content.to_string(),
        }
    }

    fn heading(level: u8, text: &str) -> Node {
        Node::Heading {
            level,
            text: text.to_string(),
        }
    }

    fn para(text: &str) -> Node {
        Node::Paragraph {
            text: text.to_string(),
        }
    }

    fn bullet(text: &str) -> Node {
        Node::Bullet {
            text: text.to_string(),
        }
    }

    #[test]
    fn title_and_flat_checklist() {
        assert_eq!(
            parse("# Title\n- [ ] a\n- [x] b\n"),
            vec![heading(1, "Title"), task(0, false, "a"), task(0, true, "b")]
        );
    }

    #[test]
    fn indented_task_is_one_level_deeper() {
        assert_eq!(
            parse("- [ ] Epic\n  - [ ] Sub\n"),
            vec![task(0, false, "Epic"), task(1, false, "Sub")]
        );
    }

    #[test]
    fn depth_is_half_the_indent_rounded_down() {
        let doc = parse("   - [ ] three\n    * [X] four\n\t- [ ] tab");
        assert_eq!(
            doc,
            vec![task(1, false, "three"), task(2, true, "four"), task(0, false, "tab")]
        );
    }

    #[test]
    fn heading_levels_one_to_three() {
        assert_eq!(
            parse("# a\n## b\n### c  "),
            vec![heading(1, "a"), heading(2, "b"), heading(3, "c")]
        );
    }

    #[test]
    fn deep_heading_falls_back_to_paragraph() {
        assert_eq!(parse("#### Deep"), vec![para("#### Deep")]);
    }

    #[test]
    fn heading_needs_whitespace_after_hashes() {
        assert_eq!(parse("#tag"), vec![para("#tag")]);
    }

    #[test]
    fn task_syntax_is_never_a_bullet() {
        assert_eq!(parse("* [ ] star task"), vec![task(0, false, "star task")]);
        assert_eq!(parse("-[x] tight"), vec![task(0, true, "tight")]);
    }

    #[test]
    fn malformed_bracket_is_not_a_task() {
        assert_eq!(parse("- [y] maybe"), vec![bullet("[y] maybe")]);
        assert_eq!(parse("-[y] maybe"), vec![para("-[y] maybe")]);
    }

    #[test]
    fn empty_bullet_is_kept() {
        assert_eq!(parse("- "), vec![bullet("")]);
    }

    #[test]
    fn task_with_only_trailing_space_has_empty_content() {
        assert_eq!(parse("- [ ]  "), vec![task(0, false, "")]);
    }

    #[test]
    fn bare_checkbox_falls_to_bullet() {
        assert_eq!(parse("- [ ]"), vec![bullet("[ ]")]);
    }

    #[test]
    fn blank_lines_and_carriage_returns() {
        assert_eq!(
            parse("first\r\n\r\n   \nsecond\r\n"),
            vec![para("first"), para("second")]
        );
    }

    #[test]
    fn paragraphs_are_not_merged() {
        assert_eq!(
            parse("line one\nline two"),
            vec![para("line one"), para("line two")]
        );
    }

    #[test]
    fn metadata_stays_in_content() {
        let doc = parse("  - [ ] Task 1: wire API (owner: backend, est_hours: 4)");
        assert_eq!(
            doc,
            vec![task(1, false, "Task 1: wire API (owner: backend, est_hours: 4)")]
        );
    }

    #[test]
    fn node_count_never_exceeds_line_count() {
        let inputs = [
            "",
            "\n\n\n",
            "# a\n\n- b\n- [ ] c\nplain\n",
            "**Objective:** ship it\n\n## MVP\n- [x] done\n",
        ];
        for input in inputs {
            let lines = input.split('\n').count();
            assert!(parse(input).len() <= lines, "input: {input:?}");
        }
    }
}
