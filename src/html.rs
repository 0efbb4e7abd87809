use crate::config::HtmlConfig;
use crate::tree::{UiBlock, UiItem, UiItemKind, UiList, UiTree};

/// Convert a rendered checklist to an HTML fragment
pub fn tree_to_html(tree: &UiTree, config: &HtmlConfig) -> String {
    let mut out = String::new();

    for block in &tree.blocks {
        emit_block(block, config, &mut out);
    }

    out
}

/// Convert plain-text options to HTML boxes, one per option
pub fn options_to_html(options: &[String], config: &HtmlConfig) -> String {
    let mut out = String::new();
    for option in options {
        out.push_str(&format!("<div class=\"{}\">", attr(&config.option_class)));
        // Line breaks survive as in `innerText`
        let mut lines = option.lines().peekable();
        while let Some(line) = lines.next() {
            escape_into(line, &mut out);
            if lines.peek().is_some() {
                out.push_str("<br>");
            }
        }
        out.push_str("</div>\n");
    }
    out
}

/// A single status line, used for pending and failure views
pub fn message_to_html(message: &str, class: &str) -> String {
    let mut out = format!("<p class=\"{}\">", attr(class));
    escape_into(message, &mut out);
    out.push_str("</p>\n");
    out
}

fn emit_block(block: &UiBlock, config: &HtmlConfig, out: &mut String) {
    match block {
        UiBlock::Heading { level, text } => {
            let tag = if *level == 1 { "h2" } else { "h3" };
            out.push_str(&format!("<{tag} class=\"{}\">", attr(&config.heading_class)));
            escape_into(text, out);
            out.push_str(&format!("</{tag}>\n"));
        }
        UiBlock::Paragraph { text } => {
            out.push_str(&format!("<p class=\"{}\">", attr(&config.paragraph_class)));
            escape_into(text, out);
            out.push_str("</p>\n");
        }
        UiBlock::List(list) => {
            list_to_html(list, config, out);
        }
    }
}

/// Indentation stops growing past this many levels.
const MAX_INDENT: usize = 32;

/// Pending output while walking a list.
enum Step<'a> {
    OpenList(&'a UiList, usize),
    Item(&'a UiItem, usize),
    CloseItem(usize),
    CloseList(usize),
}

fn push_indent(indent: usize, out: &mut String) {
    for _ in 0..indent.min(MAX_INDENT) {
        out.push_str("  ");
    }
}

fn list_to_html(list: &UiList, config: &HtmlConfig, out: &mut String) {
    let mut steps = vec![Step::OpenList(list, 0)];

    while let Some(step) = steps.pop() {
        match step {
            Step::OpenList(list, indent) => {
                push_indent(indent, out);
                out.push_str(&format!(
                    "<ul class=\"{}\" style=\"list-style: none\">\n",
                    attr(&config.list_class)
                ));
                steps.push(Step::CloseList(indent));
                steps.extend(list.items.iter().rev().map(|item| Step::Item(item, indent + 1)));
            }
            Step::Item(item, indent) => {
                push_indent(indent, out);
                item_open_to_html(item, config, out);
                if item.nested.is_empty() {
                    out.push_str("</li>\n");
                } else {
                    out.push('\n');
                    steps.push(Step::CloseItem(indent));
                    steps.extend(
                        item.nested
                            .iter()
                            .rev()
                            .map(|nested| Step::OpenList(nested, indent + 1)),
                    );
                }
            }
            Step::CloseItem(indent) => {
                push_indent(indent, out);
                out.push_str("</li>\n");
            }
            Step::CloseList(indent) => {
                push_indent(indent, out);
                out.push_str("</ul>\n");
            }
        }
    }
}

fn item_open_to_html(item: &UiItem, config: &HtmlConfig, out: &mut String) {
    match &item.kind {
        UiItemKind::Bullet { text } => {
            out.push_str(&format!("<li class=\"{}\">", attr(&config.bullet_class)));
            escape_into(text, out);
        }
        UiItemKind::Checkbox(checkbox) => {
            out.push_str(&format!("<li class=\"{}\">", attr(&config.item_class)));
            out.push_str(&format!(
                "<input type=\"checkbox\" class=\"{}\" data-key=\"{}\"",
                attr(&config.checkbox_class),
                attr(&checkbox.key)
            ));
            if checkbox.checked {
                out.push_str(" checked");
            }
            out.push('>');
            out.push_str(&format!("<label class=\"{}\">", attr(&config.label_class)));
            escape_into(&checkbox.label, out);
            out.push_str("</label>");
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

fn attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_into(value, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::store::{CheckStore, MemoryStore};
    use crate::tree::render;

    fn plain() -> HtmlConfig {
        HtmlConfig {
            list_class: "l".into(),
            heading_class: "h".into(),
            paragraph_class: "p".into(),
            bullet_class: "b".into(),
            item_class: "i".into(),
            checkbox_class: "c".into(),
            label_class: "t".into(),
            option_class: "o".into(),
        }
    }

    fn to_html(text: &str, store: &MemoryStore) -> String {
        tree_to_html(&render(&parse(text), "ns", store), &plain())
    }

    #[test]
    fn heading_levels_map_to_h2_and_h3() {
        let store = MemoryStore::new();
        assert_eq!(
            to_html("# Top\n## Mid\n### Low", &store),
            "<h2 class=\"h\">Top</h2>\n<h3 class=\"h\">Mid</h3>\n<h3 class=\"h\">Low</h3>\n"
        );
    }

    #[test]
    fn paragraph() {
        let store = MemoryStore::new();
        assert_eq!(
            to_html("Hello world", &store),
            "<p class=\"p\">Hello world</p>\n"
        );
    }

    #[test]
    fn flat_checklist() {
        let store = MemoryStore::new();
        assert_eq!(
            to_html("- [ ] a\n- [x] b", &store),
            "<ul class=\"l\" style=\"list-style: none\">\n\
             \x20 <li class=\"i\"><input type=\"checkbox\" class=\"c\" data-key=\"ns::a\"><label class=\"t\">a</label></li>\n\
             \x20 <li class=\"i\"><input type=\"checkbox\" class=\"c\" data-key=\"ns::b\" checked><label class=\"t\">b</label></li>\n\
             </ul>\n"
        );
    }

    #[test]
    fn nested_checklist() {
        let store = MemoryStore::new();
        assert_eq!(
            to_html("- [ ] Epic\n  - [ ] Sub", &store),
            "<ul class=\"l\" style=\"list-style: none\">\n\
             \x20 <li class=\"i\"><input type=\"checkbox\" class=\"c\" data-key=\"ns::Epic\"><label class=\"t\">Epic</label>\n\
             \x20   <ul class=\"l\" style=\"list-style: none\">\n\
             \x20     <li class=\"i\"><input type=\"checkbox\" class=\"c\" data-key=\"ns::Sub\"><label class=\"t\">Sub</label></li>\n\
             \x20   </ul>\n\
             \x20 </li>\n\
             </ul>\n"
        );
    }

    #[test]
    fn siblings_close_before_next_item() {
        let store = MemoryStore::new();
        let html = to_html("- [ ] a\n  - [ ] a1\n- [ ] b", &store);
        let a1 = html.find(">a1<").unwrap();
        let b = html.find(">b<").unwrap();
        let between = &html[a1..b];
        let closes: Vec<_> = between
            .match_indices("</")
            .map(|(at, _)| &between[at..at + 4])
            .collect();
        assert_eq!(closes, vec!["</la", "</li", "</ul", "</li"]);
        assert_eq!(html.matches("<ul").count(), 2);
        assert_eq!(html.matches("</ul>").count(), 2);
    }

    #[test]
    fn very_deep_chain_emits_balanced_lists() {
        let text: String = (0..3000)
            .map(|depth| format!("{}- [ ] t{depth}\n", "  ".repeat(depth)))
            .collect();
        let html = to_html(&text, &MemoryStore::new());

        assert_eq!(html.matches("<ul ").count(), 3000);
        assert_eq!(html.matches("</ul>").count(), 3000);
        assert_eq!(html.matches("</li>").count(), 3000);
        let widest = html.lines().map(|l| l.len() - l.trim_start().len()).max();
        assert_eq!(widest, Some(2 * MAX_INDENT));
    }

    #[test]
    fn bullets() {
        let store = MemoryStore::new();
        assert_eq!(
            to_html("- risk", &store),
            "<ul class=\"l\" style=\"list-style: none\">\n  <li class=\"b\">risk</li>\n</ul>\n"
        );
    }

    #[test]
    fn persisted_state_is_emitted() {
        let mut store = MemoryStore::new();
        store.set("ns::a", true).unwrap();
        assert!(to_html("- [ ] a", &store).contains("data-key=\"ns::a\" checked>"));
    }

    #[test]
    fn escapes_special_chars() {
        let store = MemoryStore::new();
        assert_eq!(
            to_html("a < b & \"c\"", &store),
            "<p class=\"p\">a &lt; b &amp; &quot;c&quot;</p>\n"
        );
        assert!(to_html("- [ ] <script>", &store).contains("<label class=\"t\">&lt;script&gt;</label>"));
    }

    #[test]
    fn options_keep_line_breaks() {
        let options = vec!["one\ntwo".to_string(), "three".to_string()];
        assert_eq!(
            options_to_html(&options, &plain()),
            "<div class=\"o\">one<br>two</div>\n<div class=\"o\">three</div>\n"
        );
    }

    #[test]
    fn markdown_to_html_uses_compiled_classes() {
        let html = crate::markdown_to_html("# Plan", "ns", &MemoryStore::new());
        assert_eq!(html, "<h2 class=\"text-white font-bold\">Plan</h2>\n");
    }

    #[test]
    fn view_html() {
        use crate::session::View;

        assert_eq!(crate::view_to_html(&View::Empty, &plain()), "");
        assert_eq!(
            crate::view_to_html(&View::Message("Failed".into()), &plain()),
            "<p class=\"placeholder-text\">Failed</p>\n"
        );
        assert!(crate::view_to_html(&View::Pending, &plain()).contains("Generating roadmap"));
    }

    #[test]
    fn message() {
        assert_eq!(
            message_to_html("Generating roadmap…", "placeholder-text"),
            "<p class=\"placeholder-text\">Generating roadmap…</p>\n"
        );
    }
}
