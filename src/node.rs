/// A single line of generated text, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    /// Plain list item without a checkbox; never nested.
    Bullet {
        text: String,
    },
    /// Checkable list item. `depth` is half the leading indentation.
    Task {
        depth: usize,
        checked: bool,
        content: String,
    },
}

/// Parsed nodes in source line order.
pub type Document = Vec<Node>;
