//! List nesting, computed before any presentation.
//!
//! Lists live in an arena and point at their parent by index. The container
//! holds an ordered sequence of slots: headings, paragraphs and the lists that
//! were attached to it directly.

use crate::node::Node;

/// Index of a list in [`Layout::lists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(pub usize);

/// Where a list is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    Container,
    Item { list: ListId, item: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Bullet { text: String },
    Task { checked: bool, content: String },
}

#[derive(Debug, Clone)]
pub struct ListNode {
    pub parent: Parent,
    pub items: Vec<Entry>,
    /// Lists attached to each item, parallel to `items`.
    pub nested: Vec<Vec<ListId>>,
}

impl ListNode {
    fn new(parent: Parent) -> Self {
        Self {
            parent,
            items: Vec::new(),
            nested: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List(ListId),
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub lists: Vec<ListNode>,
    pub slots: Vec<Slot>,
}

impl Layout {
    /// Build the layout for a whole document.
    pub fn build(nodes: &[Node]) -> Self {
        let mut builder = LayoutBuilder::new();
        for node in nodes {
            builder.push(node);
        }
        builder.finish()
    }

    pub fn list(&self, id: ListId) -> &ListNode {
        &self.lists[id.0]
    }

    /// Lists attached to item `item` of `list`, in creation order.
    pub fn children(&self, list: ListId, item: usize) -> &[ListId] {
        self.lists[list.0]
            .nested
            .get(item)
            .map_or(&[], Vec::as_slice)
    }
}

/// Incremental layout construction.
///
/// Keeps a stack of active lists, one per depth. Headings and paragraphs do
/// not touch the stack.
#[derive(Debug)]
pub struct LayoutBuilder {
    layout: Layout,
    stack: Vec<ListId>,
    /// Whether `stack[0]` has been placed in the container.
    root_placed: bool,
    /// A heading or paragraph followed the placed top-level list; the next
    /// top-level item starts a new one.
    root_split: bool,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        let mut layout = Layout::default();
        layout.lists.push(ListNode::new(Parent::Container));
        Self {
            layout,
            stack: vec![ListId(0)],
            root_placed: false,
            root_split: false,
        }
    }

    /// Number of active lists.
    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, node: &Node) {
        match node {
            Node::Heading { level, text } => {
                self.split_root();
                self.layout.slots.push(Slot::Heading {
                    level: *level,
                    text: text.clone(),
                });
            }
            Node::Paragraph { text } => {
                self.split_root();
                self.layout
                    .slots
                    .push(Slot::Paragraph { text: text.clone() });
            }
            Node::Bullet { text } => {
                let list = self.innermost();
                self.append(list, Entry::Bullet { text: text.clone() });
            }
            Node::Task {
                depth,
                checked,
                content,
            } => {
                let wanted = depth + 1;
                while self.stack.len() < wanted {
                    let parent = self.innermost();
                    let child = self.open_list(parent);
                    self.stack.push(child);
                }
                self.stack.truncate(wanted);
                let list = self.innermost();
                self.append(
                    list,
                    Entry::Task {
                        checked: *checked,
                        content: content.clone(),
                    },
                );
            }
        }
    }

    pub fn finish(self) -> Layout {
        self.layout
    }

    fn innermost(&self) -> ListId {
        self.stack[self.stack.len() - 1]
    }

    fn append(&mut self, mut list: ListId, entry: Entry) {
        if list == self.stack[0] {
            if self.root_split {
                list = ListId(self.layout.lists.len());
                self.layout.lists.push(ListNode::new(Parent::Container));
                self.stack[0] = list;
                self.root_split = false;
                self.root_placed = false;
            }
            if !self.root_placed {
                self.layout.slots.push(Slot::List(list));
                self.root_placed = true;
            }
        }
        let node = &mut self.layout.lists[list.0];
        node.items.push(entry);
        node.nested.push(Vec::new());
    }

    /// Create a list under the last item of `parent`, or in the container
    /// when `parent` has no items yet.
    fn open_list(&mut self, parent: ListId) -> ListId {
        let id = ListId(self.layout.lists.len());
        let attach = match self.layout.lists[parent.0].nested.last_mut() {
            Some(children) => {
                children.push(id);
                Parent::Item {
                    list: parent,
                    item: self.layout.lists[parent.0].items.len() - 1,
                }
            }
            None => {
                self.layout.slots.push(Slot::List(id));
                Parent::Container
            }
        };
        self.layout.lists.push(ListNode::new(attach));
        id
    }

    /// A heading or paragraph ends the visible top-level list. The stack is
    /// left alone so indented items still nest under the earlier items; only
    /// the next top-level item opens a fresh list after the block.
    fn split_root(&mut self) {
        if self.root_placed {
            self.root_split = true;
        }
    }
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}
