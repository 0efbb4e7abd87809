use crate::layout::{Entry, Layout, ListId, Slot};
use crate::node::Node;
use crate::store::{self, CheckStore};

/// Rendered checklist, ready to be displayed.
///
/// Nesting depth is unbounded; building, walking and dropping the tree use
/// explicit work lists rather than recursion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiTree {
    pub namespace: String,
    pub blocks: Vec<UiBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List(UiList),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiList {
    pub items: Vec<UiItem>,
}

impl Drop for UiList {
    fn drop(&mut self) {
        let mut pending: Vec<UiList> = Vec::new();
        for item in &mut self.items {
            pending.append(&mut item.nested);
        }
        while let Some(mut list) = pending.pop() {
            for item in &mut list.items {
                pending.append(&mut item.nested);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiItem {
    pub kind: UiItemKind,
    pub nested: Vec<UiList>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiItemKind {
    Bullet { text: String },
    Checkbox(Checkbox),
}

/// A task item. `key` is where toggles are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub key: String,
    pub checked: bool,
    pub label: String,
}

impl UiTree {
    /// All checkboxes in document order, nested ones after their parent item.
    pub fn checkboxes(&self) -> Vec<&Checkbox> {
        let mut out = Vec::new();
        let mut pending: Vec<std::slice::Iter<'_, UiItem>> = Vec::new();
        for block in &self.blocks {
            let UiBlock::List(list) = block else {
                continue;
            };
            pending.push(list.items.iter());
            while let Some(items) = pending.last_mut() {
                let Some(item) = items.next() else {
                    pending.pop();
                    continue;
                };
                if let UiItemKind::Checkbox(checkbox) = &item.kind {
                    out.push(checkbox);
                }
                pending.extend(item.nested.iter().rev().map(|nested| nested.items.iter()));
            }
        }
        out
    }

    /// First checkbox whose label is exactly `label`.
    pub fn find_checkbox(&self, label: &str) -> Option<&Checkbox> {
        self.checkboxes().into_iter().find(|c| c.label == label)
    }
}

/// Render a parsed document into a UI tree.
///
/// Initial checkbox state comes from `store` when it has an entry for the
/// task's key, otherwise from the source mark.
pub fn render(doc: &[Node], namespace: &str, store: &impl CheckStore) -> UiTree {
    let layout = Layout::build(doc);
    let tree = materialize(&layout, namespace, store);
    tracing::debug!(
        "rendered {} nodes into {} blocks under {namespace}",
        doc.len(),
        tree.blocks.len()
    );
    tree
}

/// Turn a computed layout into UI elements.
pub fn materialize(layout: &Layout, namespace: &str, store: &impl CheckStore) -> UiTree {
    // Nested lists are always created after their parent, so building from the
    // highest id down finds every child list already done.
    let mut built: Vec<Option<UiList>> = layout.lists.iter().map(|_| None).collect();
    for index in (0..layout.lists.len()).rev() {
        let id = ListId(index);
        let list = build_list(layout, id, namespace, store, &mut built);
        built[index] = Some(list);
    }

    let blocks = layout
        .slots
        .iter()
        .map(|slot| match slot {
            Slot::Heading { level, text } => UiBlock::Heading {
                level: *level,
                text: text.clone(),
            },
            Slot::Paragraph { text } => UiBlock::Paragraph { text: text.clone() },
            Slot::List(id) => UiBlock::List(built[id.0].take().unwrap_or_default()),
        })
        .collect();

    UiTree {
        namespace: namespace.to_string(),
        blocks,
    }
}

fn build_list(
    layout: &Layout,
    id: ListId,
    namespace: &str,
    store: &impl CheckStore,
    built: &mut [Option<UiList>],
) -> UiList {
    let items = layout
        .list(id)
        .items
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let kind = match entry {
                Entry::Bullet { text } => UiItemKind::Bullet { text: text.clone() },
                Entry::Task { checked, content } => {
                    let key = store::check_key(namespace, content);
                    let checked = store::load_checked(store, &key, *checked);
                    UiItemKind::Checkbox(Checkbox {
                        key,
                        checked,
                        label: content.clone(),
                    })
                }
            };
            let nested = layout
                .children(id, index)
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect();
            UiItem { kind, nested }
        })
        .collect();

    UiList { items }
}
