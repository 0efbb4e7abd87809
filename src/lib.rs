mod config;
mod error;
mod html;
mod layout;
pub mod logging;
mod node;
mod options;
mod parser;
mod prompt;
mod session;
pub mod store;
mod tree;

pub use config::{Config, HtmlConfig, PromptConfig, StoreConfig};
pub use error::{Error, GenerateError, Result};
pub use html::{message_to_html, options_to_html, tree_to_html};
pub use layout::{Entry, Layout, LayoutBuilder, ListId, ListNode, Parent, Slot};
pub use node::{Document, Node};
pub use options::split_options;
pub use prompt::{Format, Template, TemplateKind, extract_text};
pub use session::{
    FAILURE_MESSAGE, Generator, NO_OPTIONS_MESSAGE, PENDING_MESSAGE, Request, Session, View,
};
pub use store::{CheckStore, FileStore, MemoryStore, StoreError};
pub use tree::{Checkbox, UiBlock, UiItem, UiItemKind, UiList, UiTree};

/// Parse generated text into a document.
pub fn parse(text: &str) -> Document {
    parser::parse(text)
}

/// Parse and render `text` with checkbox state from `store`.
pub fn render(text: &str, namespace: &str, store: &impl CheckStore) -> UiTree {
    tree::render(&parse(text), namespace, store)
}

/// Convert generated Markdown to an HTML checklist using default config.
pub fn markdown_to_html(text: &str, namespace: &str, store: &impl CheckStore) -> String {
    markdown_to_html_with_config(text, namespace, store, &Config::compiled_default())
}

/// Convert generated Markdown to an HTML checklist with custom config.
pub fn markdown_to_html_with_config(
    text: &str,
    namespace: &str,
    store: &impl CheckStore,
    config: &Config,
) -> String {
    html::tree_to_html(&render(text, namespace, store), &config.html)
}

/// HTML for whatever a session view currently shows.
pub fn view_to_html(view: &View, config: &HtmlConfig) -> String {
    match view {
        View::Empty => String::new(),
        View::Pending => html::message_to_html(PENDING_MESSAGE, "placeholder-text"),
        View::Checklist(tree) => html::tree_to_html(tree, config),
        View::Options(options) => html::options_to_html(options, config),
        View::Message(message) => html::message_to_html(message, "placeholder-text"),
    }
}
