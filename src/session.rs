//! One roadmap view driven by a topic trigger.
//!
//! A request goes through [`Session::begin`] (validation, trigger disabled),
//! the outbound generation call, then [`Session::complete`] (view replaced,
//! trigger re-enabled). [`Session::submit`] runs all three with the session's
//! own [`Generator`].

use crate::error::{Error, GenerateError, Result};
use crate::options::split_options;
use crate::parser::parse;
use crate::prompt::{Format, Template};
use crate::store::{self, CheckStore};
use crate::tree::{UiTree, render};

pub const PENDING_MESSAGE: &str = "Generating roadmap…";
pub const FAILURE_MESSAGE: &str = "Failed to generate roadmap. See console for details.";
pub const NO_OPTIONS_MESSAGE: &str = "Could not generate options. Please try a different prompt.";

/// The outbound text-generation service.
pub trait Generator {
    fn generate(&self, prompt: &str) -> std::result::Result<String, GenerateError>;
}

impl<F> Generator for F
where
    F: Fn(&str) -> std::result::Result<String, GenerateError>,
{
    fn generate(&self, prompt: &str) -> std::result::Result<String, GenerateError> {
        self(prompt)
    }
}

/// What the render area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Empty,
    Pending,
    Checklist(UiTree),
    Options(Vec<String>),
    Message(String),
}

/// An accepted request awaiting its generation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub topic: String,
    pub namespace: String,
    pub prompt: String,
    format: Format,
}

pub struct Session<G, S> {
    generator: G,
    store: S,
    template: Template,
    view: View,
    busy: bool,
}

impl<G: Generator, S: CheckStore> Session<G, S> {
    pub fn new(generator: G, store: S, template: Template) -> Self {
        Self {
            generator,
            store,
            template,
            view: View::Empty,
            busy: false,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Whether the trigger is disabled.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate `topic` and start a request.
    ///
    /// An empty topic is rejected before anything changes.
    pub fn begin(&mut self, topic: &str) -> Result<Request> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::EmptyTopic);
        }
        if self.busy {
            return Err(Error::Busy);
        }

        self.busy = true;
        self.view = View::Pending;

        Ok(Request {
            topic: topic.to_string(),
            namespace: store::namespace(topic),
            prompt: self.template.build(topic),
            format: self.template.format(),
        })
    }

    /// Finish `request` with the generation outcome and re-enable the trigger.
    pub fn complete(
        &mut self,
        request: Request,
        outcome: std::result::Result<String, GenerateError>,
    ) -> &View {
        self.view = match outcome {
            Ok(text) => {
                tracing::debug!("generated text for {:?}:\n{}", request.topic, text);
                self.present(&request, &text)
            }
            Err(e) => {
                tracing::error!("roadmap generation failed for {:?}: {}", request.topic, e);
                View::Message(FAILURE_MESSAGE.to_string())
            }
        };
        self.busy = false;
        &self.view
    }

    /// Run a whole request against the session's generator.
    pub fn submit(&mut self, topic: &str) -> Result<&View> {
        let request = self.begin(topic)?;
        let outcome = self.generator.generate(&request.prompt);
        Ok(self.complete(request, outcome))
    }

    /// Persist a checkbox change. The displayed tree is left as is.
    pub fn toggle(&mut self, key: &str, checked: bool) {
        store::save_checked(&mut self.store, key, checked);
    }

    fn present(&self, request: &Request, text: &str) -> View {
        match request.format {
            Format::Checklist => {
                View::Checklist(render(&parse(text), &request.namespace, &self.store))
            }
            Format::Options => {
                let options = split_options(text);
                if options.is_empty() {
                    View::Message(NO_OPTIONS_MESSAGE.to_string())
                } else {
                    View::Options(options)
                }
            }
        }
    }
}
