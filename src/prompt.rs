//! Prompt templates and provider response handling.

use serde::Deserialize;
use serde_json::Value;

const CHECKLIST_SYSTEM: &str = r#"You are RoadmapBuilder, a concise, pragmatic planner that outputs a branched, checklist-style roadmap in Markdown only.
Do NOT output JSON or machine-only wrappers. Produce only human-readable Markdown that follows this exact structure so clients can parse it:

# <Project Title>

**Objective:** one sentence.

**Success criteria:**
- [ ] <measurable success item 1>
- [ ] <measurable success item 2>

## MVP (timebox: <N> days)
- [ ] Epic: <epic title> (owner: <role>, est_hours: <n>)
  - [ ] Task 1: <short task description> (owner: <role>, est_hours: <n>)
  - [ ] Task 2: <short task description> (owner: <role>, est_hours: <n>)
- [ ] Epic: <epic title>
  - [ ] Task ...

## Sprints
### Sprint 1 - Days 1-<d>
- [ ] Deliverable: <short title>
  - [ ] Task A: <desc> (acceptance: <succ criteria>)
  - [ ] Task B: <desc>

### Sprint 2 - Days <x>-<y>
- [ ] Deliverable: ...

## Dependencies & Integrations
- <bullet list>

## Risks & Mitigations
- <risk> - mitigation: <action>

## Demo checklist
- [ ] <demoable step 1>
- [ ] <demoable step 2>

Notes:
- Keep total human-readable output under ~700 words when possible.
- Use plain Markdown only (task list checkboxes like "- [ ] ...", headings, and short parenthetical metadata). Keep nesting to at most 2 levels under epics/deliverables.
- Use short sentences and measurable acceptance criteria. Be opinionated and clear.
- If the user gives a timebox (e.g., "14 days", "21 days") or stack mention in the prompt, adapt sprint lengths and tech tradeoffs accordingly.
- If the user lists "alreadyDone" or "existingModules" in their prompt text, mark those specific tasks with ticks already checked: "- [x] ...".
- Never produce JSON or additional text outside the Markdown roadmap. Only Markdown output is allowed.
"#;

const WORKFLOW_SYSTEM: &str = "you have to generate a roadmap that how the work should be performed professionally
done by making a step by step points.
1. Is to manage work load, complete project at time.
2. Its for government offices to manage work.
3. It not a one person work manage it like that.";

/// Template selector as written in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Checklist,
    Workflow,
    Steps,
}

impl TemplateKind {
    pub fn with_profession(self, profession: &str) -> Template {
        match self {
            TemplateKind::Checklist => Template::Checklist,
            TemplateKind::Workflow => Template::Workflow,
            TemplateKind::Steps => Template::Steps {
                profession: profession.to_string(),
            },
        }
    }
}

/// How a template's response is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Markdown checklist, parsed and rendered with checkboxes.
    Checklist,
    /// Plain text, optionally split on `--- OPTION n ---` delimiters.
    Options,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Template {
    #[default]
    Checklist,
    Workflow,
    Steps { profession: String },
}

impl Template {
    pub fn format(&self) -> Format {
        match self {
            Template::Checklist => Format::Checklist,
            Template::Workflow | Template::Steps { .. } => Format::Options,
        }
    }

    /// Full prompt sent to the generator for `topic`.
    pub fn build(&self, topic: &str) -> String {
        match self {
            Template::Checklist => format!(
                "{CHECKLIST_SYSTEM}\n\nUSER INPUT:\n{topic}\n\nIf the request mentions 'alreadyDone' or 'existingModules', mark those tasks as done (- [x] ...)"
            ),
            Template::Workflow => format!("{WORKFLOW_SYSTEM}\n\nUSER TOPIC: \"{topic}\""),
            Template::Steps { profession } => format!(
                "You are a seasoned {profession} and an expert coach. The user gave this task: \"{topic}\". \
                 Produce a clear, actionable roadmap to complete it as if you were mentoring a junior professional.\n\n\
                 Requirements:\n\
                 - Provide numbered major steps (1., 2., ...) with short descriptions.\n\
                 - For each major step, include an estimated time (hours/days), required skills or tools, and a short success criterion/outcome.\n\
                 - Add a brief checklist (3-8 bullet points) at the end.\n\
                 - Keep the whole output concise (aim for ~300-500 words).\n\n\
                 Respond in plain text."
            ),
        }
    }
}

/// Pull the generated text out of a provider payload.
///
/// Providers disagree on shape; anything unrecognised is returned as its
/// JSON serialisation so nothing is silently lost. Empty text fields count as
/// missing.
pub fn extract_text(payload: &Value) -> String {
    if let Value::String(text) = payload {
        return text.clone();
    }

    fn non_empty(value: Option<&Value>) -> Option<&str> {
        value.and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    for field in ["post", "roadmap", "output", "outputText"] {
        if let Some(text) = non_empty(payload.get(field)) {
            return text.to_string();
        }
    }

    let choice = payload
        .get("choices")
        .and_then(|c| c.get(0))
        .filter(|c| !c.is_null());
    if let Some(choice) = choice {
        let text = non_empty(choice.get("text"))
            .or_else(|| non_empty(choice.pointer("/message/content")))
            .unwrap_or_default();
        return text.to_string();
    }

    payload.to_string()
}
