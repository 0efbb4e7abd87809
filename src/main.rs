use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use roadmap::store::{self, CheckStore};
use roadmap::{Config, Error, FileStore, Node, TemplateKind};

#[derive(Parser)]
#[command(name = "roadmap")]
#[command(about = "Render generated roadmaps as persistent checklists")]
struct Cli {
    /// Config file
    #[arg(short, long, global = true, default_value = "roadmap.toml")]
    config: PathBuf,

    /// Checkbox state file (overrides the config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a generated roadmap as an HTML checklist
    Render {
        /// Generated text (Markdown, or a provider JSON payload with --json)
        input: PathBuf,

        /// Topic the roadmap was generated for
        #[arg(short, long)]
        topic: String,

        /// Treat the input as a JSON provider payload
        #[arg(long)]
        json: bool,

        /// Output HTML file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check or uncheck a task, as a click on its checkbox would
    Toggle {
        input: PathBuf,

        #[arg(short, long)]
        topic: String,

        /// Task text as it appears in the roadmap
        label: String,

        /// Uncheck instead of check
        #[arg(long)]
        unchecked: bool,

        #[arg(long)]
        json: bool,
    },
    /// Split a plain-text response into its options
    Options {
        input: PathBuf,

        #[arg(long)]
        json: bool,

        /// Write HTML boxes instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Print the prompt that would be sent for a topic
    Prompt {
        #[arg(short, long)]
        topic: String,

        #[arg(long, value_enum)]
        template: Option<TemplateKind>,

        #[arg(long)]
        profession: Option<String>,
    },
    /// Print the parsed document
    Inspect {
        input: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    roadmap::logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> roadmap::Result<()> {
    let config = Config::load(&cli.config);
    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path());

    match cli.command {
        Command::Render {
            input,
            topic,
            json,
            output,
        } => {
            let text = read_generated(&input, json)?;
            let namespace = topic_namespace(&topic)?;
            let store = FileStore::open(&store_path)?;
            let html = roadmap::markdown_to_html_with_config(&text, &namespace, &store, &config);

            match output {
                Some(path) => {
                    fs::write(&path, html)?;
                    println!("Created {}", path.display());
                }
                None => print!("{}", html),
            }
        }
        Command::Toggle {
            input,
            topic,
            label,
            unchecked,
            json,
        } => {
            let text = read_generated(&input, json)?;
            let namespace = topic_namespace(&topic)?;
            let mut store = FileStore::open(&store_path)?;
            let tree = roadmap::render(&text, &namespace, &store);
            let checkbox = tree
                .find_checkbox(label.trim())
                .ok_or_else(|| Error::UnknownTask(label.clone()))?;

            store.set(&checkbox.key, !unchecked)?;
            tracing::info!("{} = {} in {}", checkbox.key, !unchecked, store.path().display());
            println!(
                "{} {}",
                if unchecked { "Unchecked" } else { "Checked" },
                checkbox.label
            );
        }
        Command::Options { input, json, html } => {
            let text = read_generated(&input, json)?;
            let options = roadmap::split_options(&text);
            if options.is_empty() {
                println!("{}", roadmap::NO_OPTIONS_MESSAGE);
            } else if html {
                print!("{}", roadmap::options_to_html(&options, &config.html));
            } else {
                for (i, option) in options.iter().enumerate() {
                    println!("--- OPTION {} ---\n{}\n", i + 1, option);
                }
            }
        }
        Command::Prompt {
            topic,
            template,
            profession,
        } => {
            let topic = topic.trim();
            if topic.is_empty() {
                return Err(Error::EmptyTopic);
            }
            let kind = template.unwrap_or(config.prompt.template);
            let profession = profession.unwrap_or_else(|| config.prompt.profession.clone());
            println!("{}", kind.with_profession(&profession).build(topic));
        }
        Command::Inspect { input, json } => {
            let text = read_generated(&input, json)?;
            for node in roadmap::parse(&text) {
                println!("{}", describe(&node));
            }
        }
    }

    Ok(())
}

/// Read generated text, unwrapping a provider payload when `json` is set.
fn read_generated(path: &Path, json: bool) -> roadmap::Result<String> {
    let content = fs::read_to_string(path)?;
    if !json {
        return Ok(content);
    }
    let payload: serde_json::Value = serde_json::from_str(&content)?;
    Ok(roadmap::extract_text(&payload))
}

fn topic_namespace(topic: &str) -> roadmap::Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(Error::EmptyTopic);
    }
    Ok(store::namespace(topic))
}

fn describe(node: &Node) -> String {
    match node {
        Node::Heading { level, text } => format!("H{} {}", level, text),
        Node::Paragraph { text } => format!("P  {}", text),
        Node::Bullet { text } => format!("-  {}", text),
        Node::Task {
            depth,
            checked,
            content,
        } => format!(
            "{}[{}] {}",
            "  ".repeat(*depth),
            if *checked { "x" } else { " " },
            content
        ),
    }
}
