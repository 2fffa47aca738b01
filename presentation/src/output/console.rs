//! Console output formatter for conversations and topic graphs

use colored::{ColoredString, Colorize};
use socratic_application::QueryError;
use socratic_domain::util::preview;
use socratic_domain::{ConversationLog, GraphSnapshot, Role, Turn};

const LABEL_PREVIEW: usize = 60;

/// Points per unit of layout space in DOT output
const DOT_SCALE: f32 = 500.0;

/// Rendering of a topic graph snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// Human-readable listing of topics and links
    Text,
    /// Pretty-printed JSON of the snapshot
    Json,
    /// Graphviz DOT with fixed node positions
    Dot,
}

impl GraphFormat {
    /// Parse the argument of the `/graph` command.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.trim() {
            "" | "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            "dot" => Some(Self::Dot),
            _ => None,
        }
    }
}

/// Formats conversation state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Tag shown in front of every transcript line
    pub fn role_tag(role: Role) -> ColoredString {
        let tag = format!("[{}]", role);
        match role {
            Role::User => tag.cyan().bold(),
            Role::Assistant => tag.green().bold(),
        }
    }

    /// Format a single turn as one transcript entry
    pub fn format_turn(turn: &Turn, unanswered: bool) -> String {
        let mut line = format!("{} {}", Self::role_tag(turn.role()), turn.content());
        if unanswered {
            line.push_str(&format!(" {}", "(no response)".dimmed()));
        }
        line
    }

    /// Format the whole conversation, oldest first
    pub fn format_transcript(log: &ConversationLog) -> String {
        if log.is_empty() {
            return format!("{}\n", "No messages yet.".dimmed());
        }

        let mut output = Self::section_header("Conversation");
        for (index, turn) in log.all().iter().enumerate() {
            output.push_str(&Self::format_turn(turn, log.is_unanswered(index)));
            output.push('\n');
        }
        output
    }

    /// Format a graph snapshot in the requested rendering
    pub fn format_graph(snapshot: &GraphSnapshot, format: GraphFormat) -> String {
        match format {
            GraphFormat::Text => Self::format_graph_text(snapshot),
            GraphFormat::Json => Self::format_graph_json(snapshot),
            GraphFormat::Dot => Self::format_graph_dot(snapshot),
        }
    }

    /// Plain listing of topics with their positions, then links
    pub fn format_graph_text(snapshot: &GraphSnapshot) -> String {
        if snapshot.is_empty() {
            return format!("{}\n", "No topics yet.".dimmed());
        }

        let mut output = Self::section_header(&format!("Topics ({})", snapshot.nodes().len()));
        for (index, node) in snapshot.nodes().iter().enumerate() {
            let pos = node.position();
            output.push_str(&format!(
                "  {} ({:.2}, {:.2}) {}\n",
                format!("#{:<3}", index).yellow(),
                pos.x,
                pos.y,
                preview(node.label(), LABEL_PREVIEW)
            ));
        }

        output.push_str(&Self::section_header(&format!(
            "Links ({})",
            snapshot.edges().len()
        )));
        for edge in snapshot.edges() {
            let (a, b) = edge.endpoints();
            output.push_str(&format!(
                "  {} {} {}\n",
                preview(a, LABEL_PREVIEW),
                "--".dimmed(),
                preview(b, LABEL_PREVIEW)
            ));
        }
        output
    }

    /// Format as JSON
    pub fn format_graph_json(snapshot: &GraphSnapshot) -> String {
        serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    /// Graphviz DOT; `neato -n` keeps the computed positions, scaled to
    /// a canvas of `DOT_SCALE` points.
    pub fn format_graph_dot(snapshot: &GraphSnapshot) -> String {
        let mut output = String::from("graph topics {\n  node [shape=box];\n");

        for (index, node) in snapshot.nodes().iter().enumerate() {
            let pos = node.position();
            output.push_str(&format!(
                "  n{} [label=\"{}\", pos=\"{:.3},{:.3}!\"];\n",
                index,
                Self::escape_dot(&preview(node.label(), LABEL_PREVIEW)),
                pos.x * DOT_SCALE,
                pos.y * DOT_SCALE
            ));
        }

        let index_of = |label: &str| snapshot.nodes().iter().position(|n| n.label() == label);
        for edge in snapshot.edges() {
            let (a, b) = edge.endpoints();
            if let (Some(a), Some(b)) = (index_of(a), index_of(b)) {
                output.push_str(&format!("  n{} -- n{};\n", a, b));
            }
        }

        output.push_str("}\n");
        output
    }

    /// Format a failed query for the user
    pub fn format_error(error: &QueryError) -> String {
        format!("{} {}", "Error:".red().bold(), error.to_string().red())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn escape_dot(label: &str) -> String {
        label.replace('\\', "\\\\").replace('"', "\\\"")
    }
}
