//! Indented, connector-drawn rendering of call trees.

use console::Style;

use crate::graph::types::{namespace_prefix, CallTreeNode, NodeKind};

const EMPTY_TREE: &str = "No call tree available\n";

/// What a piece of output text is, for colouring.
#[derive(Debug, Clone, Copy)]
enum Role {
    Heading,
    Rule,
    EntryLabel,
    RootTitle,
    Title,
    ExternalTitle,
    OtherTitle,
    Connector,
    Guide,
    InternalTag,
    ExternalTag,
    Location,
    Recursive,
    ParamName,
    ParamType,
}

impl Role {
    fn style(self) -> Style {
        let base = Style::new().force_styling(true);
        match self {
            Role::Heading => base.cyan().bold(),
            Role::Rule => base.cyan(),
            Role::EntryLabel => base.yellow().bold(),
            Role::RootTitle | Role::InternalTag => base.green(),
            Role::Title => base.cyan().bright(),
            Role::ExternalTitle | Role::ExternalTag | Role::Guide | Role::Location => {
                base.black().bright()
            }
            Role::OtherTitle | Role::ParamName => base.white(),
            Role::Connector => base.blue().bright(),
            Role::Recursive => base.yellow(),
            Role::ParamType => base.magenta(),
        }
    }
}

/// Renders call trees as text, optionally coloured and with expanded signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    pub expand_signature: bool,
    pub color: bool,
}

impl TextRenderer {
    pub fn new(expand_signature: bool, color: bool) -> Self {
        Self {
            expand_signature,
            color,
        }
    }

    /// No colour, one line per node. Used for the stored visualization.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn render(&self, roots: &[CallTreeNode]) -> String {
        if roots.is_empty() {
            return EMPTY_TREE.to_string();
        }

        let mut out = String::new();
        self.push(&mut out, Role::Heading, "Call Tree:");
        out.push('\n');
        self.push(&mut out, Role::Rule, "==========");
        out.push_str("\n\n");

        for (i, root) in roots.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.push(&mut out, Role::EntryLabel, &format!("Entry Point {}:", i + 1));
            out.push(' ');
            self.write_header(&mut out, root, true);
            if self.expands(root) {
                self.write_details(&mut out, root, "  ");
            }
            self.write_children(&mut out, root, "  ");
        }
        out
    }

    fn write_children(&self, out: &mut String, node: &CallTreeNode, prefix: &str) {
        let last = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate() {
            self.write_node(out, child, prefix, i == last);
        }
    }

    fn write_node(&self, out: &mut String, node: &CallTreeNode, prefix: &str, is_last: bool) {
        self.push(out, Role::Guide, prefix);
        self.push(out, Role::Connector, if is_last { "└─" } else { "├─" });
        out.push(' ');
        self.write_header(out, node, false);

        let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
        if self.expands(node) {
            let guide = if node.children.is_empty() { "   " } else { "│  " };
            self.write_details(out, node, &format!("{}{}", child_prefix, guide));
        }
        self.write_children(out, node, &child_prefix);
    }

    /// Title, tag, location and recursion marker, ending the line.
    fn write_header(&self, out: &mut String, node: &CallTreeNode, is_root: bool) {
        let title = if self.expands(node) {
            short_title(node)
        } else {
            node.title.clone()
        };
        let role = match node.kind {
            _ if is_root => Role::RootTitle,
            NodeKind::External => Role::ExternalTitle,
            NodeKind::Function | NodeKind::Method => Role::Title,
            NodeKind::Entrypoint | NodeKind::Initializer => Role::OtherTitle,
        };
        self.push(out, role, &title);

        out.push(' ');
        if node.is_external() {
            self.push(out, Role::ExternalTag, "[external]");
        } else {
            self.push(out, Role::InternalTag, "[internal]");
        }

        if let Some(location) = location(node) {
            out.push(' ');
            self.push(out, Role::Location, &format!("({})", location));
        }
        if node.is_recursive {
            out.push(' ');
            self.push(out, Role::Recursive, "[recursive]");
        }
        out.push('\n');
    }

    fn write_details(&self, out: &mut String, node: &CallTreeNode, indent: &str) {
        if !node.parameters.is_empty() {
            self.push(out, Role::Guide, indent);
            self.push(out, Role::Location, "Parameters:");
            out.push('\n');
            for param in &node.parameters {
                self.push(out, Role::Guide, indent);
                self.push(out, Role::Location, "  - ");
                if let Some(name) = &param.name {
                    self.push(out, Role::ParamName, &format!("{}: ", name));
                }
                self.push(out, Role::ParamType, &param.ty);
                out.push('\n');
            }
        }
        if !node.return_types.is_empty() {
            self.push(out, Role::Guide, indent);
            self.push(out, Role::Location, "Returns:");
            out.push('\n');
            for ty in &node.return_types {
                self.push(out, Role::Guide, indent);
                self.push(out, Role::Location, "  - ");
                self.push(out, Role::ParamType, ty);
                out.push('\n');
            }
        }
    }

    fn expands(&self, node: &CallTreeNode) -> bool {
        self.expand_signature && !node.is_external()
    }

    fn push(&self, out: &mut String, role: Role, text: &str) {
        if self.color && !text.is_empty() {
            out.push_str(&role.style().apply_to(text).to_string());
        } else {
            out.push_str(text);
        }
    }
}

/// `func (Recv) name`, the header used when the signature is expanded below it.
fn short_title(node: &CallTreeNode) -> String {
    match &node.receiver {
        Some(receiver) => format!("func ({}) {}", receiver, node.name),
        None => format!("func {}", node.name),
    }
}

fn location(node: &CallTreeNode) -> Option<String> {
    if node.is_external() {
        return node
            .namespace_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| Some(node.namespace.as_str()).filter(|ns| !ns.is_empty()))
            .or_else(|| namespace_prefix(&node.name))
            .map(str::to_string);
    }
    if node.file.is_empty() {
        None
    } else {
        Some(format!("{}:{}", node.file, node.line))
    }
}
