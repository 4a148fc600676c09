use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use tracing::warn;

use crate::model::TocLink;
use crate::util::write_text;

const HEADER_GUARD: &str = "#pragma once";

/// Redundant ancestor label that prefixes every free-format input section.
const STRIPPED_PREFIX: &str = "Free_Format_Input_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineStyle {
    pub uppercase: bool,
    pub suffix: String,
}

impl DefineStyle {
    /// Upper-cased names carrying `suffix`, the spelling the C++ sources use.
    pub fn constant(suffix: impl Into<String>) -> Self {
        Self {
            uppercase: true,
            suffix: suffix.into(),
        }
    }

    pub fn raw() -> Self {
        Self {
            uppercase: false,
            suffix: String::new(),
        }
    }

    pub fn constant_name(&self, name: &str) -> String {
        let name = name.strip_prefix(STRIPPED_PREFIX).unwrap_or(name);
        let mut rendered = if self.uppercase {
            name.to_uppercase()
        } else {
            name.to_string()
        };
        rendered.push_str(&self.suffix);
        rendered
    }
}

pub fn render(links: &[TocLink], style: &DefineStyle) -> String {
    let mut out = String::new();
    out.push_str(HEADER_GUARD);
    out.push_str("\n\n");

    for constant in colliding_constants(links, style) {
        warn!(constant = %constant, "constant name collides after rendering");
    }

    for link in links {
        let constant = style.constant_name(&link.name);
        out.push_str("#define ");
        out.push_str(&constant);
        out.push_str(" \"");
        out.push_str(&escape_c_string(&link.url));
        out.push_str("\"\n");
    }

    out
}

/// Rendered names that more than one link maps to, in first-collision order.
pub fn colliding_constants(links: &[TocLink], style: &DefineStyle) -> Vec<String> {
    let mut seen = HashSet::with_capacity(links.len());
    let mut collisions = Vec::new();
    for link in links {
        let constant = style.constant_name(&link.name);
        if !seen.insert(constant.clone()) && !collisions.contains(&constant) {
            collisions.push(constant);
        }
    }
    collisions
}

pub fn write(path: &Path, links: &[TocLink], style: &DefineStyle) -> Result<()> {
    write_text(path, &render(links, style))
}

fn escape_c_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
