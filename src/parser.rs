//! Graph input: a line-based text format and a JSON document.
//!
//! Text format, one statement per line, `#` starts a comment:
//!
//! ```text
//! block 0x401000 160x60 "entry"
//! 0x401000 -> 0x401020 : conditional
//! ```
//!
//! `block` lines are optional; edges create missing blocks with the default
//! size. A document whose first non-blank character is `{` is read as JSON.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{LayoutError, Result};
use crate::graph::{BlockAddr, EdgeKind, FlowGraph};

// ─── Patterns ────────────────────────────────────────────────────────────────

const ADDR: &str = r"0[xX][0-9a-fA-F]+|\d+";

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"^block\s+(?P<addr>{ADDR})(?:\s+(?P<w>\d+(?:\.\d+)?)x(?P<h>\d+(?:\.\d+)?))?(?:\s+"(?P<label>[^"]*)")?$"#
    ))
    .expect("block pattern is valid")
});

static EDGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<from>{ADDR})\s*->\s*(?P<to>{ADDR})(?:\s*:\s*(?P<kind>[A-Za-z]+))?$"
    ))
    .expect("edge pattern is valid")
});

// ─── Entry points ────────────────────────────────────────────────────────────

/// Parse either format, picking JSON when the document starts with `{`.
pub fn parse(src: &str) -> Result<FlowGraph> {
    if src.trim_start().starts_with('{') {
        parse_json(src)
    } else {
        parse_text(src)
    }
}

pub fn parse_text(src: &str) -> Result<FlowGraph> {
    let mut graph = FlowGraph::new();
    for (i, raw) in src.lines().enumerate() {
        let line_no = i + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = BLOCK_RE.captures(line) {
            let addr = parse_addr(&caps["addr"], line_no)?;
            let size = match (caps.name("w"), caps.name("h")) {
                (Some(w), Some(h)) => Some((
                    parse_size(w.as_str(), line_no)?,
                    parse_size(h.as_str(), line_no)?,
                )),
                _ => None,
            };
            let label = caps.name("label").map(|m| m.as_str());
            graph.add_block(addr, label, size);
        } else if let Some(caps) = EDGE_RE.captures(line) {
            let from = parse_addr(&caps["from"], line_no)?;
            let to = parse_addr(&caps["to"], line_no)?;
            let kind = match caps.name("kind") {
                Some(k) => k
                    .as_str()
                    .parse::<EdgeKind>()
                    .map_err(|e| LayoutError::parse(line_no, e))?,
                None => EdgeKind::default(),
            };
            graph.add_edge(from, to, kind);
        } else {
            return Err(LayoutError::parse(
                line_no,
                format!("expected `block <addr> [WxH] [\"label\"]` or `<addr> -> <addr>`, got '{line}'"),
            ));
        }
    }
    Ok(graph)
}

fn strip_comment(line: &str) -> &str {
    // A '#' inside a quoted label is kept.
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_addr(s: &str, line: usize) -> Result<BlockAddr> {
    s.parse::<BlockAddr>().map_err(|e| LayoutError::parse(line, e))
}

fn parse_size(s: &str, line: usize) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|e| LayoutError::parse(line, format!("invalid size '{s}': {e}")))
}

// ─── JSON ────────────────────────────────────────────────────────────────────

/// Addresses may be JSON numbers or strings (`"0x401000"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AddrRepr {
    Num(u64),
    Text(String),
}

impl AddrRepr {
    fn resolve(&self) -> Result<BlockAddr> {
        match self {
            Self::Num(n) => Ok(BlockAddr(*n)),
            Self::Text(s) => s.parse::<BlockAddr>().map_err(LayoutError::InvalidAddress),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonBlock {
    addr: AddrRepr,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct JsonEdge {
    from: AddrRepr,
    to: AddrRepr,
    #[serde(default)]
    kind: EdgeKind,
}

#[derive(Debug, Deserialize)]
struct JsonGraph {
    #[serde(default)]
    blocks: Vec<JsonBlock>,
    #[serde(default)]
    edges: Vec<JsonEdge>,
}

pub fn parse_json(src: &str) -> Result<FlowGraph> {
    let doc: JsonGraph = serde_json::from_str(src)?;
    let mut graph = FlowGraph::new();
    for block in &doc.blocks {
        let size = match (block.width, block.height) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        };
        graph.add_block(block.addr.resolve()?, block.label.as_deref(), size);
    }
    for edge in &doc.edges {
        graph.add_edge(edge.from.resolve()?, edge.to.resolve()?, edge.kind);
    }
    Ok(graph)
}

#[cfg(test)]
#[path = "../tests/rust/test_parser.rs"]
mod tests;
