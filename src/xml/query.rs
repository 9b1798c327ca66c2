use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::xml::node::ReportNode;

/// Node lookup over an already-parsed report tree.
///
/// Expressions are absolute, `/`-separated element steps. A step is a name
/// or `*`, optionally followed by `[@attr]` / `[@attr="value"]` predicates.
/// An empty step (`//`) matches at any depth below the previous one.
pub trait ReportQuery: Send + Sync {
    fn query(&self, expr: &str) -> Vec<&ReportNode>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Has(String),
    Equals(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    any_depth: bool,
    name: String,
    predicates: Vec<Predicate>,
}

impl Step {
    fn matches(&self, node: &ReportNode) -> bool {
        (self.name == "*" || self.name == node.name)
            && self.predicates.iter().all(|p| match p {
                Predicate::Has(attr) => node.has_attr(attr),
                Predicate::Equals(attr, value) => node.attr(attr) == Some(value.as_str()),
            })
    }
}

fn step_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^([\w.:*-]+)((?:\[@[\w.:-]+(?:="[^"]*")?\])*)$"#).expect("valid step regex")
    })
}

fn predicate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\[@([\w.:-]+)(?:="([^"]*)")?\]"#).expect("valid predicate regex"))
}

/// Split on `/` outside of `[...]` so attribute values may contain slashes.
fn split_steps(expr: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let (mut depth, mut in_quotes, mut start) = (0usize, false, 0usize);
    for (i, c) in expr.char_indices() {
        match c {
            '"' if depth > 0 => in_quotes = !in_quotes,
            '[' if !in_quotes => depth += 1,
            ']' if !in_quotes => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                parts.push(&expr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&expr[start..]);
    parts
}

fn parse(expr: &str) -> Option<Vec<Step>> {
    let mut tokens = split_steps(expr).into_iter();
    // Absolute paths only: the first token precedes the leading slash.
    if tokens.next() != Some("") {
        return None;
    }

    let mut steps = Vec::new();
    let mut any_depth = false;
    for token in tokens {
        if token.is_empty() {
            any_depth = true;
            continue;
        }
        let caps = step_re().captures(token)?;
        let predicates = predicate_re()
            .captures_iter(caps.get(2).map_or("", |m| m.as_str()))
            .map(|p| match p.get(2) {
                Some(value) => Predicate::Equals(p[1].to_string(), value.as_str().to_string()),
                None => Predicate::Has(p[1].to_string()),
            })
            .collect();
        steps.push(Step {
            any_depth,
            name: caps[1].to_string(),
            predicates,
        });
        any_depth = false;
    }

    if steps.is_empty() {
        None
    } else {
        Some(steps)
    }
}

fn collect_descendants<'a>(node: &'a ReportNode, out: &mut Vec<&'a ReportNode>) {
    for child in &node.children {
        out.push(child);
        collect_descendants(child, out);
    }
}

/// Evaluate `expr` against a document whose top element is `root`.
pub fn evaluate<'a>(root: &'a ReportNode, expr: &str) -> Vec<&'a ReportNode> {
    let Some(steps) = parse(expr) else {
        warn!("Invalid report query '{}'", expr);
        return Vec::new();
    };

    let mut current: Vec<&ReportNode> = Vec::new();
    for (idx, step) in steps.iter().enumerate() {
        let mut candidates: Vec<&ReportNode> = Vec::new();
        if idx == 0 {
            candidates.push(root);
            if step.any_depth {
                collect_descendants(root, &mut candidates);
            }
        } else {
            for node in current.iter().copied() {
                if step.any_depth {
                    collect_descendants(node, &mut candidates);
                } else {
                    candidates.extend(node.children.iter());
                }
            }
        }

        // Only descendant sets of nested nodes can overlap; plain child
        // steps over distinct parents never repeat a node.
        let mut seen: HashSet<*const ReportNode> = HashSet::new();
        current = candidates
            .into_iter()
            .filter(|node| step.matches(node))
            .filter(|node| !step.any_depth || seen.insert(*node as *const ReportNode))
            .collect();
        if current.is_empty() {
            break;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportNode {
        ReportNode::new("codebrowser")
            .with_child(
                ReportNode::new("checkstyle")
                    .with_child(ReportNode::new("file").with_attr("name", "/src/a.php"))
                    .with_child(ReportNode::new("file").with_attr("name", "/src/b.php"))
                    .with_child(ReportNode::new("file")),
            )
            .with_child(
                ReportNode::new("coverage").with_child(
                    ReportNode::new("project").with_child(
                        ReportNode::new("package")
                            .with_child(ReportNode::new("file").with_attr("name", "/src/c.php")),
                    ),
                ),
            )
    }

    fn names<'a>(nodes: &[&'a ReportNode]) -> Vec<&'a str> {
        nodes.iter().filter_map(|n| n.attr("name")).collect()
    }

    #[test]
    fn attribute_presence_predicate() {
        let root = sample();
        let hits = evaluate(&root, "/*/checkstyle/file[@name]");
        assert_eq!(names(&hits), vec!["/src/a.php", "/src/b.php"]);
    }

    #[test]
    fn attribute_value_with_slashes() {
        let root = sample();
        let hits = evaluate(&root, r#"/*/checkstyle/file[@name="/src/b.php"]"#);
        assert_eq!(names(&hits), vec!["/src/b.php"]);
    }

    #[test]
    fn any_depth_step() {
        let root = sample();
        let hits = evaluate(&root, "/*/coverage//file[@name]");
        assert_eq!(names(&hits), vec!["/src/c.php"]);
    }

    #[test]
    fn nested_any_depth_matches_are_returned_once() {
        let root = ReportNode::new("codebrowser").with_child(
            ReportNode::new("project").with_child(
                ReportNode::new("package")
                    .with_child(ReportNode::new("package").with_child(ReportNode::new("file").with_attr("name", "x.php"))),
            ),
        );
        let hits = evaluate(&root, "/*/project//package//file");
        assert_eq!(names(&hits), vec!["x.php"]);
    }

    #[test]
    fn wrong_root_or_bad_syntax_yields_nothing() {
        let root = sample();
        assert!(evaluate(&root, "/other/checkstyle/file").is_empty());
        assert!(evaluate(&root, "checkstyle/file").is_empty());
        assert!(evaluate(&root, "/*/file[name]").is_empty());
    }
}
