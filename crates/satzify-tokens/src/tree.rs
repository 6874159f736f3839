//! Dependency structure of a parsed sentence.
//!
//! The annotation pipeline never looks at it; it is passed through from the
//! parser so the host can show it next to the highlighted text.

use std::fmt;

use crate::Token;

/// Tokens arranged by their `head` links.
///
/// A token is a root when it has no head, when it is its own head (the
/// spaCy convention) or when its head index points outside the document.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    labels: Vec<String>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl DependencyTree {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut children = vec![Vec::new(); tokens.len()];
        let mut roots = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            match token.head {
                Some(head) if head != index && head < tokens.len() => children[head].push(index),
                _ => roots.push(index),
            }
        }

        let labels = tokens
            .iter()
            .map(|t| {
                if t.dep.is_empty() {
                    t.text.clone()
                } else {
                    format!("{} ({})", t.text, t.dep)
                }
            })
            .collect();

        Self {
            labels,
            children,
            roots,
        }
    }

    /// Indices of root tokens, in document order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Dependents of a token, in document order.
    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        index: usize,
        depth: usize,
        visited: &mut [bool],
    ) -> fmt::Result {
        // Head links from a broken analysis can form cycles
        if visited[index] {
            return Ok(());
        }
        visited[index] = true;
        writeln!(f, "{}{}", "  ".repeat(depth), self.labels[index])?;
        for &child in &self.children[index] {
            self.write_node(f, child, depth + 1, visited)?;
        }
        Ok(())
    }
}

impl fmt::Display for DependencyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visited = vec![false; self.labels.len()];
        for &root in &self.roots {
            self.write_node(f, root, 0, &mut visited)?;
        }
        Ok(())
    }
}
