//! Explain output for plan trees
//!
//! Deterministic, human-readable rendering of an operator tree. Each node is
//! one line, children indented two spaces below their parent.

use std::fmt;

/// One operator in an explained plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainNode {
    /// Operator name (SeqScan, IndexScan, Sort, Limit)
    pub operator: &'static str,
    /// Operator parameters in declaration order
    pub details: Vec<(&'static str, String)>,
    /// Inner plans
    pub children: Vec<ExplainNode>,
}

impl ExplainNode {
    pub fn new(operator: &'static str) -> Self {
        Self {
            operator,
            details: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a parameter
    pub fn detail(mut self, name: &'static str, value: impl ToString) -> Self {
        self.details.push((name, value.to_string()));
        self
    }

    /// Adds a parameter when present
    pub fn detail_opt(self, name: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.detail(name, v),
            None => self,
        }
    }

    /// Adds an inner plan
    pub fn child(mut self, child: ExplainNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of operators in this tree
    pub fn operator_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.operator_count()).sum::<usize>()
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.operator, indent = depth * 2)?;
        if !self.details.is_empty() {
            let details: Vec<String> = self
                .details
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            write!(f, " ({})", details.join(", "))?;
        }
        writeln!(f)?;

        for child in &self.children {
            child.render(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ExplainNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tree() {
        let plan = ExplainNode::new("Limit").detail("limit", 10).child(
            ExplainNode::new("IndexScan")
                .detail("index", "items_created_at_idx")
                .detail("direction", "backward"),
        );

        assert_eq!(
            plan.to_string(),
            "Limit (limit=10)\n  IndexScan (index=items_created_at_idx, direction=backward)\n"
        );
        assert_eq!(plan.operator_count(), 2);
    }

    #[test]
    fn test_detail_opt_skips_none() {
        let node = ExplainNode::new("SeqScan").detail_opt("start", None::<String>);
        assert_eq!(node.to_string(), "SeqScan\n");
    }
}
