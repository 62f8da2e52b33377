use super::TreeNode;

/// Id of the synthetic root holding test cases outside any folder.
pub const NO_FOLDER_ID: i64 = 0;
pub const NO_FOLDER_NAME: &str = "(No Folder)";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

fn connector(is_last: bool) -> &'static str {
    if is_last {
        LAST_BRANCH
    } else {
        BRANCH
    }
}

/// Render a forest as an indented box-drawing tree, one line per entry.
///
/// Roots print bare as `name/ (id)`. Under every folder its test cases come
/// first, then `...` when more exist, then its subfolders.
pub fn render_text(forest: &[TreeNode]) -> String {
    let mut lines = Vec::new();
    for root in forest {
        lines.push(format!("{}/ ({})", root.name, root.id));
        render_contents(root, "", &mut lines);
    }
    lines.join("\n")
}

fn render_contents(node: &TreeNode, prefix: &str, lines: &mut Vec<String>) {
    let total = node.children.len() + node.test_cases.len() + usize::from(node.has_more_test_cases);
    let mut position = 0;

    for tc in &node.test_cases {
        position += 1;
        lines.push(format!(
            "{}{}{}: {}",
            prefix,
            connector(position == total),
            tc.key,
            tc.name
        ));
    }
    if node.has_more_test_cases {
        position += 1;
        lines.push(format!("{}{}...", prefix, connector(position == total)));
    }

    for (i, child) in node.children.iter().enumerate() {
        let is_last = i + 1 == node.children.len();
        lines.push(format!(
            "{}{}{}/ ({})",
            prefix,
            connector(is_last),
            child.name,
            child.id
        ));
        let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
        render_contents(child, &child_prefix, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::super::TestCaseRef;
    use super::*;

    fn tc(key: &str, name: &str) -> TestCaseRef {
        TestCaseRef {
            key: key.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn two_children_use_branch_then_last_branch() {
        let mut root = TreeNode::new(1, "Root");
        root.children.push(TreeNode::new(2, "A"));
        root.children.push(TreeNode::new(3, "B"));
        assert_eq!(render_text(&[root]), "Root/ (1)\n├── A/ (2)\n└── B/ (3)");
    }

    #[test]
    fn test_cases_precede_children_and_ellipsis_marks_more() {
        let mut child = TreeNode::new(2, "Auth");
        child.test_cases.push(tc("P-T2", "Logout"));
        let mut root = TreeNode::new(1, "Root");
        root.test_cases.push(tc("P-T1", "Login"));
        root.has_more_test_cases = true;
        root.children.push(child);

        let expected = [
            "Root/ (1)",
            "├── P-T1: Login",
            "├── ...",
            "└── Auth/ (2)",
            "    └── P-T2: Logout",
        ]
        .join("\n");
        assert_eq!(render_text(&[root]), expected);
    }

    #[test]
    fn nested_prefix_carries_pipe_for_non_last_parent() {
        let mut a = TreeNode::new(2, "A");
        a.children.push(TreeNode::new(4, "A1"));
        a.test_cases.push(tc("P-T1", "One"));
        let mut root = TreeNode::new(1, "Root");
        root.children.push(a);
        root.children.push(TreeNode::new(3, "B"));

        let expected = [
            "Root/ (1)",
            "├── A/ (2)",
            "│   ├── P-T1: One",
            "│   └── A1/ (4)",
            "└── B/ (3)",
        ]
        .join("\n");
        assert_eq!(render_text(&[root]), expected);
    }

    #[test]
    fn several_roots_print_without_connectors() {
        let mut bucket = TreeNode::new(NO_FOLDER_ID, NO_FOLDER_NAME);
        bucket.test_cases.push(tc("P-T9", "Loose"));
        let text = render_text(&[TreeNode::new(1, "Root"), bucket]);
        assert_eq!(text, "Root/ (1)\n(No Folder)/ (0)\n└── P-T9: Loose");
    }
}
