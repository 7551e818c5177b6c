//! Operator-precedence parser for filter clauses: builds a left-skewed
//! `TreeNode` graph in a single forward pass, then rebalances it so that
//! precedence is monotone along left spines.

mod cursor;
mod parser;
mod rebalance;
mod tree;

pub use parser::parse;
pub use rebalance::rebalance;
pub use tree::{precedence, TreeNode};

#[cfg(test)]
mod tests {
    use super::*;
    use dqlc_lex::{lex, LiteralValue, TokenKind};

    fn compile(clause: &str) -> TreeNode {
        let tokens = lex(clause).unwrap();
        rebalance(parse(&tokens).unwrap())
    }

    fn int_value(tree: &TreeNode) -> i64 {
        match &tree.token.kind {
            TokenKind::Value(LiteralValue::Int(v)) => *v,
            other => panic!("expected int leaf, got {other:?}"),
        }
    }

    #[test]
    fn scenario_4_in_nests_right_with_a_false_seed() {
        let tree = compile("3 IN (1, 2, 3, 4)");
        assert_eq!(tree.canonical_symbol(), Some("IN"));
        assert_eq!(tree.children.len(), 5);
        assert_eq!(int_value(&tree.children[0]), 3);
        for (child, expected) in tree.children[1..].iter().zip([1, 2, 3, 4]) {
            assert_eq!(int_value(child), expected);
        }
    }

    #[test]
    fn scenario_5_between_is_ternary() {
        let tree = compile("3 BETWEEN 2 AND 4");
        assert_eq!(tree.canonical_symbol(), Some("BETWEEN"));
        assert_eq!(tree.children.len(), 3);
        assert_eq!(int_value(&tree.children[0]), 3);
        assert_eq!(int_value(&tree.children[1]), 2);
        assert_eq!(int_value(&tree.children[2]), 4);
    }

    #[test]
    fn between_lower_bound_accepts_a_full_subexpression() {
        let tree = compile("3 BETWEEN 1 + 1 AND 4");
        assert_eq!(tree.canonical_symbol(), Some("BETWEEN"));
        assert_eq!(tree.children[1].canonical_symbol(), Some("+"));
    }

    #[test]
    fn scenario_7_indexing_attaches_as_the_leafs_single_child() {
        let tree = compile("Name[2]");
        assert!(tree.is_field);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(int_value(&tree.children[0]), 2);
    }

    #[test]
    fn function_call_children_are_argument_subtrees() {
        let tree = compile("MAX(1, 2)");
        assert!(!tree.is_field);
        assert_eq!(tree.children.len(), 2);
        assert_eq!(int_value(&tree.children[0]), 1);
        assert_eq!(int_value(&tree.children[1]), 2);
    }

    #[test]
    fn nullary_call_has_no_children() {
        let tree = compile("NOW()");
        assert_eq!(tree.children.len(), 0);
    }

    #[test]
    fn prefix_unary_minus_uses_a_synthetic_marker() {
        let tree = compile("-1");
        assert_eq!(tree.canonical_symbol(), Some("[-]"));
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn not_is_prefix_unary() {
        let tree = compile("NOT Active");
        assert_eq!(tree.canonical_symbol(), Some("NOT"));
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn is_not_parses_as_is_of_a_not_expression() {
        let tree = compile("Active IS NOT Flag");
        assert_eq!(tree.canonical_symbol(), Some("IS"));
        assert_eq!(tree.children[1].canonical_symbol(), Some("NOT"));
    }

    #[test]
    fn adjacent_operand_tokens_are_a_syntax_error() {
        let tokens = lex("1 2").unwrap();
        let err = parse(&tokens).unwrap_err();
        assert_eq!(err.position(), 3);
    }

    #[test]
    fn parenthesized_grouping_wraps_its_contents_in_a_scope_node() {
        let tree = compile("(Id)");
        assert_eq!(tree.canonical_symbol(), Some("("));
        assert_eq!(tree.children.len(), 1);
        assert!(tree.children[0].is_field);
    }
}
