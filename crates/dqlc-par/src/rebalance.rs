use crate::tree::TreeNode;

/// Restore standard precedence/associativity to a left-skewed tree.
///
/// Children are fixed up before their parent (post-order): by the time a
/// node's own rotation condition is checked, its first child has already
/// been rebalanced, so a violation freshly exposed by that rebalancing
/// (e.g. `2+3*4*5`, where fixing the inner `*` chain reveals that the `+`
/// must float above both multiplications) is still caught.
pub fn rebalance(node: TreeNode) -> TreeNode {
    let mut node = node;
    node.children = node.children.into_iter().map(rebalance).collect();

    while node.children.len() >= 2 && node.children[0].precedence > node.precedence && !node.children[0].children.is_empty() {
        node = rotate_left(node);
    }
    node
}

/// `N(C, ...rest)` with `C(a, ..., b)` becomes `C(a, ..., N(b, ...rest))`:
/// `C` becomes the new root, its last child (`b`) is displaced into `N`'s
/// first-child slot, and `N` itself becomes `C`'s new last child.
fn rotate_left(mut n: TreeNode) -> TreeNode {
    let mut c = n.children.remove(0);
    let displaced = c.children.pop().expect("rotation requires a populated first child");
    n.children.insert(0, displaced);
    c.children.push(n);
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use dqlc_lex::{lex, TokenKind};

    fn op(tree: &TreeNode) -> &str {
        tree.canonical_symbol().unwrap_or("<leaf>")
    }

    fn int_value(tree: &TreeNode) -> i64 {
        match &tree.token.kind {
            TokenKind::Value(dqlc_lex::LiteralValue::Int(v)) => *v,
            other => panic!("expected int leaf, got {other:?}"),
        }
    }

    fn rebalanced(clause: &str) -> TreeNode {
        let tokens = lex(clause).unwrap();
        rebalance(parse(&tokens).unwrap())
    }

    #[test]
    fn scenario_3_precedence_add_then_mul() {
        let tree = rebalanced("2 + 3 * 4");
        assert_eq!(op(&tree), "+");
        assert_eq!(int_value(&tree.children[0]), 2);
        assert_eq!(op(&tree.children[1]), "*");
        assert_eq!(int_value(&tree.children[1].children[0]), 3);
        assert_eq!(int_value(&tree.children[1].children[1]), 4);
    }

    #[test]
    fn scenario_3_precedence_mul_then_add() {
        let tree = rebalanced("2 * 3 + 4");
        assert_eq!(op(&tree), "+");
        assert_eq!(op(&tree.children[0]), "*");
        assert_eq!(int_value(&tree.children[1]), 4);
    }

    #[test]
    fn scenario_3_power_is_left_associative_on_equal_precedence() {
        let tree = rebalanced("1 ^ 2 ^ 3");
        assert_eq!(op(&tree), "^");
        assert_eq!(op(&tree.children[0]), "^");
        assert_eq!(int_value(&tree.children[1]), 3);
    }

    #[test]
    fn cascading_rotation_pulls_addition_above_a_multiplication_chain() {
        let tree = rebalanced("1 + 2 + 3 * 4 + 5");
        // ((1+2) + (3*4)) + 5
        assert_eq!(op(&tree), "+");
        assert_eq!(int_value(&tree.children[1]), 5);
        let middle = &tree.children[0];
        assert_eq!(op(middle), "+");
        assert_eq!(op(&middle.children[1]), "*");
    }

    #[test]
    fn parenthesization_blocks_rotation_across_the_boundary() {
        let tree = rebalanced("(2 + 3) * 4");
        assert_eq!(op(&tree), "*");
        assert_eq!(op(&tree.children[0]), "(");
        assert_eq!(op(&tree.children[0].children[0]), "+");
    }
}
