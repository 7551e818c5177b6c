use dqlc_lex::Token;

/// Precedence numbers: lower binds tighter.
pub mod precedence {
    pub const LEAF: u8 = 0;
    pub const UNARY: u8 = 1;
    pub const POWER: u8 = 2;
    pub const MUL_DIV_MOD: u8 = 3;
    pub const ADD_SUB: u8 = 4;
    pub const COMPARISON: u8 = 5;
    pub const IS: u8 = 6;
    pub const AND: u8 = 7;
    pub const OR: u8 = 8;
}

/// A node in the parse tree: its originating token, precedence, whether it
/// is a record-field reference, and its ordered children.
///
/// Shape invariants:
/// - a leaf has zero children, or exactly one if indexed;
/// - a unary node has one child, a binary node two;
/// - `BETWEEN` has three (operand, lower, upper);
/// - `IN` has at least two (operand plus at least one choice);
/// - a call node has zero or more argument children;
/// - a parenthesized group is a `"("`-tokened node at `precedence::LEAF`
///   with exactly one child — the only purpose of that precedence is to
///   stop `rebalance` from rotating an operator out past the boundary the
///   parentheses drew.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub token: Token,
    pub precedence: u8,
    pub is_field: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(token: Token, is_field: bool) -> Self {
        TreeNode {
            token,
            precedence: precedence::LEAF,
            is_field,
            children: Vec::new(),
        }
    }

    pub fn with_children(token: Token, precedence: u8, children: Vec<TreeNode>) -> Self {
        TreeNode {
            token,
            precedence,
            is_field: false,
            children,
        }
    }

    pub fn canonical_symbol(&self) -> Option<&str> {
        self.token.canonical_symbol()
    }
}
