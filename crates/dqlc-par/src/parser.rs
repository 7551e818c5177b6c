use dqlc_lex::{Token, TokenKind};
use dqlc_util::{DynamicQueryError, Result, Span};

use crate::cursor::TokenCursor;
use crate::tree::{precedence, TreeNode};

/// The stopping rule active for the current parse frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScopeContext {
    /// The top-level clause; never stops early.
    TopLevel,
    /// Inside `(...)`; stops at `)`.
    Scope,
    /// Inside a call or `IN` argument list; stops at `)` or `,`.
    Argument,
    /// Inside `[...]`; stops at `]`.
    Index,
    /// The lower bound of `BETWEEN ... AND ...`; stops at `AND`.
    Between,
}

impl ScopeContext {
    fn stops_at(self, symbol: &str) -> bool {
        match self {
            ScopeContext::TopLevel => false,
            ScopeContext::Scope => symbol == ")",
            ScopeContext::Argument => symbol == ")" || symbol == ",",
            ScopeContext::Index => symbol == "]",
            ScopeContext::Between => symbol == "AND",
        }
    }
}

/// Parse a full filter clause's token stream into a single tree rooted at
/// the top-level expression.
pub fn parse(tokens: &[Token]) -> Result<TreeNode> {
    let mut parser = Parser {
        cursor: TokenCursor::new(tokens),
    };
    let tree = parser.parse_subtree(ScopeContext::TopLevel)?;
    if let Some(extra) = parser.cursor.current() {
        return Err(DynamicQueryError::syntax(extra.span, extra.text.clone()));
    }
    Ok(tree)
}

struct Parser<'a> {
    cursor: TokenCursor<'a>,
}

impl<'a> Parser<'a> {
    /// Build a subtree: parse one atom, then repeatedly fold in operators
    /// until the scope context says to stop. This single forward pass
    /// deliberately produces a left-skewed tree; `crate::rebalance` fixes
    /// precedence afterwards.
    fn parse_subtree(&mut self, ctx: ScopeContext) -> Result<TreeNode> {
        let mut acc = self.parse_atom(ctx)?;
        loop {
            let Some(current) = self.cursor.current() else {
                break;
            };
            let Some(symbol) = current.canonical_symbol() else {
                // A non-Symbol token directly after a completed atom is an
                // adjacent-operand error, raised by parse_atom's own
                // adjacency check the moment it is attempted.
                return Err(self.adjacent_operand_error(current));
            };
            if ctx.stops_at(symbol) {
                break;
            }
            acc = self.parse_infix(acc, ctx)?;
        }
        Ok(acc)
    }

    /// Construct one node: a fresh atom, never combined with a
    /// pre-existing left operand.
    fn parse_atom(&mut self, ctx: ScopeContext) -> Result<TreeNode> {
        let token = match self.cursor.current() {
            Some(tok) => tok.clone(),
            None => return Err(self.eof_or_current_error()),
        };

        match &token.kind {
            TokenKind::Symbol(symbol) => self.parse_prefix_symbol(&token, symbol.as_str()),
            TokenKind::Named(_) => self.parse_named_or_value(ctx, token, true),
            TokenKind::Value(_) => self.parse_named_or_value(ctx, token, false),
        }
    }

    fn parse_prefix_symbol(&mut self, token: &Token, symbol: &str) -> Result<TreeNode> {
        match symbol {
            "(" => {
                self.cursor.advance();
                let inner = self.parse_subtree(ScopeContext::Scope)?;
                self.expect_symbol(")")?;
                // Wrapped at precedence::LEAF so `rebalance` can never pull
                // an operator out from inside the parentheses: the rotation
                // condition only fires when a first child's precedence
                // exceeds its parent's, and LEAF is already the lowest
                // precedence there is.
                Ok(TreeNode::with_children(token.clone(), precedence::LEAF, vec![inner]))
            }
            "+" | "-" => {
                self.cursor.advance();
                let marker = if symbol == "+" { "[+]" } else { "[-]" };
                let operand = self.parse_atom(ScopeContext::TopLevel)?;
                let marker_token = Token {
                    kind: TokenKind::Symbol(marker.to_string()),
                    text: token.text.clone(),
                    span: token.span,
                };
                Ok(TreeNode::with_children(marker_token, precedence::UNARY, vec![operand]))
            }
            "NOT" => {
                self.cursor.advance();
                let operand = self.parse_atom(ScopeContext::TopLevel)?;
                Ok(TreeNode::with_children(token.clone(), precedence::UNARY, vec![operand]))
            }
            _ => Err(DynamicQueryError::syntax(token.span, token.text.clone())),
        }
    }

    fn parse_named_or_value(&mut self, ctx: ScopeContext, token: Token, is_named: bool) -> Result<TreeNode> {
        if let Some(prev) = self.cursor.previous() {
            let prev_is_operand_boundary = prev.canonical_symbol() == Some(")") || prev.canonical_symbol() == Some("]");
            if prev.canonical_symbol().is_none() || prev_is_operand_boundary {
                return Err(self.adjacent_operand_error(&token));
            }
        }

        self.cursor.advance();

        if is_named && matches!(self.cursor.current().and_then(Token::canonical_symbol), Some("(")) {
            self.cursor.advance();
            let args = self.parse_argument_list(ctx)?;
            return Ok(TreeNode::with_children(token, precedence::LEAF, args));
        }

        let mut node = TreeNode::leaf(token, is_named);
        if matches!(self.cursor.current().and_then(Token::canonical_symbol), Some("[")) {
            self.cursor.advance();
            let index = self.parse_subtree(ScopeContext::Index)?;
            self.expect_symbol("]")?;
            node.children.push(index);
        }
        Ok(node)
    }

    fn parse_argument_list(&mut self, _ctx: ScopeContext) -> Result<Vec<TreeNode>> {
        let mut args = Vec::new();
        if matches!(self.cursor.current().and_then(Token::canonical_symbol), Some(")")) {
            self.cursor.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_subtree(ScopeContext::Argument)?);
            match self.cursor.current().and_then(Token::canonical_symbol) {
                Some(",") => {
                    self.cursor.advance();
                }
                Some(")") => {
                    self.cursor.advance();
                    break;
                }
                _ => return Err(self.eof_or_current_error()),
            }
        }
        Ok(args)
    }

    /// Combine an operator token into `acc`. `acc` is already a complete
    /// atom; this consumes the operator and whatever right-hand material
    /// the operator requires.
    fn parse_infix(&mut self, acc: TreeNode, ctx: ScopeContext) -> Result<TreeNode> {
        let token = self.cursor.current().unwrap().clone();
        let symbol = token.canonical_symbol().unwrap().to_string();

        match symbol.as_str() {
            "^" => self.simple_binary(acc, token, precedence::POWER),
            "*" | "/" | "%" => self.simple_binary(acc, token, precedence::MUL_DIV_MOD),
            "+" | "-" => self.simple_binary(acc, token, precedence::ADD_SUB),
            "<" | ">" | "<=" | ">=" | "=" | "<>" | "CONTAINS" | "STARTSWITH" | "ENDSWITH" => {
                self.simple_binary(acc, token, precedence::COMPARISON)
            }
            "IS" => self.simple_binary(acc, token, precedence::IS),
            "AND" => self.simple_binary(acc, token, precedence::AND),
            "OR" => self.simple_binary(acc, token, precedence::OR),
            "BETWEEN" => self.parse_between(acc, token),
            "IN" => self.parse_in(acc, token, ctx),
            _ => Err(DynamicQueryError::syntax(token.span, token.text.clone())),
        }
    }

    fn simple_binary(&mut self, acc: TreeNode, token: Token, prec: u8) -> Result<TreeNode> {
        self.cursor.advance();
        let rhs = self.parse_atom(ScopeContext::TopLevel)?;
        Ok(TreeNode::with_children(token, prec, vec![acc, rhs]))
    }

    fn parse_between(&mut self, acc: TreeNode, token: Token) -> Result<TreeNode> {
        self.cursor.advance();
        let lower = self.parse_subtree(ScopeContext::Between)?;
        self.expect_symbol("AND")?;
        let upper = self.parse_atom(ScopeContext::TopLevel)?;
        Ok(TreeNode::with_children(token, precedence::COMPARISON, vec![acc, lower, upper]))
    }

    fn parse_in(&mut self, acc: TreeNode, token: Token, _ctx: ScopeContext) -> Result<TreeNode> {
        self.cursor.advance();
        self.expect_symbol("(")?;
        let mut children = vec![acc];
        children.extend(self.parse_argument_list(ScopeContext::Argument)?);
        if children.len() < 2 {
            return Err(DynamicQueryError::syntax(token.span, token.text.clone()));
        }
        Ok(TreeNode::with_children(token, precedence::LEAF, children))
    }

    fn expect_symbol(&mut self, symbol: &str) -> Result<()> {
        match self.cursor.current() {
            Some(tok) if tok.canonical_symbol() == Some(symbol) => {
                self.cursor.advance();
                Ok(())
            }
            Some(tok) => Err(DynamicQueryError::syntax(tok.span, tok.text.clone())),
            None => Err(self.eof_or_current_error()),
        }
    }

    fn adjacent_operand_error(&self, token: &Token) -> DynamicQueryError {
        DynamicQueryError::syntax(token.span, token.text.clone())
    }

    /// Position a "ran out of tokens" diagnostic right after the last
    /// consumed token, or at column 1 for an empty clause.
    fn eof_or_current_error(&self) -> DynamicQueryError {
        match self.cursor.previous() {
            Some(prev) => DynamicQueryError::syntax(Span::point(prev.span.end), ""),
            None => DynamicQueryError::syntax(Span::point(1), ""),
        }
    }
}
