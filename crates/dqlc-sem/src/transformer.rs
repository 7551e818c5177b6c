use dqlc_lex::TokenKind;
use dqlc_par::TreeNode;
use dqlc_util::{DynamicQueryError, FieldType, Result};

use crate::builtins;
use crate::record::Record;
use crate::typed_expr::{BinaryOp, StringMethod, TypedExpr, UnaryOp};
use crate::value::FieldValue;

/// Walk the rebalanced tree bottom-up, emitting a typed expression against
/// `R` and checking it matches `expected`.
pub fn transform<R: Record>(tree: &TreeNode, expected: FieldType) -> Result<TypedExpr> {
    let (expr, ty) = transform_node::<R>(tree)?;
    if ty != expected {
        return Err(DynamicQueryError::result_mismatch(
            tree.token.span,
            tree.token.text.clone(),
            &expected.to_string(),
        ));
    }
    Ok(expr)
}

fn transform_node<R: Record>(node: &TreeNode) -> Result<(TypedExpr, FieldType)> {
    match &node.token.kind {
        TokenKind::Value(literal) => transform_value::<R>(node, literal.clone().into()),
        TokenKind::Named(name) if node.is_field => transform_field::<R>(node, name),
        TokenKind::Named(name) => transform_call::<R>(node, name),
        // A parenthesized group: a pure rebalancing barrier with no
        // semantics of its own, so transforming it is just transforming
        // what it wraps.
        TokenKind::Symbol(symbol) if symbol == "(" => transform_node::<R>(&node.children[0]),
        TokenKind::Symbol(symbol) => transform_operator::<R>(node, symbol),
    }
}

fn transform_value<R: Record>(node: &TreeNode, value: FieldValue) -> Result<(TypedExpr, FieldType)> {
    let ty = value.field_type();
    apply_optional_index::<R>(node, TypedExpr::Constant(value), ty)
}

fn transform_field<R: Record>(node: &TreeNode, name: &str) -> Result<(TypedExpr, FieldType)> {
    let ty = R::field_type(name).ok_or_else(|| {
        DynamicQueryError::unknown_member(node.token.span, node.token.text.clone(), name, R::type_name())
    })?;
    apply_optional_index::<R>(node, TypedExpr::PropertyAccess { name: name.to_string() }, ty)
}

/// `Value`/`Field` nodes share the "if indexed, the receiver must be a
/// string and the index must be an int" rule.
fn apply_optional_index<R: Record>(
    node: &TreeNode,
    receiver: TypedExpr,
    receiver_ty: FieldType,
) -> Result<(TypedExpr, FieldType)> {
    let Some(index_node) = node.children.first() else {
        return Ok((receiver, receiver_ty));
    };
    if receiver_ty != FieldType::String {
        return Err(DynamicQueryError::type_mismatch(
            node.token.span,
            node.token.text.clone(),
            "indexed field",
            &[FieldType::String],
        ));
    }
    let (index_expr, index_ty) = transform_node::<R>(index_node)?;
    if index_ty != FieldType::Int {
        return Err(DynamicQueryError::type_mismatch(
            index_node.token.span,
            index_node.token.text.clone(),
            "index",
            &[FieldType::Int],
        ));
    }
    Ok((
        TypedExpr::Index {
            receiver: Box::new(receiver),
            index: Box::new(index_expr),
        },
        FieldType::Char,
    ))
}

fn transform_call<R: Record>(node: &TreeNode, name: &str) -> Result<(TypedExpr, FieldType)> {
    let Some(canonical) = builtins::lookup(name) else {
        return Err(DynamicQueryError::unsupported_call(node.token.span, node.token.text.clone(), name));
    };
    if node.children.len() != 2 {
        return Err(DynamicQueryError::syntax(node.token.span, node.token.text.clone()));
    }
    let mut args = Vec::with_capacity(2);
    for (i, arg_node) in node.children.iter().enumerate() {
        let (arg_expr, arg_ty) = transform_node::<R>(arg_node)?;
        if arg_ty != FieldType::Int {
            return Err(DynamicQueryError::type_mismatch(
                arg_node.token.span,
                arg_node.token.text.clone(),
                if i == 0 { "first argument" } else { "second argument" },
                &[FieldType::Int],
            ));
        }
        args.push(arg_expr);
    }
    Ok((
        TypedExpr::Call {
            name: canonical.to_string(),
            args,
        },
        FieldType::Int,
    ))
}

fn transform_operator<R: Record>(node: &TreeNode, symbol: &str) -> Result<(TypedExpr, FieldType)> {
    match symbol {
        "[-]" | "[+]" => transform_sign::<R>(node, symbol),
        "NOT" => transform_not::<R>(node),
        "^" => transform_power::<R>(node),
        "*" | "/" | "%" | "+" | "-" => transform_arithmetic::<R>(node, symbol),
        "<" | ">" | "<=" | ">=" => transform_ordering::<R>(node, symbol),
        "=" | "<>" => transform_equality::<R>(node, symbol),
        "CONTAINS" | "STARTSWITH" | "ENDSWITH" => transform_string_method::<R>(node, symbol),
        "BETWEEN" => transform_between::<R>(node),
        "IN" => transform_in::<R>(node),
        "IS" => transform_is::<R>(node),
        "AND" | "OR" => transform_logical::<R>(node, symbol),
        _ => Err(DynamicQueryError::syntax(node.token.span, node.token.text.clone())),
    }
}

const NUMERIC: &[FieldType] = &[FieldType::Int, FieldType::Double];
const ORDERABLE: &[FieldType] = &[FieldType::Int, FieldType::Double, FieldType::Char];

fn check_type(node: &TreeNode, ty: FieldType, role: &str, expected: &[FieldType]) -> Result<()> {
    if expected.contains(&ty) {
        Ok(())
    } else {
        Err(DynamicQueryError::type_mismatch(
            node.token.span,
            node.token.text.clone(),
            role,
            expected,
        ))
    }
}

fn transform_sign<R: Record>(node: &TreeNode, symbol: &str) -> Result<(TypedExpr, FieldType)> {
    let operand_node = &node.children[0];
    let (operand, ty) = transform_node::<R>(operand_node)?;
    check_type(operand_node, ty, "operand", NUMERIC)?;
    // `[+]` is identity: emit the operand unchanged rather than a no-op
    // unary node, since its type already satisfies the numeric constraint.
    if symbol == "[+]" {
        return Ok((operand, ty));
    }
    Ok((
        TypedExpr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        },
        ty,
    ))
}

fn transform_not<R: Record>(node: &TreeNode) -> Result<(TypedExpr, FieldType)> {
    let operand_node = &node.children[0];
    let (operand, ty) = transform_node::<R>(operand_node)?;
    check_type(operand_node, ty, "operand", &[FieldType::Bool])?;
    Ok((
        TypedExpr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        },
        FieldType::Bool,
    ))
}

fn transform_power<R: Record>(node: &TreeNode) -> Result<(TypedExpr, FieldType)> {
    let (left_node, right_node) = (&node.children[0], &node.children[1]);
    let (left, left_ty) = transform_node::<R>(left_node)?;
    check_type(left_node, left_ty, "value on the left", NUMERIC)?;
    let (right, right_ty) = transform_node::<R>(right_node)?;
    check_type(right_node, right_ty, "value on the right", NUMERIC)?;

    let left = promote_to_double(left, left_ty);
    let right = promote_to_double(right, right_ty);
    Ok((
        TypedExpr::Binary {
            op: BinaryOp::Pow,
            left: Box::new(left),
            right: Box::new(right),
        },
        FieldType::Double,
    ))
}

fn promote_to_double(expr: TypedExpr, ty: FieldType) -> TypedExpr {
    if ty == FieldType::Double {
        expr
    } else {
        TypedExpr::Convert {
            to: FieldType::Double,
            expr: Box::new(expr),
        }
    }
}

fn transform_arithmetic<R: Record>(node: &TreeNode, symbol: &str) -> Result<(TypedExpr, FieldType)> {
    let (left_node, right_node) = (&node.children[0], &node.children[1]);
    let (left, left_ty) = transform_node::<R>(left_node)?;
    check_type(left_node, left_ty, "value on the left", NUMERIC)?;
    let (right, right_ty) = transform_node::<R>(right_node)?;
    check_type(right_node, right_ty, "value on the right", NUMERIC)?;

    let result_ty = if left_ty == FieldType::Double || right_ty == FieldType::Double {
        FieldType::Double
    } else {
        FieldType::Int
    };
    let left = if result_ty == FieldType::Double { promote_to_double(left, left_ty) } else { left };
    let right = if result_ty == FieldType::Double { promote_to_double(right, right_ty) } else { right };

    let op = match symbol {
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        "%" => BinaryOp::Mod,
        _ => unreachable!(),
    };
    Ok((
        TypedExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        result_ty,
    ))
}

fn transform_ordering<R: Record>(node: &TreeNode, symbol: &str) -> Result<(TypedExpr, FieldType)> {
    let (left_node, right_node) = (&node.children[0], &node.children[1]);
    let (left, left_ty) = transform_node::<R>(left_node)?;
    check_type(left_node, left_ty, "value on the left", ORDERABLE)?;
    let (right, right_ty) = transform_node::<R>(right_node)?;
    check_type(right_node, right_ty, "value on the right", &[left_ty])?;

    let op = match symbol {
        "<" => BinaryOp::Lt,
        ">" => BinaryOp::Gt,
        "<=" => BinaryOp::Le,
        ">=" => BinaryOp::Ge,
        _ => unreachable!(),
    };
    Ok((
        TypedExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        FieldType::Bool,
    ))
}

fn transform_equality<R: Record>(node: &TreeNode, symbol: &str) -> Result<(TypedExpr, FieldType)> {
    let (left_node, right_node) = (&node.children[0], &node.children[1]);
    let (left, left_ty) = transform_node::<R>(left_node)?;
    let (right, right_ty) = transform_node::<R>(right_node)?;
    check_type(right_node, right_ty, "value on the right", &[left_ty])?;

    let op = if symbol == "=" { BinaryOp::Eq } else { BinaryOp::Ne };
    Ok((
        TypedExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        FieldType::Bool,
    ))
}

fn transform_string_method<R: Record>(node: &TreeNode, symbol: &str) -> Result<(TypedExpr, FieldType)> {
    let (left_node, right_node) = (&node.children[0], &node.children[1]);
    let (left, left_ty) = transform_node::<R>(left_node)?;
    check_type(left_node, left_ty, "value on the left", &[FieldType::String])?;
    let (right, right_ty) = transform_node::<R>(right_node)?;
    check_type(right_node, right_ty, "value on the right", &[FieldType::String])?;

    let method = match symbol {
        "CONTAINS" => StringMethod::Contains,
        "STARTSWITH" => StringMethod::StartsWith,
        "ENDSWITH" => StringMethod::EndsWith,
        _ => unreachable!(),
    };
    Ok((
        TypedExpr::MethodCall {
            method,
            receiver: Box::new(left),
            argument: Box::new(right),
        },
        FieldType::Bool,
    ))
}

fn transform_between<R: Record>(node: &TreeNode) -> Result<(TypedExpr, FieldType)> {
    let (left_node, lower_node, upper_node) = (&node.children[0], &node.children[1], &node.children[2]);
    let (left, left_ty) = transform_node::<R>(left_node)?;
    check_type(left_node, left_ty, "value on the left", ORDERABLE)?;
    let (lower, lower_ty) = transform_node::<R>(lower_node)?;
    check_type(lower_node, lower_ty, "lower bound", &[left_ty])?;
    let (upper, upper_ty) = transform_node::<R>(upper_node)?;
    check_type(upper_node, upper_ty, "upper bound", &[left_ty])?;

    // `left >= lower AND left <= upper`, cloning `left` for the second
    // comparison since each typed subexpression is owned by one parent.
    let ge = TypedExpr::Binary {
        op: BinaryOp::Ge,
        left: Box::new(left.clone()),
        right: Box::new(lower),
    };
    let le = TypedExpr::Binary {
        op: BinaryOp::Le,
        left: Box::new(left),
        right: Box::new(upper),
    };
    Ok((
        TypedExpr::Binary {
            op: BinaryOp::And,
            left: Box::new(ge),
            right: Box::new(le),
        },
        FieldType::Bool,
    ))
}

fn transform_in<R: Record>(node: &TreeNode) -> Result<(TypedExpr, FieldType)> {
    let left_node = &node.children[0];
    let (left, left_ty) = transform_node::<R>(left_node)?;

    let mut choices = Vec::with_capacity(node.children.len() - 1);
    for choice_node in &node.children[1..] {
        let (choice, choice_ty) = transform_node::<R>(choice_node)?;
        check_type(choice_node, choice_ty, "choice", &[left_ty])?;
        choices.push(choice);
    }

    // Right-nested `Eq` chain with no seed at the bottom:
    // `Or(Eq(c1), Or(Eq(c2), ... Or(Eq(cN-1), Eq(cN))))`, built by folding
    // from the last choice backward to the second-to-last. The whole chain
    // then becomes the right child of one final `Or` with `false` as its
    // left child.
    let mut choices = choices.into_iter().rev();
    let last = choices.next().expect("IN always has at least one choice");
    let mut acc = TypedExpr::Binary {
        op: BinaryOp::Eq,
        left: Box::new(left.clone()),
        right: Box::new(last),
    };
    for choice in choices {
        let eq = TypedExpr::Binary {
            op: BinaryOp::Eq,
            left: Box::new(left.clone()),
            right: Box::new(choice),
        };
        acc = TypedExpr::Binary {
            op: BinaryOp::Or,
            left: Box::new(eq),
            right: Box::new(acc),
        };
    }
    let result = TypedExpr::Binary {
        op: BinaryOp::Or,
        left: Box::new(TypedExpr::Constant(FieldValue::Bool(false))),
        right: Box::new(acc),
    };
    Ok((result, FieldType::Bool))
}

fn transform_is<R: Record>(node: &TreeNode) -> Result<(TypedExpr, FieldType)> {
    let (left_node, right_node) = (&node.children[0], &node.children[1]);
    let (left, left_ty) = transform_node::<R>(left_node)?;
    check_type(left_node, left_ty, "value on the left", &[FieldType::Bool])?;
    let (right, right_ty) = transform_node::<R>(right_node)?;
    check_type(right_node, right_ty, "value on the right", &[left_ty])?;

    Ok((
        TypedExpr::Binary {
            op: BinaryOp::Eq,
            left: Box::new(left),
            right: Box::new(right),
        },
        FieldType::Bool,
    ))
}

fn transform_logical<R: Record>(node: &TreeNode, symbol: &str) -> Result<(TypedExpr, FieldType)> {
    let (left_node, right_node) = (&node.children[0], &node.children[1]);
    let (left, left_ty) = transform_node::<R>(left_node)?;
    check_type(left_node, left_ty, "value on the left", &[FieldType::Bool])?;
    let (right, right_ty) = transform_node::<R>(right_node)?;
    check_type(right_node, right_ty, "value on the right", &[left_ty])?;

    let op = if symbol == "AND" { BinaryOp::And } else { BinaryOp::Or };
    Ok((
        TypedExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        FieldType::Bool,
    ))
}
