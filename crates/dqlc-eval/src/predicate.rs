use dqlc_sem::{BinaryOp, FieldValue, Record, StringMethod, TypedExpr, UnaryOp};
use dqlc_util::FieldType;

/// Recursively interprets a typed expression tree against a bound record
/// instance. The transformer already proved the tree well-typed, so this
/// walk never needs to raise a `DynamicQueryError` — arithmetic and
/// indexing edge cases (division by zero, an out-of-range character index)
/// resolve to `FieldValue::Null` rather than panicking.
pub fn evaluate<R: Record>(expr: &TypedExpr, record: &R) -> FieldValue {
    match expr {
        TypedExpr::Constant(value) => value.clone(),
        TypedExpr::PropertyAccess { name } => record.field_value(name),
        TypedExpr::Call { name, args } => evaluate_call(name, args, record),
        TypedExpr::MethodCall { method, receiver, argument } => {
            evaluate_method_call(*method, receiver, argument, record)
        }
        TypedExpr::Index { receiver, index } => evaluate_index(receiver, index, record),
        TypedExpr::Convert { to, expr } => evaluate_convert(*to, expr, record),
        TypedExpr::Unary { op, operand } => evaluate_unary(*op, operand, record),
        TypedExpr::Binary { op, left, right } => evaluate_binary(*op, left, right, record),
    }
}

fn evaluate_call<R: Record>(name: &str, args: &[TypedExpr], record: &R) -> FieldValue {
    let values: Vec<i64> = args
        .iter()
        .map(|arg| match evaluate(arg, record) {
            FieldValue::Int(v) => v,
            other => panic!("MAX/MIN argument did not evaluate to an int: {other:?}"),
        })
        .collect();
    let result = match name {
        "MAX" => values.iter().copied().max(),
        "MIN" => values.iter().copied().min(),
        other => unreachable!("unsupported built-in reached the evaluator: {other}"),
    };
    FieldValue::Int(result.expect("MAX/MIN always receive exactly two arguments"))
}

fn evaluate_method_call<R: Record>(
    method: StringMethod,
    receiver: &TypedExpr,
    argument: &TypedExpr,
    record: &R,
) -> FieldValue {
    let (FieldValue::String(receiver), FieldValue::String(argument)) =
        (evaluate(receiver, record), evaluate(argument, record))
    else {
        return FieldValue::Bool(false);
    };
    let result = match method {
        StringMethod::Contains => receiver.contains(&argument),
        StringMethod::StartsWith => receiver.starts_with(&argument),
        StringMethod::EndsWith => receiver.ends_with(&argument),
    };
    FieldValue::Bool(result)
}

fn evaluate_index<R: Record>(receiver: &TypedExpr, index: &TypedExpr, record: &R) -> FieldValue {
    let FieldValue::String(text) = evaluate(receiver, record) else {
        return FieldValue::Null;
    };
    let FieldValue::Int(i) = evaluate(index, record) else {
        return FieldValue::Null;
    };
    usize::try_from(i)
        .ok()
        .and_then(|i| text.chars().nth(i))
        .map(FieldValue::Char)
        .unwrap_or(FieldValue::Null)
}

fn evaluate_convert<R: Record>(to: FieldType, expr: &TypedExpr, record: &R) -> FieldValue {
    let value = evaluate(expr, record);
    match (to, value) {
        (FieldType::Double, FieldValue::Int(i)) => FieldValue::Double(i as f64),
        (FieldType::Double, already @ FieldValue::Double(_)) => already,
        (_, other) => other,
    }
}

fn evaluate_unary<R: Record>(op: UnaryOp, operand: &TypedExpr, record: &R) -> FieldValue {
    match (op, evaluate(operand, record)) {
        (UnaryOp::Neg, FieldValue::Int(v)) => FieldValue::Int(-v),
        (UnaryOp::Neg, FieldValue::Double(v)) => FieldValue::Double(-v),
        (UnaryOp::Not, FieldValue::Bool(v)) => FieldValue::Bool(!v),
        (_, other) => other,
    }
}

fn evaluate_binary<R: Record>(op: BinaryOp, left: &TypedExpr, right: &TypedExpr, record: &R) -> FieldValue {
    use BinaryOp::*;

    // AND/OR short-circuit; every other operator evaluates both sides.
    if matches!(op, And | Or) {
        let FieldValue::Bool(left) = evaluate(left, record) else {
            return FieldValue::Bool(false);
        };
        return match op {
            And if !left => FieldValue::Bool(false),
            Or if left => FieldValue::Bool(true),
            _ => evaluate(right, record),
        };
    }

    let left = evaluate(left, record);
    let right = evaluate(right, record);
    match op {
        Add | Sub | Mul | Div | Mod | Pow => arithmetic(op, left, right),
        Lt | Gt | Le | Ge => FieldValue::Bool(ordering(op, &left, &right)),
        Eq => FieldValue::Bool(left == right),
        Ne => FieldValue::Bool(left != right),
        And | Or => unreachable!("handled above"),
    }
}

fn arithmetic(op: BinaryOp, left: FieldValue, right: FieldValue) -> FieldValue {
    use BinaryOp::*;
    match (left, right) {
        (FieldValue::Int(a), FieldValue::Int(b)) => match op {
            Add => FieldValue::Int(a.wrapping_add(b)),
            Sub => FieldValue::Int(a.wrapping_sub(b)),
            Mul => FieldValue::Int(a.wrapping_mul(b)),
            Div if b != 0 => FieldValue::Int(a / b),
            Mod if b != 0 => FieldValue::Int(a % b),
            Div | Mod => FieldValue::Null,
            Pow => FieldValue::Double((a as f64).powf(b as f64)),
            _ => unreachable!(),
        },
        (FieldValue::Double(a), FieldValue::Double(b)) => match op {
            Add => FieldValue::Double(a + b),
            Sub => FieldValue::Double(a - b),
            Mul => FieldValue::Double(a * b),
            Div => FieldValue::Double(a / b),
            Mod => FieldValue::Double(a % b),
            Pow => FieldValue::Double(a.powf(b)),
            _ => unreachable!(),
        },
        _ => FieldValue::Null,
    }
}

fn ordering(op: BinaryOp, left: &FieldValue, right: &FieldValue) -> bool {
    use BinaryOp::*;
    let cmp = match (left, right) {
        (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
        (FieldValue::Double(a), FieldValue::Double(b)) => a.total_cmp(b),
        (FieldValue::Char(a), FieldValue::Char(b)) => a.cmp(b),
        _ => return false,
    };
    match op {
        Lt => cmp.is_lt(),
        Gt => cmp.is_gt(),
        Le => cmp.is_le(),
        Ge => cmp.is_ge(),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqlc_sem::FieldTable;
    use dqlc_util::{FieldType, Result};

    struct Person {
        id: i64,
        name: String,
    }

    impl Record for Person {
        fn type_name() -> &'static str {
            "Person"
        }

        fn field_type(name: &str) -> Option<FieldType> {
            FieldTable::new()
                .field("Id", FieldType::Int)
                .field("Name", FieldType::String)
                .get(name)
        }

        fn field_value(&self, name: &str) -> FieldValue {
            match name {
                "Id" => FieldValue::Int(self.id),
                "Name" => FieldValue::String(self.name.clone()),
                other => panic!("unknown field {other}"),
            }
        }
    }

    fn compile(clause: &str, expected: FieldType) -> Result<TypedExpr> {
        let tokens = dqlc_lex::lex(clause)?;
        let tree = dqlc_par::rebalance(dqlc_par::parse(&tokens)?);
        dqlc_sem::transform::<Person>(&tree, expected)
    }

    #[test]
    fn scenario_8_applies_a_compiled_filter_to_a_record() {
        let expr = compile("Id >= 1 AND Name = \"ABC\"", FieldType::Bool).unwrap();
        let matching = Person { id: 5, name: "ABC".into() };
        let non_matching = Person { id: 0, name: "ABC".into() };
        assert_eq!(evaluate(&expr, &matching), FieldValue::Bool(true));
        assert_eq!(evaluate(&expr, &non_matching), FieldValue::Bool(false));
    }

    #[test]
    fn string_indexing_evaluates_to_the_nth_character() {
        let expr = compile("Name[1]", FieldType::Char).unwrap();
        let person = Person { id: 1, name: "ABC".into() };
        assert_eq!(evaluate(&expr, &person), FieldValue::Char('B'));
    }

    #[test]
    fn division_by_zero_evaluates_to_null_rather_than_panicking() {
        let expr = compile("Id / 0", FieldType::Int).unwrap();
        let person = Person { id: 10, name: String::new() };
        assert_eq!(evaluate(&expr, &person), FieldValue::Null);
    }

    #[test]
    fn and_short_circuits_without_evaluating_the_right_operand() {
        let expr = compile("Id = 999 AND Id = 1", FieldType::Bool).unwrap();
        let person = Person { id: 5, name: String::new() };
        assert_eq!(evaluate(&expr, &person), FieldValue::Bool(false));
    }
}
