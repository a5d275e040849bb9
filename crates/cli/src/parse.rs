use crate::error::CliError;
use engine_filter::condition::{
    Combinator, FilterCondition, FilterOperator, Operand, OperandShape,
};
use model::core::{data_type::DataType, value::Value};

/// One parsed `--where` argument: the condition plus the combinator joining
/// it to the previous one (AND unless the expression is prefixed `or:`).
#[derive(Debug)]
pub struct ParsedCondition {
    pub combinator: Combinator,
    pub condition: FilterCondition,
}

/// Parse `<column> <op> [operand [operand]]`, shell-style: whitespace
/// separates tokens, single or double quotes group them.
pub fn parse_condition(expr: &str) -> Result<ParsedCondition, CliError> {
    let (combinator, body) = match expr.trim().strip_prefix("or:") {
        Some(rest) => (Combinator::Or, rest),
        None => (Combinator::And, expr.trim()),
    };

    let tokens = tokenize(body);
    if tokens.len() < 2 {
        return Err(invalid(expr, "expected at least a column and an operator"));
    }

    let column = &tokens[0];
    let operator: FilterOperator = tokens[1]
        .parse()
        .map_err(|reason: String| invalid(expr, &reason))?;

    let operands = &tokens[2..];
    let operand = match operator.operand_shape() {
        OperandShape::Empty => match operands {
            [] => Operand::Empty,
            _ => return Err(invalid(expr, "operator takes no operand")),
        },
        OperandShape::Scalar => match operands {
            [one] => Operand::Scalar(parse_literal(one)),
            _ => return Err(invalid(expr, "operator takes exactly one operand")),
        },
        OperandShape::Range => match operands {
            [low, high] => Operand::Range(parse_literal(low), parse_literal(high)),
            _ => return Err(invalid(expr, "operator takes exactly two operands")),
        },
    };

    let condition = FilterCondition::new(column, operator, operand)?;
    Ok(ParsedCondition {
        combinator,
        condition,
    })
}

/// Parse a `--type <column>=<number|date|text>` override.
pub fn parse_type_override(spec: &str) -> Result<(String, DataType), CliError> {
    let (column, tag) = spec
        .split_once('=')
        .ok_or_else(|| CliError::InvalidTypeOverride(spec.to_string()))?;
    let data_type: DataType = tag
        .parse()
        .map_err(|_| CliError::InvalidTypeOverride(spec.to_string()))?;
    Ok((column.trim().to_string(), data_type))
}

/// Literal tokens are tried as int, float, bool, then date; anything else is
/// a string.
fn parse_literal(token: &str) -> Value {
    if let Ok(i) = token.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = token.parse::<f64>() {
        return Value::Float(f);
    }
    match token.to_ascii_lowercase().as_str() {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        _ => {}
    }
    if let Some(date @ Value::Date(_)) = DataType::Date.parse_value(token) {
        return date;
    }
    Value::String(token.to_string())
}

fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for c in input.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

fn invalid(expr: &str, reason: &str) -> CliError {
    CliError::InvalidExpression {
        expr: expr.to_string(),
        reason: reason.to_string(),
    }
}
