//! Arithmetic resolution via expression evaluation.

use tracing::debug;

/// Words that trigger the arithmetic intent and must be stripped before
/// evaluation.
const TRIGGERS: &[&str] = &["resolver", "calcular", "cuánto es", "cuanto es"];

/// Evaluate the arithmetic expression embedded in a message.
///
/// Trigger words and question marks are stripped and the remainder is fed
/// to the expression evaluator. Always returns a user-facing reply.
pub fn solve_arithmetic(text: &str) -> String {
    let expr = extract_expression(text);

    if expr.is_empty() {
        return apology();
    }

    match meval::eval_str(&expr) {
        Ok(result) => {
            debug!(expr = %expr, result, "evaluated expression");
            format!("🔢 {} = {}", expr, format_number(result))
        }
        Err(e) => {
            debug!(expr = %expr, error = %e, "expression evaluation failed");
            apology()
        }
    }
}

fn extract_expression(text: &str) -> String {
    let mut lowered = text.to_lowercase();
    for trigger in TRIGGERS {
        lowered = lowered.replace(trigger, " ");
    }
    lowered
        .chars()
        .filter(|c| c.is_ascii_digit() || "+-*/%^(). ".contains(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Render integer-valued results without a decimal point.
fn format_number(result: f64) -> String {
    if result.fract() == 0.0 && result.abs() < 1e15 {
        format!("{:.0}", result)
    } else {
        format!("{}", result)
    }
}

fn apology() -> String {
    "Lo siento, no pude resolver esa operación. Intenta con algo como «resolver 2+2».".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_addition() {
        let reply = solve_arithmetic("resolver 2+2");
        assert!(reply.contains("= 4"));
    }

    #[test]
    fn test_integer_result_has_no_decimals() {
        let reply = solve_arithmetic("calcular 10/2");
        assert!(reply.contains("= 5"));
        assert!(!reply.contains("5.0"));
    }

    #[test]
    fn test_fractional_result() {
        let reply = solve_arithmetic("resolver 10/4");
        assert!(reply.contains("2.5"));
    }

    #[test]
    fn test_cuanto_es_trigger() {
        let reply = solve_arithmetic("¿cuánto es 3*7?");
        assert!(reply.contains("= 21"));
    }

    #[test]
    fn test_parentheses() {
        let reply = solve_arithmetic("resolver (2+3)*4");
        assert!(reply.contains("= 20"));
    }

    #[test]
    fn test_invalid_expression_apologizes() {
        let reply = solve_arithmetic("resolver ++");
        assert!(reply.contains("Lo siento"));
    }

    #[test]
    fn test_empty_expression_apologizes() {
        let reply = solve_arithmetic("resolver");
        assert!(reply.contains("Lo siento"));
    }
}
