//! Human-readable output of the three procedures.
use crate::numerical::iteration::IterationResult;
use nalgebra::Vector2;
use strum_macros::Display;
use tabled::{Table, Tabled, settings::Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Procedure {
    #[strum(to_string = "fixed-point iteration")]
    FixedPoint,
    #[strum(to_string = "Newton (SIMQ)")]
    NewtonSIMQ,
    #[strum(to_string = "Newton (MINV)")]
    NewtonMINV,
}

impl Procedure {
    pub fn description(&self) -> &'static str {
        match self {
            Procedure::FixedPoint => "first system of equations by fixed-point iteration method",
            Procedure::NewtonSIMQ => "second system of equations by Newton method using SIMQ",
            Procedure::NewtonMINV => "second system of equations by Newton method using MINV",
        }
    }
}

/// One output line: the solution to 6 decimals with the iteration count, or a diagnostic.
pub fn format_solution(procedure: Procedure, result: &IterationResult<(f64, f64)>) -> String {
    match result {
        IterationResult::Converged {
            value: (x, y),
            iterations,
        } => format!(
            "Solution of {}, x = {:.6}, y = {:.6}, number of iterations: {}",
            procedure.description(),
            x,
            y,
            iterations
        ),
        IterationResult::NotConverged => match procedure {
            Procedure::FixedPoint => "Not enough iterations.".to_string(),
            _ => format!(
                "Not enough iterations. No solution of {} found.",
                procedure.description()
            ),
        },
    }
}

pub fn as_pair(result: IterationResult<Vector2<f64>>) -> IterationResult<(f64, f64)> {
    result.map(|v| (v[0], v[1]))
}

#[derive(Tabled)]
pub struct SummaryRow {
    method: String,
    x: String,
    y: String,
    iterations: String,
}

/// summary of several procedures, one row each
pub fn summary_table(rows: &[(Procedure, IterationResult<(f64, f64)>)]) -> String {
    let rows: Vec<SummaryRow> = rows
        .iter()
        .map(|(procedure, result)| match result {
            IterationResult::Converged {
                value: (x, y),
                iterations,
            } => SummaryRow {
                method: procedure.to_string(),
                x: format!("{:.6}", x),
                y: format!("{:.6}", y),
                iterations: iterations.to_string(),
            },
            IterationResult::NotConverged => SummaryRow {
                method: procedure.to_string(),
                x: "-".to_string(),
                y: "-".to_string(),
                iterations: "not converged".to_string(),
            },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::modern_rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_converged() {
        let result = IterationResult::Converged {
            value: (-0.148047810714762, -0.823754208705236),
            iterations: 16,
        };
        assert_eq!(
            format_solution(Procedure::FixedPoint, &result),
            "Solution of first system of equations by fixed-point iteration method, \
             x = -0.148048, y = -0.823754, number of iterations: 16"
        );
    }

    #[test]
    fn test_format_newton() {
        let result = as_pair(IterationResult::Converged {
            value: Vector2::new(0.7055467217326915, 0.7086634063166038),
            iterations: 6,
        });
        assert_eq!(
            format_solution(Procedure::NewtonMINV, &result),
            "Solution of second system of equations by Newton method using MINV, \
             x = 0.705547, y = 0.708663, number of iterations: 6"
        );
    }

    #[test]
    fn test_format_not_converged() {
        let result = IterationResult::NotConverged;
        assert_eq!(
            format_solution(Procedure::FixedPoint, &result),
            "Not enough iterations."
        );
        assert!(format_solution(Procedure::NewtonSIMQ, &result).contains("using SIMQ"));
    }

    #[test]
    fn test_summary_table() {
        let table = summary_table(&[
            (
                Procedure::NewtonSIMQ,
                IterationResult::Converged {
                    value: (0.5, 0.25),
                    iterations: 3,
                },
            ),
            (Procedure::FixedPoint, IterationResult::NotConverged),
        ]);
        assert!(table.contains("Newton (SIMQ)"));
        assert!(table.contains("0.250000"));
        assert!(table.contains("not converged"));
    }
}
