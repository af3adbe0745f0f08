//! Estimate command - Runs the budget calculator from the command line.

use crate::cli::args::EstimateArgs;
use crate::domain::{BudgetEstimate, BudgetRequest};
use crate::errors::AppResult;

/// Execute the estimate command
pub fn execute(args: EstimateArgs) -> AppResult<()> {
    let estimate = run(args)?;

    let label = if estimate.destination.is_empty() {
        "trip"
    } else {
        estimate.destination.as_str()
    };

    println!(
        "{}: stay {} + transport {} = {}",
        label,
        estimate.stay_total,
        estimate.transport_total,
        estimate.total
    );

    Ok(())
}

fn run(args: EstimateArgs) -> AppResult<BudgetEstimate> {
    let request = BudgetRequest {
        destination: args.destination.trim().to_string(),
        people: args.people,
        days: args.days,
        nightly_stay: args.stay,
        transport: args.transport,
    };

    Ok(request.estimate()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn args(people: i64, days: i64, stay: i64, transport: i64) -> EstimateArgs {
        EstimateArgs {
            destination: " Goa ".to_string(),
            people,
            days,
            stay,
            transport,
        }
    }

    #[test]
    fn test_run_reference_trip() {
        let estimate = run(args(2, 3, 1000, 500)).unwrap();

        assert_eq!(estimate.destination, "Goa");
        assert_eq!(estimate.total, 7000);
    }

    #[test]
    fn test_run_overflow() {
        let result = run(args(i64::MAX, 2, 2, 0));
        assert!(matches!(result, Err(AppError::Calculation(_))));
    }
}
