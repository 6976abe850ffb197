use mink_sat::{config::Config, context::Context, structures::literal::Literal, types::gen::Report};

/// The literal of a DIMACS-style signed, 1-based variable.
fn literal(dimacs: i32) -> Literal {
    Literal::fresh(dimacs.unsigned_abs() - 1, dimacs > 0)
}

fn context_over(variables: u32, clauses: &[&[i32]]) -> (Context, bool) {
    let mut context = Context::from_config(Config::default());
    context.create_variables(variables);
    for clause in clauses {
        let clause: Vec<Literal> = clause.iter().map(|l| literal(*l)).collect();
        if !context.add_clause(&clause) {
            return (context, false);
        }
    }
    (context, true)
}

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        let (mut context, ok) = context_over(1, &[&[1]]);
        assert!(ok);
        assert_eq!(context.solve(), Report::Satisfiable);
        assert!(context.model()[0].is_true());
    }

    #[test]
    fn complementary_units() {
        let (mut context, ok) = context_over(1, &[&[1], &[-1]]);
        assert!(!ok);
        assert_eq!(context.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn unit_forces_the_rest() {
        let (mut context, ok) = context_over(2, &[&[1, -2], &[-1, 2], &[1]]);
        assert!(ok);
        assert_eq!(context.solve(), Report::Satisfiable);
        assert!(context.model()[0].is_true());
        assert!(context.model()[1].is_true());
    }

    #[test]
    fn one_clause() {
        let (mut context, ok) = context_over(3, &[&[1, 2, -3]]);
        assert!(ok);
        assert_eq!(context.solve(), Report::Satisfiable);
        assert!(
            context.model()[0] == true || context.model()[1] == true || context.model()[2] == false
        );
    }

    #[test]
    fn no_clauses_is_unknown() {
        let mut context = Context::from_config(Config::default());
        context.create_variables(3);
        assert_eq!(context.solve(), Report::Unknown);
    }

    #[test]
    fn three_pigeons_two_holes() {
        // Variable 2i + h + 1: pigeon i sits in hole h.
        let (mut context, ok) = context_over(
            6,
            &[
                &[1, 2],
                &[3, 4],
                &[5, 6],
                &[-1, -3],
                &[-1, -5],
                &[-3, -5],
                &[-2, -4],
                &[-2, -6],
                &[-4, -6],
            ],
        );
        assert!(ok);
        assert_eq!(context.solve(), Report::Unsatisfiable);
    }
}

mod canonicalisation {
    use super::*;

    #[test]
    fn tautologies_are_dropped() {
        let (context, ok) = context_over(2, &[&[1, 2, -1]]);
        assert!(ok);
        assert_eq!(context.clause_count(), 0);
    }

    #[test]
    fn satisfied_clauses_are_dropped() {
        let (context, ok) = context_over(2, &[&[1], &[1, 2]]);
        assert!(ok);
        assert_eq!(context.clause_count(), 0);
    }

    #[test]
    fn duplicate_literals_are_merged() {
        let (context, ok) = context_over(2, &[&[1, 1, 2, 2]]);
        assert!(ok);
        assert_eq!(context.clause_count(), 1);
        assert_eq!(context.statistics().literals, 2);
    }

    #[test]
    fn false_literals_are_deleted() {
        // With 1 false, the second clause shrinks to a unit on 2.
        let (mut context, ok) = context_over(2, &[&[-1], &[1, 2]]);
        assert!(ok);
        assert_eq!(context.clause_count(), 0);
        assert_eq!(context.solve(), Report::Satisfiable);
        assert!(context.model()[1].is_true());
    }
}

mod reproducibility {
    use super::*;
    use mink_sat::generic::mt19937::Mt19937;
    use rand::{Rng, SeedableRng};

    fn scrambled_formula(variables: u32, clauses: usize) -> Vec<Vec<i32>> {
        let mut rng = Mt19937::seed_from_u64(7);
        let mut formula = Vec::default();
        for _ in 0..clauses {
            let mut clause = Vec::default();
            while clause.len() < 3 {
                let variable = rng.gen_range(1..=variables as i32);
                if !clause.contains(&variable) && !clause.contains(&-variable) {
                    match rng.gen_range(0..2) {
                        0 => clause.push(variable),
                        _ => clause.push(-variable),
                    }
                }
            }
            formula.push(clause);
        }
        formula
    }

    #[test]
    fn solves_are_reproducible() {
        let formula = scrambled_formula(30, 120);
        let borrowed: Vec<&[i32]> = formula.iter().map(|clause| clause.as_slice()).collect();

        let (mut first, first_ok) = context_over(30, &borrowed);
        let (mut second, second_ok) = context_over(30, &borrowed);
        assert_eq!(first_ok, second_ok);

        let first_report = first.solve();
        let second_report = second.solve();

        assert_eq!(first_report, second_report);
        assert_eq!(first.statistics(), second.statistics());
        assert_eq!(first.model(), second.model());
    }
}
