use mink_sat::{
    config::Config,
    context::Context,
    generic::mt19937::Mt19937,
    structures::literal::Literal,
    types::gen::Report,
};

use rand::{Rng, SeedableRng};

/// A uniform random formula of 3-literal clauses over distinct variables.
fn random_formula(rng: &mut Mt19937, variables: i32, clauses: usize) -> Vec<Vec<i32>> {
    let mut formula = Vec::default();
    for _ in 0..clauses {
        let mut clause = Vec::default();
        while clause.len() < 3 {
            let variable = rng.gen_range(1..=variables);
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

fn context_over(variables: u32, formula: &[Vec<i32>]) -> (Context, bool) {
    let mut context = Context::from_config(Config::default());
    context.create_variables(variables);
    for clause in formula {
        let clause: Vec<Literal> = clause
            .iter()
            .map(|l| Literal::fresh(l.unsigned_abs() - 1, *l > 0))
            .collect();
        if !context.add_clause(&clause) {
            return (context, false);
        }
    }
    (context, true)
}

fn model_satisfies(context: &Context, formula: &[Vec<i32>]) -> bool {
    formula.iter().all(|clause| {
        clause
            .iter()
            .any(|l| context.model()[(l.unsigned_abs() - 1) as usize] == (*l > 0))
    })
}

/// Exhausts all assignments; only reasonable for small variable counts.
fn brute_force_satisfiable(variables: i32, formula: &[Vec<i32>]) -> bool {
    (0_u64..1 << variables).any(|assignment| {
        formula.iter().all(|clause| {
            clause.iter().any(|l| {
                let polarity = assignment & (1 << (l.unsigned_abs() - 1)) != 0;
                polarity == (*l > 0)
            })
        })
    })
}

#[test]
fn answers_agree_with_brute_force() {
    const VARIABLES: i32 = 12;

    for seed in 0..25 {
        let mut rng = Mt19937::seed_from_u64(seed);
        // Around the satisfiability threshold, for a mix of answers.
        let formula = random_formula(&mut rng, VARIABLES, 52);

        let (mut context, ok) = context_over(VARIABLES as u32, &formula);
        let report = match ok {
            true => context.solve(),
            false => Report::Unsatisfiable,
        };

        match report {
            Report::Satisfiable => {
                assert!(model_satisfies(&context, &formula), "seed {seed}");
            }
            Report::Unsatisfiable => {
                assert!(
                    !brute_force_satisfiable(VARIABLES, &formula),
                    "seed {seed}"
                );
            }
            Report::Unknown => panic!("no answer for seed {seed}"),
        }
    }
}

#[test]
fn planted_instances_are_satisfied() {
    const VARIABLES: i32 = 120;

    let mut rng = Mt19937::seed_from_u64(23);
    let hidden: Vec<bool> = (0..VARIABLES).map(|_| rng.gen_range(0..2) == 0).collect();

    // As generated, each clause agrees with the hidden assignment somewhere.
    let mut formula = random_formula(&mut rng, VARIABLES, 480);
    for clause in &mut formula {
        let agrees = clause
            .iter()
            .any(|l| hidden[(l.unsigned_abs() - 1) as usize] == (*l > 0));
        if !agrees {
            let variable = clause[0].unsigned_abs();
            clause[0] = match hidden[(variable - 1) as usize] {
                true => variable as i32,
                false => -(variable as i32),
            };
        }
    }

    let (mut context, ok) = context_over(VARIABLES as u32, &formula);
    assert!(ok);
    assert_eq!(context.solve(), Report::Satisfiable);
    assert!(model_satisfies(&context, &formula));
}

#[test]
fn random_solves_are_reproducible() {
    let mut rng = Mt19937::seed_from_u64(3);
    let formula = random_formula(&mut rng, 40, 170);

    let (mut first, first_ok) = context_over(40, &formula);
    let (mut second, second_ok) = context_over(40, &formula);
    assert_eq!(first_ok, second_ok);

    assert_eq!(first.solve(), second.solve());
    assert_eq!(first.statistics(), second.statistics());
    assert_eq!(first.model(), second.model());
}
