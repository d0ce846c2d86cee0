use std::collections::HashSet;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use handwrite_diff::{DiffConfig, DiffKind, DiffOp, WordDifferBuilder};
use libtest_mimic::{Arguments, Failed, Trial};
use rand::prelude::SliceRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

const DEFAULT_SAMPLE_SIZE: usize = 200;
const DEFAULT_SAMPLE_SEED: u64 = 42;
const SUITE_NAME: &str = "word_diff_matches_reference_cases";

#[derive(Debug, Deserialize)]
struct DiffCase {
    id: String,
    hypothesis: String,
    reference: String,
    #[serde(default)]
    number_equivalence: Option<bool>,
    expected: Vec<ExpectedOp>,
}

#[derive(Debug, Deserialize)]
struct ExpectedOp {
    kind: DiffKind,
    #[serde(default)]
    hypothesis: Option<String>,
    #[serde(default)]
    reference: Option<String>,
}

fn main() {
    let args = Arguments::from_args();

    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_mode = env_flag("HANDWRITE_DIFF_IT_FULL");
    let sample_seed = env_u64("HANDWRITE_DIFF_IT_SEED", DEFAULT_SAMPLE_SEED);

    let cases = match load_cases(&repo_root.join("test-data").join("diff_cases.json")) {
        Ok(cases) => cases,
        Err(err) => {
            run_setup_failure(&args, err);
            return;
        }
    };
    if cases.is_empty() {
        run_setup_failure(&args, "No cases found in test-data/diff_cases.json.".to_string());
        return;
    }

    let sampled_ids = select_case_ids(&cases, full_mode, sample_seed);
    let mut tests = Vec::with_capacity(cases.len());
    for case in cases {
        let test_name = format!("{SUITE_NAME}::{}", case.id);
        let should_ignore = !sampled_ids.contains(&case.id);
        tests.push(
            Trial::test(test_name, move || run_case(&case).map_err(Failed::from))
                .with_ignored_flag(should_ignore),
        );
    }

    libtest_mimic::run(&args, tests).exit();
}

fn run_setup_failure(args: &Arguments, message: String) {
    let test = Trial::test(format!("{SUITE_NAME}::setup"), move || {
        Err(Failed::from(message))
    });
    libtest_mimic::run(args, vec![test]).exit();
}

fn run_case(case: &DiffCase) -> Result<(), String> {
    let mut config = DiffConfig::default();
    if let Some(number_equivalence) = case.number_equivalence {
        config.number_equivalence = number_equivalence;
    }
    let differ = WordDifferBuilder::new(config).build();
    let ops = differ.diff_text(&case.hypothesis, &case.reference);
    compare_ops(case, &ops)
}

fn compare_ops(case: &DiffCase, observed: &[DiffOp]) -> Result<(), String> {
    if observed.len() != case.expected.len() {
        return Err(format!(
            "{}: op count mismatch (expected {}, got {}): {}",
            case.id,
            case.expected.len(),
            observed.len(),
            describe(observed)
        ));
    }

    for (idx, (op, expected)) in observed.iter().zip(&case.expected).enumerate() {
        if op.kind != expected.kind
            || op.hypothesis_word != expected.hypothesis
            || op.reference_word != expected.reference
        {
            return Err(format!(
                "{}: op {idx} expected {} {:?}/{:?}, got {}",
                case.id,
                expected.kind.as_str(),
                expected.hypothesis,
                expected.reference,
                describe(observed)
            ));
        }
    }
    Ok(())
}

fn describe(ops: &[DiffOp]) -> String {
    ops.iter()
        .map(|op| {
            format!(
                "{}({}/{})",
                op.kind.as_str(),
                op.hypothesis_word.as_deref().unwrap_or("-"),
                op.reference_word.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn load_cases(path: &Path) -> Result<Vec<DiffCase>, String> {
    let file = File::open(path)
        .map_err(|err| format!("Failed to open fixture '{}': {err}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Failed to parse fixture '{}': {err}", path.display()))
}

fn select_case_ids(cases: &[DiffCase], full_mode: bool, seed: u64) -> HashSet<String> {
    if full_mode || cases.len() <= DEFAULT_SAMPLE_SIZE {
        return cases.iter().map(|case| case.id.clone()).collect();
    }

    let mut indices: Vec<usize> = (0..cases.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
        .into_iter()
        .take(DEFAULT_SAMPLE_SIZE)
        .map(|idx| cases[idx].id.clone())
        .collect()
}

fn env_flag(name: &str) -> bool {
    match env::var(name) {
        Ok(value) => matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => false,
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or_else(|err| {
            panic!("Invalid value for {name}='{value}' (expected u64): {err}")
        }),
        Err(_) => default,
    }
}
