use crate::cli::CompareArgs;
use crate::config::PartialCompareConfig;
use crate::error::Result;
use mdcheck::workflows::compare::{self, SourceSpec};
use tracing::info;

pub fn run(args: CompareArgs) -> Result<()> {
    let partial_config = PartialCompareConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let source_a = config.a.source();
    let source_b = config.b.source();
    let spec_a = SourceSpec::new(&source_a, &config.a.term_map);
    let spec_b = SourceSpec::new(&source_b, &config.b.term_map);

    info!("Invoking the comparison workflow...");
    let report = compare::run(&spec_a, &spec_b, &config.comparison)?;

    print!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::error::CliError;
    use clap::Parser;
    use mdcheck::engine::error::ComparisonError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn args_for(dir: &Path, extra: &[&str]) -> CompareArgs {
        let a = dir.join("charmm.toml");
        let b = dir.join("openmm.csv");
        let mut argv = vec![
            "mdcheck".to_string(),
            "compare".to_string(),
            "--energies-a".to_string(),
            a.to_string_lossy().into_owned(),
            "--energies-b".to_string(),
            b.to_string_lossy().into_owned(),
            "--map-a".to_string(),
            "charmm".to_string(),
            "--map-b".to_string(),
            "openmm".to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        match Cli::parse_from(argv).command {
            Commands::Compare(args) => args,
            other => panic!("Expected 'compare' subcommand, got {other:?}"),
        }
    }

    fn write_inputs(dir: &Path, reported_total: f64) {
        fs::write(
            dir.join("charmm.toml"),
            format!(
                r#"
                unit = "kcal/mol"

                [[term]]
                label = "ENERgy"
                value = {reported_total}

                [[term]]
                label = "BONDs"
                value = 1.0

                [[term]]
                label = "ANGLes"
                value = 2.0
                "#
            ),
        )
        .unwrap();
        fs::write(
            dir.join("openmm.csv"),
            "label,value\nHarmonicBondForce,4.184\nHarmonicAngleForce,8.368\n",
        )
        .unwrap();
    }

    #[test]
    fn consistent_inputs_compare_successfully() {
        let dir = tempdir().unwrap();
        write_inputs(dir.path(), 3.0);
        let args = args_for(dir.path(), &["--strict-total", "--total"]);
        assert!(run(args).is_ok());
    }

    #[test]
    fn strict_total_mismatch_fails_the_command() {
        let dir = tempdir().unwrap();
        write_inputs(dir.path(), 4.0);
        let args = args_for(dir.path(), &["--strict-total"]);
        let result = run(args);
        assert!(matches!(
            result,
            Err(CliError::Comparison(ComparisonError::TotalMismatch(_)))
        ));
    }

    #[test]
    fn advisory_total_mismatch_still_succeeds() {
        let dir = tempdir().unwrap();
        write_inputs(dir.path(), 4.0);
        let args = args_for(dir.path(), &[]);
        assert!(run(args).is_ok());
    }

    #[test]
    fn missing_energy_file_is_reported() {
        let dir = tempdir().unwrap();
        let args = args_for(dir.path(), &[]);
        let result = run(args);
        assert!(matches!(result, Err(CliError::Comparison(ComparisonError::Source(_)))));
    }
}
