//! Integration tests for the `run` command.
use mgcost::cli::{RunOpts, handle_run_command};
use mgcost::settings::Settings;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Get the path to the example model.
fn get_model_dir() -> PathBuf {
    PathBuf::from("models/simple")
}

/// Options for writing to the specified output directory
fn opts_for(output_dir: PathBuf) -> RunOpts {
    RunOpts {
        output_dir: Some(output_dir),
        ..RunOpts::default()
    }
}

/// An integration test for the `run` command.
#[test]
fn test_handle_run_command() {
    unsafe { std::env::set_var("MGCOST_LOG_LEVEL", "off") };

    let tempdir = tempdir().unwrap();
    {
        // Save results to non-existent directory to check that directory creation works
        let output_dir = tempdir.path().join("results");
        let opts = RunOpts {
            digits: Some(2),
            ..opts_for(output_dir.clone())
        };
        handle_run_command(&get_model_dir(), &opts, Some(Settings::default())).unwrap();

        let costs = fs::read_to_string(output_dir.join("costs.csv")).unwrap();
        let mut lines = costs.lines();
        assert_eq!(
            lines.next(),
            Some("component,kind,total,investment,replacement,om,fuel,salvage")
        );
        assert_eq!(lines.count(), 5);
        assert!(costs.contains("\nsystem,,19383180.95,"));

        let summary = fs::read_to_string(output_dir.join("summary.toml")).unwrap();
        assert!(summary.contains("npc = 19383180.95"));
        assert!(summary.contains("lcoe = 0.25"));

        assert!(output_dir.join("mgcost_info.log").is_file());
        assert!(output_dir.join("mgcost_error.log").is_file());
    }

    // Second time will fail because the logging is already initialised
    let output_dir = tempdir.path().join("results2");
    assert_eq!(
        handle_run_command(
            &get_model_dir(),
            &opts_for(output_dir),
            Some(Settings::default())
        )
        .unwrap_err()
        .chain()
        .next()
        .unwrap()
        .to_string(),
        "Failed to initialise logging."
    );

    // Output directory with data in it is not overwritten without the option
    let output_dir = tempdir.path().join("results");
    assert!(
        handle_run_command(
            &get_model_dir(),
            &opts_for(output_dir),
            Some(Settings::default())
        )
        .unwrap_err()
        .chain()
        .next()
        .unwrap()
        .to_string()
        .starts_with("Failed to create output directory")
    );
}
