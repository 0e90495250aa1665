//! Round trips through /bin/sh against fake `al`/`alc` executables

#![cfg(unix)]

use bcdev_al::command::{ShellKind, build_args_for};
use bcdev_al::{AlCommand, AlCompilerAdapter, CompileRequest, ShellRunner, ToolchainInfo};
use bcdev_testkit::{legacy_alc_body, modern_al_body, temp_dir_in_workspace, write_fake_executable};
use std::sync::Arc;

fn adapter_for(dir: &std::path::Path) -> AlCompilerAdapter {
    let runner = ShellRunner::with_search_path([dir]).unwrap();
    AlCompilerAdapter::new(Arc::new(runner))
}

#[test]
fn test_modern_help_exit_one_with_banner_is_detected() {
    let temp = temp_dir_in_workspace();
    write_fake_executable(temp.path(), "al", &modern_al_body("16.0.24.41895"));

    let adapter = adapter_for(temp.path());
    let info = adapter.initialize();

    assert_eq!(
        info,
        &ToolchainInfo::found(AlCommand::Modern, Some("16.0.24.41895".to_string()))
    );
}

#[test]
fn test_legacy_detected_when_modern_missing() {
    let temp = temp_dir_in_workspace();
    write_fake_executable(
        temp.path(),
        "alc",
        &legacy_alc_body("15.0.0.0", "error AL1022: project not found"),
    );

    let adapter = adapter_for(temp.path());
    let info = adapter.initialize();

    assert_eq!(info.command, AlCommand::Legacy);
    assert_eq!(info.version.as_deref(), Some("15.0.0.0"));
    assert!(info.available);
}

#[test]
fn test_empty_search_dir_finds_nothing() {
    let temp = temp_dir_in_workspace();

    let adapter = adapter_for(temp.path());
    assert_eq!(adapter.initialize(), &ToolchainInfo::unavailable());

    let verdict = adapter.compile(&CompileRequest::new("/work/app"));
    assert!(!verdict.success);
    assert_eq!(verdict.errors.map(|e| e.len()), Some(1));
}

#[test]
fn test_paths_with_spaces_survive_the_shell() {
    let temp = temp_dir_in_workspace();
    write_fake_executable(temp.path(), "al", &modern_al_body("16.0.24.41895"));

    let adapter = adapter_for(temp.path());
    adapter.initialize();

    let request = CompileRequest::new("/work/My Project")
        .package_cache_path("/work/My Project/.alpackages")
        .output_path("/out/My App.app")
        .assembly_probing_paths(["/probe one", "/probe two"]);
    let verdict = adapter.compile(&request);

    assert!(verdict.success, "{:?}", verdict);
    let tokens: Vec<&str> = verdict.output.lines().collect();
    assert_eq!(
        tokens,
        vec![
            "/project:/work/My Project",
            "/packagecachepath:/work/My Project/.alpackages",
            "/out:/out/My App.app",
            "/assemblyprobingpaths:/probe one;/probe two",
        ]
    );
}

#[test]
fn test_shell_metacharacters_are_not_expanded() {
    let temp = temp_dir_in_workspace();
    write_fake_executable(temp.path(), "al", &modern_al_body("16.0.24.41895"));

    let adapter = adapter_for(temp.path());
    adapter.initialize();

    let tricky = r#"/work/$HOME/`id`/"quoted"\dir"#;
    let verdict = adapter.compile(&CompileRequest::new(tricky));

    assert!(verdict.success);
    assert_eq!(verdict.output.trim_end(), format!("/project:{tricky}"));
}

#[test]
fn test_build_args_match_what_the_shell_delivers() {
    let temp = temp_dir_in_workspace();
    write_fake_executable(temp.path(), "al", &modern_al_body("16.0.24.41895"));
    let runner = ShellRunner::with_search_path([temp.path()]).unwrap();

    let request = CompileRequest::new("/a b/c");
    let mut args = vec!["compile".to_string()];
    args.extend(build_args_for(&request, ShellKind::Posix));

    match bcdev_al::ProcessRunner::run(&runner, "al", &args) {
        bcdev_al::LaunchOutcome::Exited(output) => {
            assert!(output.success());
            assert_eq!(output.stdout, "/project:/a b/c\n");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_compile_failure_reports_stderr_diagnostics() {
    let temp = temp_dir_in_workspace();
    write_fake_executable(
        temp.path(),
        "alc",
        &legacy_alc_body("15.0.0.0", "Error: Syntax error in line 10"),
    );

    let adapter = adapter_for(temp.path());
    adapter.initialize();
    let verdict = adapter.compile(&CompileRequest::new("/work/app"));

    assert!(!verdict.success);
    assert!(verdict.output.contains("Error: Syntax error in line 10"));
    assert_eq!(
        verdict.errors,
        Some(vec!["Error: Syntax error in line 10".to_string()])
    );
}

#[test]
fn test_removed_executable_after_detection_is_launch_failure() {
    let temp = temp_dir_in_workspace();
    let al = write_fake_executable(temp.path(), "al", &modern_al_body("16.0.24.41895"));

    let adapter = adapter_for(temp.path());
    assert!(adapter.initialize().available);
    std::fs::remove_file(al).unwrap();

    let verdict = adapter.compile(&CompileRequest::new("/work/app"));
    assert!(!verdict.success);
    assert_eq!(verdict.output, bcdev_al::verdict::NOT_IN_PATH_OUTPUT);
    assert_eq!(
        verdict.errors,
        Some(vec![bcdev_al::verdict::NOT_IN_PATH_ERROR.to_string()])
    );
}

#[test]
fn test_legacy_help_arg_reaches_alc_literally() {
    let temp = temp_dir_in_workspace();
    write_fake_executable(temp.path(), "alc", r#"printf '%s\n' "$@""#);
    let runner = ShellRunner::with_search_path([temp.path()]).unwrap();

    let args: Vec<String> = AlCommand::Legacy
        .probe_args()
        .iter()
        .map(|a| a.to_string())
        .collect();
    match bcdev_al::ProcessRunner::run(&runner, "alc", &args) {
        bcdev_al::LaunchOutcome::Exited(output) => assert_eq!(output.stdout, "/?\n"),
        other => panic!("unexpected outcome: {:?}", other),
    }
}
