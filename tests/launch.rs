//! Viewer launch tests.

use std::path::PathBuf;

use framepick::{FramepickError, ViewerCommand, launch_all};

#[test]
fn missing_program_is_a_launch_error() {
    let viewer = ViewerCommand::new("framepick-no-such-viewer-program");
    let error = viewer.spawn(&PathBuf::from("input.ppm")).unwrap_err();

    match error {
        FramepickError::Launch { program, .. } => {
            assert_eq!(program, "framepick-no-such-viewer-program")
        }
        other => panic!("expected Launch, got {other:?}"),
    }
}

#[test]
fn launch_all_attempts_every_path() {
    let viewer = ViewerCommand::new("framepick-no-such-viewer-program");
    let paths = vec![PathBuf::from("input.ppm"), PathBuf::from("input.pgm")];

    let outcomes = launch_all(&viewer, &paths);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].path, paths[0]);
    assert_eq!(outcomes[1].path, paths[1]);
    assert!(outcomes.iter().all(|outcome| !outcome.is_ok()));
}

#[cfg(unix)]
#[test]
fn spawn_does_not_wait_for_the_viewer() {
    use std::time::{Duration, Instant};

    let viewer = ViewerCommand::new("sleep");
    let started = Instant::now();
    // `sleep 5`: the path is the last argument.
    let pid = viewer.spawn(&PathBuf::from("5")).unwrap();

    assert!(pid > 0);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn system_default_is_platform_opener() {
    let viewer = ViewerCommand::system_default();
    let program = viewer.program().to_string_lossy().into_owned();
    assert!(["cmd", "open", "xdg-open"].contains(&program.as_str()));
    assert_eq!(ViewerCommand::default(), viewer);
}
