use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dockbar"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute dockbar");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dockable shell bar"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dockbar"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute dockbar");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dockbar"));
}

#[test]
fn help_hides_daemon_subcommand() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dockbar"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute dockbar");

    // Assert
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("peek"));
    assert!(
        !stdout
            .lines()
            .any(|line| line.trim_start().starts_with("daemon"))
    );
}

#[test]
fn mode_rejects_unknown_value() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dockbar"));
    cmd.args(["mode", "sideways"]);

    // Act
    let output = cmd.output().expect("failed to execute dockbar");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("autohide"));
}
