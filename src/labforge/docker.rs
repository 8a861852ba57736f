use std::path::Path;

use anyhow::Result;
use log::debug;
use subprocess::{Popen, PopenConfig, Redirection};

// Probes an engine by listing containers; a missing binary or a dead daemon
// both count as unavailable.
fn check_executor(executor: &str) -> Result<()> {
    let mut p = Popen::create(
        &[executor, "ps"],
        PopenConfig {
            stdout: Redirection::Pipe,
            stderr: Redirection::Pipe,
            ..Default::default()
        },
    )?;
    match p.wait_timeout(std::time::Duration::from_secs(5))? {
        Some(status) if status.success() => Ok(()),
        _ => Err(anyhow::anyhow!("{} is not available", executor)),
    }
}

pub fn get_docker_executor() -> Result<String> {
    if check_executor("docker").is_ok() {
        return Ok("docker".to_string());
    } else if check_executor("podman").is_ok() {
        return Ok("podman".to_string());
    }
    Err(anyhow::anyhow!("Docker or Podman not found."))
}

// The build context is the directory holding the Dockerfile.
fn build_context(dockerfile: &Path) -> String {
    match dockerfile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
        _ => ".".to_string(),
    }
}

fn build_command(executor: &str, dockerfile: &Path, tag: &str) -> Vec<String> {
    vec![
        executor.to_string(),
        "build".to_string(),
        "-t".to_string(),
        tag.to_string(),
        "-f".to_string(),
        dockerfile.display().to_string(),
        build_context(dockerfile),
    ]
}

// Runs the container build synchronously, streaming the engine's own
// output, and propagates a non-zero exit as a fatal error. The generated
// Dockerfile stays on disk either way.
pub fn build(dockerfile: &Path, tag: &str) -> Result<()> {
    let executor = get_docker_executor()?;
    let command = build_command(&executor, dockerfile, tag);
    println!("Running: {}", command.join(" "));
    debug!("Build command: {:?}", command);

    let argv: Vec<&str> = command.iter().map(|arg| arg.as_str()).collect();
    let mut p = Popen::create(argv.as_slice(), PopenConfig::default())?;
    let status = p.wait()?;
    if !status.success() {
        return Err(anyhow::anyhow!(
            "Container build failed with status {:?}",
            status
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_context_bare_filename() {
        assert_eq!(build_context(Path::new("Dockerfile.jupyter")), ".");
    }

    #[test]
    fn test_build_context_with_directory() {
        assert_eq!(
            build_context(Path::new("/tmp/images/Dockerfile.jupyter")),
            "/tmp/images"
        );
    }

    #[test]
    fn test_build_command_shape() {
        let command = build_command("docker", &PathBuf::from("Dockerfile.jupyter"), "jupyter");
        assert_eq!(
            command,
            vec![
                "docker",
                "build",
                "-t",
                "jupyter",
                "-f",
                "Dockerfile.jupyter",
                "."
            ]
        );
    }

    #[test]
    fn test_build_command_with_podman_and_path() {
        let command = build_command(
            "podman",
            &PathBuf::from("/tmp/out/Dockerfile.jupyter"),
            "lab:latest",
        );
        assert_eq!(
            command,
            vec![
                "podman",
                "build",
                "-t",
                "lab:latest",
                "-f",
                "/tmp/out/Dockerfile.jupyter",
                "/tmp/out"
            ]
        );
    }
}
