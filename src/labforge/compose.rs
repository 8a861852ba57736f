use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

use super::kernel::{Kernel, UnknownKernelError, DEFAULT_KERNELS};
use super::templates::TEMPLATE_DOCKERFILE;

// Baseline packages every generated image gets.
pub static GENERIC_DEPS: &[&str] = &[
    "build-essential",
    "ca-certificates",
    "curl",
    "wget",
    "git",
    "gnupg",
    "libcurl4-openssl-dev",
    "libffi-dev",
    "libsqlite3-dev",
    "libzmq3-dev",
    "python3",
    "python3-venv",
    "python3-dev",
    "python3-pip",
    "python3-setuptools",
    "zlib1g-dev",
    "autoconf",
    "libgmp-dev",
    "pkg-config",
    "libssh2-1-dev",
    "libssl-dev",
];

// Shared toolchain packages for the Lisp-based kernels, pulled in once if
// any selected kernel needs them.
pub static LISP_DEPS: &[&str] = &["sbcl", "cl-quicklisp", "cl-asdf"];

// BuildSpec is everything the CLI resolved for one run.
#[derive(Debug, Clone)]
pub struct BuildSpec {
    pub kernels: Vec<String>,
    pub ubuntu_version: String,
    pub output: PathBuf,
    pub build: bool,
    pub tag: String,
}

// Resolves the requested kernel names, in order, duplicates included.
// An empty selection means the default set. Fails on the first unknown
// name, before anything is rendered.
pub fn resolve_kernels(names: &[String]) -> Result<Vec<Kernel>, UnknownKernelError> {
    if names.is_empty() {
        return Ok(DEFAULT_KERNELS.to_vec());
    }
    names.iter().map(|name| Kernel::lookup(name)).collect()
}

#[derive(Serialize)]
struct EnvVar {
    name: &'static str,
    value: &'static str,
}

// Later kernels win on a name collision; first-insertion order is kept.
fn collect_environment(kernels: &[Kernel]) -> Vec<EnvVar> {
    let mut environment: Vec<EnvVar> = Vec::new();
    for kernel in kernels {
        for &(name, value) in kernel.environment() {
            match environment.iter_mut().find(|var| var.name == name) {
                Some(var) => var.value = value,
                None => environment.push(EnvVar { name, value }),
            }
        }
    }
    environment
}

fn need_lisp(kernels: &[Kernel]) -> bool {
    kernels.iter().any(|kernel| kernel.needs_lisp())
}

// Union of the generic baseline, the Lisp toolchain (when needed) and each
// kernel's own packages. BTreeSet so the install line comes out sorted and
// the output is reproducible.
fn collect_deps(kernels: &[Kernel]) -> BTreeSet<&'static str> {
    let mut deps: BTreeSet<&'static str> = GENERIC_DEPS.iter().copied().collect();
    if need_lisp(kernels) {
        deps.extend(LISP_DEPS.iter().copied());
    }
    for kernel in kernels {
        deps.extend(kernel.dependencies().iter().copied());
    }
    deps
}

fn apt_packages(deps: &BTreeSet<&str>) -> String {
    deps.iter().copied().collect::<Vec<&str>>().join(" \\\n    ")
}

// Renders the full Dockerfile text. Pure: no filesystem or network access,
// the same spec always yields the same bytes.
pub fn compose(spec: &BuildSpec) -> Result<String> {
    let kernels = resolve_kernels(&spec.kernels)?;

    let mut handlebars = Handlebars::new();
    handlebars.register_template_string("Dockerfile", TEMPLATE_DOCKERFILE)?;

    #[derive(Serialize)]
    struct Data {
        ubuntu_version: String,
        environment: Vec<EnvVar>,
        apt_packages: String,
        need_lisp: bool,
        kernel_installs: Vec<String>,
    }

    let deps = collect_deps(&kernels);
    let d = Data {
        ubuntu_version: spec.ubuntu_version.clone(),
        environment: collect_environment(&kernels),
        apt_packages: apt_packages(&deps),
        need_lisp: need_lisp(&kernels),
        kernel_installs: kernels
            .iter()
            .map(|kernel| kernel.install_fragment().to_string())
            .collect(),
    };

    Ok(handlebars.render("Dockerfile", &d)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_for(kernels: &[&str]) -> BuildSpec {
        BuildSpec {
            kernels: kernels.iter().map(|name| name.to_string()).collect(),
            ubuntu_version: "24.04".to_string(),
            output: PathBuf::from("Dockerfile.jupyter"),
            build: false,
            tag: "jupyter".to_string(),
        }
    }

    #[test]
    fn test_resolve_kernels_empty_is_default() {
        let kernels = resolve_kernels(&[]).unwrap();
        assert_eq!(kernels, vec![Kernel::Python, Kernel::Octave]);
    }

    #[test]
    fn test_resolve_kernels_preserves_order() {
        let names = vec!["java".to_string(), "r".to_string(), "python".to_string()];
        let kernels = resolve_kernels(&names).unwrap();
        assert_eq!(kernels, vec![Kernel::Java, Kernel::R, Kernel::Python]);
    }

    #[test]
    fn test_resolve_kernels_allows_duplicates() {
        let names = vec!["python".to_string(), "python".to_string()];
        let kernels = resolve_kernels(&names).unwrap();
        assert_eq!(kernels, vec![Kernel::Python, Kernel::Python]);
    }

    #[test]
    fn test_resolve_kernels_fails_on_invalid_name_among_valid() {
        let names = vec![
            "python".to_string(),
            "cobol".to_string(),
            "octave".to_string(),
        ];
        let err = resolve_kernels(&names).unwrap_err();
        assert_eq!(err, UnknownKernelError("cobol".to_string()));
    }

    #[test]
    fn test_collect_deps_always_contains_generic_baseline() {
        for selection in [vec![Kernel::Python], vec![Kernel::Java, Kernel::R]] {
            let deps = collect_deps(&selection);
            for dep in GENERIC_DEPS {
                assert!(deps.contains(dep), "missing baseline package {}", dep);
            }
        }
    }

    #[test]
    fn test_collect_deps_lisp_superset_for_lisp_kernels() {
        for kernel in [Kernel::Fricas, Kernel::Maxima, Kernel::Haskell] {
            let deps = collect_deps(&[kernel]);
            for dep in LISP_DEPS {
                assert!(deps.contains(dep), "{:?} should pull in {}", kernel, dep);
            }
        }
    }

    #[test]
    fn test_collect_deps_no_lisp_for_python() {
        let deps = collect_deps(&[Kernel::Python]);
        for dep in LISP_DEPS {
            assert!(!deps.contains(dep));
        }
    }

    #[test]
    fn test_collect_deps_dedup() {
        // libzmq3-dev is in the baseline and in haskell's own set.
        let deps = collect_deps(&[Kernel::Haskell]);
        assert_eq!(deps.iter().filter(|d| **d == "libzmq3-dev").count(), 1);
    }

    #[test]
    fn test_collect_environment_insertion_order() {
        let environment = collect_environment(&[Kernel::Maxima, Kernel::Julia]);
        let names: Vec<&str> = environment.iter().map(|var| var.name).collect();
        assert_eq!(
            names,
            vec!["MAXIMA_VERSION", "JULIA_MAJOR_VERSION", "JULIA_VERSION"]
        );
    }

    #[test]
    fn test_apt_packages_sorted_join() {
        let deps: BTreeSet<&str> = ["wget", "curl", "git"].into_iter().collect();
        assert_eq!(apt_packages(&deps), "curl \\\n    git \\\n    wget");
    }

    #[test]
    fn test_compose_default_selection() {
        let dockerfile = compose(&spec_for(&[])).unwrap();
        assert!(dockerfile.contains("FROM ubuntu:24.04"));
        assert!(dockerfile.contains("ipykernel"));
        assert!(dockerfile.contains("octave_kernel"));
        assert!(!dockerfile.contains("ENV SBCL_VERSION"));
    }

    #[test]
    fn test_compose_java_selection() {
        let dockerfile = compose(&spec_for(&["java"])).unwrap();
        assert!(dockerfile.contains("FROM ubuntu:24.04"));
        assert!(dockerfile.contains("openjdk-17-jdk-headless"));
        assert!(dockerfile.contains("ganymede.jar"));
        assert!(!dockerfile.contains("ENV SBCL_VERSION"));
    }

    #[test]
    fn test_compose_maxima_selection_has_lisp_block() {
        let dockerfile = compose(&spec_for(&["maxima"])).unwrap();
        assert!(dockerfile.contains("ENV MAXIMA_VERSION 5.47.0"));
        assert!(dockerfile.contains("ENV SBCL_VERSION 2.5.0"));
        assert!(dockerfile.contains("sbcl"));
        assert!(dockerfile.contains("maxima -b /usr/src/install.maxima"));
    }

    #[test]
    fn test_compose_fragments_in_selection_order() {
        let dockerfile = compose(&spec_for(&["r", "java"])).unwrap();
        let r_at = dockerfile.find("install.R").unwrap();
        let java_at = dockerfile.find("ganymede.jar").unwrap();
        assert!(r_at < java_at);
    }

    #[test]
    fn test_compose_ubuntu_version_lands_in_from_line() {
        let mut spec = spec_for(&[]);
        spec.ubuntu_version = "22.04".to_string();
        let dockerfile = compose(&spec).unwrap();
        assert!(dockerfile.contains("FROM ubuntu:22.04"));
    }

    #[test]
    fn test_compose_is_idempotent() {
        let spec = spec_for(&["haskell", "julia"]);
        assert_eq!(compose(&spec).unwrap(), compose(&spec).unwrap());
    }

    #[test]
    fn test_compose_unknown_kernel_fails() {
        let result = compose(&spec_for(&["python", "brainfuck"]));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown kernel: brainfuck"));
    }

    #[test]
    fn test_compose_trailer_present() {
        let dockerfile = compose(&spec_for(&[])).unwrap();
        assert!(dockerfile.contains("EXPOSE 8888"));
        assert!(dockerfile.contains("ENTRYPOINT [\"/tini\", \"--\"]"));
        assert!(dockerfile.contains("CMD [\"jupyter\", \"lab\", \"--no-browser\", \"--allow-root\"]"));
    }
}
