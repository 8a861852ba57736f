use thiserror::Error;

use super::templates;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown kernel: {0}")]
pub struct UnknownKernelError(pub String);

// Kernel is the closed set of notebook kernels the generated image can carry.
// Each variant owns its environment variables, extra OS packages, install
// fragment and the flag for the shared Lisp toolchain prerequisite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Python,
    Octave,
    Fricas,
    Maxima,
    Haskell,
    Julia,
    R,
    Java,
}

// Declaration order is the order `--list-kernels` reports.
pub const KNOWN_KERNELS: [Kernel; 8] = [
    Kernel::Python,
    Kernel::Octave,
    Kernel::Fricas,
    Kernel::Maxima,
    Kernel::Haskell,
    Kernel::Julia,
    Kernel::R,
    Kernel::Java,
];

pub const DEFAULT_KERNELS: [Kernel; 2] = [Kernel::Python, Kernel::Octave];

impl Kernel {
    pub fn name(self) -> &'static str {
        match self {
            Kernel::Python => "python",
            Kernel::Octave => "octave",
            Kernel::Fricas => "fricas",
            Kernel::Maxima => "maxima",
            Kernel::Haskell => "haskell",
            Kernel::Julia => "julia",
            Kernel::R => "r",
            Kernel::Java => "java",
        }
    }

    pub fn lookup(name: &str) -> Result<Self, UnknownKernelError> {
        KNOWN_KERNELS
            .iter()
            .copied()
            .find(|kernel| kernel.name() == name)
            .ok_or_else(|| UnknownKernelError(name.to_string()))
    }

    // Environment variables the install fragment relies on, in declaration
    // order. Most kernels have none.
    pub fn environment(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Kernel::Maxima => &[("MAXIMA_VERSION", "5.47.0")],
            Kernel::Julia => &[
                ("JULIA_MAJOR_VERSION", "1.11"),
                ("JULIA_VERSION", "1.11.2"),
            ],
            _ => &[],
        }
    }

    // Extra OS packages on top of the generic baseline.
    pub fn dependencies(self) -> &'static [&'static str] {
        match self {
            Kernel::Octave => &["octave", "gnuplot-nox"],
            Kernel::Haskell => &[
                "libtinfo-dev",
                "libzmq3-dev",
                "libcairo2-dev",
                "libpango1.0-dev",
                "haskell-stack",
                "libmagic-dev",
                "libgsl-dev",
                "libblas-dev",
                "liblapack-dev",
            ],
            Kernel::R => &[
                "r-recommended",
                "r-cran-ggplot2",
                "r-cran-repr",
                "r-cran-pbdzmq",
                "r-cran-devtools",
            ],
            Kernel::Java => &["openjdk-17-jdk-headless"],
            _ => &[],
        }
    }

    pub fn needs_lisp(self) -> bool {
        matches!(self, Kernel::Fricas | Kernel::Maxima | Kernel::Haskell)
    }

    // The fragment assumes the generic toolchain (and the Lisp toolchain,
    // where flagged) is already installed, with a Python venv at /python.
    pub fn install_fragment(self) -> &'static str {
        match self {
            Kernel::Python => templates::PYTHON_INSTALL,
            Kernel::Octave => templates::OCTAVE_INSTALL,
            Kernel::Fricas => templates::FRICAS_INSTALL,
            Kernel::Maxima => templates::MAXIMA_INSTALL,
            Kernel::Haskell => templates::HASKELL_INSTALL,
            Kernel::Julia => templates::JULIA_INSTALL,
            Kernel::R => templates::R_INSTALL,
            Kernel::Java => templates::JAVA_INSTALL,
        }
    }
}

pub fn kernel_names() -> Vec<&'static str> {
    KNOWN_KERNELS.iter().map(|kernel| kernel.name()).collect()
}
