//! Compute device selection

use std::fmt;

/// A compute device the probe's buffers are placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Device {
    /// Host CPU.
    Cpu,
    /// CUDA device with the given ordinal.
    Cuda(usize),
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(id) => write!(f, "cuda:{id}"),
        }
    }
}

/// Whether a CUDA device is available in this build.
///
/// This build carries no GPU backend, so the answer is always `false`;
/// `select_device` then resolves every request to the CPU. The selection
/// policy stays in one place so a GPU backend only has to change this probe.
#[must_use]
pub fn cuda_available() -> bool {
    false
}

/// Resolve the compute device for one evaluation call.
///
/// Honors `use_gpu` when a CUDA device is present; otherwise falls back to
/// the CPU with a debug note. Deterministic given `use_gpu` and the ambient
/// hardware.
#[must_use]
pub fn select_device(use_gpu: bool) -> Device {
    if use_gpu {
        if cuda_available() {
            return Device::Cuda(0);
        }
        log::debug!("GPU requested but no CUDA device available, using CPU");
    }
    Device::Cpu
}
