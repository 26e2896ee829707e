use crate::utils::Logger;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

static INSTALLED: AtomicBool = AtomicBool::new(false);
// Process group of the running pipeline, 0 when none
static PIPELINE_GROUP: AtomicU32 = AtomicU32::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

/// Process-wide SIGINT/SIGTERM handling. A triggered handler passes the
/// signal on to the pipeline process group, then exits the process with
/// status 0 without touching in-flight build state.
pub struct SignalManager;

impl SignalManager {
    /// Install the exit-on-signal handlers. Must be called inside a tokio
    /// runtime. Returns `Ok(false)` if handlers were already installed.
    pub fn install() -> std::io::Result<bool> {
        Self::install_with(|signal| {
            Logger::debug(&format!("Received {:?}, exiting", signal));
            Self::forward_to_pipeline(signal);
            std::process::exit(0);
        })
    }

    /// Install handlers that run `on_signal` for every delivered signal.
    /// Only the first successful installation in a process takes effect;
    /// handlers stay registered for the rest of the process lifetime.
    pub fn install_with<F>(on_signal: F) -> std::io::Result<bool>
    where
        F: Fn(ShutdownSignal) + Send + 'static,
    {
        if INSTALLED.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }

        if let Err(e) = listen(on_signal) {
            INSTALLED.store(false, Ordering::SeqCst);
            return Err(e);
        }

        Ok(true)
    }

    pub fn is_installed() -> bool {
        INSTALLED.load(Ordering::SeqCst)
    }

    /// Record the pipeline child. It must lead its own process group.
    pub fn track_pipeline(pid: u32) {
        PIPELINE_GROUP.store(pid, Ordering::SeqCst);
    }

    pub fn untrack_pipeline() {
        PIPELINE_GROUP.store(0, Ordering::SeqCst);
    }

    pub fn tracked_pipeline() -> Option<u32> {
        match PIPELINE_GROUP.load(Ordering::SeqCst) {
            0 => None,
            pid => Some(pid),
        }
    }

    /// Send `signal` to the tracked pipeline group, if any
    pub fn forward_to_pipeline(signal: ShutdownSignal) {
        let Some(pid) = Self::tracked_pipeline() else {
            return;
        };
        Logger::debug(&format!("Forwarding {:?} to pipeline group {}", signal, pid));
        signal_group(pid, signal);
    }
}

#[cfg(unix)]
fn signal_group(pid: u32, signal: ShutdownSignal) {
    let signum = match signal {
        ShutdownSignal::Interrupt => libc::SIGINT,
        ShutdownSignal::Terminate => libc::SIGTERM,
    };
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // Negative pid targets the whole group
    unsafe {
        libc::kill(-pgid, signum);
    }
}

#[cfg(not(unix))]
fn signal_group(_pid: u32, _signal: ShutdownSignal) {}

// Streams are registered before returning so a signal that lands before the
// task is first polled is still caught.
#[cfg(unix)]
fn listen<F>(on_signal: F) -> std::io::Result<()>
where
    F: Fn(ShutdownSignal) + Send + 'static,
{
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                Some(()) = interrupt.recv() => ShutdownSignal::Interrupt,
                Some(()) = terminate.recv() => ShutdownSignal::Terminate,
                else => break,
            };
            on_signal(received);
        }
    });

    Ok(())
}

#[cfg(not(unix))]
fn listen<F>(on_signal: F) -> std::io::Result<()>
where
    F: Fn(ShutdownSignal) + Send + 'static,
{
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            on_signal(ShutdownSignal::Interrupt);
        }
    });

    Ok(())
}
