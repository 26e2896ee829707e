use colored::*;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. `RUST_LOG` overrides the default filter.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kiln=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn build_start(dir: &str, mode: &str) {
        info!("🔨 Kiln - Production Build");
        info!("📁 Project: {}", dir);
        info!("🎯 Mode: {}", mode);
    }

    pub fn build_complete(elapsed: std::time::Duration) {
        info!("✅ Build completed in {:.2?}", elapsed);
    }

    /// Advisory warning with an optional note rendered in italics.
    pub fn advisory(headline: &str, note: Option<&str>) {
        match note {
            Some(note) => warn!("⚠️  {} {}", headline, note.italic()),
            None => warn!("⚠️  {}", headline),
        }
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
