use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use crate::TaskClass;

/// The ambient tokio runtime, or a lazily built shared one.
///
/// Returns `None` when no runtime is active and the shared one cannot be built.
fn runtime_handle() -> Option<Handle> {
	if let Ok(handle) = Handle::try_current() {
		return Some(handle);
	}

	static GLOBAL_RT: OnceLock<Option<Runtime>> = OnceLock::new();
	GLOBAL_RT
		.get_or_init(|| {
			Builder::new_multi_thread()
				.worker_threads(1)
				.thread_name("girderline-worker")
				.build()
				.inspect_err(|error| tracing::warn!(%error, "worker.runtime_unavailable"))
				.ok()
		})
		.as_ref()
		.map(|runtime| runtime.handle().clone())
}

/// Spawns blocking work with shared worker classification metadata.
///
/// Returns `None` when no runtime is available; the closure is dropped unrun.
pub fn spawn_blocking<F, R>(class: TaskClass, f: F) -> Option<JoinHandle<R>>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	let handle = runtime_handle()?;
	tracing::trace!(worker_class = class.as_str(), "worker.spawn_blocking");
	Some(handle.spawn_blocking(f))
}
