use tokio::task::JoinHandle;

use crate::{TaskClass, spawn_blocking};

/// Outcome of [`retire`].
#[derive(Debug)]
pub enum Retirement {
	/// The value is being dropped on the blocking pool.
	Background(JoinHandle<()>),
	/// The value was dropped on the calling thread.
	Inline,
}

impl Retirement {
	pub fn is_background(&self) -> bool {
		matches!(self, Self::Background(_))
	}

	/// Waits until the value has been dropped.
	pub async fn finished(self) {
		if let Self::Background(handle) = self
			&& let Err(error) = handle.await
		{
			tracing::warn!(%error, "worker.retire_failed");
		}
	}
}

/// Drops `value` off the calling thread.
///
/// Falls back to dropping inline when no runtime is available. Callers must
/// already have detached `value` from anything readers can reach.
pub fn retire<T: Send + 'static>(what: &'static str, value: T) -> Retirement {
	match spawn_blocking(TaskClass::Background, move || drop(value)) {
		Some(handle) => {
			tracing::trace!(what, "worker.retire");
			Retirement::Background(handle)
		}
		None => {
			tracing::warn!(what, "worker.retire_inline");
			Retirement::Inline
		}
	}
}
