//! Selection-driven re-rendering, last one wins.
//!
//! A view re-renders its toolbar whenever the selection changes, and the
//! render is async (collection resolution, matcher chains). Rapid selection
//! changes must not interleave: only the latest gesture's result may be
//! applied. [`SelectionSlot`] is the explicit single-flight-with-supersede
//! primitive for that — starting a new update cancels and stales the
//! outstanding one, whose result is then discarded on completion rather
//! than treated as an error.

use tokio_util::sync::CancellationToken;

/// Per-view slot tracking the current selection update.
#[derive(Debug, Default)]
pub struct SelectionSlot {
	generation: u64,
	current: CancellationToken,
}

impl SelectionSlot {
	/// Creates an idle slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new selection update, superseding any outstanding one.
	pub fn begin(&mut self) -> SelectionTicket {
		self.current.cancel();
		self.current = CancellationToken::new();
		self.generation += 1;
		SelectionTicket {
			generation: self.generation,
			token: self.current.clone(),
		}
	}

	/// Generation of the most recent update.
	pub fn generation(&self) -> u64 {
		self.generation
	}
}

/// Handle owned by one in-flight selection update.
#[derive(Debug, Clone)]
pub struct SelectionTicket {
	generation: u64,
	token: CancellationToken,
}

impl SelectionTicket {
	/// Generation this ticket belongs to.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// True once a newer update superseded this one; the holder discards
	/// its result instead of applying it.
	pub fn is_stale(&self) -> bool {
		self.token.is_cancelled()
	}

	/// Resolves when this update is superseded. Lets long renders bail out
	/// early instead of completing work nobody will apply.
	pub async fn superseded(&self) {
		self.token.cancelled().await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_update_stales_the_previous_one() {
		let mut slot = SelectionSlot::new();
		let first = slot.begin();
		assert!(!first.is_stale());

		let second = slot.begin();
		assert!(first.is_stale());
		assert!(!second.is_stale());
		assert!(second.generation() > first.generation());
	}

	#[tokio::test]
	async fn stale_result_is_discarded_not_an_error() {
		let mut slot = SelectionSlot::new();
		let first = slot.begin();

		// A slow render for the first selection...
		let render = tokio::spawn(async move {
			tokio::time::sleep(std::time::Duration::from_millis(10)).await;
			(first.generation(), first.is_stale())
		});

		// ...superseded by a second gesture before it completes.
		let second = slot.begin();

		let (generation, stale) = render.await.unwrap();
		assert!(stale);
		assert_eq!(generation, 1);
		assert!(!second.is_stale());
		assert_eq!(slot.generation(), 2);
	}

	#[tokio::test]
	async fn superseded_wakes_waiters() {
		let mut slot = SelectionSlot::new();
		let first = slot.begin();
		let waiter = tokio::spawn(async move {
			first.superseded().await;
			true
		});

		slot.begin();
		assert!(waiter.await.unwrap());
	}
}
