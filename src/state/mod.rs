//! Observable screen-state primitives.
//!
//! Every screen combines its data sources into a single immutable
//! snapshot through the same three pieces:
//!
//! ```text
//! data sources ──┐
//! LoadingCounter ─┼──→ combine-latest ──→ ViewState ──→ render
//! MessageQueue ──┘
//! ```
//!
//! - [`LoadingCounter`]: reference-counted busy signal
//! - [`MessageQueue`]: FIFO store of one-shot user-facing messages
//! - [`CombineLatest2`]/[`CombineLatest3`]: joins that re-emit on every
//!   input change using the latest value of the others
//! - [`ViewState`]: the snapshot handed to the presentation layer
//! - [`ScreenScope`]: teardown guard for a screen's spawned work
//!
//! All broadcasts are replay-latest: a new subscriber immediately sees
//! the current value, then every subsequent change.

mod combine;
mod loading;
mod message;
mod scope;
mod view_state;

pub use combine::{combine_view_state, state_in, CombineLatest2, CombineLatest3};
pub use loading::LoadingCounter;
pub use message::{Message, MessageId, MessageQueue};
pub use scope::ScreenScope;
pub use view_state::{ScreenData, ViewState};
