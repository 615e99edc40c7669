//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar showing endpoint and status
//! - `MessageView`: One transcript entry as a chat bubble
//! - `Spinner`: Activity indicator while a question is in flight
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: Question field with the Search affordance
//! - `MessageList`: Scrollable transcript with stick-to-bottom
//!
//! Components receive external data as props (struct fields or constructor
//! arguments), never by reaching into global state.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── spinner.rs
//! └── input_box.rs
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod spinner;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
