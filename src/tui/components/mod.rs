//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: Top status bar with session time, status and notices
//! - `ModeTabs`: Mode selector with the active mode's description
//! - `Message`: A single chat bubble
//! - `LandingPage`: Welcome panel for an empty conversation
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: Single-line text input
//! - `MessageList`: Scrollable conversation view with layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into the
//! session controller. `ui::draw_ui` takes one `StateSnapshot` per frame and
//! hands each component the slice of it that it needs.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── mode_tabs.rs     (Mode selector)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! ├── landing.rs       (Welcome panel)
//! └── input_box.rs     (Text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod mode_tabs;
pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
pub use mode_tabs::{MODE_TABS_HEIGHT, ModeTabs};
