//! Maud HTML template components for the web UI.
//!
//! - `layout`: Base page layout
//! - `button`: Submit buttons, with per-button form actions
//! - `alert`: Flash messages
//! - `card`: Video candidate cards and empty states
//! - `form`: Form elements and input components
//! - `table`: Plain tables

pub mod alert;
pub mod button;
pub mod card;
pub mod form;
pub mod layout;
pub mod table;

pub use alert::{Alert, AlertVariant};
pub use button::{Button, ButtonVariant};
pub use card::{EmptyState, VideoCard};
pub use form::{Form, FormGroup, Input, Radio, Select, SelectOption};
pub use layout::BaseLayout;
pub use table::Table;
