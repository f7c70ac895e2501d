//! Plain-text rendering of the admin screen.

pub mod view;

pub use view::AdminView;
