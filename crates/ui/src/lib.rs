//! View-model layer for the feedback console.
//!
//! Everything here is rendering-agnostic: the submission form state machine,
//! the star rating widget, the admin dashboard with its refresh loop, and
//! the derived display data the pages render from.

pub mod dashboard;
pub mod form;
pub mod poller;
pub mod rating;
pub mod view;
