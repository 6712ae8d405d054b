// SPDX-License-Identifier: MPL-2.0
//! User interface building blocks shared by the application view.
//!
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`notifications`] - Toast notification system for user feedback

pub mod design_tokens;
pub mod notifications;
pub mod theming;
