// SPDX-License-Identifier: MPL-2.0
//! `sales_studio` is a desktop client that sends product photos to a background
//! processing service and shows the processed result next to the original.
//!
//! The upload/result state machine lives in [`studio`] and does not depend on
//! the UI; [`service`] talks to the remote endpoints and [`app`] wires both into
//! an Iced application.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod service;
pub mod studio;
pub mod ui;
