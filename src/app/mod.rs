// SPDX-License-Identifier: MPL-2.0
//! Host-side plumbing: configuration, directories and durable preferences.

pub mod config;
pub mod paths;
pub mod storage;
