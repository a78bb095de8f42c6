// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Shared utilities

pub mod colors;
pub mod spinner;
