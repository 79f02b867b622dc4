// Copyright (c) 2026 handcv contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// src/core/mod.rs
pub mod background;
pub mod counter;
pub mod pipeline;
pub mod segmenter;
