// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod builder;
pub mod operator;

pub use builder::Builder;
pub use operator::{Operator, OperatorKind};
