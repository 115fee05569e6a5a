// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod base64_codec;
pub mod change_text_case;
pub mod moustache;
pub mod prefix_suffix_adder;
pub mod reverse_text;
pub mod token_counter;
pub mod whitespace_minifier;

pub use base64_codec::*;
pub use change_text_case::*;
pub use moustache::*;
pub use prefix_suffix_adder::*;
pub use reverse_text::*;
pub use token_counter::*;
pub use whitespace_minifier::*;
