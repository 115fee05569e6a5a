// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::RawDescriptor;

/// Engines shipped with the crate, in priority order for extension defaults.
///
/// Each templated entry names modules provided by
/// [`ModuleCatalog::builtin`](crate::backends::ModuleCatalog::builtin).
pub fn builtin_descriptors() -> Vec<RawDescriptor> {
    vec![
        // Pass-through engines
        RawDescriptor::new("text", "", &[], &["txt", "text"]),
        RawDescriptor::new("html", "", &[], &["html", "htm"]),
        RawDescriptor::new("css", "", &[], &["css"]),
        // Templating
        RawDescriptor::new("moustache", "render(input, options)", &["moustache"], &["mustache", "tpl"])
            .synchronous(),
        RawDescriptor::new(
            "moustache-async",
            "render_async(input, options, callback)",
            &["moustache"],
            &["mustache"],
        )
        .asynchronous(),
        // Codecs and minification
        RawDescriptor::new("base64", "encode(input)", &["base64"], &["b64"]).synchronous(),
        RawDescriptor::new("base64-decode", "decode(input)", &["base64"], &["b64d"]).synchronous(),
        RawDescriptor::new("minify", "collapse(input)", &["minifier"], &["min"]).synchronous(),
        // Text shaping
        RawDescriptor::new("uppercase", "upper(input)", &["case"], &["upper"]).synchronous(),
        RawDescriptor::new("titlecase", "title(input)", &["case"], &["title"]).synchronous(),
        RawDescriptor::new("reverse", "(input)", &["reverse"], &["rev"]).synchronous(),
        RawDescriptor::new("word-count", "analyze(input).word_count", &["token-counter"], &["wc"])
            .synchronous(),
        RawDescriptor::new(
            "shout",
            "wrap($1.upper(input), options)",
            &["frame", "case"],
            &["shout"],
        )
        .synchronous(),
    ]
}
