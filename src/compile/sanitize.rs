// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

/// Longest accepted description, counted in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 10_000;

// Word characters, whitespace, light punctuation and the arrow glyphs the extractor reads.
const DISALLOWED: &str = r#"[^\w\s\-.,!?()'"<>→]+"#;

static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();

/// Strips every character outside the accepted set. Never fails; the result may be empty.
pub fn sanitize_description(description: &str) -> String {
    let re =
        DISALLOWED_RE.get_or_init(|| Regex::new(DISALLOWED).expect("sanitizer regex compiles"));
    re.replace_all(description, "").into_owned()
}
