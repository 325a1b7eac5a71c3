// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max_len` chars, marking the cut with `…`.
pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    match max_len {
        0 => String::new(),
        _ if text_len(text) <= max_len => text.to_owned(),
        1 => "…".to_owned(),
        _ => {
            let mut out: String = text.chars().take(max_len - 1).collect();
            out.push('…');
            out
        }
    }
}

/// Left-aligns `text` in a field of `width` chars, truncating when it does not fit.
pub(crate) fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = truncate_with_ellipsis(text, width);
    let len = text_len(&out);
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}
