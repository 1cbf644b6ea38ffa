//! Pagination for song listings and song lyrics
//!
//! Both paginators are permissive: malformed or out-of-range input is
//! silently defaulted or clamped, never rejected. A bad `page` or `limit`
//! query parameter therefore never fails a request.

use std::num::IntErrorKind;

pub const DEFAULT_SONG_PAGE_SIZE: i64 = 10;
pub const MAX_SONG_PAGE_SIZE: i64 = 100;

pub const DEFAULT_TEXT_PAGE_SIZE: i64 = 2;

/// Separator between two stanzas of song lyrics.
pub const STANZA_SEPARATOR: &str = "\n\n";

/// Parse a query integer, saturating values that do not fit in an `i64`.
///
/// Anything that is not an optionally signed run of digits yields `None`.
fn parse_saturating(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Offset/limit pair applied to an id-ordered song query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Resolve raw `page` and `limit` query values into an offset/limit window.
///
/// - `page` that fails to parse or is `<= 0` becomes 1.
/// - `limit` that fails to parse or is `<= 0` becomes 10; above 100 it is
///   clamped to 100.
/// - Integers too large for `i64` count as `i64::MAX`, so an oversized
///   `limit` clamps to 100 and an oversized `page` lands past the end.
pub fn resolve_offset_limit(page: &str, limit: &str) -> PageWindow {
    let page = match parse_saturating(page) {
        Some(page) if page > 0 => page,
        _ => 1,
    };

    let limit = parse_saturating(limit).unwrap_or(0);
    let limit = if limit > MAX_SONG_PAGE_SIZE {
        MAX_SONG_PAGE_SIZE
    } else if limit <= 0 {
        DEFAULT_SONG_PAGE_SIZE
    } else {
        limit
    };

    PageWindow {
        offset: (page - 1).saturating_mul(limit),
        limit,
    }
}

/// Resolve the page and stanza count for a lyrics request.
///
/// Missing, unparsable or non-positive values fall back to page 1 and
/// two stanzas per page.
pub fn resolve_text_page(page: Option<&str>, limit: Option<&str>) -> (i64, i64) {
    let page = page
        .and_then(parse_saturating)
        .filter(|p| *p > 0)
        .unwrap_or(1);
    let limit = limit
        .and_then(parse_saturating)
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_TEXT_PAGE_SIZE);

    (page, limit)
}

/// Split lyrics into stanzas and return the stanzas on the requested page.
///
/// `start = (page - 1) * limit` and `end = start + limit` are each clamped to
/// the stanza count, so a page past the end yields an empty vector. Negative
/// bounds are clamped to zero.
pub fn paginate_text(full_text: &str, page: i64, limit: i64) -> Vec<&str> {
    let stanzas: Vec<&str> = full_text.split(STANZA_SEPARATOR).collect();
    let len = stanzas.len();

    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = start.saturating_add(limit);

    let start = clamp_index(start, len);
    let end = clamp_index(end, len);

    if start >= end {
        return Vec::new();
    }

    stanzas[start..end].to_vec()
}

fn clamp_index(index: i64, len: usize) -> usize {
    if index <= 0 {
        0
    } else {
        usize::try_from(index).map_or(len, |index| index.min(len))
    }
}
